// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean search over a static document corpus.
//!
//! fashex builds a persistent inverted index from a stream of documents and
//! answers boolean queries (AND / OR / NOT, with grouping) against it,
//! returning doc-id lists in ascending order.
//!
//! # Architecture
//!
//! ```text
//! build:   documents ─▶ tokenizer ─▶ stemmer ─▶ builder ─▶ binary codec ─▶ file
//! search:  file ─▶ binary codec ─▶ builder ─▶ facade
//!          query ─▶ lexer ─▶ parser ─▶ set engine ─▶ doc-id list
//! ```
//!
//! The on-disk format is a single little-endian file: a fixed header with
//! patched region offsets, a forward index (doc-id → metadata), and a
//! term-sorted inverted index (stem → posting list). See [`binary`] for the
//! byte layout. Posting lists are strictly ascending and duplicate-free
//! everywhere - construction enforces it, and the set engine preserves it
//! through every intersect / union / complement.
//!
//! # Usage
//!
//! ```no_run
//! use fashex::{BooleanSearch, IndexBuilder, JsonSource};
//!
//! # fn main() -> Result<(), fashex::IndexError> {
//! let docs = JsonSource::new("corpus.json").fetch_documents(None)?;
//!
//! let mut builder = IndexBuilder::new();
//! builder.build(docs);
//! builder.save("fashion_index.bin".as_ref())?;
//!
//! let searcher = BooleanSearch::new(builder);
//! let ids = searcher.search("fashion && (design || trend)");
//! for row in searcher.format_results(&ids, 0, 10) {
//!     println!("{} {}", row.doc_id, row.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod binary;
pub mod builder;
pub mod cli;
pub mod error;
pub mod loader;
pub mod query;
pub mod search;
pub mod set_ops;
pub mod stemmer;
pub mod tokenizer;

pub use binary::{ForwardEntry, IndexReader, IndexWriter};
pub use builder::{IndexBuilder, IndexStats};
pub use error::IndexError;
pub use loader::{Document, JsonSource};
pub use query::{lex, parse, QueryExpr, QueryToken};
pub use search::{BooleanSearch, SearchResult, SearchStats};
pub use stemmer::stem;
pub use tokenizer::{tokenize, tokens, TokenizationResult};
