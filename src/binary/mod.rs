// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary index format: a single self-describing, seekable file.
//!
//! All multi-byte integers are little-endian and natively packed. The header
//! carries the two region offsets, which the writer patches in after the
//! fact - a two-pass write is the simplest way to keep the forward region
//! monotone on disk without precomputing record sizes.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ HEADER (40 bytes)                                        │
//! │   magic: [u8; 4] = "FASH"                                │
//! │   version: u16 = 1                                       │
//! │   flags: u16 = 0 (reserved)                              │
//! │   doc_count: u32                                         │
//! │   term_count: u32                                        │
//! │   forward_offset: u64   (patched, byte 16)               │
//! │   inverted_offset: u64  (patched, byte 24)               │
//! │   reserved: [u8; 8] = 0                                  │
//! ├──────────────────────────────────────────────────────────┤
//! │ FORWARD INDEX                                            │
//! │   doc_count: u32                                         │
//! │   per document:                                          │
//! │     id_len: u8, id bytes                                 │
//! │     url_len: u16, url bytes                              │
//! │     title_len: u16, title bytes                          │
//! │     doc_length: u32 (distinct stems in the document)     │
//! │     checksum: u32 (reserved; holds the ordinal)          │
//! ├──────────────────────────────────────────────────────────┤
//! │ INVERTED INDEX (records sorted ascending by term bytes)  │
//! │   term_count: u32                                        │
//! │   per term:                                              │
//! │     term_len: u8, term bytes                             │
//! │     doc_count: u32                                       │
//! │     doc_ids: doc_count x u32 (strictly ascending)        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The reader validates magic and version up front, bulk-reads either
//! region on demand, and answers single-term lookups by binary-searching a
//! lazily built `(term, record offset)` directory so one query touches one
//! posting list, not the whole file.

mod reader;
mod writer;

pub use reader::IndexReader;
pub use writer::IndexWriter;

/// Magic bytes: "FASH" (little-endian u32 `0x48534146`).
pub const MAGIC: [u8; 4] = *b"FASH";

/// The only recognized format version.
pub const VERSION: u16 = 1;

/// Total size of the fixed header fields.
pub const HEADER_SIZE: u64 = 40;

/// Byte position of the patched forward-region offset.
pub(crate) const FORWARD_OFFSET_POS: u64 = 16;

/// Byte position of the patched inverted-region offset.
pub(crate) const INVERTED_OFFSET_POS: u64 = 24;

/// Longest string a 1-byte length prefix can carry (document ids, terms).
pub const MAX_SHORT_STR: usize = u8::MAX as usize;

/// Longest string a 2-byte length prefix can carry (urls, titles).
pub const MAX_LONG_STR: usize = u16::MAX as usize;

/// One forward-index record: metadata for a single document. The document's
/// internal id is this record's 0-based position in the forward region and
/// never appears in the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForwardEntry {
    /// External document id, at most 255 bytes.
    pub id: String,
    /// Source URL, at most 65535 bytes.
    pub url: String,
    /// Document title, at most 65535 bytes.
    pub title: String,
    /// Count of distinct normalized terms in the document.
    pub doc_length: u32,
    /// Reserved 32-bit slot; the writer stores the document ordinal here.
    pub checksum: u32,
}
