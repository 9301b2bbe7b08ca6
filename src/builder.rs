// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: documents in, forward + inverted structures out.
//!
//! The builder walks the document stream once, in order. Each document gets
//! the next internal doc-id (its ordinal), a forward entry, and one posting
//! append per token occurrence; a single sort + dedup pass at the end
//! restores the strictly-ascending-unique invariant on every posting list.
//! The inverted map lives in a plain `HashMap` until `save` lays it out
//! term-sorted on disk.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::binary::{ForwardEntry, IndexReader, IndexWriter};
use crate::error::IndexError;
use crate::loader::Document;
use crate::set_ops::sort_dedup;
use crate::stemmer::stem;
use crate::tokenizer::{tokenize, MAX_TOKEN_LEN, MIN_TOKEN_LEN};

/// Aggregate statistics from the last build or load.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub total_documents: usize,
    /// Unique stems in the inverted index.
    pub total_terms: usize,
    /// Posting entries across all terms, after dedup.
    pub total_postings: usize,
    /// Mean stem length in bytes.
    pub avg_term_length: f64,
    /// Mean distinct-stem count per document.
    pub avg_doc_length: f64,
    pub indexing_time_ms: u64,
}

/// Builds, saves, and loads the in-memory index.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    forward: Vec<ForwardEntry>,
    inverted: HashMap<String, Vec<u32>>,
    stats: IndexStats,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a document stream in order, assigning consecutive internal
    /// doc-ids starting at 0. Replaces any previously built state.
    pub fn build<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = Document>,
    {
        let start = Instant::now();

        self.forward.clear();
        self.inverted.clear();

        for (ordinal, doc) in documents.into_iter().enumerate() {
            self.process_document(&doc, ordinal as u32);
        }

        for postings in self.inverted.values_mut() {
            sort_dedup(postings);
        }

        self.stats = self.collect_stats(start.elapsed().as_millis() as u64);
        info!(
            documents = self.stats.total_documents,
            terms = self.stats.total_terms,
            postings = self.stats.total_postings,
            elapsed_ms = self.stats.indexing_time_ms,
            "index built"
        );
    }

    fn process_document(&mut self, doc: &Document, doc_id: u32) {
        let mut entry = ForwardEntry {
            id: doc.id.clone(),
            url: doc.url.clone(),
            title: doc.title.clone(),
            doc_length: 0,
            // Reserved slot; the format stores the ordinal here.
            checksum: doc_id,
        };

        let tokenized = tokenize(&doc.content);

        let mut distinct = HashSet::new();
        for token in &tokenized.tokens {
            let stemmed = stem(token);
            if stemmed.len() < MIN_TOKEN_LEN || stemmed.len() > MAX_TOKEN_LEN {
                continue;
            }

            // Every occurrence appends; the final sort + dedup pass
            // collapses repeats within a document.
            self.inverted.entry(stemmed.clone()).or_default().push(doc_id);
            distinct.insert(stemmed);
        }

        entry.doc_length = distinct.len() as u32;
        self.forward.push(entry);
    }

    fn collect_stats(&self, elapsed_ms: u64) -> IndexStats {
        let total_term_chars: usize = self.inverted.keys().map(String::len).sum();
        let total_postings: usize = self.inverted.values().map(Vec::len).sum();
        let total_doc_terms: u64 = self.forward.iter().map(|e| u64::from(e.doc_length)).sum();

        let avg_term_length = if self.inverted.is_empty() {
            0.0
        } else {
            total_term_chars as f64 / self.inverted.len() as f64
        };
        let avg_doc_length = if self.forward.is_empty() {
            0.0
        } else {
            total_doc_terms as f64 / self.forward.len() as f64
        };

        IndexStats {
            total_documents: self.forward.len(),
            total_terms: self.inverted.len(),
            total_postings,
            avg_term_length,
            avg_doc_length,
            indexing_time_ms: elapsed_ms,
        }
    }

    /// Write the index to `path`. The write goes to a temporary sibling
    /// first and renames into place, so a failed save never leaves a
    /// partial index at the target path. In-memory state is untouched
    /// either way.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let tmp = path.with_extension("tmp");

        let result = self.write_to(&tmp);
        if let Err(e) = result {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }

        std::fs::rename(&tmp, path)?;
        info!(path = %path.display(), "index saved");
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), IndexError> {
        let mut writer = IndexWriter::create(path)?;
        writer.write_header(self.forward.len() as u32, self.inverted.len() as u32)?;
        writer.write_forward_index(&self.forward)?;

        let entries: Vec<(String, Vec<u32>)> = self
            .inverted
            .iter()
            .map(|(term, postings)| (term.clone(), postings.clone()))
            .collect();
        writer.write_inverted_index(&entries)?;
        writer.finish()
    }

    /// Replace in-memory state with the index at `path`. On failure the
    /// previous state is left as it was.
    pub fn load(&mut self, path: &Path) -> Result<(), IndexError> {
        let mut reader = IndexReader::open(path)?;
        let forward = reader.read_forward_index()?;
        let inverted_entries = reader.read_inverted_index()?;

        let mut inverted = HashMap::with_capacity(inverted_entries.len());
        for (term, postings) in inverted_entries {
            inverted.insert(term, postings);
        }

        self.forward = forward;
        self.inverted = inverted;

        let elapsed = self.stats.indexing_time_ms;
        self.stats = self.collect_stats(elapsed);
        info!(
            path = %path.display(),
            documents = self.stats.total_documents,
            terms = self.stats.total_terms,
            "index loaded"
        );
        Ok(())
    }

    pub fn statistics(&self) -> &IndexStats {
        &self.stats
    }

    pub fn forward_index(&self) -> &[ForwardEntry] {
        &self.forward
    }

    pub fn inverted_index(&self) -> &HashMap<String, Vec<u32>> {
        &self.inverted
    }

    /// Posting list for one stem; empty when the stem is not indexed.
    pub fn postings(&self, term: &str) -> &[u32] {
        self.inverted.get(term).map_or(&[], Vec::as_slice)
    }

    /// Resolve one document's metadata by internal id.
    pub fn document_info(&self, doc_id: u32) -> Result<&ForwardEntry, IndexError> {
        self.forward
            .get(doc_id as usize)
            .ok_or(IndexError::OutOfRange {
                doc_id,
                doc_count: self.forward.len() as u32,
            })
    }

    pub fn doc_count(&self) -> u32 {
        self.forward.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            url: format!("https://example.com/{id}"),
            title: title.to_string(),
            content: content.to_string(),
            source: None,
        }
    }

    fn fashion_corpus() -> Vec<Document> {
        vec![
            doc("d0", "Trends", "fashion design trends"),
            doc("d1", "Designer", "designer fashion"),
            doc("d2", "Accessories", "shoes and bags"),
        ]
    }

    #[test]
    fn test_build_postings() {
        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());

        assert_eq!(builder.postings("fashion"), [0, 1]);
        // designer stems to design, joining d1 to d0's posting list.
        assert_eq!(builder.postings("design"), [0, 1]);
        assert_eq!(builder.postings("shoe"), [2]);
        assert_eq!(builder.postings("bag"), [2]);
        // Stopword never indexed.
        assert!(builder.postings("and").is_empty());
        assert!(builder.postings("missing").is_empty());
    }

    #[test]
    fn test_ordinals_follow_input_order() {
        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());

        let forward = builder.forward_index();
        assert_eq!(forward.len(), 3);
        assert_eq!(forward[0].id, "d0");
        assert_eq!(forward[2].id, "d2");
        assert_eq!(forward[1].checksum, 1);
    }

    #[test]
    fn test_doc_length_counts_distinct_stems() {
        let mut builder = IndexBuilder::new();
        builder.build(vec![doc("r", "Repeats", "velvet velvet velvet coat")]);

        assert_eq!(builder.forward_index()[0].doc_length, 2);
        // Repeated stems collapse to one posting.
        assert_eq!(builder.postings("velvet"), [0]);
    }

    #[test]
    fn test_postings_sorted_unique() {
        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());

        for (term, postings) in builder.inverted_index() {
            assert!(
                postings.windows(2).all(|w| w[0] < w[1]),
                "postings for {term} not strictly ascending"
            );
            for &id in postings {
                assert!(id < builder.doc_count());
            }
        }
    }

    #[test]
    fn test_document_info_range_checked() {
        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());

        assert_eq!(builder.document_info(2).unwrap().id, "d2");
        assert!(matches!(
            builder.document_info(3),
            Err(IndexError::OutOfRange { doc_id: 3, doc_count: 3 })
        ));
    }

    #[test]
    fn test_stats() {
        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());

        let stats = builder.statistics();
        assert_eq!(stats.total_documents, 3);
        assert!(stats.total_terms >= 5);
        assert!(stats.avg_term_length > 0.0);
        assert!(stats.avg_doc_length > 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let mut builder = IndexBuilder::new();
        builder.build(Vec::new());

        assert_eq!(builder.doc_count(), 0);
        assert_eq!(builder.statistics().total_terms, 0);
    }

    #[test]
    fn test_rebuild_replaces_state() {
        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());
        builder.build(vec![doc("solo", "Solo", "linen")]);

        assert_eq!(builder.doc_count(), 1);
        assert!(builder.postings("fashion").is_empty());
        assert_eq!(builder.postings("linen"), [0]);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.idx");

        let mut builder = IndexBuilder::new();
        builder.build(fashion_corpus());
        builder.save(&path).unwrap();

        let mut loaded = IndexBuilder::new();
        loaded.load(&path).unwrap();

        assert_eq!(loaded.forward_index(), builder.forward_index());
        assert_eq!(loaded.inverted_index(), builder.inverted_index());
        assert_eq!(loaded.statistics().total_postings, builder.statistics().total_postings);
    }

    #[test]
    fn test_failed_save_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.idx");

        let mut builder = IndexBuilder::new();
        let mut bad = doc("x", "X", "velvet");
        bad.id = "x".repeat(300);
        builder.build(vec![bad]);

        let err = builder.save(&path).unwrap_err();
        assert!(matches!(err, IndexError::FormatLimitExceeded { .. }));
        assert!(!path.exists());
        assert!(!path.with_extension("tmp").exists());
        // In-memory structures stay queryable.
        assert_eq!(builder.postings("velvet"), [0]);
    }
}
