// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search facade: loaded index in, ordered doc-id lists out.
//!
//! `BooleanSearch` owns the index it answers from. Queries run lex → parse →
//! evaluate; evaluation walks the expression tree bottom-up, resolving each
//! term to its posting list and combining with the set engine. Results are
//! always in ascending doc-id order - there is no relevance permutation,
//! and the `relevance` on formatted results is just `1 / (rank + 1)`.
//!
//! `search` absorbs malformed queries into an empty result with a logged
//! diagnostic; `search_with_stats` surfaces them and hands back per-call
//! timing on the side. There is no shared mutable statistics state, so a
//! facade behind a shared reference can serve queries from many threads.

use std::time::Instant;

use tracing::warn;

use crate::builder::IndexBuilder;
use crate::error::IndexError;
use crate::query::{lex, parse, QueryExpr};
use crate::set_ops::{complement, intersect, union};

/// Per-call query statistics, returned on the side by `search_with_stats`.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub query: String,
    pub result_count: usize,
    pub elapsed_ms: u64,
    pub lexemes_processed: usize,
}

/// One formatted result row.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub doc_id: u32,
    pub title: String,
    pub url: String,
    /// Synthetic rank hint, `1 / (rank + 1)`. Not a scoring function.
    pub relevance: f64,
}

/// Boolean query engine over one loaded index.
pub struct BooleanSearch {
    index: IndexBuilder,
    /// All internal doc-ids, ascending; the reference set for NOT.
    universe: Vec<u32>,
}

impl BooleanSearch {
    /// Take ownership of a built or loaded index.
    pub fn new(index: IndexBuilder) -> Self {
        let universe = (0..index.doc_count()).collect();
        Self { index, universe }
    }

    pub fn index(&self) -> &IndexBuilder {
        &self.index
    }

    /// Evaluate a query, converting any query error into an empty result
    /// with a diagnostic on the log.
    pub fn search(&self, query: &str) -> Vec<u32> {
        match self.search_with_stats(query) {
            Ok((ids, _)) => ids,
            Err(e) => {
                warn!(query, error = %e, "search failed");
                Vec::new()
            }
        }
    }

    /// Evaluate a query and report per-call statistics. An empty query is
    /// an empty result, not an error.
    pub fn search_with_stats(&self, query: &str) -> Result<(Vec<u32>, SearchStats), IndexError> {
        let start = Instant::now();

        let tokens = lex(query);
        let lexemes_processed = tokens.len();

        let ids = match parse(&tokens)? {
            Some(expr) => self.evaluate(&expr),
            None => Vec::new(),
        };

        let stats = SearchStats {
            query: query.to_string(),
            result_count: ids.len(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            lexemes_processed,
        };

        Ok((ids, stats))
    }

    /// Run queries sequentially, preserving input order.
    pub fn batch_search(&self, queries: &[String]) -> Vec<(String, Vec<u32>)> {
        queries
            .iter()
            .map(|query| (query.clone(), self.search(query)))
            .collect()
    }

    /// Resolve a window of doc-ids against the forward index. Out-of-range
    /// ids are skipped; empty titles fall back to a placeholder.
    pub fn format_results(
        &self,
        doc_ids: &[u32],
        offset: usize,
        limit: usize,
    ) -> Vec<SearchResult> {
        let forward = self.index.forward_index();
        let end = doc_ids.len().min(offset.saturating_add(limit));

        let mut results = Vec::new();
        for (rank, &doc_id) in doc_ids.iter().enumerate().take(end).skip(offset) {
            let Some(entry) = forward.get(doc_id as usize) else {
                continue;
            };

            results.push(SearchResult {
                doc_id,
                title: if entry.title.is_empty() {
                    "Untitled Document".to_string()
                } else {
                    entry.title.clone()
                },
                url: entry.url.clone(),
                relevance: 1.0 / (rank as f64 + 1.0),
            });
        }

        results
    }

    fn evaluate(&self, expr: &QueryExpr) -> Vec<u32> {
        match expr {
            QueryExpr::Term(term) => self.index.postings(term).to_vec(),
            QueryExpr::And(left, right) => {
                intersect(&self.evaluate(left), &self.evaluate(right))
            }
            QueryExpr::Or(left, right) => union(&self.evaluate(left), &self.evaluate(right)),
            QueryExpr::Not(inner) => complement(&self.evaluate(inner), &self.universe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Document;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            url: format!("https://example.com/{id}"),
            title: title.to_string(),
            content: content.to_string(),
            source: None,
        }
    }

    fn searcher() -> BooleanSearch {
        let mut builder = IndexBuilder::new();
        builder.build(vec![
            doc("d0", "Trends", "fashion design trends"),
            doc("d1", "", "designer fashion"),
            doc("d2", "Accessories", "shoes and bags"),
        ]);
        BooleanSearch::new(builder)
    }

    #[test]
    fn test_single_term() {
        assert_eq!(searcher().search("fashion"), [0, 1]);
    }

    #[test]
    fn test_conjunction() {
        let s = searcher();
        assert_eq!(s.search("fashion design"), [0, 1]);
        assert_eq!(s.search("fashion && shoe"), Vec::<u32>::new());
    }

    #[test]
    fn test_disjunction_and_negation() {
        let s = searcher();
        assert_eq!(s.search("shoe || bag"), [2]);
        assert_eq!(s.search("!shoe"), [0, 1]);
        assert_eq!(s.search("fashion || !design"), [0, 1, 2]);
    }

    #[test]
    fn test_grouping_precedence() {
        assert_eq!(searcher().search("(fashion || shoe) && !design"), [2]);
    }

    #[test]
    fn test_query_terms_not_stemmed() {
        // The index holds the stem `design`; the raw query term misses it.
        assert_eq!(searcher().search("designer"), Vec::<u32>::new());
        assert_eq!(searcher().search("DESIGN"), [0, 1]);
    }

    #[test]
    fn test_empty_and_malformed_queries() {
        let s = searcher();
        assert_eq!(s.search(""), Vec::<u32>::new());
        assert_eq!(s.search("   "), Vec::<u32>::new());
        // Malformed absorbs to empty rather than erroring.
        assert_eq!(s.search("(fashion"), Vec::<u32>::new());
        assert!(s.search_with_stats("(fashion").is_err());
    }

    #[test]
    fn test_results_ascending() {
        let ids = searcher().search("fashion || bag");
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stats_reported_per_call() {
        let s = searcher();
        let (ids, stats) = s.search_with_stats("fashion && design").unwrap();
        assert_eq!(stats.result_count, ids.len());
        assert_eq!(stats.query, "fashion && design");
        // fashion, AND, design, END
        assert_eq!(stats.lexemes_processed, 4);
    }

    #[test]
    fn test_batch_preserves_order() {
        let s = searcher();
        let queries = vec!["bag".to_string(), "fashion".to_string()];
        let results = s.batch_search(&queries);
        assert_eq!(results[0].0, "bag");
        assert_eq!(results[0].1, [2]);
        assert_eq!(results[1].1, [0, 1]);
    }

    #[test]
    fn test_format_results_window() {
        let s = searcher();
        let ids = s.search("fashion || shoe"); // [0, 1, 2]
        let rows = s.format_results(&ids, 1, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].doc_id, 1);
        assert_eq!(rows[0].title, "Untitled Document");
        assert!((rows[0].relevance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_results_skips_out_of_range() {
        let s = searcher();
        let rows = s.format_results(&[0, 99], 0, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].doc_id, 0);
    }
}
