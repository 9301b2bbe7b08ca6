//! Shared test fixtures.

#![allow(dead_code)]

use fashex::{BooleanSearch, Document, IndexBuilder};

/// Create a document with a derived url.
pub fn make_doc(id: &str, title: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        url: format!("https://example.com/{id}"),
        title: title.to_string(),
        content: content.to_string(),
        source: None,
    }
}

/// The three-document corpus the search scenarios are written against.
pub fn fashion_corpus() -> Vec<Document> {
    vec![
        make_doc("d0", "Trends", "fashion design trends"),
        make_doc("d1", "Designer", "designer fashion"),
        make_doc("d2", "Accessories", "shoes and bags"),
    ]
}

/// Build an index over arbitrary content strings, ids assigned by position.
pub fn build_index(contents: &[&str]) -> IndexBuilder {
    let docs: Vec<Document> = contents
        .iter()
        .enumerate()
        .map(|(i, content)| make_doc(&format!("doc-{i}"), &format!("Doc {i}"), content))
        .collect();

    let mut builder = IndexBuilder::new();
    builder.build(docs);
    builder
}

/// Build the scenario corpus and wrap it in a searcher.
pub fn build_searcher() -> BooleanSearch {
    let mut builder = IndexBuilder::new();
    builder.build(fashion_corpus());
    BooleanSearch::new(builder)
}
