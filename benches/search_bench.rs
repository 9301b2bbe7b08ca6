//! Benchmarks for index construction and boolean query evaluation.
//!
//! Simulates realistic corpus sizes:
//! - small:  ~50 articles, ~200 words each
//! - medium: ~500 articles, ~400 words each
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fashex::{BooleanSearch, Document, IndexBuilder};

/// Corpus size configurations
struct CorpusSize {
    name: &'static str,
    docs: usize,
    words_per_doc: usize,
}

const CORPUS_SIZES: &[CorpusSize] = &[
    CorpusSize {
        name: "small",
        docs: 50,
        words_per_doc: 200,
    },
    CorpusSize {
        name: "medium",
        docs: 500,
        words_per_doc: 400,
    },
];

/// Editorial vocabulary for plausible article content
const VOCABULARY: &[&str] = &[
    "fashion", "design", "trend", "collection", "runway", "fabric", "silk", "velvet",
    "tailoring", "vintage", "seasonal", "color", "pattern", "texture", "style", "designer",
    "accessory", "shoes", "bags", "jacket", "denim", "couture", "editorial", "campaign",
    "model", "photograph", "street", "minimal", "layering", "knitwear",
];

/// Deterministic pseudo-random content so runs are comparable.
fn make_corpus(docs: usize, words_per_doc: usize) -> Vec<Document> {
    (0..docs)
        .map(|i| {
            let mut content = String::new();
            let mut state = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
            for _ in 0..words_per_doc {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let word = VOCABULARY[(state >> 33) as usize % VOCABULARY.len()];
                content.push_str(word);
                content.push(' ');
            }
            Document {
                id: format!("article-{i}"),
                url: format!("https://example.com/articles/{i}"),
                title: format!("Article {i}"),
                content,
                source: None,
            }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in CORPUS_SIZES {
        let corpus = make_corpus(size.docs, size.words_per_doc);
        group.bench_with_input(BenchmarkId::from_parameter(size.name), &corpus, |b, corpus| {
            b.iter(|| {
                let mut builder = IndexBuilder::new();
                builder.build(black_box(corpus.clone()));
                builder
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let corpus = make_corpus(500, 400);
    let mut builder = IndexBuilder::new();
    builder.build(corpus);
    let searcher = BooleanSearch::new(builder);

    let queries = [
        ("term", "fashion"),
        ("and", "fashion && design"),
        ("or", "silk || velvet || denim"),
        ("not", "!runway"),
        ("mixed", "(fashion || style) && !vintage"),
    ];

    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, query| {
            b.iter(|| searcher.search(black_box(query)));
        });
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let corpus = make_corpus(50, 200);
    let mut builder = IndexBuilder::new();
    builder.build(corpus);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.bin");
    builder.save(&path).unwrap();

    c.bench_function("load", |b| {
        b.iter(|| {
            let mut loaded = IndexBuilder::new();
            loaded.load(black_box(&path)).unwrap();
            loaded
        });
    });
}

criterion_group!(benches, bench_build, bench_search, bench_roundtrip);
criterion_main!(benches);
