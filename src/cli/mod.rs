// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line front-end: build, inspect, and query indexes.
//!
//! ```bash
//! # Build the index from a JSON corpus
//! fashex --build --data corpus.json --index fashion_index.bin
//!
//! # One-shot query (positional argument)
//! fashex "fashion && (design || trend)"
//!
//! # Batch queries, one per line
//! fashex --file queries.txt --output results.txt
//!
//! # Interactive shell / index statistics
//! fashex --interactive
//! fashex --stats
//! ```
//!
//! A positional argument that names an existing file is treated as a query
//! file; anything else is the query itself. Exit code is 0 on success, 1 on
//! any surfaced error.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use crate::builder::IndexBuilder;
use crate::error::IndexError;
use crate::loader::JsonSource;
use crate::search::BooleanSearch;

/// Boolean search engine over static document corpora.
#[derive(Parser, Debug)]
#[command(name = "fashex", version, about)]
pub struct Cli {
    /// Build the index from the data file
    #[arg(short, long)]
    pub build: bool,

    /// Run an interactive query shell
    #[arg(short, long)]
    pub interactive: bool,

    /// Load the index and print its statistics
    #[arg(short, long)]
    pub stats: bool,

    /// Read queries from a file, one per line
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Save results to a file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Limit displayed results
    #[arg(short, long, value_name = "N", default_value_t = 50)]
    pub limit: usize,

    /// Index file path
    #[arg(long, value_name = "FILE", default_value = "fashion_index.bin")]
    pub index: PathBuf,

    /// JSON corpus consumed by --build
    #[arg(long, value_name = "FILE", default_value = "fashion_data_compact.json")]
    pub data: PathBuf,

    /// Query string, or a path to a query file
    #[arg(value_name = "QUERY", trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
}

/// Dispatch to the selected mode. Returns the process exit code.
pub fn run(cli: &Cli) -> i32 {
    let outcome = if cli.build {
        run_build(cli)
    } else if cli.stats {
        run_stats(cli)
    } else if cli.interactive {
        run_interactive(cli)
    } else if cli.file.is_some() || !cli.query.is_empty() {
        run_batch(cli)
    } else {
        eprintln!("Error: no operation specified (try --help)");
        return 1;
    };

    match outcome {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn run_build(cli: &Cli) -> Result<(), IndexError> {
    println!("Building index...");

    let source = JsonSource::new(&cli.data);
    let documents = source.fetch_documents(None)?;
    if documents.is_empty() {
        eprintln!("No documents found in {}", cli.data.display());
        return Err(IndexError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "empty corpus",
        )));
    }
    println!("Loaded {} documents", documents.len());

    let mut builder = IndexBuilder::new();
    builder.build(documents);
    builder.save(&cli.index)?;

    print_stats(&builder);
    Ok(())
}

fn run_stats(cli: &Cli) -> Result<(), IndexError> {
    println!("Loading index: {}", cli.index.display());

    let mut builder = IndexBuilder::new();
    builder.load(&cli.index)?;

    print_stats(&builder);
    Ok(())
}

fn run_interactive(cli: &Cli) -> Result<(), IndexError> {
    println!("Loading index: {}", cli.index.display());

    let mut builder = IndexBuilder::new();
    builder.load(&cli.index)?;
    let searcher = BooleanSearch::new(builder);

    println!();
    println!("=== Boolean Search Interactive Mode ===");
    println!(
        "Index loaded: {} documents",
        searcher.index().statistics().total_documents
    );
    println!("Type 'quit' or 'exit' to quit, 'help' for syntax");
    println!("{}", "=".repeat(60));

    let stdin = std::io::stdin();
    loop {
        print!("\nQuery: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if query == "quit" || query == "exit" {
            break;
        }
        if query == "help" {
            print_syntax_help();
            continue;
        }

        let start = Instant::now();
        let ids = searcher.search(query);
        let elapsed = start.elapsed().as_millis();

        println!("\nFound {} results in {} ms", ids.len(), elapsed);
        print_result_window(&searcher, &ids, cli.limit);

        if let Some(output) = &cli.output {
            append_result_summary(output, query, ids.len())?;
        }
    }

    Ok(())
}

fn run_batch(cli: &Cli) -> Result<(), IndexError> {
    println!("Loading index: {}", cli.index.display());

    let mut builder = IndexBuilder::new();
    builder.load(&cli.index)?;
    let searcher = BooleanSearch::new(builder);

    let queries = collect_queries(cli)?;
    println!("Processing {} queries...", queries.len());

    let batch_start = Instant::now();
    let batch_results = searcher.batch_search(&queries);
    let total_ms = batch_start.elapsed().as_millis();

    for (i, (query, ids)) in batch_results.iter().enumerate() {
        println!("\nQuery {}: \"{}\"", i + 1, query);
        println!("  Results: {}", ids.len());

        if !ids.is_empty() && cli.limit > 0 {
            let shown = searcher.format_results(ids, 0, cli.limit.min(5));
            for (j, row) in shown.iter().enumerate() {
                println!("    {}. {}", j + 1, row.title);
            }
            if ids.len() > shown.len() {
                println!("    ... and {} more", ids.len() - shown.len());
            }
        }
    }

    println!("\nBatch processing completed in {} ms", total_ms);
    if !queries.is_empty() {
        println!(
            "Average time per query: {} ms",
            total_ms / queries.len() as u128
        );
    }

    if let Some(output) = &cli.output {
        write_batch_results(output, &searcher, &batch_results)?;
        println!("Results saved to: {}", output.display());
    }

    Ok(())
}

/// Queries come from `--file`, or from the positional argument - which is
/// itself a file path when one exists by that name.
fn collect_queries(cli: &Cli) -> Result<Vec<String>, IndexError> {
    if let Some(file) = &cli.file {
        return read_query_lines(file);
    }

    let joined = cli.query.join(" ");
    if Path::new(&joined).is_file() {
        read_query_lines(Path::new(&joined))
    } else {
        Ok(vec![joined])
    }
}

fn read_query_lines(path: &Path) -> Result<Vec<String>, IndexError> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn print_result_window(searcher: &BooleanSearch, ids: &[u32], limit: usize) {
    if ids.is_empty() {
        return;
    }

    let formatted = searcher.format_results(ids, 0, limit);
    for (i, row) in formatted.iter().enumerate() {
        println!("\n{}. {}", i + 1, row.title);
        println!("    URL: {}", row.url);
        println!("    Doc ID: {}", row.doc_id);
    }

    if ids.len() > formatted.len() {
        println!(
            "\n... and {} more results (use --limit to show more)",
            ids.len() - formatted.len()
        );
    }
}

fn print_stats(builder: &IndexBuilder) {
    let stats = builder.statistics();
    println!("\nIndex Statistics:");
    println!("  Documents: {}", stats.total_documents);
    println!("  Unique terms: {}", stats.total_terms);
    println!("  Total postings: {}", stats.total_postings);
    println!("  Avg term length: {:.2} chars", stats.avg_term_length);
    println!("  Avg doc length: {:.2} terms", stats.avg_doc_length);
    println!("  Indexing time: {} ms", stats.indexing_time_ms);
}

fn print_syntax_help() {
    println!("\nBoolean Search Syntax:");
    println!("  fashion design               - implicit AND");
    println!("  fashion && design            - explicit AND");
    println!("  fashion || design            - OR");
    println!("  !shoes                       - NOT");
    println!("  (fashion || style) && !shoes - parentheses");
}

fn append_result_summary(path: &Path, query: &str, count: usize) -> Result<(), IndexError> {
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "Query: {query}")?;
    writeln!(file, "Results: {count}")?;
    writeln!(file)?;
    Ok(())
}

fn write_batch_results(
    path: &Path,
    searcher: &BooleanSearch,
    batch_results: &[(String, Vec<u32>)],
) -> Result<(), IndexError> {
    let mut file = fs::File::create(path)?;
    for (query, ids) in batch_results {
        writeln!(file, "Query: {query}")?;
        writeln!(file, "Results: {}", ids.len())?;

        for row in searcher.format_results(ids, 0, ids.len()) {
            writeln!(file, "  - {} ({})", row.title, row.url)?;
        }
        writeln!(file)?;
    }
    Ok(())
}
