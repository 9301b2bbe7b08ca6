// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document input: a JSON-backed source feeding the index builder.
//!
//! The corpus is one JSON file holding an ordered array of documents. Order
//! matters: the builder assigns internal doc-ids by position in this stream,
//! so the same file always produces the same index. Missing fields
//! deserialize to their defaults rather than failing the whole corpus.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::IndexError;

/// One input document. Consumed once by the builder, never mutated.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Optional origin tag, carried through untouched.
    #[serde(default)]
    pub source: Option<String>,
}

/// A document corpus stored as a JSON array on disk.
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the corpus in file order, optionally truncated to `limit`.
    pub fn fetch_documents(&self, limit: Option<usize>) -> Result<Vec<Document>, IndexError> {
        let file = File::open(&self.path)?;
        let mut documents: Vec<Document> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| IndexError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        if let Some(limit) = limit {
            documents.truncate(limit);
        }

        info!(
            path = %self.path.display(),
            count = documents.len(),
            "fetched documents"
        );
        Ok(documents)
    }
}
