// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index reader: header validation, bulk region reads, and seeked lookups.
//!
//! `open` reads and validates the header and nothing else. From there the
//! caller picks a path: `read_forward_index` / `read_inverted_index` pull a
//! whole region into memory (the load path), while `find_term` serves a
//! single posting list through the term directory (the query path). The
//! directory is built lazily on the first `find_term` by one scan of the
//! inverted region, recording where each term's record starts; after that a
//! lookup is a binary search plus one seek.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::{ForwardEntry, MAGIC, VERSION};
use crate::error::IndexError;

/// Random-access reader over one index file.
#[derive(Debug)]
pub struct IndexReader {
    file: BufReader<File>,
    doc_count: u32,
    term_count: u32,
    forward_offset: u64,
    inverted_offset: u64,
    forward_cache: Vec<ForwardEntry>,
    forward_cached: bool,
    /// `(term, absolute offset of the term record)`, ascending by term.
    term_directory: Vec<(String, u64)>,
    directory_built: bool,
}

impl IndexReader {
    /// Open `path` and validate its header.
    pub fn open(path: &Path) -> Result<Self, IndexError> {
        let mut file = BufReader::new(File::open(path)?);

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(IndexError::InvalidFormat {
                found: u32::from_le_bytes(magic),
            });
        }

        let version = read_u16(&mut file)?;
        if version != VERSION {
            return Err(IndexError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let _flags = read_u16(&mut file)?;
        let doc_count = read_u32(&mut file)?;
        let term_count = read_u32(&mut file)?;
        let forward_offset = read_u64(&mut file)?;
        let inverted_offset = read_u64(&mut file)?;
        let mut reserved = [0u8; 8];
        file.read_exact(&mut reserved)?;

        Ok(Self {
            file,
            doc_count,
            term_count,
            forward_offset,
            inverted_offset,
            forward_cache: Vec::new(),
            forward_cached: false,
            term_directory: Vec::new(),
            directory_built: false,
        })
    }

    pub fn doc_count(&self) -> u32 {
        self.doc_count
    }

    pub fn term_count(&self) -> u32 {
        self.term_count
    }

    /// Bulk-read the forward region, refreshing the in-memory cache.
    pub fn read_forward_index(&mut self) -> Result<Vec<ForwardEntry>, IndexError> {
        self.file.seek(SeekFrom::Start(self.forward_offset))?;
        let count = read_u32(&mut self.file)?;

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(ForwardEntry {
                id: read_short_str(&mut self.file)?,
                url: read_long_str(&mut self.file)?,
                title: read_long_str(&mut self.file)?,
                doc_length: read_u32(&mut self.file)?,
                checksum: read_u32(&mut self.file)?,
            });
        }

        self.forward_cache = entries.clone();
        self.forward_cached = true;
        Ok(entries)
    }

    /// Bulk-read the inverted region in its on-disk (term-sorted) order.
    pub fn read_inverted_index(&mut self) -> Result<Vec<(String, Vec<u32>)>, IndexError> {
        self.file.seek(SeekFrom::Start(self.inverted_offset))?;
        let count = read_u32(&mut self.file)?;

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let term = read_short_str(&mut self.file)?;
            let postings = read_postings(&mut self.file)?;
            entries.push((term, postings));
        }

        Ok(entries)
    }

    /// Look up one term's posting list without touching the rest of the
    /// region. A missing term is not an error: it resolves to an empty list.
    pub fn find_term(&mut self, term: &str) -> Result<Vec<u32>, IndexError> {
        if !self.directory_built {
            self.build_term_directory()?;
        }

        let slot = match self
            .term_directory
            .binary_search_by(|(t, _)| t.as_bytes().cmp(term.as_bytes()))
        {
            Ok(slot) => slot,
            Err(_) => return Ok(Vec::new()),
        };

        self.file.seek(SeekFrom::Start(self.term_directory[slot].1))?;
        let _term = read_short_str(&mut self.file)?;
        read_postings(&mut self.file)
    }

    /// Resolve a document's metadata by internal id, populating the forward
    /// cache on first use.
    pub fn get_document_info(&mut self, doc_id: u32) -> Result<ForwardEntry, IndexError> {
        if !self.forward_cached {
            self.read_forward_index()?;
        }

        self.forward_cache
            .get(doc_id as usize)
            .cloned()
            .ok_or(IndexError::OutOfRange {
                doc_id,
                doc_count: self.forward_cache.len() as u32,
            })
    }

    /// One scan of the inverted region, recording each term record's start
    /// offset and skipping over its postings.
    fn build_term_directory(&mut self) -> Result<(), IndexError> {
        self.file.seek(SeekFrom::Start(self.inverted_offset))?;
        let count = read_u32(&mut self.file)?;

        self.term_directory.clear();
        self.term_directory.reserve(count as usize);

        for _ in 0..count {
            let position = self.file.stream_position()?;
            let term = read_short_str(&mut self.file)?;
            let doc_count = read_u32(&mut self.file)?;
            self.file
                .seek(SeekFrom::Current(i64::from(doc_count) * 4))?;
            self.term_directory.push((term, position));
        }

        self.directory_built = true;
        Ok(())
    }
}

fn read_u16<R: Read>(r: &mut R) -> Result<u16, IndexError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> Result<u32, IndexError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> Result<u64, IndexError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_short_str<R: Read>(r: &mut R) -> Result<String, IndexError> {
    let mut len = [0u8; 1];
    r.read_exact(&mut len)?;
    read_str(r, len[0] as usize)
}

fn read_long_str<R: Read>(r: &mut R) -> Result<String, IndexError> {
    let len = read_u16(r)?;
    read_str(r, len as usize)
}

fn read_str<R: Read>(r: &mut R, len: usize) -> Result<String, IndexError> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    // Terms and metadata are written from Rust strings; lossy decoding
    // keeps a corrupted file from aborting a bulk load.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn read_postings<R: Read>(r: &mut R) -> Result<Vec<u32>, IndexError> {
    let count = read_u32(r)?;
    let mut postings = Vec::with_capacity(count as usize);
    for _ in 0..count {
        postings.push(read_u32(r)?);
    }
    Ok(postings)
}
