// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-pass index writer with offset patching.
//!
//! The header goes out first with zeroed region offsets. Each region write
//! notes its start position, streams its records, then seeks back and
//! patches the real offset into the header slot. The inverted region is
//! sorted by term bytes on the way out so the reader's term directory can
//! binary-search it.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use super::{
    ForwardEntry, FORWARD_OFFSET_POS, INVERTED_OFFSET_POS, MAGIC, MAX_LONG_STR, MAX_SHORT_STR,
    VERSION,
};
use crate::error::IndexError;

/// Streaming writer for one index file.
pub struct IndexWriter {
    file: BufWriter<File>,
}

impl IndexWriter {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, IndexError> {
        let file = File::create(path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    /// Write the fixed header with zeroed region offsets. Must be the first
    /// write; the region writers patch the offsets in later.
    pub fn write_header(&mut self, doc_count: u32, term_count: u32) -> Result<(), IndexError> {
        self.file.write_all(&MAGIC)?;
        self.file.write_all(&VERSION.to_le_bytes())?;
        self.file.write_all(&0u16.to_le_bytes())?; // flags (reserved)
        self.file.write_all(&doc_count.to_le_bytes())?;
        self.file.write_all(&term_count.to_le_bytes())?;
        self.file.write_all(&0u64.to_le_bytes())?; // forward_offset, patched
        self.file.write_all(&0u64.to_le_bytes())?; // inverted_offset, patched
        self.file.write_all(&[0u8; 8])?; // reserved tail
        Ok(())
    }

    /// Write the forward region in document-ordinal order and patch its
    /// offset into the header.
    pub fn write_forward_index(&mut self, entries: &[ForwardEntry]) -> Result<(), IndexError> {
        let offset = self.file.stream_position()?;

        self.file.write_all(&(entries.len() as u32).to_le_bytes())?;
        for entry in entries {
            write_short_str(&mut self.file, &entry.id, "document id")?;
            write_long_str(&mut self.file, &entry.url, "url")?;
            write_long_str(&mut self.file, &entry.title, "title")?;
            self.file.write_all(&entry.doc_length.to_le_bytes())?;
            self.file.write_all(&entry.checksum.to_le_bytes())?;
        }

        self.patch_offset(FORWARD_OFFSET_POS, offset)
    }

    /// Sort the inverted entries by term byte-string, write the region, and
    /// patch its offset into the header.
    pub fn write_inverted_index(
        &mut self,
        entries: &[(String, Vec<u32>)],
    ) -> Result<(), IndexError> {
        let offset = self.file.stream_position()?;

        let mut sorted: Vec<&(String, Vec<u32>)> = entries.iter().collect();
        sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        self.file.write_all(&(sorted.len() as u32).to_le_bytes())?;
        for (term, postings) in sorted {
            write_short_str(&mut self.file, term, "term")?;
            self.file.write_all(&(postings.len() as u32).to_le_bytes())?;
            for doc_id in postings {
                self.file.write_all(&doc_id.to_le_bytes())?;
            }
        }

        self.patch_offset(INVERTED_OFFSET_POS, offset)
    }

    /// Flush everything to disk. The file handle closes on drop either way;
    /// this surfaces any buffered write error instead of swallowing it.
    pub fn finish(mut self) -> Result<(), IndexError> {
        self.file.flush()?;
        Ok(())
    }

    fn patch_offset(&mut self, header_pos: u64, offset: u64) -> Result<(), IndexError> {
        let end = self.file.stream_position()?;
        self.file.seek(SeekFrom::Start(header_pos))?;
        self.file.write_all(&offset.to_le_bytes())?;
        self.file.seek(SeekFrom::Start(end))?;
        Ok(())
    }
}

fn write_short_str<W: Write>(w: &mut W, s: &str, what: &'static str) -> Result<(), IndexError> {
    if s.len() > MAX_SHORT_STR {
        return Err(IndexError::FormatLimitExceeded {
            what,
            len: s.len(),
            max: MAX_SHORT_STR,
        });
    }
    w.write_all(&[s.len() as u8])?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn write_long_str<W: Write>(w: &mut W, s: &str, what: &'static str) -> Result<(), IndexError> {
    if s.len() > MAX_LONG_STR {
        return Err(IndexError::FormatLimitExceeded {
            what,
            len: s.len(),
            max: MAX_LONG_STR,
        });
    }
    w.write_all(&(s.len() as u16).to_le_bytes())?;
    w.write_all(s.as_bytes())?;
    Ok(())
}
