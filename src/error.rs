// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Unified error type for index and query operations.
//!
//! One enum covers the whole crate: codec failures, format-limit violations,
//! and query syntax errors. A term that is missing from the index is NOT an
//! error anywhere in this crate - lookups resolve it to an empty posting list.

use thiserror::Error;

/// All errors surfaced by the index builder, the binary codec, and the
/// query parser.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O failure during open/read/write/seek. Fatal to the current
    /// operation; the file handle is released on the way out.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the `FASH` magic number.
    #[error("invalid index format: bad magic 0x{found:08x}")]
    InvalidFormat { found: u32 },

    /// The file's format version is not one this build understands.
    #[error("unsupported index version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    /// A string is too long for its length-prefix field. Document ids use a
    /// 1-byte prefix, urls and titles a 2-byte prefix.
    #[error("{what} is {len} bytes, exceeds {max}-byte format limit")]
    FormatLimitExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// A document id past the end of the forward index.
    #[error("document id {doc_id} out of range (index holds {doc_count})")]
    OutOfRange { doc_id: u32, doc_count: u32 },

    /// The query text failed to parse: unexpected lexeme, missing `)`,
    /// or an empty factor position.
    #[error("malformed query: {0}")]
    MalformedQuery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let e = IndexError::FormatLimitExceeded {
            what: "document id",
            len: 300,
            max: 255,
        };
        assert!(e.to_string().contains("300"));
        assert!(e.to_string().contains("255"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: IndexError = io.into();
        assert!(matches!(e, IndexError::Io(_)));
    }
}
