// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte-level tokenizer for document text.
//!
//! Walks the input a byte at a time, accumulating lowercased alphanumeric
//! runs. Apostrophes survive inside a word (`don't`), hyphens survive when
//! followed by another letter (`state-of-the-art`). Twitter-style `@handles`
//! are skipped entirely, `#hashtags` are captured as their own tokens, and
//! the HTML entities `&amp;` / `&quot;` vanish. Everything else - including
//! non-ASCII bytes - is a separator.
//!
//! Candidate tokens then run a filter gauntlet: stopwords, `http`/`www.`
//! prefixes, and all-digit tokens are rejected; edge apostrophes and hyphens
//! are trimmed; survivors outside 2..=50 characters are dropped.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Instant;

/// Shortest token kept after cleanup.
pub const MIN_TOKEN_LEN: usize = 2;
/// Longest token kept after cleanup.
pub const MAX_TOKEN_LEN: usize = 50;

/// Fixed stopword set. Three-letter function words dominate because longer
/// stopwords rarely survive stemming as noise anyway.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "her", "was",
        "one", "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now",
        "old", "see", "two", "who", "boy", "did", "its", "let", "put", "say", "she", "too",
        "use", "way", "why", "yes", "yet",
    ]
    .into_iter()
    .collect()
});

/// Check if a word is a stopword.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Everything `tokenize` learned about one text buffer.
#[derive(Debug, Clone, Default)]
pub struct TokenizationResult {
    pub tokens: Vec<String>,
    /// Sum of the lengths of all emitted tokens, in bytes.
    pub total_chars: usize,
    pub elapsed_ms: u64,
}

/// Tokenize a whole buffer, collecting tokens and timing the pass.
pub fn tokenize(text: &str) -> TokenizationResult {
    let start = Instant::now();

    let mut result = TokenizationResult::default();
    for token in tokens(text) {
        result.total_chars += token.len();
        result.tokens.push(token);
    }

    result.elapsed_ms = start.elapsed().as_millis() as u64;
    result
}

/// Lazy token iterator over a text buffer.
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens {
        bytes: text.as_bytes(),
        pos: 0,
    }
}

/// Iterator state: a cursor into the raw bytes. The current partial token
/// never survives across `next` calls - when a token is emitted the cursor
/// is left on the boundary byte so its side effects (handle skipping,
/// hashtag capture, entity skipping) run on the following call.
pub struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut current = String::new();

        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];

            if is_token_byte(c, &current, self.bytes.get(self.pos + 1).copied()) {
                current.push(c.to_ascii_lowercase() as char);
                self.pos += 1;
                continue;
            }

            // Boundary byte. Emit the pending token first, leaving the
            // cursor on the boundary so it is re-examined next call.
            if !current.is_empty() {
                if let Some(token) = finish_token(current) {
                    return Some(token);
                }
                current = String::new();
                continue;
            }

            match c {
                b'@' => self.skip_handle(),
                b'#' => {
                    self.pos += 1;
                    if let Some(tag) = self.take_hashtag() {
                        return Some(tag);
                    }
                }
                b'&' if self.bytes[self.pos..].starts_with(b"&amp;") => self.pos += 5,
                b'&' if self.bytes[self.pos..].starts_with(b"&quot;") => self.pos += 6,
                _ => self.pos += 1,
            }
        }

        if current.is_empty() {
            None
        } else {
            finish_token(current)
        }
    }
}

impl Tokens<'_> {
    /// `@handle`: discard everything up to the next whitespace.
    fn skip_handle(&mut self) {
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// `#hashtag`: capture the alphanumeric-or-underscore run after the
    /// hash. Hashtags bypass the stopword and cleanup filters; only the
    /// minimum length applies.
    fn take_hashtag(&mut self) -> Option<String> {
        let mut tag = String::new();
        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];
            if c.is_ascii_alphanumeric() || c == b'_' {
                tag.push(c.to_ascii_lowercase() as char);
                self.pos += 1;
            } else {
                break;
            }
        }
        (tag.len() > 1).then_some(tag)
    }
}

/// Does this byte extend the current token?
fn is_token_byte(c: u8, current: &str, next: Option<u8>) -> bool {
    if c.is_ascii_alphanumeric() {
        return true;
    }

    // One apostrophe per word (don't, it's).
    if c == b'\'' && !current.is_empty() && !current.contains('\'') {
        return true;
    }

    // Hyphens join words only when a letter follows (state-of-the-art).
    if c == b'-' && !current.is_empty() && next.is_some_and(|n| n.is_ascii_alphanumeric()) {
        return true;
    }

    false
}

/// Filter and clean a candidate token. Filter order matters: the stopword
/// and pattern checks see the raw token, cleanup runs after, and the length
/// gate applies last.
fn finish_token(token: String) -> Option<String> {
    if should_filter(&token) {
        return None;
    }

    let cleaned = cleanup(token);
    if cleaned.len() < MIN_TOKEN_LEN || cleaned.len() > MAX_TOKEN_LEN {
        return None;
    }

    Some(cleaned)
}

fn should_filter(token: &str) -> bool {
    if is_stop_word(token) {
        return true;
    }

    if token.starts_with("http") || token.starts_with("www.") {
        return true;
    }

    token.bytes().all(|b| b.is_ascii_digit())
}

/// Trim edge apostrophes/hyphens and collapse `--` runs.
fn cleanup(token: String) -> String {
    let trimmed = token.trim_matches(|c| c == '\'' || c == '-');
    let mut cleaned = trimmed.to_string();
    while cleaned.contains("--") {
        cleaned = cleaned.replace("--", "-");
    }
    cleaned
}
