// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix-stripping stemmer, a simplified Porter variant.
//!
//! Five sequential passes over a lowercased word: plural stripping, two
//! rounds of derivational suffix mapping, a final suffix drop, and `e`/`ll`
//! cleanup. Words shorter than three characters pass through untouched.
//!
//! The measure `m` counts vowel→consonant transitions scanning left to
//! right, with vowels `aeiou` and `y` always a consonant. Step 2 probes a
//! twenty-entry suffix list but maps only five of them; unmapped matches
//! fall through to later candidates unchanged. Both quirks are part of the
//! index format's observable vocabulary, so they stay.

/// Words below this length are never stemmed.
const MIN_STEM_INPUT: usize = 3;

/// Step 2 candidates, probed in order. Only the first five map.
const STEP2_SUFFIXES: &[(&str, Option<&str>)] = &[
    ("ational", Some("ate")),
    ("tional", Some("tion")),
    ("enci", Some("ence")),
    ("anci", Some("ance")),
    ("izer", Some("ize")),
    ("abli", None),
    ("alli", None),
    ("entli", None),
    ("eli", None),
    ("ousli", None),
    ("ization", None),
    ("ation", None),
    ("ator", None),
    ("alism", None),
    ("iveness", None),
    ("fulness", None),
    ("ousness", None),
    ("aliti", None),
    ("iviti", None),
    ("biliti", None),
];

/// Step 3 candidates. `ical`, `ful`, `ness` probe but never map.
const STEP3_SUFFIXES: &[(&str, Option<&str>)] = &[
    ("icate", Some("ic")),
    ("ative", Some("")),
    ("alize", Some("al")),
    ("iciti", Some("ic")),
    ("ical", None),
    ("ful", None),
    ("ness", None),
];

/// Step 4 candidates, all dropped under `m > 1`. `ion` additionally
/// requires a preceding `s` or `t`.
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion",
    "ou", "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Reduce a lowercased word to its stem.
pub fn stem(word: &str) -> String {
    if word.len() < MIN_STEM_INPUT {
        return word.to_string();
    }

    let word = step1(word.to_string());
    let word = step2(word);
    let word = step3(word);
    let word = step4(word);
    step5(word)
}

/// Step 1: plurals. `sses` → `ss`, `ies` → `i`, `ss` stays, bare `s` drops.
fn step1(word: String) -> String {
    if let Some(prefix) = word.strip_suffix("sses") {
        return format!("{prefix}ss");
    }
    if let Some(prefix) = word.strip_suffix("ies") {
        return format!("{prefix}i");
    }
    if word.ends_with("ss") {
        return word;
    }
    if let Some(prefix) = word.strip_suffix('s') {
        return prefix.to_string();
    }
    word
}

/// Step 2: derivational suffixes under `m(prefix) > 0`.
fn step2(word: String) -> String {
    for (suffix, replacement) in STEP2_SUFFIXES {
        if let Some(prefix) = word.strip_suffix(suffix) {
            if measure(prefix) > 0 {
                if let Some(replacement) = replacement {
                    return format!("{prefix}{replacement}");
                }
            }
        }
    }
    word
}

/// Step 3: a second, shorter round of the same shape.
fn step3(word: String) -> String {
    for (suffix, replacement) in STEP3_SUFFIXES {
        if let Some(prefix) = word.strip_suffix(suffix) {
            if measure(prefix) > 0 {
                if let Some(replacement) = replacement {
                    return format!("{prefix}{replacement}");
                }
            }
        }
    }
    word
}

/// Step 4: drop residual suffixes under `m(prefix) > 1`.
fn step4(word: String) -> String {
    for suffix in STEP4_SUFFIXES {
        if let Some(prefix) = word.strip_suffix(suffix) {
            if measure(prefix) > 1 {
                if *suffix == "ion" {
                    if prefix.ends_with('s') || prefix.ends_with('t') {
                        return prefix.to_string();
                    }
                    // `ion` without s/t keeps probing later candidates.
                    continue;
                }
                return prefix.to_string();
            }
        }
    }
    word
}

/// Step 5: final `e` and `ll` cleanup.
fn step5(word: String) -> String {
    if let Some(prefix) = word.strip_suffix('e') {
        let m = measure(prefix);
        if m > 1 || (m == 1 && !ends_cvc(prefix)) {
            return prefix.to_string();
        }
    }

    if word.ends_with("ll") && measure(&word) > 1 {
        return word[..word.len() - 1].to_string();
    }

    word
}

#[inline]
fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Count vowel→consonant transitions, scanning left to right.
fn measure(stem: &str) -> usize {
    let mut count = 0;
    let mut prev_was_vowel = false;

    for &c in stem.as_bytes() {
        let vowel = is_vowel(c);
        if prev_was_vowel && !vowel {
            count += 1;
        }
        prev_was_vowel = vowel;
    }

    count
}

/// Do the last three characters form consonant-vowel-consonant, with the
/// final consonant not `w`, `x`, or `y`?
fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    if bytes.len() < 3 {
        return false;
    }

    let (c1, c2, c3) = (
        bytes[bytes.len() - 3],
        bytes[bytes.len() - 2],
        bytes[bytes.len() - 1],
    );

    !is_vowel(c1) && is_vowel(c2) && !is_vowel(c3) && !matches!(c3, b'w' | b'x' | b'y')
}
