// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Set algebra over sorted posting lists.
//!
//! Every posting list in this crate is a strictly ascending `u32` sequence
//! with no duplicates, which makes all three boolean operators linear
//! two-pointer merges. Each operator preserves the sorted-unique invariant
//! in its output, so results compose without re-sorting.

/// Intersection of two sorted-unique lists. Output length is at most
/// `min(|a|, |b|)`.
pub fn intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }

    result
}

/// Union of two sorted-unique lists, each element kept once.
pub fn union(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = Vec::with_capacity(a.len() + b.len());

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                result.push(b[j]);
                j += 1;
            }
        }
    }

    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// Everything in `universe` that is not in `a`. Both inputs sorted-unique;
/// `a` is expected to be a subset of `universe`.
pub fn complement(a: &[u32], universe: &[u32]) -> Vec<u32> {
    let mut result = Vec::with_capacity(universe.len().saturating_sub(a.len()));

    let (mut i, mut j) = (0, 0);
    while i < universe.len() && j < a.len() {
        match universe[i].cmp(&a[j]) {
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                result.push(universe[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => j += 1,
        }
    }

    result.extend_from_slice(&universe[i..]);
    result
}

/// Restore the sorted-unique invariant on a posting list built by blind
/// appends. Idempotent: a second call is a no-op.
pub fn sort_dedup(postings: &mut Vec<u32>) {
    postings.sort_unstable();
    postings.dedup();
}
