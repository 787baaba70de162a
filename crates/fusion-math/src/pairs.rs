// ─────────────────────────────────────────────────────────────────────
// FusionSim — Pair Indexing
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Flat enumeration of unordered pairs `(i, j)`, `i < j < n`.
//!
//! Pairs are ordered row-major: `(0,1), (0,2), …, (0,n-1), (1,2), …`.
//! A flat index `k ∈ [0, n(n-1)/2)` maps to exactly one pair, so a worker can
//! claim a contiguous `k` range without materialising the pair list.

use std::ops::Range;

/// Number of unordered pairs among `n` items.
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Flat index of the first pair in row `i`.
fn row_offset(i: u64, n: u64) -> u64 {
    i * (2 * n - i - 1) / 2
}

/// Flat index of pair `(i, j)`; requires `i < j < n`.
pub fn flat_index_from_pair(i: usize, j: usize, n: usize) -> u64 {
    debug_assert!(i < j && j < n);
    row_offset(i as u64, n as u64) + (j - i - 1) as u64
}

/// Invert a flat index into `(i, j)`.
///
/// Closed form `i = n - 2 - ⌊√(-8k + 4n(n-1) - 7)/2 - ½⌋`, followed by an
/// integer correction because the square root loses exactness for large `n`.
pub fn pair_from_flat_index(k: u64, n: usize) -> (usize, usize) {
    debug_assert!(k < pair_count(n));
    let nn = n as u64;
    let disc = (4 * nn * (nn - 1)) as f64 - 8.0 * k as f64 - 7.0;
    let guess = nn as f64 - 2.0 - (disc.max(0.0).sqrt() / 2.0 - 0.5).floor();
    let mut i = guess.clamp(0.0, (nn - 2) as f64) as u64;

    while i > 0 && row_offset(i, nn) > k {
        i -= 1;
    }
    while i + 1 < nn - 1 && row_offset(i + 1, nn) <= k {
        i += 1;
    }

    let j = k - row_offset(i, nn) + i + 1;
    (i as usize, j as usize)
}

/// Iterator over the pairs of a contiguous flat-index range.
#[derive(Debug, Clone)]
pub struct PairRange {
    n: usize,
    i: usize,
    j: usize,
    remaining: u64,
}

impl PairRange {
    pub fn new(n: usize, range: Range<u64>) -> Self {
        let end = range.end.min(pair_count(n));
        let start = range.start.min(end);
        let remaining = end - start;
        let (i, j) = if remaining > 0 {
            pair_from_flat_index(start, n)
        } else {
            (0, 0)
        };
        PairRange { n, i, j, remaining }
    }

    /// All pairs among `n` items.
    pub fn all(n: usize) -> Self {
        PairRange::new(n, 0..pair_count(n))
    }
}

impl Iterator for PairRange {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.remaining == 0 {
            return None;
        }
        let out = (self.i, self.j);
        self.remaining -= 1;
        self.j += 1;
        if self.j >= self.n {
            self.i += 1;
            self.j = self.i + 1;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let r = self.remaining as usize;
        (r, Some(r))
    }
}

impl ExactSizeIterator for PairRange {}

/// Split `[0, total)` into `parts` contiguous, near-equal ranges.
///
/// Always returns exactly `parts` ranges (some may be empty) so range `w`
/// belongs to worker `w`.
pub fn partition_range(total: u64, parts: usize) -> Vec<Range<u64>> {
    let parts = parts.max(1) as u64;
    let base = total / parts;
    let extra = total % parts;
    let mut out = Vec::with_capacity(parts as usize);
    let mut start = 0u64;
    for w in 0..parts {
        let len = base + u64::from(w < extra);
        out.push(start..start + len);
        start += len;
    }
    out
}
