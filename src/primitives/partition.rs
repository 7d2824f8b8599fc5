//! Configuration types for partitioned fitting.
//!
//! ## Purpose
//!
//! This module defines how an ordered sequence of grouped points is cut into
//! contiguous partitions and in which shape the per-partition results are
//! reduced back into one step function.
//!
//! ## Design notes
//!
//! * **Adjacency only**: Both reduction orders combine neighbouring partitions;
//!   a partition is never merged with a non-adjacent one.
//! * **Trait Implementation**: All types implement `Debug`, `Clone`, `Copy`, `PartialEq`, and `Eq`.
//!
//! ## Key concepts
//!
//! 1. **Splitting**: `n` points into `k` nearly equal contiguous ranges.
//! 2. **Reduction**: left fold or balanced pairwise tree over the ranges.
//!
//! ## Invariants
//!
//! * Ranges returned by [`split_ranges`] are non-empty, contiguous and cover `0..n`.
//!
//! ## Non-goals
//!
//! * This module does not perform the merging itself (handled by `algorithms::merge`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::ops::Range;

/// Shape of the reduction over per-partition step functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReductionOrder {
    /// Left fold: `((p0 + p1) + p2) + ...`.
    #[default]
    Sequential,

    /// Balanced tree: adjacent pairs are merged level by level.
    Balanced,
}

/// Split `n` items into at most `partitions` contiguous, nearly equal ranges.
///
/// Earlier ranges receive the remainder, so sizes differ by at most one.
/// Returns an empty vector when `n == 0`.
pub fn split_ranges(n: usize, partitions: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }

    let k = partitions.clamp(1, n);
    let base = n / k;
    let extra = n % k;

    let mut ranges = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let len = base + usize::from(i < extra);
        ranges.push(start..start + len);
        start += len;
    }

    ranges
}
