//! Merging of independently pooled, x-adjacent step functions.
//!
//! ## Purpose
//!
//! This module reconciles the step functions produced for neighbouring
//! partitions into one globally monotone step function, without revisiting
//! raw points. A full dataset is fitted by reducing the per-partition results
//! in x-order, either as a left fold or as a balanced tree of adjacent pairs.
//!
//! ## Design notes
//!
//! * **Reuses PAVA**: The left step function becomes the stack and the right
//!   one's pools are pushed as units, so the merge is the pooling loop run at
//!   a coarser grain.
//! * **Early exit**: Once a pushed right pool causes no merge, every later
//!   right pool is already at or above it, so the remainder is appended as is.
//! * **Parallelism**: With the `parallel` feature the balanced reduction
//!   merges the pairs of each tree level concurrently via `rayon`.
//!
//! ## Key concepts
//!
//! * **Junction**: the boundary between the last pool of `L` and the first of `R`.
//!   Repairing it may cascade arbitrarily far into either side.
//!
//! ## Invariants
//!
//! * `left` covers strictly smaller `x` than `right`.
//! * In exact arithmetic the result equals pooling the concatenated inputs in
//!   one pass; levels may differ by rounding (see `algorithms::canonical`).
//!
//! ## Non-goals
//!
//! * This module does not reorder partitions; callers must present them in x-order.

// Feature-gated imports
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;
use tracing::trace;

use crate::algorithms::pava::PoolStack;
use crate::primitives::partition::ReductionOrder;
use crate::primitives::pool::Pool;

// ============================================================================
// Pairwise Merge
// ============================================================================

/// Push `right`'s pools onto a stack already holding the left step function.
///
/// Returns the number of pool merges performed at and around the junction.
pub fn merge_into<T: Float>(stack: &mut PoolStack<T>, right: &[Pool<T>]) -> usize {
    let mut merges = 0;
    for (i, pool) in right.iter().enumerate() {
        let merged = stack.push(*pool);
        merges += merged;
        if merged == 0 {
            stack.extend_unchecked(&right[i + 1..]);
            break;
        }
    }

    trace!(
        right_pools = right.len(),
        merges,
        pools = stack.len(),
        "merged adjacent step functions"
    );

    merges
}

/// Merge two adjacent pooled step functions into one.
pub fn merge_adjacent<T: Float>(left: Vec<Pool<T>>, right: Vec<Pool<T>>) -> Vec<Pool<T>> {
    if left.is_empty() {
        return right;
    }

    let mut stack = PoolStack::from_pools(left);
    merge_into(&mut stack, &right);
    stack.into_pools()
}

// ============================================================================
// Reduction
// ============================================================================

/// Reduce per-partition step functions, given in x-order, into one.
pub fn reduce<T>(parts: Vec<Vec<Pool<T>>>, order: ReductionOrder, parallel: bool) -> Vec<Pool<T>>
where
    T: Float + Send + Sync,
{
    match order {
        ReductionOrder::Sequential => reduce_sequential(parts),
        ReductionOrder::Balanced => reduce_balanced(parts, parallel),
    }
}

/// Left fold over adjacent partitions.
pub fn reduce_sequential<T: Float>(parts: Vec<Vec<Pool<T>>>) -> Vec<Pool<T>> {
    let mut iter = parts.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut stack = PoolStack::from_pools(first);
    for right in iter {
        merge_into(&mut stack, &right);
    }
    stack.into_pools()
}

/// Balanced tree of adjacent pairwise merges.
///
/// An odd partition at the end of a level is carried to the next level
/// unchanged, so adjacency is preserved at every step.
pub fn reduce_balanced<T>(mut parts: Vec<Vec<Pool<T>>>, parallel: bool) -> Vec<Pool<T>>
where
    T: Float + Send + Sync,
{
    while parts.len() > 1 {
        parts = reduce_level(parts, parallel);
    }
    parts.pop().unwrap_or_default()
}

#[cfg(feature = "parallel")]
fn reduce_level<T>(parts: Vec<Vec<Pool<T>>>, parallel: bool) -> Vec<Vec<Pool<T>>>
where
    T: Float + Send + Sync,
{
    if parallel {
        parts
            .into_par_iter()
            .chunks(2)
            .map(merge_chunk)
            .collect()
    } else {
        reduce_level_sequential(parts)
    }
}

#[cfg(not(feature = "parallel"))]
fn reduce_level<T: Float>(parts: Vec<Vec<Pool<T>>>, _parallel: bool) -> Vec<Vec<Pool<T>>> {
    reduce_level_sequential(parts)
}

fn reduce_level_sequential<T: Float>(parts: Vec<Vec<Pool<T>>>) -> Vec<Vec<Pool<T>>> {
    let mut next = Vec::with_capacity(parts.len().div_ceil(2));
    let mut iter = parts.into_iter();
    while let Some(left) = iter.next() {
        match iter.next() {
            Some(right) => next.push(merge_adjacent(left, right)),
            None => next.push(left),
        }
    }
    next
}

#[cfg(feature = "parallel")]
fn merge_chunk<T: Float>(mut pair: Vec<Vec<Pool<T>>>) -> Vec<Pool<T>> {
    match (pair.pop(), pair.pop()) {
        (Some(right), Some(left)) => merge_adjacent(left, right),
        (Some(only), None) => only,
        _ => Vec::new(),
    }
}
