//! Canonical level recomputation for a merged step function.
//!
//! ## Purpose
//!
//! Partitioned pooling sums labels in an order that depends on the split
//! points, so pool levels of the merged step function can differ by a few
//! ULPs between partitionings. This module settles the final pools into one
//! representation that depends only on the normalized points.
//!
//! ## Design notes
//!
//! * **One summation order**: Every level is recomputed by a single
//!   left-to-right pass over the points the pool covers.
//! * **Ties joined**: Neighbouring pools whose recomputed levels are within
//!   [`TIE_ULPS`] relative ULPs are pooled together, and the joined level is
//!   extended over the absorbed points in the same left-to-right order.
//!   Pooling may have split a run of exactly equal means in one partitioning
//!   and merged it in another; joining makes both agree.
//!
//! ## Invariants
//!
//! * `pools` and `points` share one orientation and cover the same x-range.
//! * Output levels are strictly increasing, each by more than the tie margin.
//!
//! ## Non-goals
//!
//! * This module does not resolve ordinary violations; its input is already
//!   a PAVA fixed point up to rounding.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::ops::Range;
use num_traits::Float;

use crate::math::weighted::WeightedSum;
use crate::primitives::point::WeightedPoint;
use crate::primitives::pool::Pool;

/// Relative distance, in units of machine epsilon, under which two levels tie.
pub const TIE_ULPS: f64 = 16.0;

// A run of points and its left-to-right accumulator.
struct Segment<T> {
    span: Range<usize>,
    acc: WeightedSum<T>,
}

/// Recompute the levels of `pools` from `points` and join tied neighbours.
///
/// `points` are the grouped, oriented points the pools were formed from.
pub fn canonicalize<T: Float>(points: &[WeightedPoint<T>], pools: &[Pool<T>]) -> Vec<Pool<T>> {
    let margin = T::epsilon() * T::from(TIE_ULPS).unwrap_or_else(T::one);
    let mut stack: Vec<Segment<T>> = Vec::with_capacity(pools.len());

    let mut start = 0;
    for pool in pools {
        let end = start + points[start..].partition_point(|p| p.x <= pool.x_high);
        if end == start {
            continue;
        }

        let first = points[start];
        let mut acc = WeightedSum::of(first.y, first.weight);
        accumulate(&mut acc, &points[start + 1..end]);
        stack.push(Segment {
            span: start..end,
            acc,
        });
        start = end;

        while stack.len() >= 2 {
            let n = stack.len();
            let (lower, upper) = (stack[n - 2].acc.level, stack[n - 1].acc.level);
            let tie = margin * lower.abs().max(upper.abs());
            if upper > lower + tie {
                break;
            }
            if let Some(top) = stack.pop() {
                let below = &mut stack[n - 2];
                accumulate(&mut below.acc, &points[top.span.clone()]);
                below.span.end = top.span.end;
            }
        }
    }

    stack
        .into_iter()
        .map(|seg| Pool::spanning(points[seg.span.start].x, points[seg.span.end - 1].x, seg.acc))
        .collect()
}

#[inline]
fn accumulate<T: Float>(acc: &mut WeightedSum<T>, points: &[WeightedPoint<T>]) {
    for p in points {
        acc.add(WeightedSum::of(p.y, p.weight));
    }
}
