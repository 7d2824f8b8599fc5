//! Normalization of raw observations into canonical weighted points.
//!
//! ## Purpose
//!
//! This module turns raw `(x, y, weight)` triples into the ordered sequence
//! the pooler consumes: duplicates of the same `x` are collapsed into one
//! point, points are sorted ascending by `x`, and labels are negated when
//! fitting an antitonic model so that pooling can always run isotonic.
//!
//! ## Design notes
//!
//! * **Stable**: Sorting is stable, so duplicates are summed in input order.
//!   A lone observation keeps its label bit-for-bit.
//! * **Direction-agnostic downstream**: After negation the pooler and merger
//!   only ever see the non-decreasing case.
//!
//! ## Key concepts
//!
//! * **Grouping**: `y = sum(w_i * y_i) / sum(w_i)`, `weight = sum(w_i)`.
//!
//! ## Invariants
//!
//! * Output `x` values are strictly increasing.
//! * Output weights are the sums of the input weights of each group.
//!
//! ## Non-goals
//!
//! * This module does not validate input (handled by `engine::validator`).
//! * This module does not split the data into partitions.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::cmp::Ordering::Equal;
use num_traits::Float;

use crate::math::weighted::WeightedSum;
use crate::primitives::point::WeightedPoint;

/// Build weighted points from parallel slices.
///
/// Missing weights default to one. Slices are assumed to be validated.
pub fn collect_points<T: Float>(x: &[T], y: &[T], weights: Option<&[T]>) -> Vec<WeightedPoint<T>> {
    match weights {
        Some(w) => x
            .iter()
            .zip(y.iter())
            .zip(w.iter())
            .map(|((&xi, &yi), &wi)| WeightedPoint::new(xi, yi, wi))
            .collect(),
        None => x
            .iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| WeightedPoint::unit(xi, yi))
            .collect(),
    }
}

/// Sort points by `x` and collapse equal `x` values into one point.
pub fn group_by_x<T: Float>(mut points: Vec<WeightedPoint<T>>) -> Vec<WeightedPoint<T>> {
    points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Equal));

    let mut grouped: Vec<WeightedPoint<T>> = Vec::with_capacity(points.len());
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return grouped;
    };

    let mut current_x = first.x;
    let mut acc = WeightedSum::of(first.y, first.weight);

    for p in iter {
        if p.x == current_x {
            acc.add(WeightedSum::of(p.y, p.weight));
        } else {
            grouped.push(WeightedPoint::new(current_x, acc.mean(), acc.weight));
            current_x = p.x;
            acc = WeightedSum::of(p.y, p.weight);
        }
    }
    grouped.push(WeightedPoint::new(current_x, acc.mean(), acc.weight));

    grouped
}

/// Group, sort, and orient the points for pooling.
///
/// When `isotonic` is `false` every label is negated so the caller can run
/// the isotonic pooler and negate the fitted levels afterwards.
pub fn normalize<T: Float>(points: Vec<WeightedPoint<T>>, isotonic: bool) -> Vec<WeightedPoint<T>> {
    let grouped = group_by_x(points);
    if isotonic {
        grouped
    } else {
        grouped.into_iter().map(WeightedPoint::negated).collect()
    }
}
