//! Piecewise-linear evaluation of a fitted step function.
//!
//! ## Purpose
//!
//! This module answers point predictions from the compressed model
//! representation: parallel `boundaries` / `predictions` arrays.
//!
//! ## Design notes
//!
//! * **Binary search**: The bracketing pair is found in O(log n).
//! * **Exact boundaries**: A query equal to a boundary returns the stored
//!   prediction without any arithmetic.
//! * **Stateless**: Evaluation only borrows the arrays, so any number of
//!   queries can run concurrently.
//!
//! ## Key concepts
//!
//! * **Clamping**: `x <= boundaries[0]` yields `predictions[0]`;
//!   `x >= boundaries[last]` yields `predictions[last]`.
//! * **Linear interpolation**: `p_i + (x - b_i) / (b_{i+1} - b_i) * (p_{i+1} - p_i)`,
//!   rearranged when a difference would overflow.
//!
//! ## Invariants
//!
//! * `boundaries` is strictly increasing and has the same length as `predictions`.
//!
//! ## Non-goals
//!
//! * This module does not provide higher-order interpolation.
//! * This module does not validate the arrays (handled at model construction).

use num_traits::Float;

/// Evaluate the interpolated step function at `x`.
///
/// Returns `None` when the arrays are empty. A NaN query yields NaN.
pub fn interpolate<T: Float>(boundaries: &[T], predictions: &[T], x: T) -> Option<T> {
    let first = *boundaries.first()?;
    let last_idx = boundaries.len() - 1;

    if x.is_nan() {
        return Some(x);
    }
    if x <= first {
        return Some(predictions[0]);
    }
    if x >= boundaries[last_idx] {
        return Some(predictions[last_idx]);
    }

    // First boundary strictly above x; x is strictly inside the range so 1 <= upper <= last.
    let upper = boundaries.partition_point(|&b| b <= x);
    let lower = upper - 1;

    let b0 = boundaries[lower];
    if x == b0 {
        return Some(predictions[lower]);
    }

    let t = fraction(b0, boundaries[upper], x);
    Some(lerp(predictions[lower], predictions[upper], t))
}

// Position of `x` in `[b0, b1]`. Halving keeps a span like `[-MAX, MAX]` finite.
#[inline]
fn fraction<T: Float>(b0: T, b1: T, x: T) -> T {
    let span = b1 - b0;
    if span.is_finite() {
        return (x - b0) / span;
    }
    let two = T::one() + T::one();
    (x / two - b0 / two) / (b1 / two - b0 / two)
}

#[inline]
fn lerp<T: Float>(p0: T, p1: T, t: T) -> T {
    let diff = p1 - p0;
    if diff.is_finite() {
        p0 + t * diff
    } else {
        p0 * (T::one() - t) + p1 * t
    }
}
