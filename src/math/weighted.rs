//! Weighted mean arithmetic shared by grouping and pooling.
//!
//! ## Purpose
//!
//! This module provides the weighted-mean kernels the crate relies on. Both
//! the store (grouping duplicate `x`) and the pooler (merging violators)
//! accumulate the weighted label sum and the total weight, and only divide
//! when a level is needed.
//!
//! ## Design notes
//!
//! * **Sums, not means**: Carrying `sum(w * y)` instead of the running mean
//!   keeps the level exact whenever the sums are exactly representable.
//! * **Overflow fallback**: `w * y` can overflow for finite inputs. Each
//!   accumulator also carries its level, and once the sum stops being finite
//!   levels are combined as a weighted blend of the two means instead.
//!
//! ## Key concepts
//!
//! * **Level**: `sum(w_i * y_i) / sum(w_i)`.
//! * **Blend**: `l1 + (l2 - l1) * w2 / (w1 + w2)`, or
//!   `l1 * (1 - r) + l2 * r` when the difference itself overflows.
//!
//! ## Invariants
//!
//! * Weights are strictly positive, so the denominator never vanishes.
//! * The total weight is finite (enforced by `engine::validator`).
//! * `level` is finite whenever every label is.
//!
//! ## Non-goals
//!
//! * This module does not validate weights.

use num_traits::Float;

/// Running weighted sum of labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSum<T> {
    /// `sum(w_i * y_i)`; may be infinite when the labels are huge.
    pub sum: T,

    /// `sum(w_i)`.
    pub weight: T,

    /// The weighted mean of the accumulated labels.
    pub level: T,
}

impl<T: Float> WeightedSum<T> {
    /// Start a sum from a single labelled weight.
    #[inline]
    pub fn of(y: T, weight: T) -> Self {
        Self {
            sum: y * weight,
            weight,
            level: y,
        }
    }

    /// Add another weighted sum to this one.
    #[inline]
    pub fn add(&mut self, other: WeightedSum<T>) {
        let sum = self.sum + other.sum;
        let weight = self.weight + other.weight;

        self.level = if sum.is_finite() && weight.is_finite() {
            sum / weight
        } else {
            blend(self.level, self.weight, other.level, other.weight)
        };
        self.sum = sum;
        self.weight = weight;
    }

    /// The weighted mean represented by this sum.
    #[inline]
    pub fn mean(&self) -> T {
        self.level
    }
}

/// Weighted mean of two levels without forming `w * y`.
#[inline]
pub fn blend<T: Float>(l1: T, w1: T, l2: T, w2: T) -> T {
    let r = w2 / (w1 + w2);
    let diff = l2 - l1;
    if diff.is_finite() {
        l1 + diff * r
    } else {
        l1 * (T::one() - r) + l2 * r
    }
}
