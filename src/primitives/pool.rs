//! Pool type and the mergeable-unit abstraction.
//!
//! ## Purpose
//!
//! This module defines [`Pool`], a maximal run of consecutive observations
//! collapsed to one constant level, and the [`Poolable`] trait that lets the
//! pooling routine accept either raw points or previously formed pools.
//!
//! ## Design notes
//!
//! * **One routine, two grains**: Raw points and pools both convert into a
//!   `Pool`, so the local pooler and the partition merger share a single
//!   violation-resolution loop.
//! * **Exact bookkeeping**: A pool carries its weighted label sum alongside
//!   the level derived from it. The level stays finite when the sum overflows
//!   (see `math::weighted`).
//!
//! ## Invariants
//!
//! * `x_low <= x_high`.
//! * `weight > 0`.
//! * `level == weighted_sum / weight` whenever `weighted_sum` is finite.
//!
//! ## Non-goals
//!
//! * This module does not decide when pools are merged (see `algorithms::pava`).

use num_traits::Float;

use crate::math::weighted::WeightedSum;
use crate::primitives::point::WeightedPoint;

/// A run of consecutive observations merged to one constant level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pool<T> {
    /// Smallest `x` absorbed by this pool.
    pub x_low: T,

    /// Largest `x` absorbed by this pool.
    pub x_high: T,

    /// Weighted mean label of the absorbed observations.
    pub level: T,

    /// Total weight of the absorbed observations.
    pub weight: T,

    /// Weighted label sum of the absorbed observations.
    pub weighted_sum: T,
}

impl<T: Float> Pool<T> {
    /// Create a singleton pool from one observation.
    #[inline]
    pub fn singleton(x: T, y: T, weight: T) -> Self {
        Self::spanning(x, x, WeightedSum::of(y, weight))
    }

    /// Create a pool spanning `[x_low, x_high]` from an accumulated sum.
    #[inline]
    pub fn spanning(x_low: T, x_high: T, acc: WeightedSum<T>) -> Self {
        Self {
            x_low,
            x_high,
            level: acc.level,
            weight: acc.weight,
            weighted_sum: acc.sum,
        }
    }

    /// Returns `true` if the pool covers a single `x` value.
    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.x_low == self.x_high
    }

    /// The pool's label sum, weight, and level as an accumulator.
    #[inline]
    pub fn weighted(&self) -> WeightedSum<T> {
        WeightedSum {
            sum: self.weighted_sum,
            weight: self.weight,
            level: self.level,
        }
    }

    /// Absorb the pool immediately to the right of this one.
    #[inline]
    pub fn absorb(&mut self, right: Pool<T>) {
        let mut acc = self.weighted();
        acc.add(right.weighted());

        *self = Pool::spanning(self.x_low.min(right.x_low), self.x_high.max(right.x_high), acc);
    }
}

/// A unit the pooling routine can push onto its stack.
pub trait Poolable<T: Float> {
    /// Convert this unit into a pool.
    fn into_pool(self) -> Pool<T>;
}

impl<T: Float> Poolable<T> for WeightedPoint<T> {
    #[inline]
    fn into_pool(self) -> Pool<T> {
        Pool::singleton(self.x, self.y, self.weight)
    }
}

impl<T: Float> Poolable<T> for Pool<T> {
    #[inline]
    fn into_pool(self) -> Pool<T> {
        self
    }
}
