//! Weighted observation type.
//!
//! ## Purpose
//!
//! This module defines [`WeightedPoint`], the canonical representation of one
//! observation (or the aggregate of all observations sharing the same `x`)
//! that flows from the store into the pooler.
//!
//! ## Invariants
//!
//! * `weight > 0` once a point has passed validation.
//! * Within one processing unit, points are ordered non-decreasing by `x`.

use num_traits::Float;

/// One observation with its feature value, label and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint<T> {
    /// Feature value.
    pub x: T,

    /// Label (the weighted mean label for grouped duplicates).
    pub y: T,

    /// Strictly positive weight (summed weight for grouped duplicates).
    pub weight: T,
}

impl<T: Float> WeightedPoint<T> {
    /// Create a new weighted point.
    #[inline]
    pub fn new(x: T, y: T, weight: T) -> Self {
        Self { x, y, weight }
    }

    /// Create a point with unit weight.
    #[inline]
    pub fn unit(x: T, y: T) -> Self {
        Self::new(x, y, T::one())
    }

    /// Return the same point with its label negated.
    #[inline]
    pub fn negated(self) -> Self {
        Self {
            y: -self.y,
            ..self
        }
    }
}

impl<T: Float> From<(T, T, T)> for WeightedPoint<T> {
    /// Build from an `(x, y, weight)` triple.
    fn from((x, y, weight): (T, T, T)) -> Self {
        Self::new(x, y, weight)
    }
}
