//! Fitted isotonic model and its construction from pools.
//!
//! ## Purpose
//!
//! This module defines [`IsotonicModel`], the immutable result of a fit, and
//! the model builder that compresses the final pool sequence into parallel
//! `boundaries` / `predictions` arrays. Predictions are served directly from
//! the model by binary search and linear interpolation.
//!
//! ## Design notes
//!
//! * **Compression**: Each pool emits `(x_low, level)` and, unless it is a
//!   singleton, `(x_high, level)`. Neighbouring pools that settled at the
//!   same level are emitted as one segment, so the representation does not
//!   depend on how the data was partitioned. Interpolation inside a pool is
//!   flat and between pools blends levels.
//! * **Direction restored**: Antitonic fits pool negated labels; the builder
//!   negates levels back so prediction never needs the direction flag.
//! * **Immutable**: A model is only readable after construction, so
//!   concurrent predictions need no synchronization.
//! * Implements `Display` for a human-readable summary.
//!
//! ## Invariants
//!
//! * `boundaries.len() == predictions.len()`.
//! * Boundaries are strictly increasing.
//! * Predictions are non-decreasing when `isotonic`, non-increasing otherwise.
//!
//! ## Non-goals
//!
//! * This module does not define an on-disk format. The optional `serde`
//!   feature only derives the traits for the three stored fields.

// Feature-gated imports
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;

use crate::algorithms::interpolation::interpolate;
use crate::engine::validator::Validator;
use crate::primitives::errors::IsotonicError;
use crate::primitives::pool::Pool;

// Below this many queries a batch is evaluated on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_PREDICT_THRESHOLD: usize = 4096;

/// A fitted monotone function served by piecewise-linear interpolation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "ModelParts<T>",
        bound(deserialize = "T: Float + serde::Deserialize<'de>")
    )
)]
pub struct IsotonicModel<T> {
    boundaries: Vec<T>,
    predictions: Vec<T>,
    isotonic: bool,
}

impl<T: Float> IsotonicModel<T> {
    /// Rebuild a model from stored arrays.
    ///
    /// Fails if the arrays differ in length, contain non-finite values, have
    /// boundaries that are not strictly increasing, or predictions that
    /// contradict `isotonic`.
    pub fn new(boundaries: Vec<T>, predictions: Vec<T>, isotonic: bool) -> Result<Self, IsotonicError> {
        Validator::validate_model(&boundaries, &predictions, isotonic)?;
        Ok(Self {
            boundaries,
            predictions,
            isotonic,
        })
    }

    /// Compress a globally pooled sequence into a model.
    ///
    /// `pools` must come from pooling labels oriented for the isotonic case,
    /// i.e. negated when `isotonic` is `false`.
    pub fn from_pools(pools: &[Pool<T>], isotonic: bool) -> Self {
        let mut boundaries = Vec::with_capacity(pools.len() * 2);
        let mut predictions = Vec::with_capacity(pools.len() * 2);

        let sign = if isotonic { T::one() } else { -T::one() };
        let mut emit = |run: &Pool<T>| {
            boundaries.push(run.x_low);
            predictions.push(sign * run.level);
            if !run.is_singleton() {
                boundaries.push(run.x_high);
                predictions.push(sign * run.level);
            }
        };

        // Neighbouring pools at the same level form one flat segment.
        let mut iter = pools.iter();
        if let Some(first) = iter.next() {
            let mut run = *first;
            for pool in iter {
                if pool.level == run.level {
                    run.x_high = pool.x_high;
                } else {
                    emit(&run);
                    run = *pool;
                }
            }
            emit(&run);
        }

        Self {
            boundaries,
            predictions,
            isotonic,
        }
    }

    /// Boundary x-coordinates, strictly increasing.
    pub fn boundaries(&self) -> &[T] {
        &self.boundaries
    }

    /// Predictions paired with [`boundaries`](Self::boundaries).
    pub fn predictions(&self) -> &[T] {
        &self.predictions
    }

    /// `true` for a non-decreasing fit, `false` for a non-increasing one.
    pub fn is_isotonic(&self) -> bool {
        self.isotonic
    }

    /// Number of boundaries.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Returns `true` if the model has no boundaries.
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Predict the fitted value at `x`.
    ///
    /// Queries outside the boundary range are clamped to the end predictions;
    /// a query equal to a boundary returns the stored prediction exactly.
    pub fn predict(&self, x: T) -> Result<T, IsotonicError> {
        interpolate(&self.boundaries, &self.predictions, x).ok_or(IsotonicError::EmptyModel)
    }

    /// Predict every value in `xs`, preserving order.
    pub fn predict_batch(&self, xs: &[T]) -> Result<Vec<T>, IsotonicError>
    where
        T: Send + Sync,
    {
        if self.is_empty() {
            return Err(IsotonicError::EmptyModel);
        }

        #[cfg(feature = "parallel")]
        if xs.len() >= PARALLEL_PREDICT_THRESHOLD {
            return xs.par_iter().map(|&x| self.predict(x)).collect();
        }

        xs.iter().map(|&x| self.predict(x)).collect()
    }
}

impl<T: Float + Display> Display for IsotonicModel<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(
            f,
            "  Direction: {}",
            if self.isotonic { "Isotonic" } else { "Antitonic" }
        )?;
        writeln!(f, "  Boundaries: {}", self.boundaries.len())?;
        writeln!(f)?;

        writeln!(f, "Fitted Function:")?;
        writeln!(f, "{:>12} {:>14}", "Boundary", "Prediction")?;
        writeln!(f, "{:-<width$}", "", width = 27)?;

        // Show first 10 and last 10 rows if there are more than 20
        let n = self.boundaries.len();
        for idx in 0..n {
            if n > 20 && idx == 10 {
                writeln!(f, "{:>12}", "...")?;
            }
            if n > 20 && (10..n - 10).contains(&idx) {
                continue;
            }
            writeln!(
                f,
                "{:>12.4} {:>14.6}",
                self.boundaries[idx], self.predictions[idx]
            )?;
        }

        Ok(())
    }
}

/// Serialized form of a model, validated on deserialization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ModelParts<T> {
    boundaries: Vec<T>,
    predictions: Vec<T>,
    isotonic: bool,
}

#[cfg(feature = "serde")]
impl<T: Float> TryFrom<ModelParts<T>> for IsotonicModel<T> {
    type Error = IsotonicError;

    fn try_from(parts: ModelParts<T>) -> Result<Self, Self::Error> {
        IsotonicModel::new(parts.boundaries, parts.predictions, parts.isotonic)
    }
}
