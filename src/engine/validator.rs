//! Input validation for isotonic regression configuration and data.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before any pooling
//! happens, and the consistency checks applied when a model is rebuilt from
//! stored arrays. A fit that fails here produces no model at all.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Finite Checks**: Ensures every `x`, `y`, and weight is finite (no NaN/Inf).
//! * **Positive Weights**: Every weight must be strictly greater than zero.
//! * **Model Consistency**: Boundaries strictly increasing, predictions monotone in the model direction.
//! * **Total Weight**: The weights of one fit must sum to a finite value.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, group, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

use num_traits::Float;

use crate::primitives::errors::IsotonicError;
use crate::primitives::point::WeightedPoint;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for isotonic regression configuration and input data.
///
/// Provides static methods that return `Result<(), IsotonicError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate parallel input slices for fitting.
    pub fn validate_inputs<T: Float>(
        x: &[T],
        y: &[T],
        weights: Option<&[T]>,
    ) -> Result<(), IsotonicError> {
        // Check 1: Non-empty arrays
        if x.is_empty() || y.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }

        // Check 2: Matching lengths
        if x.len() != y.len() {
            return Err(IsotonicError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if let Some(w) = weights {
            if w.len() != y.len() {
                return Err(IsotonicError::MismatchedWeights {
                    weights_len: w.len(),
                    y_len: y.len(),
                });
            }
        }

        // Check 3: All values finite
        Self::validate_finite(x, "x")?;
        Self::validate_finite(y, "y")?;

        // Check 4: Weights finite and strictly positive
        if let Some(w) = weights {
            Self::validate_finite(w, "weights")?;
            Self::validate_weights(w)?;

            // Check 5: Total weight representable
            Self::validate_total_weight(w.iter().fold(T::zero(), |acc, &wi| acc + wi))?;
        }

        Ok(())
    }

    /// Validate already assembled weighted points.
    pub fn validate_points<T: Float>(points: &[WeightedPoint<T>]) -> Result<(), IsotonicError> {
        if points.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }

        let mut total = T::zero();
        for (i, p) in points.iter().enumerate() {
            Self::validate_scalar(p.x, "x", i)?;
            Self::validate_scalar(p.y, "y", i)?;
            Self::validate_scalar(p.weight, "weights", i)?;
            if p.weight <= T::zero() {
                return Err(IsotonicError::InvalidWeight {
                    index: i,
                    weight: p.weight.to_f64().unwrap_or(f64::NAN),
                });
            }
            total = total + p.weight;
        }

        Self::validate_total_weight(total)
    }

    /// Validate that the weights of one fit sum to a finite value.
    pub fn validate_total_weight<T: Float>(total: T) -> Result<(), IsotonicError> {
        if !total.is_finite() {
            return Err(IsotonicError::InvalidNumericValue(format!(
                "sum(weights)={}",
                total.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str, index: usize) -> Result<(), IsotonicError> {
        if !val.is_finite() {
            return Err(IsotonicError::InvalidNumericValue(format!(
                "{}[{}]={}",
                name,
                index,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    fn validate_finite<T: Float>(vals: &[T], name: &str) -> Result<(), IsotonicError> {
        for (i, &val) in vals.iter().enumerate() {
            Self::validate_scalar(val, name, i)?;
        }
        Ok(())
    }

    fn validate_weights<T: Float>(weights: &[T]) -> Result<(), IsotonicError> {
        for (i, &w) in weights.iter().enumerate() {
            if w <= T::zero() {
                return Err(IsotonicError::InvalidWeight {
                    index: i,
                    weight: w.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the number of partitions for batch fitting.
    pub fn validate_partitions(partitions: usize) -> Result<(), IsotonicError> {
        if partitions == 0 {
            return Err(IsotonicError::InvalidPartitions(partitions));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), IsotonicError> {
        if let Some(param) = duplicate_param {
            return Err(IsotonicError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Model Validation
    // ========================================================================

    /// Validate stored model arrays before they are used for prediction.
    ///
    /// Empty arrays pass; predicting against them reports `EmptyModel`.
    pub fn validate_model<T: Float>(
        boundaries: &[T],
        predictions: &[T],
        isotonic: bool,
    ) -> Result<(), IsotonicError> {
        if boundaries.len() != predictions.len() {
            return Err(IsotonicError::MismatchedInputs {
                x_len: boundaries.len(),
                y_len: predictions.len(),
            });
        }

        Self::validate_finite(boundaries, "boundaries")?;
        Self::validate_finite(predictions, "predictions")?;

        if let Some(i) = boundaries.windows(2).position(|w| w[0] >= w[1]) {
            return Err(IsotonicError::UnorderedBoundaries { index: i + 1 });
        }

        let violation = if isotonic {
            predictions.windows(2).position(|w| w[0] > w[1])
        } else {
            predictions.windows(2).position(|w| w[0] < w[1])
        };
        if let Some(i) = violation {
            return Err(IsotonicError::NonMonotonePredictions { index: i + 1 });
        }

        Ok(())
    }
}
