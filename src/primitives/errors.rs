//! Error types for isotonic regression.
//!
//! ## Purpose
//!
//! This module defines the single error enum shared by every layer of the
//! crate. Fitting and prediction surface all failures synchronously through
//! `Result<_, IsotonicError>`; nothing is retried or swallowed internally.
//!
//! ## Design notes
//!
//! * **no_std**: `Display` is implemented by hand; `std::error::Error` is only
//!   implemented when the `std` feature is enabled.
//! * **Two classes**: invalid input (rejected before any pooling happens) and
//!   empty model (a prediction was attempted against a model with no boundaries).
//!
//! ## Invariants
//!
//! * Every variant carries enough context to locate the offending value.
//!
//! ## Non-goals
//!
//! * This module does not model transient or retriable failures.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

/// Errors produced while fitting or querying an isotonic model.
#[derive(Debug, Clone, PartialEq)]
pub enum IsotonicError {
    /// No observations were supplied.
    EmptyInput,

    /// `x` and `y` have different lengths.
    MismatchedInputs {
        /// Number of feature values.
        x_len: usize,
        /// Number of labels.
        y_len: usize,
    },

    /// The weight slice does not match the number of labels.
    MismatchedWeights {
        /// Number of weights.
        weights_len: usize,
        /// Number of labels.
        y_len: usize,
    },

    /// A feature, label, or weight is NaN or infinite.
    InvalidNumericValue(String),

    /// A weight is zero or negative.
    InvalidWeight {
        /// Position of the weight in the input.
        index: usize,
        /// The offending weight.
        weight: f64,
    },

    /// The requested number of partitions is zero.
    InvalidPartitions(usize),

    /// A chunk arrived out of global x-order.
    UnorderedPartition {
        /// Largest x already consumed.
        previous: f64,
        /// Smallest x of the rejected chunk.
        next: f64,
    },

    /// Model boundaries are not strictly increasing.
    UnorderedBoundaries {
        /// First index that breaks the ordering.
        index: usize,
    },

    /// Model predictions contradict the model's direction.
    NonMonotonePredictions {
        /// First index that breaks monotonicity.
        index: usize,
    },

    /// A builder parameter was configured more than once.
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// Prediction was requested from a model with no boundaries.
    EmptyModel,
}

impl IsotonicError {
    /// Returns `true` for errors raised while validating fit input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            IsotonicError::EmptyInput
                | IsotonicError::MismatchedInputs { .. }
                | IsotonicError::MismatchedWeights { .. }
                | IsotonicError::InvalidNumericValue(_)
                | IsotonicError::InvalidWeight { .. }
                | IsotonicError::InvalidPartitions(_)
                | IsotonicError::UnorderedPartition { .. }
        )
    }
}

impl fmt::Display for IsotonicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsotonicError::EmptyInput => write!(f, "Input arrays are empty"),
            IsotonicError::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {} points, y has {}", x_len, y_len)
            }
            IsotonicError::MismatchedWeights { weights_len, y_len } => write!(
                f,
                "Length mismatch: weights has {} values, y has {}",
                weights_len, y_len
            ),
            IsotonicError::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {}", s),
            IsotonicError::InvalidWeight { index, weight } => write!(
                f,
                "Invalid weight: weights[{}]={} (must be > 0)",
                index, weight
            ),
            IsotonicError::InvalidPartitions(p) => {
                write!(f, "Invalid partitions: {} (must be at least 1)", p)
            }
            IsotonicError::UnorderedPartition { previous, next } => write!(
                f,
                "Partition out of order: chunk starts at x={} but x={} was already consumed",
                next, previous
            ),
            IsotonicError::UnorderedBoundaries { index } => write!(
                f,
                "Boundaries must be strictly increasing: violation at index {}",
                index
            ),
            IsotonicError::NonMonotonePredictions { index } => write!(
                f,
                "Predictions are not monotone in the model direction: violation at index {}",
                index
            ),
            IsotonicError::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
            IsotonicError::EmptyModel => write!(f, "Model has no boundaries to predict from"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsotonicError {}
