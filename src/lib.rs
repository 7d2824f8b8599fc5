//! # Isotonic: Monotone Regression for Rust
//!
//! Isotonic (non-decreasing) and antitonic (non-increasing) regression of
//! weighted one-dimensional observations, fitted with the Pool Adjacent
//! Violators Algorithm and served by piecewise-linear interpolation.
//!
//! ## What is isotonic regression?
//!
//! Given observations `(x_i, y_i, w_i)`, isotonic regression finds the
//! non-decreasing function `f` minimizing `sum(w_i * (y_i - f(x_i))^2)`.
//! The solution is a step function: runs of neighbouring observations that
//! would otherwise violate the ordering are pooled to their weighted mean.
//!
//! **Common applications:**
//! - Probability calibration of classifier scores
//! - Dose-response and monotone trend estimation
//! - Enforcing monotone constraints on noisy measurements
//!
//! **How it works:**
//!
//! 1. Duplicate `x` values are grouped to their weighted mean
//! 2. Points are sorted by `x` and optionally split into partitions
//! 3. Each partition is pooled independently (PAVA)
//! 4. Partition results are merged in x-order into one step function, and
//!    its levels are recomputed in a single fixed order
//! 5. Pools are compressed into `boundaries` / `predictions`
//!
//! ## Quick Start
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let y = vec![1.0, 3.0, 2.0, 4.0, 3.5, 5.0];
//!
//! // Build the model
//! let model = Isotonic::new()
//!     .isotonic(true)
//!     .adapter(Batch)
//!     .build()?
//!     .fit(&x, &y, None)?;
//!
//! // Predict
//! assert_eq!(model.predict(2.5)?, 2.5);
//! assert_eq!(model.predict(0.0)?, 1.0);
//!
//! println!("{}", model);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Direction: Isotonic
//!   Boundaries: 6
//!
//! Fitted Function:
//!     Boundary     Prediction
//! ---------------------------
//!       1.0000       1.000000
//!       2.0000       2.500000
//!       3.0000       2.500000
//!       4.0000       3.750000
//!       5.0000       3.750000
//!       6.0000       5.000000
//! ```
//!
//! ### Result and Error Handling
//!
//! Fitting returns `Result<IsotonicModel<T>, IsotonicError>` and prediction
//! returns `Result<T, IsotonicError>`. Empty input, mismatched lengths,
//! non-finite values, and non-positive weights are rejected before any
//! pooling happens, so a model is either complete or absent.
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let processor = Isotonic::new().adapter(Batch).build()?;
//!
//! match processor.fit(&[1.0, 2.0], &[1.0, 2.0], Some(&[1.0, 0.0][..])) {
//!     Ok(_) => unreachable!(),
//!     Err(e) => assert!(e.is_invalid_input()),
//! }
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter      | Default      | Adapter   | Description                                   |
//! |----------------|--------------|-----------|-----------------------------------------------|
//! | `isotonic`     | `true`       | all       | `false` (or `.antitonic()`) fits non-increasing |
//! | `partitions`   | `1`          | Batch     | contiguous runs pooled independently          |
//! | `reduction`    | `Sequential` | Batch     | `Sequential` fold or `Balanced` pairwise tree |
//! | `parallel`     | `false`      | Batch     | pool partitions on rayon (`parallel` feature) |
//!
//! Every parameter can be set once; setting one twice makes `build()` fail
//! with [`IsotonicError::DuplicateParameter`](prelude::IsotonicError::DuplicateParameter).
//!
//! ### Antitonic fits
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let model = Isotonic::new()
//!     .antitonic()
//!     .adapter(Batch)
//!     .build()?
//!     .fit(&[1.0, 2.0, 3.0], &[3.0, 1.0, 2.0], None)?;
//!
//! assert!(!model.is_isotonic());
//! assert_eq!(model.predictions(), &[3.0, 1.5, 1.5]);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ### Partitioned fits
//!
//! Splitting the data into partitions never changes the result, as long as
//! partitions are merged in x-order:
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let x: Vec<f64> = (1..=12).map(f64::from).collect();
//! let y = vec![1.0, 2.0, 3.0, 3.0, 1.0, 6.0, 7.0, 8.0, 11.0, 9.0, 10.0, 12.0];
//!
//! let single = Isotonic::new().adapter(Batch).build()?.fit(&x, &y, None)?;
//! let split = Isotonic::new()
//!     .partitions(4)
//!     .reduction(Balanced)
//!     .adapter(Batch)
//!     .build()?
//!     .fit(&x, &y, None)?;
//!
//! assert_eq!(single, split);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ### Streaming Adapter
//!
//! For data that arrives already range-partitioned, feed each partition in
//! x-order and finalize once:
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let mut processor = Isotonic::new().adapter(Streaming).build()?;
//!
//! processor.process_chunk(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0], None)?;
//! processor.process_chunk(&[3.0, 4.0], &[4.0, 5.0], None)?;
//!
//! let model = processor.finalize()?;
//! assert_eq!(model.predict(4.0)?, 5.0);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): standard library support; without it the crate builds on `alloc`.
//! - `parallel`: rayon-backed partition pooling, balanced reduction, and batch prediction.
//! - `serde`: `Serialize`/`Deserialize` for [`IsotonicModel`](prelude::IsotonicModel).
//! - `dev`: exposes the internal layers under `internals` for testing.
//!
//! ## References
//!
//! - Barlow, R. E., Bartholomew, D. J., Bremner, J. M. & Brunk, H. D. (1972). "Statistical Inference under Order Restrictions"
//! - Best, M. J. & Chakravarti, N. (1990). "Active set algorithms for isotonic regression; A unifying framework"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, weighted points, pools, and partition configuration.
mod primitives;

// Layer 2: Math - pure arithmetic.
//
// Contains weighted sums and weighted means.
mod math;

// Layer 3: Algorithms - core isotonic algorithms.
//
// Contains normalization, PAVA, adjacent merging, and interpolation.
mod algorithms;

// Layer 4: Engine - orchestration and results.
//
// Contains validation, the partitioned fit pipeline, and the fitted model.
mod engine;

// Layer 5: Adapters - execution mode adapters.
//
// Contains batch (in-memory) and streaming (x-ordered partitions) fitting.
mod adapters;

// High-level fluent API.
//
// Provides the `Isotonic` builder and the one-call `fit`.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard isotonic regression prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use isotonic_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Streaming},
        BatchIsotonic, ChunkSummary, IsotonicBuilder as Isotonic, IsotonicError, IsotonicModel,
        ReductionOrder::{Balanced, Sequential},
        StreamingIsotonic, WeightedPoint, fit,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
