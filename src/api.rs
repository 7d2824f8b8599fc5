//! High-level API for isotonic regression.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the fit direction and partitioning parameters and the
//! transition to an execution adapter (Batch or Streaming).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`IsotonicBuilder`] via `Isotonic::new()`.
//! 2. Chain configuration methods (`.isotonic()`, `.partitions()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchIsotonicBuilder;
use crate::adapters::streaming::StreamingIsotonicBuilder;

// Publicly re-exported types
pub use crate::adapters::batch::BatchIsotonic;
pub use crate::adapters::streaming::{ChunkSummary, StreamingIsotonic};
pub use crate::engine::output::IsotonicModel;
pub use crate::primitives::errors::IsotonicError;
pub use crate::primitives::partition::ReductionOrder;
pub use crate::primitives::point::WeightedPoint;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Streaming};
}

/// Fluent builder for configuring isotonic regression and execution modes.
#[derive(Debug, Clone, Default)]
pub struct IsotonicBuilder {
    /// Fit direction (`true` = non-decreasing).
    pub isotonic: Option<bool>,

    /// Number of contiguous partitions (Batch only).
    pub partitions: Option<usize>,

    /// Reduction shape over partition results (Batch only).
    pub reduction: Option<ReductionOrder>,

    /// Parallel execution hint (Batch only).
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl IsotonicBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A: IsotonicAdapter>(self, _adapter: A) -> A::Output {
        A::convert(self)
    }

    /// Set the fit direction: `true` for non-decreasing, `false` for non-increasing.
    pub fn isotonic(mut self, isotonic: bool) -> Self {
        if self.isotonic.is_some() {
            self.duplicate_param = Some("isotonic");
        }
        self.isotonic = Some(isotonic);
        self
    }

    /// Fit a non-increasing function. Shorthand for `.isotonic(false)`.
    pub fn antitonic(self) -> Self {
        self.isotonic(false)
    }

    /// Set the number of contiguous partitions pooled independently (Batch only).
    pub fn partitions(mut self, partitions: usize) -> Self {
        if self.partitions.is_some() {
            self.duplicate_param = Some("partitions");
        }
        self.partitions = Some(partitions);
        self
    }

    /// Set how partition results are reduced (Batch only).
    pub fn reduction(mut self, order: ReductionOrder) -> Self {
        if self.reduction.is_some() {
            self.duplicate_param = Some("reduction");
        }
        self.reduction = Some(order);
        self
    }

    /// Pool partitions concurrently; effective with the `parallel` feature (Batch only).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait IsotonicAdapter {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`IsotonicBuilder`] into a specialized execution builder.
    fn convert(builder: IsotonicBuilder) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl IsotonicAdapter for Batch {
    type Output = BatchIsotonicBuilder;

    fn convert(builder: IsotonicBuilder) -> Self::Output {
        let mut result = BatchIsotonicBuilder::default();

        if let Some(isotonic) = builder.isotonic {
            result.isotonic = isotonic;
        }
        if let Some(partitions) = builder.partitions {
            result.partitions = partitions;
        }
        if let Some(reduction) = builder.reduction {
            result.reduction = reduction;
        }
        if let Some(parallel) = builder.parallel {
            result.parallel = parallel;
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for chunked processing of x-ordered partitions.
#[derive(Debug, Clone, Copy)]
pub struct Streaming;

impl IsotonicAdapter for Streaming {
    type Output = StreamingIsotonicBuilder;

    fn convert(builder: IsotonicBuilder) -> Self::Output {
        let mut result = StreamingIsotonicBuilder::default();

        if let Some(isotonic) = builder.isotonic {
            result.isotonic = isotonic;
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Fit a model to `(x, y, weight)` triples in one call.
///
/// Equivalent to `Isotonic::new().isotonic(isotonic).adapter(Batch).build()?.fit_points(..)`.
pub fn fit<T, P>(points: &[P], isotonic: bool) -> Result<IsotonicModel<T>, IsotonicError>
where
    T: Float + Send + Sync,
    P: Copy + Into<WeightedPoint<T>>,
{
    let points: Vec<WeightedPoint<T>> = points.iter().map(|&p| p.into()).collect();

    IsotonicBuilder::new()
        .isotonic(isotonic)
        .adapter(Batch)
        .build()?
        .fit_points(&points)
}
