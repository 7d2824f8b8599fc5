//! Batch adapter for in-memory isotonic fitting.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter. It takes the complete
//! dataset in memory, validates it, and runs the partitioned pooling
//! pipeline. Partitioning is internal: the data is grouped and sorted once,
//! then split into contiguous runs that are pooled independently (in
//! parallel with the `parallel` feature) and merged back in x-order.
//!
//! ## Design notes
//!
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Reusable**: A built processor can fit any number of datasets.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Input arrays x, y (and weights, if given) must have the same length.
//! * All values must be finite and all weights strictly positive.
//! * At least 1 data point is required.
//!
//! ## Non-goals
//!
//! * This adapter does not accept externally partitioned input (use streaming adapter).

use num_traits::Float;

use crate::algorithms::store::collect_points;
use crate::engine::executor::{IsotonicConfig, IsotonicExecutor};
use crate::engine::output::IsotonicModel;
use crate::engine::validator::Validator;
use crate::primitives::errors::IsotonicError;
use crate::primitives::partition::ReductionOrder;
use crate::primitives::point::WeightedPoint;

// ============================================================================
// Batch Isotonic Builder
// ============================================================================

/// Builder for batch isotonic processor.
#[derive(Debug, Clone)]
pub struct BatchIsotonicBuilder {
    /// Fit direction (`true` = non-decreasing)
    pub isotonic: bool,

    /// Number of contiguous partitions
    pub partitions: usize,

    /// Reduction shape over partition results
    pub reduction: ReductionOrder,

    /// Parallel execution hint
    pub parallel: bool,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl Default for BatchIsotonicBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchIsotonicBuilder {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            isotonic: true,
            partitions: 1,
            reduction: ReductionOrder::default(),
            parallel: false,
            duplicate_param: None,
        }
    }

    /// Set the fit direction.
    pub fn isotonic(mut self, isotonic: bool) -> Self {
        self.isotonic = isotonic;
        self
    }

    /// Set the number of partitions pooled independently.
    pub fn partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    /// Set the reduction shape over partition results.
    pub fn reduction(mut self, order: ReductionOrder) -> Self {
        self.reduction = order;
        self
    }

    /// Pool partitions concurrently when the `parallel` feature is enabled.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchIsotonic, IsotonicError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_partitions(self.partitions)?;

        Ok(BatchIsotonic {
            config: IsotonicConfig {
                isotonic: self.isotonic,
                partitions: self.partitions,
                reduction: self.reduction,
                parallel: self.parallel,
            },
        })
    }
}

// ============================================================================
// Batch Isotonic Processor
// ============================================================================

/// Batch isotonic processor.
#[derive(Debug, Clone)]
pub struct BatchIsotonic {
    config: IsotonicConfig,
}

impl BatchIsotonic {
    /// Fit a model to parallel slices; `weights` defaults to all ones.
    pub fn fit<T>(&self, x: &[T], y: &[T], weights: Option<&[T]>) -> Result<IsotonicModel<T>, IsotonicError>
    where
        T: Float + Send + Sync,
    {
        Validator::validate_inputs(x, y, weights)?;

        let points = collect_points(x, y, weights);
        Ok(IsotonicExecutor::fit(points, &self.config))
    }

    /// Fit a model to already assembled weighted points.
    pub fn fit_points<T>(&self, points: &[WeightedPoint<T>]) -> Result<IsotonicModel<T>, IsotonicError>
    where
        T: Float + Send + Sync,
    {
        Validator::validate_points(points)?;

        Ok(IsotonicExecutor::fit(points.to_vec(), &self.config))
    }

    /// The resolved execution configuration.
    pub fn config(&self) -> &IsotonicConfig {
        &self.config
    }
}
