//! Execution engine for partitioned isotonic fitting.
//!
//! ## Purpose
//!
//! This module orchestrates a complete fit: normalize the validated points,
//! cut them into contiguous x-ordered partitions, pool each partition
//! independently, reduce the partial step functions in x-order, and hand
//! the final pools to the model builder.
//!
//! ## Design notes
//!
//! * **Group once**: Duplicate `x` values are grouped before partitioning, so
//!   no group ever straddles two partitions.
//! * **Parallelism**: With the `parallel` feature and `parallel = true`, the
//!   per-partition pooling runs on `rayon`'s pool. Pooling is pure, so there
//!   is no shared mutable state between partitions.
//! * **Deterministic**: Merged pools are re-levelled canonically from the
//!   normalized points, so the result does not depend on the number of
//!   partitions, the split points, or the reduction order, even where the
//!   partial sums round differently.
//!
//! ## Key concepts
//!
//! * **Pipeline**: Store -> Partition -> Local Pooler -> Partition Merger ->
//!   Canonical Levels -> Model Builder.
//!
//! ## Invariants
//!
//! * Input points have already passed `Validator::validate_points`.
//! * Partitions are non-empty, contiguous, and merged only with neighbours.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not cancel a fit midway; a failed fit publishes nothing.

// Feature-gated imports
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::ops::Range;
use num_traits::Float;
use tracing::{debug, trace};

use crate::algorithms::canonical::canonicalize;
use crate::algorithms::merge;
use crate::algorithms::pava::pool_adjacent_violators;
use crate::algorithms::store;
use crate::engine::output::IsotonicModel;
use crate::primitives::partition::{ReductionOrder, split_ranges};
use crate::primitives::point::WeightedPoint;
use crate::primitives::pool::Pool;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a partitioned fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsotonicConfig {
    /// `true` fits a non-decreasing function, `false` a non-increasing one.
    pub isotonic: bool,

    /// Number of contiguous partitions to pool independently.
    pub partitions: usize,

    /// Shape of the reduction over partition results.
    pub reduction: ReductionOrder,

    /// Pool partitions concurrently (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for IsotonicConfig {
    fn default() -> Self {
        Self {
            isotonic: true,
            partitions: 1,
            reduction: ReductionOrder::default(),
            parallel: false,
        }
    }
}

/// Output from isotonic execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Globally pooled step function, oriented for the isotonic case.
    pub pools: Vec<Pool<T>>,

    /// Number of distinct `x` values after grouping.
    pub distinct_points: usize,

    /// Number of partitions actually pooled.
    pub partitions_used: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// Orchestrates normalization, partitioned pooling, and reduction.
pub struct IsotonicExecutor;

impl IsotonicExecutor {
    /// Run the pooling pipeline and return the final pools.
    pub fn run_with_config<T>(points: Vec<WeightedPoint<T>>, config: &IsotonicConfig) -> ExecutorOutput<T>
    where
        T: Float + Send + Sync,
    {
        let raw_points = points.len();
        let normalized = store::normalize(points, config.isotonic);
        let ranges = split_ranges(normalized.len(), config.partitions);

        debug!(
            raw_points,
            distinct_points = normalized.len(),
            partitions = ranges.len(),
            isotonic = config.isotonic,
            "starting isotonic fit"
        );

        let parts = Self::pool_partitions(&normalized, &ranges, config.parallel);
        let merged = merge::reduce(parts, config.reduction, config.parallel);
        let pools = canonicalize(&normalized, &merged);

        debug!(
            merged_pools = merged.len(),
            pools = pools.len(),
            "pooling finished"
        );

        ExecutorOutput {
            pools,
            distinct_points: normalized.len(),
            partitions_used: ranges.len(),
        }
    }

    /// Run the full pipeline and build the model.
    pub fn fit<T>(points: Vec<WeightedPoint<T>>, config: &IsotonicConfig) -> IsotonicModel<T>
    where
        T: Float + Send + Sync,
    {
        let output = Self::run_with_config(points, config);
        let model = IsotonicModel::from_pools(&output.pools, config.isotonic);

        debug!(
            distinct_points = output.distinct_points,
            partitions = output.partitions_used,
            boundaries = model.len(),
            "built isotonic model"
        );

        model
    }

    /// Pool every partition independently.
    fn pool_partitions<T>(
        points: &[WeightedPoint<T>],
        ranges: &[Range<usize>],
        parallel: bool,
    ) -> Vec<Vec<Pool<T>>>
    where
        T: Float + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        if parallel && ranges.len() > 1 {
            return ranges
                .par_iter()
                .map(|r| Self::pool_one(points, r))
                .collect();
        }

        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        ranges.iter().map(|r| Self::pool_one(points, r)).collect()
    }

    fn pool_one<T: Float>(points: &[WeightedPoint<T>], range: &Range<usize>) -> Vec<Pool<T>> {
        let pools = pool_adjacent_violators(points[range.clone()].iter().copied());
        trace!(
            start = range.start,
            end = range.end,
            pools = pools.len(),
            "pooled partition"
        );
        pools
    }
}
