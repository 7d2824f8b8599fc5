//! Streaming adapter for externally partitioned isotonic fitting.
//!
//! ## Purpose
//!
//! This module provides the streaming execution adapter for data that
//! arrives as a sequence of partitions already laid out in global x-order,
//! e.g. from a distributed job that range-partitions its input. Each chunk
//! is pooled on its own and merged into the running step function, so raw
//! points are never revisited.
//!
//! ## Design notes
//!
//! * **Held-back group**: The last x-group of every chunk is buffered until
//!   the next chunk arrives, so equal `x` values split across a chunk
//!   boundary are grouped before they are pooled.
//! * **Merging**: Chunk results are folded into one stack with the partition
//!   merger; the fold is left-to-right, which preserves adjacency.
//! * **Rounding**: Raw points are not retained, so levels are not re-levelled
//!   canonically as in the batch executor. The model agrees with a batch fit
//!   only up to rounding unless the weighted label sums are exactly
//!   representable (e.g. integer data).
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Chunked Processing**: `process_chunk` per partition, `finalize` once.
//! * **Abort**: `reset` discards every partial result.
//!
//! ## Invariants
//!
//! * Chunks are presented in x-order: a chunk may start at the last consumed
//!   `x` but never below it.
//! * No model is observable until `finalize` succeeds.
//!
//! ## Non-goals
//!
//! * This adapter does not reorder chunks that arrive out of x-order.
//! * This adapter does not provide incremental predictions before `finalize`.

use core::fmt::Debug;
use num_traits::Float;
use tracing::{debug, trace};

use crate::algorithms::merge::merge_into;
use crate::algorithms::pava::{PoolStack, pool_adjacent_violators};
use crate::algorithms::store::{collect_points, normalize};
use crate::engine::output::IsotonicModel;
use crate::engine::validator::Validator;
use crate::math::weighted::WeightedSum;
use crate::primitives::errors::IsotonicError;
use crate::primitives::point::WeightedPoint;

// ============================================================================
// Streaming Isotonic Builder
// ============================================================================

/// Builder for streaming isotonic processor.
#[derive(Debug, Clone)]
pub struct StreamingIsotonicBuilder {
    /// Fit direction (`true` = non-decreasing)
    pub isotonic: bool,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl Default for StreamingIsotonicBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingIsotonicBuilder {
    /// Create a new streaming builder with default parameters.
    fn new() -> Self {
        Self {
            isotonic: true,
            duplicate_param: None,
        }
    }

    /// Set the fit direction.
    pub fn isotonic(mut self, isotonic: bool) -> Self {
        self.isotonic = isotonic;
        self
    }

    /// Build the streaming processor.
    pub fn build<T: Float>(self) -> Result<StreamingIsotonic<T>, IsotonicError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Ok(StreamingIsotonic {
            isotonic: self.isotonic,
            stack: PoolStack::new(),
            pending: None,
            weight_seen: T::zero(),
            points_seen: 0,
            chunks_seen: 0,
        })
    }
}

// ============================================================================
// Streaming Isotonic Processor
// ============================================================================

/// Progress report returned after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSummary {
    /// Raw observations in the chunk just processed.
    pub points: usize,

    /// Pools currently held in the running step function.
    pub pools: usize,
}

/// Streaming isotonic processor for x-ordered partitions.
#[derive(Debug, Clone)]
pub struct StreamingIsotonic<T> {
    isotonic: bool,
    stack: PoolStack<T>,
    pending: Option<WeightedPoint<T>>,
    weight_seen: T,
    points_seen: usize,
    chunks_seen: usize,
}

impl<T: Float + Debug> StreamingIsotonic<T> {
    /// Process one partition; `weights` defaults to all ones.
    pub fn process_chunk(
        &mut self,
        x: &[T],
        y: &[T],
        weights: Option<&[T]>,
    ) -> Result<ChunkSummary, IsotonicError> {
        Validator::validate_inputs(x, y, weights)?;

        let mut grouped = normalize(collect_points(x, y, weights), self.isotonic);
        let chunk_weight = grouped.iter().fold(T::zero(), |acc, p| acc + p.weight);
        Validator::validate_total_weight(self.weight_seen + chunk_weight)?;

        // Reconcile the held-back group with the head of this chunk
        if let Some(tail) = self.pending {
            let head = grouped[0];
            if head.x < tail.x {
                debug!(
                    previous = ?tail.x,
                    next = ?head.x,
                    "rejected chunk out of x-order"
                );
                return Err(IsotonicError::UnorderedPartition {
                    previous: tail.x.to_f64().unwrap_or(f64::NAN),
                    next: head.x.to_f64().unwrap_or(f64::NAN),
                });
            }

            if head.x == tail.x {
                let mut acc = WeightedSum::of(tail.y, tail.weight);
                acc.add(WeightedSum::of(head.y, head.weight));
                grouped[0] = WeightedPoint::new(head.x, acc.mean(), acc.weight);
            } else {
                self.stack.push(tail);
            }
            self.pending = None;
        }

        // Hold back this chunk's last group; pool and merge the rest
        self.pending = grouped.pop();
        let local = pool_adjacent_violators(grouped);
        merge_into(&mut self.stack, &local);

        self.weight_seen = self.weight_seen + chunk_weight;
        self.points_seen += y.len();
        self.chunks_seen += 1;

        trace!(
            chunk = self.chunks_seen,
            points = y.len(),
            pools = self.stack.len(),
            "processed chunk"
        );

        Ok(ChunkSummary {
            points: y.len(),
            pools: self.stack.len(),
        })
    }

    /// Flush the held-back group and emit the fitted model.
    ///
    /// The processor is reset afterwards and can be reused for a new fit.
    pub fn finalize(&mut self) -> Result<IsotonicModel<T>, IsotonicError> {
        let Some(tail) = self.pending.take() else {
            return Err(IsotonicError::EmptyInput);
        };

        self.stack.push(tail);
        let stack = core::mem::take(&mut self.stack);
        let model = IsotonicModel::from_pools(stack.pools(), self.isotonic);

        debug!(
            chunks = self.chunks_seen,
            points = self.points_seen,
            boundaries = model.len(),
            "finalized streaming fit"
        );

        self.reset();
        Ok(model)
    }

    /// Discard all partial results.
    pub fn reset(&mut self) {
        self.stack = PoolStack::new();
        self.pending = None;
        self.weight_seen = T::zero();
        self.points_seen = 0;
        self.chunks_seen = 0;
    }

    /// Raw observations consumed since the last reset.
    pub fn points_seen(&self) -> usize {
        self.points_seen
    }

    /// Chunks consumed since the last reset.
    pub fn chunks_seen(&self) -> usize {
        self.chunks_seen
    }
}
