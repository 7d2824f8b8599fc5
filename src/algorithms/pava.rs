//! Pool Adjacent Violators Algorithm (PAVA).
//!
//! ## Purpose
//!
//! This module implements the local pooler: given points ordered by `x`, it
//! produces the monotone non-decreasing step function that is the PAVA fixed
//! point. The same stack is reused by the partition merger, which pushes
//! whole pools instead of raw points.
//!
//! ## Design notes
//!
//! * **Explicit stack**: Pools live in a `Vec` used as a stack; backward
//!   cascades pop and absorb instead of recursing, so long strictly
//!   decreasing runs cannot exhaust the call stack.
//! * **Generic unit**: Anything implementing [`Poolable`] can be pushed.
//!
//! ## Key concepts
//!
//! * **Violation**: the top pool's level is strictly below the level of the
//!   pool beneath it. Equal levels are not merged.
//! * **Cascade**: after a merge the new top is re-checked against its new
//!   neighbour until no violation remains.
//!
//! ## Invariants
//!
//! * After every push, levels on the stack are non-decreasing.
//! * Each pushed unit is absorbed at most once, so pooling is amortized O(n).
//!
//! ## Non-goals
//!
//! * This module does not sort or group its input.
//! * This module does not handle the antitonic direction (labels are negated upstream).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

use crate::primitives::pool::{Pool, Poolable};

// ============================================================================
// Pool Stack
// ============================================================================

/// Monotone stack of pools maintained by PAVA.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolStack<T> {
    pools: Vec<Pool<T>>,
}

impl<T: Float> Default for PoolStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PoolStack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { pools: Vec::new() }
    }

    /// Create an empty stack with room for `capacity` pools.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pools: Vec::with_capacity(capacity),
        }
    }

    /// Wrap an already pooled, monotone sequence.
    ///
    /// The caller guarantees that `pools` is a PAVA fixed point.
    pub fn from_pools(pools: Vec<Pool<T>>) -> Self {
        debug_assert!(pools.windows(2).all(|w| w[0].level <= w[1].level));
        Self { pools }
    }

    /// Push one unit and resolve every violation it causes.
    ///
    /// Returns the number of merges performed.
    pub fn push<U: Poolable<T>>(&mut self, unit: U) -> usize {
        self.pools.push(unit.into_pool());

        let mut merges = 0;
        while self.pools.len() >= 2 {
            let n = self.pools.len();
            if self.pools[n - 1].level >= self.pools[n - 2].level {
                break;
            }
            // Top is below its neighbour: fold it in and re-check.
            if let Some(top) = self.pools.pop() {
                self.pools[n - 2].absorb(top);
                merges += 1;
            }
        }

        merges
    }

    /// Append pools that are known not to violate the current top.
    pub(crate) fn extend_unchecked(&mut self, pools: &[Pool<T>]) {
        debug_assert!(match (self.pools.last(), pools.first()) {
            (Some(top), Some(next)) => top.level <= next.level,
            _ => true,
        });
        self.pools.extend_from_slice(pools);
    }

    /// Number of pools currently on the stack.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool has been formed.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// The pools, ordered by `x`.
    pub fn pools(&self) -> &[Pool<T>] {
        &self.pools
    }

    /// Consume the stack and return its pools.
    pub fn into_pools(self) -> Vec<Pool<T>> {
        self.pools
    }
}

// ============================================================================
// Local Pooler
// ============================================================================

/// Run PAVA over `units`, which must be ordered by `x`.
///
/// An empty input yields an empty pool sequence; a single unit yields one pool.
pub fn pool_adjacent_violators<T, U, I>(units: I) -> Vec<Pool<T>>
where
    T: Float,
    U: Poolable<T>,
    I: IntoIterator<Item = U>,
{
    let iter = units.into_iter();
    let mut stack = PoolStack::with_capacity(iter.size_hint().0);
    for unit in iter {
        stack.push(unit);
    }
    stack.into_pools()
}
