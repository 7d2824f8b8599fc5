//! Layer 1: Primitives
//!
//! Core building blocks and types.
//!
//! This layer provides the data structures shared by every other layer. It
//! depends only on `math` for the weighted-sum bookkeeping of pools.
//!
//! # Module Organization
//!
//! - **errors**: Shared error type (IsotonicError)
//! - **point**: Weighted observations
//! - **pool**: Pools and the mergeable-unit trait
//! - **partition**: Partition splitting and reduction order
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine (executor, output, validator)
//!   ↓
//! Layer 3: Algorithms (store, pava, merge, interpolation)
//!   ↓
//! Layer 2: Math (weighted)
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Weighted observation type.
pub mod point;

/// Pools and the `Poolable` trait.
pub mod pool;

/// Partition splitting and reduction configuration.
pub mod partition;
