//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the core isotonic regression algorithms:
//! - Normalization of raw observations (grouping, sorting, orientation)
//! - The Pool Adjacent Violators Algorithm
//! - Merging of x-adjacent pooled step functions
//! - Canonical recomputation of merged pool levels
//! - Piecewise-linear evaluation of the fitted function
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Grouping and sorting of raw observations.
pub mod store;

/// Pool Adjacent Violators Algorithm.
pub mod pava;

/// Merging of adjacent pooled step functions.
pub mod merge;

/// Canonical level recomputation after merging.
pub mod canonical;

/// Interpolated evaluation of the fitted function.
pub mod interpolation;
