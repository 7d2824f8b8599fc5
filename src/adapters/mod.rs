//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer provides the execution modes:
//! - **batch**: whole dataset in memory, partitioned and merged internally
//! - **streaming**: partitions delivered one by one in global x-order
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// In-memory batch fitting.
pub mod batch;

/// Chunked fitting over x-ordered partitions.
pub mod streaming;
