//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure arithmetic used by grouping and pooling:
//! weighted sums and weighted means.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Weighted sums and means.
pub mod weighted;
