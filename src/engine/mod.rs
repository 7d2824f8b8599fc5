//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates fitting and holds its result:
//! - Input and model validation
//! - The partitioned pooling pipeline
//! - The fitted model and its construction from pools
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input and model validation.
pub mod validator;

/// Partitioned fit orchestration.
pub mod executor;

/// Fitted model and model builder.
pub mod output;
