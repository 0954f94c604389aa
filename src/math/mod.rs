//! Mathematical utilities for the algorithm

/// Frequency weights and domain entropy
pub mod probability;
