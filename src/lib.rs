//! Wave function collapse over symbol grids
//!
//! Adjacency rules are learned from an exemplar grid (usually an image), then a
//! new grid of any size is filled so that every pair of neighbours in all eight
//! directions is permitted by those rules. Cells are collapsed one at a time,
//! constraints are propagated to a fixed point, and contradictions are undone
//! from snapshots within a bounded rollback budget.

#![forbid(unsafe_code)]

/// Collapse engine: domains, selection, propagation and backtracking
pub mod algorithm;
/// Exemplar analysis: symbol extraction, folding and adjacency rules
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Probability helpers for the entropy heuristic
pub mod math;
/// Positions, orientations and the possibility grid
pub mod spatial;

pub use io::error::{CollapseError, Result};
