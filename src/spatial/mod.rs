//! Spatial data structures for the collapse engine
//!
//! This module contains:
//! - Grid positions and the eight neighbour orientations
//! - The sparse possibility grid ("wave")

/// Sparse possibility grid with implicit full domains
pub mod grid;
/// Positions, orientations and neighbour iteration
pub mod orientation;

pub use grid::Wave;
pub use orientation::{Orientation, Position};

/// Opaque identifier of one element of the symbol alphabet
pub type Symbol = usize;
