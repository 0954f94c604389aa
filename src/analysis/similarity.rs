//! Self-similarity folding of symbol grids
//!
//! Positions whose four cardinal neighbours read the same symbols are merged
//! into one new symbol. Learning rules over the folded grid makes adjacency
//! depend on a wider neighbourhood than a single cell. A lookup table maps each
//! folded symbol back to the original symbol for colouring.

use clap::ValueEnum;
use ndarray::Array2;
use std::collections::HashMap;

use crate::spatial::{Orientation, Position, Symbol};

/// How neighbour reads past the grid border are resolved
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EdgePolicy {
    /// Out-of-bounds neighbours are recorded as missing
    #[default]
    Absent,
    /// Out-of-bounds reads use the nearest in-bounds cell
    Clamp,
    /// Out-of-bounds reads wrap to the opposite border
    Wrap,
}

impl EdgePolicy {
    /// Symbol read at `position + orientation` under this policy
    pub fn read(
        self,
        grid: &Array2<Symbol>,
        position: Position,
        orientation: Orientation,
    ) -> Option<Symbol> {
        let (rows, cols) = grid.dim();
        if rows == 0 || cols == 0 {
            return None;
        }
        let (dx, dy) = orientation.offset();
        let x = position.x as isize + dx;
        let y = position.y as isize + dy;
        let (x, y) = match self {
            Self::Absent => (x, y),
            Self::Clamp => (
                x.clamp(0, cols as isize - 1),
                y.clamp(0, rows as isize - 1),
            ),
            Self::Wrap => (x.rem_euclid(cols as isize), y.rem_euclid(rows as isize)),
        };
        if x < 0 || y < 0 {
            return None;
        }
        grid.get((y as usize, x as usize)).copied()
    }
}

/// Cardinal neighbour signature: north, west, south, east
pub type Signature = [Option<Symbol>; 4];

/// A folded grid and the way back to original symbols
#[derive(Debug, Clone)]
pub struct FoldedGrid {
    /// Grid of folded symbols, same shape as the input
    pub grid: Array2<Symbol>,
    /// Original symbol of each folded symbol, indexed by folded symbol
    pub origin: Vec<Symbol>,
}

impl FoldedGrid {
    /// Original symbol a folded symbol stands for
    pub fn original(&self, folded: Symbol) -> Option<Symbol> {
        self.origin.get(folded).copied()
    }

    /// Number of folded symbols
    pub fn symbol_count(&self) -> usize {
        self.origin.len()
    }
}

/// Merge positions with identical cardinal neighbour signatures
///
/// Folded symbols are numbered in row-major order of first occurrence, and each
/// maps back to the original symbol found at that first occurrence.
pub fn fold_self_similar(grid: &Array2<Symbol>, edge: EdgePolicy) -> FoldedGrid {
    let mut signatures: HashMap<Signature, Symbol> = HashMap::new();
    let mut origin = Vec::new();
    let mut folded = Array2::zeros(grid.dim());

    for ((y, x), &symbol) in grid.indexed_iter() {
        let position = Position::new(x, y);
        let signature = Orientation::CARDINAL.map(|orientation| edge.read(grid, position, orientation));

        let id = *signatures.entry(signature).or_insert_with(|| {
            origin.push(symbol);
            origin.len() - 1
        });
        if let Some(cell) = folded.get_mut((y, x)) {
            *cell = id;
        }
    }

    FoldedGrid {
        grid: folded,
        origin,
    }
}
