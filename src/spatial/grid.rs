//! Sparse possibility grid with implicit full domains
//!
//! Only positions that have been narrowed are stored. Any position missing from
//! the map has the full alphabet as its domain, so large runs stay cheap until
//! propagation actually reaches a cell. Domains only ever shrink; rollback
//! replaces the whole structure instead of growing a domain back.
//!
//! Domains hold the dense slots of an
//! [`AdjacencyModel`](crate::analysis::adjacency::AdjacencyModel), not the
//! caller's symbol ids.

use std::collections::BTreeMap;

use crate::algorithm::bitset::SymbolSet;
use crate::spatial::{Position, Symbol};

/// The grid of per-position candidate symbol sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    width: usize,
    height: usize,
    cells: BTreeMap<Position, SymbolSet>,
    full_domain: SymbolSet,
}

impl Wave {
    /// Create an empty wave where every position is implicitly unconstrained
    pub const fn new(width: usize, height: usize, full_domain: SymbolSet) -> Self {
        Self {
            width,
            height,
            cells: BTreeMap::new(),
            full_domain,
        }
    }

    /// Grid width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of positions
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// The domain every unmaterialized position implicitly holds
    pub const fn full_domain(&self) -> &SymbolSet {
        &self.full_domain
    }

    /// Whether a position lies inside the grid
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Domain at `position` as an independent value
    pub fn query(&self, position: Position) -> SymbolSet {
        self.domain(position).clone()
    }

    /// Borrow the domain at `position` without copying
    pub fn domain(&self, position: Position) -> &SymbolSet {
        self.cells.get(&position).unwrap_or(&self.full_domain)
    }

    /// Whether the position has its own stored domain
    pub fn is_materialized(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    /// Number of stored positions
    pub fn materialized_count(&self) -> usize {
        self.cells.len()
    }

    /// Stored positions and their domains, in position order
    pub fn materialized(&self) -> impl Iterator<Item = (Position, &SymbolSet)> + '_ {
        self.cells.iter().map(|(&position, domain)| (position, domain))
    }

    /// Store the full domain at `position` if nothing is stored yet
    pub fn materialize(&mut self, position: Position) {
        if self.contains(position) {
            self.cells
                .entry(position)
                .or_insert_with(|| self.full_domain.clone());
        }
    }

    /// Remove a single symbol from the domain, returning whether it was present
    ///
    /// An in-bounds position is materialized even when the symbol is absent.
    pub fn narrow(&mut self, position: Position, symbol: Symbol) -> bool {
        if !self.contains(position) {
            return false;
        }
        self.cells
            .entry(position)
            .or_insert_with(|| self.full_domain.clone())
            .remove(symbol)
    }

    /// Remove every symbol not in `allowed`, returning how many were removed
    ///
    /// The position is only materialized when something is actually removed.
    pub fn restrict(&mut self, position: Position, allowed: &SymbolSet) -> usize {
        if !self.contains(position) {
            return 0;
        }
        let current = self.domain(position);
        let removed = current.count() - current.intersection(allowed).count();
        if removed > 0 {
            self.cells
                .entry(position)
                .or_insert_with(|| self.full_domain.clone())
                .intersect_with(allowed);
        }
        removed
    }

    /// Replace the domain at `position` with the singleton `{symbol}`
    pub fn collapse_to(&mut self, position: Position, symbol: Symbol) {
        if self.contains(position) {
            let capacity = self.full_domain.capacity();
            self.cells
                .insert(position, SymbolSet::singleton(capacity, symbol));
        }
    }

    /// First stored position whose domain is empty
    pub fn contradiction(&self) -> Option<Position> {
        self.materialized()
            .find(|(_, domain)| domain.is_empty())
            .map(|(position, _)| position)
    }

    /// Number of positions decided to exactly one symbol
    pub fn collapsed_count(&self) -> usize {
        let stored = self.materialized().filter(|(_, d)| d.count() == 1).count();
        if self.full_domain.count() == 1 {
            stored + (self.area() - self.materialized_count())
        } else {
            stored
        }
    }

    /// Every position is stored and holds exactly one symbol
    pub fn is_complete(&self) -> bool {
        self.materialized_count() == self.area()
            && self.materialized().all(|(_, domain)| domain.count() == 1)
    }

    /// The decided symbol at `position`, if it has collapsed
    pub fn symbol_at(&self, position: Position) -> Option<Symbol> {
        self.domain(position).single()
    }

    /// All in-bounds positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width;
        (0..self.area()).map(move |index| Position::from_linear_index(index, width))
    }
}
