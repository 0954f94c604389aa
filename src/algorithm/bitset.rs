use bitvec::prelude::*;
use std::fmt;

use crate::spatial::Symbol;

/// Fixed-capacity bitset over a dense symbol alphabet
///
/// Used both for wave domains and for the per-orientation rule sets of the
/// adjacency model. All sets taking part in one run share the same capacity,
/// so binary operations never need to resize.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolSet {
    bits: BitVec,
}

impl SymbolSet {
    /// Create a set with no symbols present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every symbol below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Create a set holding exactly one symbol
    pub fn singleton(capacity: usize, symbol: Symbol) -> Self {
        let mut set = Self::new(capacity);
        set.insert(symbol);
        set
    }

    /// Build a set from any iterator of symbols, ignoring ids beyond capacity
    pub fn from_symbols<I>(symbols: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut set = Self::new(capacity);
        for symbol in symbols {
            set.insert(symbol);
        }
        set
    }

    /// Number of distinct symbols this set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a symbol; out-of-range ids are ignored
    pub fn insert(&mut self, symbol: Symbol) {
        if symbol < self.bits.len() {
            self.bits.set(symbol, true);
        }
    }

    /// Remove a symbol, returning whether it was present
    pub fn remove(&mut self, symbol: Symbol) -> bool {
        let present = self.contains(symbol);
        if present {
            self.bits.set(symbol, false);
        }
        present
    }

    /// Test symbol membership
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.bits.get(symbol).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every symbol of another set in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Whether every symbol of this set is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|symbol| other.contains(symbol))
    }

    /// Test if no symbols are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count symbols in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only member, if the set holds exactly one symbol
    pub fn single(&self) -> Option<Symbol> {
        let mut ones = self.bits.iter_ones();
        match (ones.next(), ones.next()) {
            (Some(symbol), None) => Some(symbol),
            _ => None,
        }
    }

    /// Iterate over member symbols in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all member symbols as a vector
    pub fn to_vec(&self) -> Vec<Symbol> {
        self.iter().collect()
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolSet({} symbols: {:?})", self.count(), self.to_vec())
    }
}
