//! Adjacency rules learned from an exemplar grid
//!
//! For every exemplar cell and every orientation, the symbol observed at that
//! offset is recorded as an allowed neighbour. Offsets falling outside the
//! exemplar contribute nothing: there is no wraparound and no synthetic border
//! symbol. A symbol never seen next to anything in some direction therefore
//! ends up with an empty rule set there, which propagation treats as
//! unsatisfiable.
//!
//! Symbols are opaque. The model interns them into dense slots in first-seen
//! order, and every [`SymbolSet`] it hands out or accepts is indexed by slot.
//! Use [`AdjacencyModel::symbol`] and [`AdjacencyModel::slot`] to cross over.

use std::collections::HashMap;

use ndarray::Array2;

use crate::{
    algorithm::bitset::SymbolSet,
    io::error::{CollapseError, Result},
    math::probability::{frequencies_from_counts, weighted_log},
    spatial::{Orientation, Position, Symbol, orientation::neighbours},
};

/// Immutable rule table answering "may `b` sit in direction `o` next to `a`?"
#[derive(Debug, Clone)]
pub struct AdjacencyModel {
    /// Allowed neighbours, indexed by `orientation * symbol_count + slot`
    rules: Vec<SymbolSet>,
    alphabet: Vec<Symbol>,
    slots: HashMap<Symbol, usize>,
    all_symbols: SymbolSet,
    frequencies: Vec<f64>,
    frequency_weights: Vec<f64>,
    symbol_count: usize,
    empty: SymbolSet,
}

impl AdjacencyModel {
    /// Learn rules from a `(rows, cols)` exemplar of symbols
    ///
    /// # Errors
    ///
    /// Returns an error if the exemplar has no cells.
    pub fn from_exemplar(exemplar: &Array2<Symbol>) -> Result<Self> {
        let (height, width) = exemplar.dim();
        if width == 0 || height == 0 {
            return Err(CollapseError::InvalidSourceData {
                reason: "Exemplar grid has no cells".to_string(),
            });
        }

        let mut model = Self::with_alphabet(exemplar.iter().copied());
        let mut counts = vec![0usize; model.symbol_count];

        for ((y, x), &symbol) in exemplar.indexed_iter() {
            let Some(from) = model.slot(symbol) else {
                continue;
            };
            if let Some(count) = counts.get_mut(from) {
                *count += 1;
            }

            for (orientation, neighbour) in neighbours(Position::new(x, y), width, height) {
                let observed = exemplar
                    .get((neighbour.y, neighbour.x))
                    .and_then(|&other| model.slot(other));
                if let Some(to) = observed {
                    model.allow(orientation, from, to);
                }
            }
        }

        model.frequencies = frequencies_from_counts(&counts);
        model.frequency_weights = model.frequencies.iter().map(|&p| weighted_log(p)).collect();
        Ok(model)
    }

    /// Build a model from an explicit alphabet and rule list
    ///
    /// Each rule `(o, a, b)` allows `b` in direction `o` next to `a`. Rules are
    /// taken as given, with no symmetry implied. Frequencies are uniform over
    /// the alphabet. Repeated alphabet entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule names a symbol outside `alphabet`.
    pub fn from_rules<I>(alphabet: &[Symbol], rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Orientation, Symbol, Symbol)>,
    {
        let mut model = Self::with_alphabet(alphabet.iter().copied());

        for (orientation, from, to) in rules {
            let slot_of = |symbol| {
                model.slot(symbol).ok_or(CollapseError::InvalidSymbol {
                    symbol,
                    alphabet_size: model.symbol_count,
                })
            };
            let (from, to) = (slot_of(from)?, slot_of(to)?);
            model.allow(orientation, from, to);
        }

        let share = 1.0 / model.symbol_count.max(1) as f64;
        model.frequencies = vec![share; model.symbol_count];
        model.frequency_weights = model.frequencies.iter().map(|&p| weighted_log(p)).collect();
        Ok(model)
    }

    /// Intern `symbols` in first-seen order and allocate rule sets for them
    fn with_alphabet(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut alphabet = Vec::new();
        let mut slots = HashMap::new();
        for symbol in symbols {
            slots.entry(symbol).or_insert_with(|| {
                alphabet.push(symbol);
                alphabet.len() - 1
            });
        }

        let symbol_count = alphabet.len();
        Self {
            rules: vec![SymbolSet::new(symbol_count); Orientation::COUNT * symbol_count],
            alphabet,
            slots,
            all_symbols: SymbolSet::all(symbol_count),
            frequencies: vec![0.0; symbol_count],
            frequency_weights: vec![0.0; symbol_count],
            symbol_count,
            empty: SymbolSet::new(symbol_count),
        }
    }

    fn allow(&mut self, orientation: Orientation, from: usize, to: usize) {
        let index = orientation.index() * self.symbol_count + from;
        if let Some(allowed) = self.rules.get_mut(index) {
            allowed.insert(to);
        }
    }

    /// Slots allowed in direction `orientation` next to slot `slot`
    pub fn allowed(&self, orientation: Orientation, slot: usize) -> &SymbolSet {
        if slot >= self.symbol_count {
            return &self.empty;
        }
        self.rules
            .get(orientation.index() * self.symbol_count + slot)
            .unwrap_or(&self.empty)
    }

    /// Whether slot `neighbour` may sit in direction `orientation` next to slot `slot`
    pub fn permits(&self, orientation: Orientation, slot: usize, neighbour: usize) -> bool {
        self.allowed(orientation, slot).contains(neighbour)
    }

    /// Union of the allowed neighbours over every slot of `domain`
    pub fn supported_by(&self, orientation: Orientation, domain: &SymbolSet) -> SymbolSet {
        let mut supported = SymbolSet::new(self.symbol_count);
        for slot in domain.iter() {
            supported.union_with(self.allowed(orientation, slot));
        }
        supported
    }

    /// Every slot of the alphabet
    pub const fn all_symbols(&self) -> &SymbolSet {
        &self.all_symbols
    }

    /// Number of distinct symbols
    pub const fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Caller symbols, indexed by slot
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Caller symbol stored in `slot`
    pub fn symbol(&self, slot: usize) -> Option<Symbol> {
        self.alphabet.get(slot).copied()
    }

    /// Slot holding `symbol`, if it belongs to the alphabet
    pub fn slot(&self, symbol: Symbol) -> Option<usize> {
        self.slots.get(&symbol).copied()
    }

    /// Caller symbols of every slot in `domain`, in slot order
    pub fn decode(&self, domain: &SymbolSet) -> Vec<Symbol> {
        domain.iter().filter_map(|slot| self.symbol(slot)).collect()
    }

    /// Observed share of each slot
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Observed share of one symbol
    pub fn frequency(&self, symbol: Symbol) -> Option<f64> {
        self.slot(symbol).and_then(|slot| self.frequencies.get(slot).copied())
    }

    /// Precomputed `p ln p` of one symbol's observed share
    pub fn frequency_weight(&self, symbol: Symbol) -> Option<f64> {
        self.slot(symbol)
            .and_then(|slot| self.frequency_weights.get(slot).copied())
    }

    /// Precomputed `p ln p` weights, indexed by slot
    pub fn frequency_weights(&self) -> &[f64] {
        &self.frequency_weights
    }
}
