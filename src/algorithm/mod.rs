/// Bitset over the symbol alphabet, used for domains and rule sets
pub mod bitset;
/// Collapse driver orchestrating selection, propagation and backtracking
pub mod executor;
/// Arc-consistency propagation over the eight-neighbourhood
pub mod propagation;
/// Snapshot-based backtracking with a bounded budget
pub mod rollback;
/// Next-cell selection by minimum remaining values
pub mod selection;
