//! Exemplar analysis: symbol extraction, folding and adjacency rules

/// Adjacency rule learning from exemplar grids
pub mod adjacency;
/// Image decoding and colour quantization
pub mod patterns;
/// Self-similarity folding of symbol grids
pub mod similarity;
