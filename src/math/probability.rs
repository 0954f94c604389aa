use crate::algorithm::bitset::SymbolSet;

/// Weighted log-frequency `p * ln(p)` of an observed share
///
/// Zero and negative shares contribute nothing, matching the limit of
/// `p ln p` as `p` approaches zero.
pub fn weighted_log(p: f64) -> f64 {
    if p > 0.0 { p * p.ln() } else { 0.0 }
}

/// Observed share of each symbol in a count table
pub fn frequencies_from_counts(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|&count| count as f64 / total as f64)
        .collect()
}

/// Shannon entropy of a domain under prior symbol frequencies
///
/// Renormalizes the priors of the symbols still present in `domain`:
/// `H = ln(S) - (sum p ln p) / S` with `S = sum p`. A domain whose symbols all
/// have zero prior falls back to the uniform entropy `ln(|domain|)`.
pub fn domain_entropy(frequencies: &[f64], domain: &SymbolSet) -> f64 {
    let mut total = 0.0;
    let mut weighted = 0.0;
    for symbol in domain.iter() {
        let p = frequencies.get(symbol).copied().unwrap_or(0.0);
        total += p;
        weighted += weighted_log(p);
    }

    if total > 0.0 {
        total.ln() - weighted / total
    } else if domain.is_empty() {
        0.0
    } else {
        (domain.count() as f64).ln()
    }
}
