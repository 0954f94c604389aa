use clap::ValueEnum;
use rand::Rng;

use crate::{
    analysis::adjacency::AdjacencyModel,
    io::configuration::SELECTION_JITTER,
    math::probability::domain_entropy,
    spatial::{Position, Wave},
};

/// Scoring rule used to rank undecided positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Heuristic {
    /// Domain size: the most constrained cell goes first
    #[default]
    #[value(name = "mrv")]
    MinimumRemainingValues,
    /// Shannon entropy of the domain under exemplar frequencies
    #[value(name = "entropy")]
    WeightedEntropy,
}

/// Where the very first collapse happens on an untouched wave
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartPolicy {
    /// A uniformly random position, like any other unmaterialized pick
    #[default]
    Random,
    /// The grid centre `(width / 2, height / 2)`
    Center,
}

/// Parameters of the cell-selection step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionPolicy {
    /// Scoring rule
    pub heuristic: Heuristic,
    /// Tie-break noise drawn uniformly from `[0, jitter)`
    pub jitter: f64,
    /// First pick on an empty wave
    pub start: StartPolicy,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            jitter: SELECTION_JITTER,
            start: StartPolicy::default(),
        }
    }
}

/// Result of scanning the wave for the next position to collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Collapse this position next
    Collapse(Position),
    /// Every position is stored and decided
    Complete,
    /// A stored position has an empty domain
    Contradiction(Position),
}

/// Choose the next position to collapse
///
/// Stored positions with more than one candidate are scored and the lowest
/// score wins. Decided positions are skipped, and any empty domain aborts the
/// scan with [`Selection::Contradiction`]. When every stored position is decided
/// but some positions were never touched, one of those is drawn uniformly so
/// that isolated regions still get collapsed.
pub fn select_position<R: Rng>(
    wave: &Wave,
    model: &AdjacencyModel,
    policy: &SelectionPolicy,
    rng: &mut R,
) -> Selection {
    let mut best: Option<(f64, Position)> = None;

    for (position, domain) in wave.materialized() {
        let size = domain.count();
        if size == 0 {
            return Selection::Contradiction(position);
        }
        if size == 1 {
            continue;
        }

        let base = match policy.heuristic {
            Heuristic::MinimumRemainingValues => size as f64,
            Heuristic::WeightedEntropy => domain_entropy(model.frequencies(), domain),
        };
        let score = base + rng.random::<f64>() * policy.jitter;

        if best.is_none_or(|(lowest, _)| score < lowest) {
            best = Some((score, position));
        }
    }

    if let Some((_, position)) = best {
        return Selection::Collapse(position);
    }

    let unmaterialized = wave.area() - wave.materialized_count();
    if unmaterialized == 0 {
        return Selection::Complete;
    }

    if policy.start == StartPolicy::Center && wave.materialized_count() == 0 {
        return Selection::Collapse(Position::new(wave.width() / 2, wave.height() / 2));
    }

    let target = rng.random_range(0..unmaterialized);
    wave.positions()
        .filter(|&position| !wave.is_materialized(position))
        .nth(target)
        .map_or(Selection::Complete, Selection::Collapse)
}
