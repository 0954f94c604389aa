use crate::{
    analysis::adjacency::AdjacencyModel,
    spatial::{Position, Wave, orientation::neighbours},
};
use std::collections::VecDeque;

/// Order in which pending positions are taken from the work list
///
/// Propagation is confluent: both orders reach the same fixed point and only
/// differ in the amount of work done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkOrder {
    /// Most recently queued position first (work stack)
    #[default]
    Lifo,
    /// Oldest queued position first (work queue)
    Fifo,
}

/// Counters describing one propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Positions taken from the work list and re-checked
    pub visits: usize,
    /// Symbols removed from neighbour domains
    pub removals: usize,
    /// Neighbours whose domain was emptied
    pub contradictions: usize,
}

impl PropagationReport {
    /// Whether any domain was emptied during the pass
    pub const fn found_contradiction(&self) -> bool {
        self.contradictions > 0
    }
}

/// Enforce arc consistency outward from `origin` using a work stack
///
/// See [`propagate_from_with`].
pub fn propagate_from(wave: &mut Wave, model: &AdjacencyModel, origin: Position) -> PropagationReport {
    propagate_from_with(wave, model, origin, WorkOrder::Lifo)
}

/// Enforce arc consistency outward from `origin`
///
/// Each visited position `p` restricts every in-bounds neighbour `q` in
/// orientation `o` to the symbols supported by some symbol still possible at
/// `p`. Neighbours that lost symbols are queued for their own re-check. A
/// neighbour emptied this way is counted as a contradiction and not queued;
/// the remaining work still drains so the caller sees the whole damage.
pub fn propagate_from_with(
    wave: &mut Wave,
    model: &AdjacencyModel,
    origin: Position,
    order: WorkOrder,
) -> PropagationReport {
    let mut report = PropagationReport::default();
    if !wave.contains(origin) {
        return report;
    }

    let (width, height) = (wave.width(), wave.height());
    let mut pending = VecDeque::from([origin]);

    while let Some(position) = match order {
        WorkOrder::Lifo => pending.pop_back(),
        WorkOrder::Fifo => pending.pop_front(),
    } {
        report.visits += 1;

        let current = wave.query(position);
        if current.is_empty() {
            continue;
        }

        for (orientation, neighbour) in neighbours(position, width, height) {
            let supported = model.supported_by(orientation, &current);
            let removed = wave.restrict(neighbour, &supported);
            if removed == 0 {
                continue;
            }

            report.removals += removed;
            if wave.domain(neighbour).is_empty() {
                report.contradictions += 1;
            } else {
                pending.push_back(neighbour);
            }
        }
    }

    report
}
