use crate::{
    io::configuration::{DEEP_ROLLBACK_THRESHOLD, ROLLBACK_BUDGET_DIVISOR},
    spatial::Wave,
};

/// Which snapshot a rollback restored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollbackDepth {
    /// The state right before the failed step
    Recent,
    /// The state before the last successful step
    Older,
}

/// Outcome of handling one failed step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollbackDecision {
    /// The live wave was replaced by a snapshot
    Restored(RollbackDepth),
    /// No budget left; the live wave is untouched and the run must fail
    Exhausted,
}

/// Two-snapshot backtracking state
///
/// `recent` is retaken before every step. `older` only advances across
/// successful steps, so a streak of failures can fall back past the last
/// decision that led into trouble. Snapshots are owned deep copies and never
/// alias the live wave.
#[derive(Debug, Clone)]
pub struct RollbackController {
    recent: Wave,
    older: Wave,
    budget: usize,
    initial_budget: usize,
    consecutive_failures: usize,
    rollbacks: usize,
    deep_rollbacks: usize,
}

impl RollbackController {
    /// Start with both snapshots equal to `initial` and a budget of `area / 4`
    pub fn new(initial: &Wave) -> Self {
        let budget = initial.area() / ROLLBACK_BUDGET_DIVISOR;
        Self {
            recent: initial.clone(),
            older: initial.clone(),
            budget,
            initial_budget: budget,
            consecutive_failures: 0,
            rollbacks: 0,
            deep_rollbacks: 0,
        }
    }

    /// Snapshot the live wave before a step
    ///
    /// The previous `recent` becomes `older` only when the last step succeeded.
    pub fn checkpoint(&mut self, live: &Wave) {
        if self.consecutive_failures == 0 {
            std::mem::swap(&mut self.older, &mut self.recent);
        }
        self.recent.clone_from(live);
    }

    /// Handle a failed step by restoring a snapshot into `live`
    pub fn on_failure(&mut self, live: &mut Wave) -> RollbackDecision {
        if self.budget == 0 {
            return RollbackDecision::Exhausted;
        }

        let depth = if self.consecutive_failures == DEEP_ROLLBACK_THRESHOLD {
            live.clone_from(&self.older);
            self.deep_rollbacks += 1;
            RollbackDepth::Older
        } else {
            live.clone_from(&self.recent);
            RollbackDepth::Recent
        };

        self.consecutive_failures += 1;
        self.budget -= 1;
        self.rollbacks += 1;
        RollbackDecision::Restored(depth)
    }

    /// Record a successful step
    pub const fn on_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Rollbacks still available
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// Budget the controller started with
    pub const fn initial_budget(&self) -> usize {
        self.initial_budget
    }

    /// Failures since the last successful step
    pub const fn consecutive_failures(&self) -> usize {
        self.consecutive_failures
    }

    /// Total rollbacks performed
    pub const fn rollbacks(&self) -> usize {
        self.rollbacks
    }

    /// Rollbacks that restored the older snapshot
    pub const fn deep_rollbacks(&self) -> usize {
        self.deep_rollbacks
    }

    /// Snapshot taken before the latest step
    pub const fn recent(&self) -> &Wave {
        &self.recent
    }

    /// Snapshot from before the last successful step
    pub const fn older(&self) -> &Wave {
        &self.older
    }
}
