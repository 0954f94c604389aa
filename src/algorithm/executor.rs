use crate::{
    algorithm::propagation::propagate_from,
    algorithm::rollback::{RollbackController, RollbackDecision},
    algorithm::selection::{Selection, SelectionPolicy, select_position},
    analysis::adjacency::AdjacencyModel,
    io::configuration::{DEFAULT_SEED, MAX_GRID_DIMENSION},
    io::error::{Result, invalid_parameter},
    spatial::{Position, Symbol, Wave},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

/// Output size, seed and selection parameters for one run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollapseConfig {
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
    /// Seed of the random source driving selection and value choice
    pub seed: u64,
    /// Cell-selection parameters
    pub selection: SelectionPolicy,
}

impl CollapseConfig {
    /// Configuration with the default seed and selection policy
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: DEFAULT_SEED,
            selection: SelectionPolicy::default(),
        }
    }

    /// Replace the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the selection policy
    #[must_use]
    pub const fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Check dimensions and selection parameters
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or above [`MAX_GRID_DIMENSION`],
    /// or if the jitter is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        let jitter = self.selection.jitter;
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(invalid_parameter(
                "jitter",
                &jitter,
                &"must be a finite non-negative number",
            ));
        }
        Ok(())
    }
}

/// Result of a single collapse step, before any backtracking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and propagation left every domain non-empty
    Progress,
    /// Some domain is empty
    Contradiction,
    /// Nothing left to collapse
    Complete,
}

/// State of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// More steps are needed
    Running,
    /// Every position holds exactly one symbol
    Success,
    /// The rollback budget ran out on a contradiction
    Fail,
}

/// Counters gathered over a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Steps taken, including failed ones
    pub steps: usize,
    /// Steps that ended in a contradiction
    pub failed_steps: usize,
    /// Snapshot restores performed
    pub rollbacks: usize,
    /// Restores that went back to the older snapshot
    pub deep_rollbacks: usize,
    /// Symbols removed by propagation
    pub removals: usize,
}

/// What an observer sees after every step
#[derive(Debug)]
pub struct StepEvent<'a> {
    /// One-based step number
    pub step: usize,
    /// How the step ended
    pub outcome: StepOutcome,
    /// The wave right after the step, before any rollback
    pub wave: &'a Wave,
    /// Rollbacks still available
    pub rollbacks_remaining: usize,
}

/// Final wave, status and counters of a finished run
///
/// The wave holds model slots; [`Self::symbol_at`] and [`Self::symbols_at`]
/// answer in the caller's symbols.
#[derive(Debug, Clone)]
pub struct CollapseOutcome {
    /// The wave at termination
    pub wave: Wave,
    /// [`RunStatus::Success`] or [`RunStatus::Fail`]
    pub status: RunStatus,
    /// Counters gathered over the run
    pub statistics: RunStatistics,
    /// Caller symbols, indexed by slot
    pub alphabet: Vec<Symbol>,
}

impl CollapseOutcome {
    /// Every symbol still possible at `position`, in slot order
    pub fn symbols_at(&self, position: Position) -> Vec<Symbol> {
        self.wave
            .domain(position)
            .iter()
            .filter_map(|slot| self.alphabet.get(slot).copied())
            .collect()
    }

    /// The symbol decided at `position`, if exactly one remains
    pub fn symbol_at(&self, position: Position) -> Option<Symbol> {
        self.wave
            .symbol_at(position)
            .and_then(|slot| self.alphabet.get(slot).copied())
    }
}

/// Select, collapse, propagate, and backtrack on contradiction
///
/// Owns the live wave, the rollback snapshots and the seeded random source.
/// A caller that wants to stop early simply stops calling [`Self::advance`].
pub struct CollapseDriver<'m> {
    model: &'m AdjacencyModel,
    config: CollapseConfig,
    wave: Wave,
    rollback: RollbackController,
    rng: StdRng,
    status: RunStatus,
    statistics: RunStatistics,
}

impl<'m> CollapseDriver<'m> {
    /// Create a driver over an untouched wave
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(model: &'m AdjacencyModel, config: CollapseConfig) -> Result<Self> {
        config.validate()?;

        let wave = Wave::new(config.width, config.height, model.all_symbols().clone());
        let rollback = RollbackController::new(&wave);

        Ok(Self {
            model,
            config,
            wave,
            rollback,
            rng: StdRng::seed_from_u64(config.seed),
            status: RunStatus::Running,
            statistics: RunStatistics::default(),
        })
    }

    /// Access the live wave
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Current run status
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Counters gathered so far
    pub const fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Rollbacks still available
    pub const fn rollbacks_remaining(&self) -> usize {
        self.rollback.budget()
    }

    /// Configuration this driver was built with
    pub const fn config(&self) -> &CollapseConfig {
        &self.config
    }

    /// Perform one selection, value choice and propagation
    ///
    /// Never backtracks; see [`Self::advance`] for the full run-loop iteration.
    pub fn step(&mut self) -> StepOutcome {
        let target = match select_position(
            &self.wave,
            self.model,
            &self.config.selection,
            &mut self.rng,
        ) {
            Selection::Complete => return StepOutcome::Complete,
            Selection::Contradiction(position) => {
                debug!(x = position.x, y = position.y, "empty domain found during selection");
                return StepOutcome::Contradiction;
            }
            Selection::Collapse(position) => position,
        };

        self.wave.materialize(target);
        let candidates = self.wave.domain(target).to_vec();
        if candidates.is_empty() {
            return StepOutcome::Contradiction;
        }
        let choice = self.rng.random_range(0..candidates.len());
        let Some(&symbol) = candidates.get(choice) else {
            return StepOutcome::Contradiction;
        };

        self.wave.collapse_to(target, symbol);
        let report = propagate_from(&mut self.wave, self.model, target);
        self.statistics.removals += report.removals;

        if report.found_contradiction() {
            debug!(
                x = target.x,
                y = target.y,
                slot = symbol,
                contradictions = report.contradictions,
                "propagation emptied a domain"
            );
            StepOutcome::Contradiction
        } else {
            StepOutcome::Progress
        }
    }

    /// Run one iteration of the run loop without an observer
    pub fn advance(&mut self) -> RunStatus {
        self.advance_with(&mut |_: &StepEvent<'_>| {})
    }

    /// Run one iteration of the run loop: snapshot, step, notify, backtrack
    ///
    /// The observer is called once after the step and before termination is
    /// decided. It only sees a shared borrow of the wave.
    pub fn advance_with<F>(&mut self, observer: &mut F) -> RunStatus
    where
        F: FnMut(&StepEvent<'_>),
    {
        if self.status != RunStatus::Running {
            return self.status;
        }

        self.rollback.checkpoint(&self.wave);
        let outcome = self.step();
        self.statistics.steps += 1;

        observer(&StepEvent {
            step: self.statistics.steps,
            outcome,
            wave: &self.wave,
            rollbacks_remaining: self.rollback.budget(),
        });

        match outcome {
            StepOutcome::Complete => self.status = RunStatus::Success,
            StepOutcome::Progress => self.rollback.on_success(),
            StepOutcome::Contradiction => {
                self.statistics.failed_steps += 1;
                match self.rollback.on_failure(&mut self.wave) {
                    RollbackDecision::Restored(depth) => {
                        debug!(
                            step = self.statistics.steps,
                            ?depth,
                            remaining = self.rollback.budget(),
                            "rolled back after contradiction"
                        );
                    }
                    RollbackDecision::Exhausted => self.status = RunStatus::Fail,
                }
                self.statistics.rollbacks = self.rollback.rollbacks();
                self.statistics.deep_rollbacks = self.rollback.deep_rollbacks();
            }
        }

        self.status
    }

    /// Run to termination
    pub fn run(&mut self) -> RunStatus {
        self.run_with_observer(|_: &StepEvent<'_>| {})
    }

    /// Run to termination, notifying `observer` after every step
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> RunStatus
    where
        F: FnMut(&StepEvent<'_>),
    {
        let status = loop {
            let status = self.advance_with(&mut observer);
            if status != RunStatus::Running {
                break status;
            }
        };

        let stats = self.statistics;
        match status {
            RunStatus::Fail => warn!(
                steps = stats.steps,
                rollbacks = stats.rollbacks,
                "collapse failed: rollback budget exhausted"
            ),
            _ => info!(
                steps = stats.steps,
                rollbacks = stats.rollbacks,
                removals = stats.removals,
                "collapse finished"
            ),
        }
        status
    }

    /// Consume the driver and return the final wave and counters
    pub fn into_outcome(self) -> CollapseOutcome {
        CollapseOutcome {
            wave: self.wave,
            status: self.status,
            statistics: self.statistics,
            alphabet: self.model.alphabet().to_vec(),
        }
    }
}

/// Generate a `width x height` wave satisfying `model`
///
/// # Errors
///
/// Returns an error if the configuration fails validation. Contradictions are
/// never errors: an exhausted rollback budget yields [`RunStatus::Fail`].
pub fn run_collapse(model: &AdjacencyModel, config: CollapseConfig) -> Result<CollapseOutcome> {
    run_collapse_with_observer(model, config, |_: &StepEvent<'_>| {})
}

/// [`run_collapse`] with an observer called after every step
///
/// # Errors
///
/// Returns an error if the configuration fails validation.
pub fn run_collapse_with_observer<F>(
    model: &AdjacencyModel,
    config: CollapseConfig,
    observer: F,
) -> Result<CollapseOutcome>
where
    F: FnMut(&StepEvent<'_>),
{
    let mut driver = CollapseDriver::new(model, config)?;
    driver.run_with_observer(observer);
    Ok(driver.into_outcome())
}

/// Symbols still possible at a position of a finished run
///
/// Always a single symbol after [`RunStatus::Success`]; after a failure it may
/// hold any number of symbols, including none.
pub fn query_final(outcome: &CollapseOutcome, position: Position) -> Vec<Symbol> {
    outcome.symbols_at(position)
}
