//! Search configuration parameters.

use std::time::Duration;

use crate::search::SearchError;

/// Configuration for one search agent.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exploration constant in the UCT formula. Higher values favour
    /// trying under-visited moves, lower values favour the current best.
    /// Typical value: 1.41 (≈ √2).
    pub exploration_factor: f64,

    /// Wall-clock budget per decision. The iteration loop stops at the
    /// deadline; an iteration in flight always runs to completion.
    pub max_decision_time: Duration,

    /// Run one playout per hardware thread from the selected child each
    /// iteration instead of a single playout.
    pub parallel: bool,

    /// Narrate every search step through the process-wide trace sink.
    /// Incompatible with `parallel`: interleaved per-step logs from
    /// concurrent playouts would be unreadable.
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_factor: 1.41,
            max_decision_time: Duration::from_millis(1000),
            parallel: false,
            verbose: false,
        }
    }
}

impl SearchConfig {
    /// Create a config with the given exploration factor and budget.
    pub fn new(exploration_factor: f64, max_decision_time: Duration) -> Self {
        Self {
            exploration_factor,
            max_decision_time,
            ..Self::default()
        }
    }

    /// Create a short-budget config for tests.
    pub fn for_testing() -> Self {
        Self {
            max_decision_time: Duration::from_millis(50),
            ..Self::default()
        }
    }

    /// Builder pattern: enable or disable leaf-parallel playouts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builder pattern: enable or disable step-by-step narration.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder pattern: set the decision budget.
    pub fn with_decision_time(mut self, budget: Duration) -> Self {
        self.max_decision_time = budget;
        self
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.parallel && self.verbose {
            return Err(SearchError::VerboseParallelConflict);
        }
        if !(self.exploration_factor > 0.0 && self.exploration_factor.is_finite()) {
            return Err(SearchError::NonPositiveExploration(self.exploration_factor));
        }
        Ok(())
    }
}
