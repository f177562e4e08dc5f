//! Tunables for the evaluator and its handler groups.

use std::time::Duration;

/// Configuration for command evaluation.
///
/// The defaults are the values the language documents; tests shrink the
/// timed budget so `Football` does not block for ten seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Wall-clock budget of one timed repetition.
    pub timed_budget: Duration,

    /// Pause between timed iterations.
    pub timed_pause: Duration,

    /// How many times a fixed-count repetition runs its action.
    pub fixed_repeat: usize,

    /// How many rows the top-N filter keeps.
    pub top_n: usize,

    /// How many rows the square command samples.
    pub sample_size: usize,

    /// Chaos batches larger than this ask for confirmation first.
    pub chaos_confirm_threshold: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timed_budget: Duration::from_secs(10),
            timed_pause: Duration::from_millis(500),
            fixed_repeat: 3,
            top_n: 10,
            sample_size: 5,
            chaos_confirm_threshold: 100,
        }
    }
}

impl EngineConfig {
    /// Builder method to set the timed repetition budget.
    #[must_use]
    pub fn with_timed_budget(mut self, budget: Duration) -> Self {
        self.timed_budget = budget;
        self
    }

    /// Builder method to set the pause between timed iterations.
    #[must_use]
    pub fn with_timed_pause(mut self, pause: Duration) -> Self {
        self.timed_pause = pause;
        self
    }

    /// Builder method to set the fixed repetition count.
    #[must_use]
    pub fn with_fixed_repeat(mut self, count: usize) -> Self {
        self.fixed_repeat = count;
        self
    }

    /// Builder method to set how many rows the top-N filter keeps.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Builder method to set the square sample size.
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Builder method to set the chaos confirmation threshold.
    #[must_use]
    pub fn with_chaos_confirm_threshold(mut self, threshold: i64) -> Self {
        self.chaos_confirm_threshold = threshold;
        self
    }
}
