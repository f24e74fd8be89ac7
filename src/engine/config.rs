//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Backtracking attempts per search phase.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Tentative pairings one attempt may place before it gives up and the
/// phase reshuffles.
pub const DEFAULT_STEP_BUDGET: u64 = 50_000;

/// Tunables for a [`MatchingEngine`](crate::engine::MatchingEngine).
///
/// ```
/// use santa_matcher::engine::EngineConfig;
///
/// let config = EngineConfig::default().with_seed(7).with_max_attempts(20);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.max_attempts, 20);
/// assert_eq!(config.step_budget, 50_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Independent attempts per phase before the phase is declared exhausted
    pub max_attempts: u32,

    /// Step budget for a single attempt
    pub step_budget: u64,

    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            step_budget: DEFAULT_STEP_BUDGET,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set attempts per phase. Clamped to at least one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the per-attempt step budget. Clamped to at least one.
    pub fn with_step_budget(mut self, step_budget: u64) -> Self {
        self.step_budget = step_budget.max(1);
        self
    }

    /// Make runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
