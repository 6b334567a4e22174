//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/rollout/backpropagate iterations per search.
    /// A value of 0 is treated as 1.
    pub num_simulations: u32,

    /// Exploration constant for the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// Typical range: 1.0 - 1.414 (sqrt 2).
    pub exploration_constant: f64,

    /// Optional wall-clock budget. The search stops at whichever of the
    /// simulation count or the time limit is reached first.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            exploration_constant: 1.0,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// Create a config with the given simulation budget and exploration constant.
    pub fn new(num_simulations: u32, exploration_constant: f64) -> Self {
        Self {
            num_simulations,
            exploration_constant,
            time_limit: None,
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 200,
            exploration_constant: std::f64::consts::SQRT_2,
            time_limit: None,
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
