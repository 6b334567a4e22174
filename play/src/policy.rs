//! Move selection policies for the AI side and arena opponents

use games_connect4::GameState;
use mcts::{Decision, Mcts, MctsConfig};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// Trait for move selection policies.
pub trait Policy: Send {
    /// Short label used in logs and reports
    fn name(&self) -> String;

    /// Column to play, or None when the position has no legal move
    fn select_move(&mut self, state: &GameState) -> Option<usize>;
}

/// Random policy that picks a legal column uniformly at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> String {
        "random".into()
    }

    fn select_move(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        state.available_moves().choose(&mut self.rng).copied()
    }
}

/// MCTS-based policy backed by a fresh search for every move.
pub struct MctsPolicy {
    engine: Mcts,
}

impl std::fmt::Debug for MctsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MctsPolicy")
            .field("config", self.engine.config())
            .finish()
    }
}

impl MctsPolicy {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn new(config: MctsConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => Mcts::with_seed(config, seed),
            None => Mcts::new(config),
        };
        Self { engine }
    }
}

impl Policy for MctsPolicy {
    fn name(&self) -> String {
        format!("mcts-{}", self.engine.config().num_simulations)
    }

    fn select_move(&mut self, state: &GameState) -> Option<usize> {
        let result = self.engine.search(state, None);

        if result.decision == Decision::Searched {
            debug!(
                column = ?result.column,
                simulations = result.simulations,
                elapsed_ms = result.elapsed.as_millis() as u64,
                pruned = result.pruned,
                "MCTS move selected"
            );
            for stats in &result.children {
                debug!(
                    column = stats.column,
                    visits = stats.visits,
                    win_rate = stats.win_rate(),
                    "Root move"
                );
            }
        } else {
            debug!(column = ?result.column, decision = ?result.decision, "MCTS short-circuit");
        }

        result.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_policy_picks_legal_moves() {
        let mut policy = RandomPolicy::with_seed(42);
        let mut state = GameState::new();

        while !state.is_terminal() {
            let column = policy.select_move(&state).unwrap();
            assert!(state.available_moves().contains(&column));
            assert!(state.apply_move(column));
        }
        assert_eq!(policy.select_move(&state), None);
    }

    #[test]
    fn test_policy_determinism_with_same_seed() {
        let mut policy1 = RandomPolicy::with_seed(12345);
        let mut policy2 = RandomPolicy::with_seed(12345);
        let state = GameState::new();

        for _ in 0..20 {
            assert_eq!(policy1.select_move(&state), policy2.select_move(&state));
        }
    }

    #[test]
    fn test_mcts_policy_takes_win() {
        let mut state = GameState::new();
        for col in [0, 6, 1, 6, 2, 5] {
            state.apply_move(col);
        }
        let mut policy = MctsPolicy::new(MctsConfig::for_testing(), Some(7));

        assert_eq!(policy.select_move(&state), Some(3));
        assert_eq!(policy.name(), "mcts-200");
    }

    #[test]
    fn test_policies_as_trait_objects() {
        let mut policies: Vec<Box<dyn Policy>> = vec![
            Box::new(RandomPolicy::with_seed(1)),
            Box::new(MctsPolicy::new(MctsConfig::for_testing(), Some(1))),
        ];
        let state = GameState::new();

        for policy in policies.iter_mut() {
            let column = policy.select_move(&state).unwrap();
            assert!(column < 7);
        }
    }
}
