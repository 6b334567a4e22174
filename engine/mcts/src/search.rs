//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm with two tactical short-circuits:
//! 1. Tactics: take an immediate win, prune root moves that allow one
//! 2. Selection: Traverse tree using UCT while nodes are fully expanded
//! 3. Expansion: Add one random untried move as a new child
//! 4. Rollout: Play uniformly random moves to the end of the game
//! 5. Backpropagation: Credit the result along the path to the root

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use games_connect4::{GameState, Player};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::tactics;
use crate::tree::{MctsTree, MoveStats};

/// How the returned column was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The root position has no legal moves
    NoLegalMoves,
    /// Exactly one legal move, search skipped
    OnlyMove,
    /// A move wins on the spot, search skipped
    ImmediateWin,
    /// Chosen by visit count after the simulation loop
    Searched,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Column to play, None when the root has no legal moves
    pub column: Option<usize>,

    pub decision: Decision,

    /// Number of simulations performed
    pub simulations: u32,

    /// Whether the root's candidate moves were narrowed to safe moves
    pub pruned: bool,

    pub elapsed: Duration,

    /// Statistics of the root's children (empty for short-circuits)
    pub children: Vec<MoveStats>,
}

impl SearchResult {
    fn immediate(column: Option<usize>, decision: Decision, start: Instant) -> Self {
        Self {
            column,
            decision,
            simulations: 0,
            pruned: false,
            elapsed: start.elapsed(),
            children: Vec::new(),
        }
    }
}

/// MCTS search state for a single position.
///
/// A fresh tree is built for every search; nothing carries over between
/// searches.
pub struct MctsSearch {
    tree: MctsTree,
    root_state: GameState,
    config: MctsConfig,
}

impl MctsSearch {
    /// Create a new MCTS search rooted at a snapshot of `root_state`.
    pub fn new(root_state: &GameState, config: MctsConfig) -> Self {
        Self {
            tree: MctsTree::new(root_state.clone()),
            root_state: root_state.clone(),
            config,
        }
    }

    /// Run the search.
    ///
    /// The simulation loop stops early when `cancel` is set or the configured
    /// time limit elapses.
    ///
    /// # Panics
    ///
    /// Panics if the full simulation budget ran and the root still has no
    /// children, which means the search itself is broken.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> SearchResult {
        let start = Instant::now();
        let root_id = self.tree.root();

        match self.tree.get(root_id).untried.as_slice() {
            [] => return SearchResult::immediate(None, Decision::NoLegalMoves, start),
            [only] => return SearchResult::immediate(Some(*only), Decision::OnlyMove, start),
            _ => {}
        }

        if let Some(column) = tactics::winning_move(&self.root_state) {
            debug!(column, "Taking immediate win");
            return SearchResult::immediate(Some(column), Decision::ImmediateWin, start);
        }

        let legal = self.tree.get(root_id).untried.len();
        let safe = tactics::safe_moves(&self.root_state);
        let pruned = if self.tree.restrict_untried(root_id, &safe) {
            safe.len() < legal
        } else {
            debug!("Every move allows an immediate loss, searching all of them");
            false
        };
        if pruned {
            debug!(safe = ?safe, "Pruned moves that allow an immediate loss");
        }

        let deadline = self.config.time_limit.map(|limit| start + limit);
        // A zero budget still runs one simulation
        let budget = self.config.num_simulations.max(1);
        let mut simulations = 0;
        while simulations < budget {
            if should_stop(cancel, deadline) {
                debug!(simulations, "Search stopped early");
                break;
            }
            self.simulate(rng);
            simulations += 1;
        }

        let column = match self.tree.best_move() {
            Some((column, _)) => column,
            None => {
                assert!(
                    simulations < budget,
                    "MCTS root has no children after {} simulations",
                    simulations
                );
                // Stopped before the first expansion
                self.tree.get(root_id).untried[0]
            }
        };

        let stats = self.tree.stats();
        debug!(
            column,
            simulations,
            nodes = stats.total_nodes,
            depth = stats.max_depth,
            "MCTS search complete"
        );

        SearchResult {
            column: Some(column),
            decision: Decision::Searched,
            simulations,
            pruned,
            elapsed: start.elapsed(),
            children: self.tree.root_children(),
        }
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut state = self.root_state.clone();

        let leaf_id = self.select(&mut state);
        let node_id = self.expand(leaf_id, &mut state, rng);
        let winner = rollout(&mut state, rng);

        self.tree.backpropagate(node_id, winner);

        trace!(
            node = node_id.0,
            moves = state.turn() - self.root_state.turn(),
            winner = ?winner,
            "MCTS simulation complete"
        );
    }

    /// Descend through fully expanded nodes using UCT, replaying each
    /// chosen column on `state`.
    fn select(&self, state: &mut GameState) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            // Stop at nodes that still have moves to try, or at leaves
            if !node.is_fully_expanded() || node.is_leaf() {
                return current;
            }

            match self
                .tree
                .select_uct_child(current, self.config.exploration_constant)
            {
                Some(child_id) => {
                    if let Some(column) = self.tree.get(child_id).column {
                        state.apply_move(column);
                    }
                    current = child_id;
                }
                None => return current,
            }
        }
    }

    /// Expand one random untried move of `node_id`, if any, and return the
    /// node the rollout starts from.
    fn expand<R: Rng + ?Sized>(
        &mut self,
        node_id: NodeId,
        state: &mut GameState,
        rng: &mut R,
    ) -> NodeId {
        let Some(&column) = self.tree.get(node_id).untried.choose(rng) else {
            return node_id;
        };

        state.apply_move(column);
        self.tree.expand(node_id, column, state.clone())
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Play uniformly random moves until the game ends and return the winner
/// (None for a draw).
pub fn rollout<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<Player> {
    while !state.is_terminal() {
        let Some(&column) = state.available_moves().choose(rng) else {
            break;
        };
        state.apply_move(column);
    }
    state.check_terminal_state()
}

fn should_stop(cancel: Option<&AtomicBool>, deadline: Option<Instant>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
        || deadline.is_some_and(|deadline| Instant::now() >= deadline)
}

/// Connect 4 AI: a search configuration plus the RNG that drives expansion
/// and rollouts.
///
/// Every call searches from scratch, so one engine can serve a whole game.
pub struct Mcts<R: Rng = ChaCha20Rng> {
    config: MctsConfig,
    rng: R,
}

impl Mcts<ChaCha20Rng> {
    /// Engine seeded from OS entropy.
    pub fn new(config: MctsConfig) -> Self {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    /// Reproducible engine.
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Mcts<R> {
    pub fn with_rng(config: MctsConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Best column for the side to move, or None when there is no legal move.
    pub fn get_best_move(&mut self, state: &GameState) -> Option<usize> {
        self.search(state, None).column
    }

    /// Full search with an optional cancellation flag.
    pub fn search(&mut self, state: &GameState, cancel: Option<&AtomicBool>) -> SearchResult {
        MctsSearch::new(state, self.config.clone()).run(&mut self.rng, cancel)
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<R: Rng + ?Sized>(
    state: &GameState,
    config: MctsConfig,
    rng: &mut R,
) -> SearchResult {
    MctsSearch::new(state, config).run(rng, None)
}
