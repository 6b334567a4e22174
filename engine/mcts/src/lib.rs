//! Monte Carlo Tree Search (MCTS) for Connect 4.
//!
//! Plain UCT with random rollouts, wrapped in two tactical checks that run
//! before any simulation: an immediately winning column is played at once,
//! and root moves that hand the opponent an immediate win are pruned.
//!
//! # Overview
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT to balance exploration and
//!    exploitation
//! 2. **Expansion**: Add a child for one random untried column
//! 3. **Rollout**: Play uniformly random moves until the game ends
//! 4. **Backpropagation**: Credit the result to every node on the path,
//!    from the perspective of the player who moved into it
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::GameState;
//! use mcts::{Mcts, MctsConfig};
//!
//! let mut state = GameState::new();
//! for col in [0, 6, 1, 6, 2, 5] {
//!     state.apply_move(col);
//! }
//!
//! let mut ai = Mcts::with_seed(MctsConfig::default().with_simulations(500), 42);
//! assert_eq!(ai.get_best_move(&state), Some(3));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per search (default: 1000)
//! - `exploration_constant`: UCT exploration weight (default: 1.0)
//! - `time_limit`: Optional wall-clock budget (default: none)
//!
//! # Architecture
//!
//! ```text
//! +---------------------------------------------------+
//! |                      Mcts<R>                      |
//! |            (config + RNG, one per player)         |
//! +-------------------------+-------------------------+
//!                           | per move
//!                           v
//! +---------------------------------------------------+
//! |                    MctsSearch                     |
//! |   tactics -> select -> expand -> rollout ->       |
//! |                 backpropagate                     |
//! +-------------------------+-------------------------+
//!                           |
//!                           v
//!                 MctsTree (node arena)
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod tactics;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use search::{rollout, run_mcts, Decision, Mcts, MctsSearch, SearchResult};
pub use tree::{MctsTree, MoveStats, TreeStats};
