//! MCTS tree node representation.
//!
//! Each node represents a position reached by dropping a disc from the parent
//! position. Nodes store visit statistics used for UCT selection.

use games_connect4::{GameState, Player};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Credit a finished game gives to `player`: 1 for a win, 0 for a loss,
/// 0.5 for a draw.
#[inline]
pub fn result_for(player: Player, winner: Option<Player>) -> f64 {
    match winner {
        Some(w) if w == player => 1.0,
        Some(_) => 0.0,
        None => 0.5,
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Column played from the parent to reach this node (None for root)
    pub column: Option<usize>,

    /// Private snapshot of the position at this node
    pub state: GameState,

    /// Number of times this node has been visited
    pub visits: u32,

    /// Sum of results credited to `player_just_moved`
    pub wins: f64,

    /// Legal columns not yet expanded into children
    pub untried: Vec<usize>,

    /// Child node indices, in expansion order
    pub children: Vec<NodeId>,

    /// Player whose move produced this position
    pub player_just_moved: Player,
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root(state: GameState) -> Self {
        Self::build(NodeId::NONE, None, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, column: usize, state: GameState) -> Self {
        Self::build(parent, Some(column), state)
    }

    fn build(parent: NodeId, column: Option<usize>, mut state: GameState) -> Self {
        // A decided position has nothing left to expand
        let untried = if state.check_terminal_state().is_some() {
            Vec::new()
        } else {
            state.available_moves()
        };
        let player_just_moved = state.last_player();

        Self {
            parent,
            column,
            state,
            visits: 0,
            wins: 0.0,
            untried,
            children: Vec::new(),
            player_just_moved,
        }
    }

    /// Mean result wins / visits. Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCT score for selection from the parent.
    /// UCT = wins/visits + c * sqrt(ln(N_parent) / visits)
    ///
    /// Unvisited nodes score +inf so every child is tried once before the
    /// formula is used. Takes a pre-computed ln(N_parent).
    #[inline]
    pub fn uct_score(&self, ln_parent_visits: f64, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        self.wins / n + exploration_constant * (ln_parent_visits / n).sqrt()
    }

    /// Record one simulation result.
    #[inline]
    pub fn update(&mut self, result: f64) {
        self.visits += 1;
        self.wins += result;
    }

    /// Check if every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Check if this is a leaf node (no children yet).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
