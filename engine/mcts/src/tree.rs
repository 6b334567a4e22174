//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. The arena owns every node; parent
//! links are plain indices used only to walk back up during
//! backpropagation.

use games_connect4::{GameState, Player};

use crate::node::{result_for, MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree rooted at a snapshot of `root_state`.
    pub fn new(root_state: GameState) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode] {
        &self.nodes
    }

    /// Select the child of a node with the highest UCT score.
    ///
    /// Among equal scores (including several unvisited children) the last
    /// one in expansion order wins.
    pub fn select_uct_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let ln_parent_visits = (node.visits.max(1) as f64).ln();

        node.children.iter().copied().max_by(|&a, &b| {
            let score_a = self.get(a).uct_score(ln_parent_visits, exploration_constant);
            let score_b = self.get(b).uct_score(ln_parent_visits, exploration_constant);
            score_a
                .partial_cmp(&score_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Expand `column` from `parent_id` into a new child owning `state`.
    /// Returns the new child's NodeId.
    pub fn expand(&mut self, parent_id: NodeId, column: usize, state: GameState) -> NodeId {
        self.get_mut(parent_id).untried.retain(|&c| c != column);

        let child_id = self.allocate(MctsNode::new_child(parent_id, column, state));
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Keep only the untried moves of `node_id` that appear in `allowed`.
    ///
    /// Leaves the node untouched and returns false when the intersection
    /// would be empty.
    pub fn restrict_untried(&mut self, node_id: NodeId, allowed: &[usize]) -> bool {
        let node = self.get_mut(node_id);
        let kept: Vec<usize> = node
            .untried
            .iter()
            .copied()
            .filter(|col| allowed.contains(col))
            .collect();

        if kept.is_empty() {
            return false;
        }
        node.untried = kept;
        true
    }

    /// Backpropagate a playout result from a node to the root.
    ///
    /// Each node is credited from the perspective of the player who moved
    /// into it: 1 for a win, 0 for a loss, 0.5 for a draw.
    pub fn backpropagate(&mut self, leaf_id: NodeId, winner: Option<Player>) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            let result = result_for(node.player_just_moved, winner);
            node.update(result);
            current_id = node.parent;
        }
    }

    /// Get the best column from root based on visit counts.
    /// Returns (column, visits) or None if root has no children.
    pub fn best_move(&self) -> Option<(usize, u32)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.column.map(|col| (col, child.visits))
            })
            .max_by_key(|&(_, visits)| visits)
    }

    /// Per-move statistics of the root's children, in column order.
    pub fn root_children(&self) -> Vec<MoveStats> {
        let mut moves: Vec<MoveStats> = self
            .get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.column.map(|column| MoveStats {
                    column,
                    visits: child.visits,
                    wins: child.wins,
                })
            })
            .collect();
        moves.sort_by_key(|m| m.column);
        moves
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|&id| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Visit statistics for one root move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStats {
    pub column: usize,
    pub visits: u32,
    pub wins: f64,
}

impl MoveStats {
    /// Mean result for the side that played this move.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}
