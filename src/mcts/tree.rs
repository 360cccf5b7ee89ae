//! Arena-based MCTS tree shared by the search workers.
//!
//! Nodes are stored in a flat vector and referenced by `NodeId` indices.
//! The vector itself is only locked for appends and lookups; each node
//! guards its own statistics.
//!
//! Lock order is node before arena: a worker may allocate children while
//! holding a node's write lock, so the arena lock is never held while a
//! node lock is taken.

use std::sync::Arc;

use parking_lot::RwLock;

use super::node::{MCTSNode, NodeId};
use crate::rules::GameState;

/// Arena-based MCTS tree.
#[derive(Debug)]
pub struct MCTSTree<S: GameState> {
    /// All nodes in the tree.
    nodes: RwLock<Vec<Arc<MCTSNode<S>>>>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl<S: GameState> MCTSTree<S> {
    /// Create a new tree with a root node for `state`.
    pub fn new(state: S) -> Self {
        Self::with_root(MCTSNode::root(state))
    }

    /// Create a new tree around a prepared root node.
    pub fn with_root(root: MCTSNode<S>) -> Self {
        Self {
            nodes: RwLock::new(vec![Arc::new(root)]),
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    ///
    /// The arena lock is released before returning.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Arc<MCTSNode<S>> {
        Arc::clone(&self.nodes.read()[id.index()])
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> Arc<MCTSNode<S>> {
        self.get(self.root)
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&self, node: MCTSNode<S>) -> NodeId {
        let mut nodes = self.nodes.write();
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(Arc::new(node));
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Copy of every node handle, in allocation order.
    pub fn nodes(&self) -> Vec<Arc<MCTSNode<S>>> {
        self.nodes.read().clone()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        // Snapshot the handles first so no node lock is taken under the arena lock.
        let nodes = self.nodes();

        let max_depth = nodes.iter().map(|n| n.depth()).max().unwrap_or(0);
        let terminal_count = nodes.iter().filter(|n| n.is_terminal()).count();
        let expanded_count = nodes
            .iter()
            .filter(|n| !n.read().children.is_empty())
            .count();
        let root_visits = nodes.first().map(|n| n.visits()).unwrap_or(0);

        TreeStats {
            node_count: nodes.len(),
            max_depth,
            terminal_count,
            expanded_count,
            root_visits,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Number of nodes with children.
    pub expanded_count: usize,

    /// Visits recorded at the root.
    pub root_visits: u32,
}

impl TreeStats {
    /// Get the branching factor (average children per expanded node).
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / self.expanded_count as f64
        }
    }
}
