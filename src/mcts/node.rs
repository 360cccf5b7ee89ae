//! MCTS node structures.
//!
//! Nodes live in the arena of [`MCTSTree`](super::MCTSTree) and refer to each
//! other by index (`NodeId`). The parent link is a plain index used only to
//! walk back to the root during backpropagation; ownership stays with the
//! arena.

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::core::Player;
use crate::rules::GameState;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as a `usize` for arena lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Child handles. SmallVec covers a single board without heap allocation.
pub type Children = SmallVec<[NodeId; 9]>;

/// Mutable part of a node, guarded by the node's lock.
#[derive(Clone, Debug, Default)]
pub struct NodeStats {
    /// Times this node was on a backpropagated path.
    pub visits: u32,

    /// Sum of credited rewards.
    pub total_reward: f64,

    /// Children in the order of the node's legal actions.
    pub children: Children,
}

impl NodeStats {
    /// Get the mean reward (0 when unvisited).
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// Copy of a node's statistics taken under its read lock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatsSnapshot {
    /// Visit count.
    pub visits: u32,
    /// Cumulative reward.
    pub total_reward: f64,
}

impl StatsSnapshot {
    /// Get the mean reward (0 when unvisited).
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// A node in the MCTS tree.
///
/// The state, the producing action and the legal actions are fixed at
/// creation. Children and statistics change during the search and sit
/// behind a per-node reader/writer lock.
#[derive(Debug)]
pub struct MCTSNode<S: GameState> {
    state: S,
    parent: Option<NodeId>,
    action: Option<S::Action>,
    depth: u16,
    actions: Vec<S::Action>,
    terminal: bool,
    stats: RwLock<NodeStats>,
}

impl<S: GameState> MCTSNode<S> {
    /// Create a node for `state`, reached from `parent` via `action`.
    pub fn new(state: S, parent: Option<NodeId>, action: Option<S::Action>, depth: u16) -> Self {
        let terminal = state.is_terminal();
        let actions = if terminal {
            Vec::new()
        } else {
            state.legal_actions()
        };

        Self {
            state,
            parent,
            action,
            depth,
            actions,
            terminal,
            stats: RwLock::new(NodeStats::default()),
        }
    }

    /// Create a root node.
    pub fn root(state: S) -> Self {
        Self::new(state, None, None, 0)
    }

    /// Create a root node whose candidate actions are the legal actions
    /// also found in `allowed`, kept in legal-action order.
    pub fn root_within(state: S, allowed: &[S::Action]) -> Self {
        let mut node = Self::root(state);
        node.actions.retain(|action| allowed.contains(action));
        node
    }

    /// The position this node represents.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Parent node (`None` for the root).
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Action that produced this node (`None` for the root).
    #[inline]
    pub fn action(&self) -> Option<S::Action> {
        self.action
    }

    /// Depth in tree (root = 0).
    #[inline]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Legal actions of the state, empty for terminal states.
    #[inline]
    pub fn actions(&self) -> &[S::Action] {
        &self.actions
    }

    /// Is this a terminal game state?
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The player who made the move leading here.
    pub fn moved_by(&self) -> Player {
        self.state.current_player().opponent()
    }

    /// Read the statistics lock.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, NodeStats> {
        self.stats.read()
    }

    /// Write the statistics lock.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, NodeStats> {
        self.stats.write()
    }

    /// Copy visits and reward.
    pub fn snapshot(&self) -> StatsSnapshot {
        let stats = self.stats.read();
        StatsSnapshot {
            visits: stats.visits,
            total_reward: stats.total_reward,
        }
    }

    /// Visit count.
    pub fn visits(&self) -> u32 {
        self.stats.read().visits
    }

    /// Copy of the child handles.
    pub fn children(&self) -> Children {
        self.stats.read().children.clone()
    }

    /// Check if every legal action has a child.
    pub fn is_fully_expanded(&self) -> bool {
        let stats = self.stats.read();
        self.check_children(&stats);
        stats.children.len() == self.actions.len()
    }

    /// Add one visit with the given reward.
    pub fn record(&self, reward: f64) {
        let mut stats = self.stats.write();
        stats.visits += 1;
        stats.total_reward += reward;
    }

    /// Halt on a child list longer than the legal action list.
    ///
    /// That can only come from a broken expansion, never from input.
    pub fn check_children(&self, stats: &NodeStats) {
        assert!(
            stats.children.len() <= self.actions.len(),
            "node at depth {} has {} children but only {} legal actions",
            self.depth,
            stats.children.len(),
            self.actions.len()
        );
    }
}
