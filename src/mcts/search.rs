//! Core MCTS search algorithm.
//!
//! A fixed pool of workers shares one tree and runs select, expand,
//! simulate and backpropagate until the deadline. Each worker owns a
//! forked RNG stream; the only shared mutable data is the tree.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::core::GameRng;
use crate::rules::GameState;

use super::cancel::Cancellation;
use super::config::{Backpropagation, MCTSConfig};
use super::node::{Children, MCTSNode, NodeId};
use super::policy::{
    rollout, select_max, MeanReward, PrioritySimulation, Rollout, SelectionPolicy,
    SimulationPolicy, UCT,
};
use super::stats::{SearchCounters, SearchStats};
use super::tree::{MCTSTree, TreeStats};

/// Errors raised while setting up a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The worker thread pool could not be started.
    #[error("failed to start search workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Main MCTS search context.
///
/// Generic over the game state type. Owns the worker pool, the
/// configuration and the tree of the most recent search.
pub struct MCTSSearch<S: GameState> {
    /// Search configuration.
    config: MCTSConfig,

    /// Dedicated worker threads.
    pool: rayon::ThreadPool,

    /// Seeds the per-worker streams and breaks final ties.
    rng: GameRng,

    /// Selection policy.
    selection: UCT,

    /// Rollout policy.
    simulation: Box<dyn SimulationPolicy<S>>,

    /// Tree of the most recent search.
    tree: Option<MCTSTree<S>>,

    /// Statistics of the most recent search.
    stats: SearchStats,
}

impl<S: GameState> MCTSSearch<S> {
    /// Create a new search context with its own worker pool.
    pub fn new(config: MCTSConfig) -> Result<Self, SearchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.max(1))
            .thread_name(|i| format!("mcts-worker-{}", i))
            .build()?;

        Ok(Self {
            rng: GameRng::new(config.seed),
            selection: UCT::new(config.exploration_constant),
            simulation: Box::new(PrioritySimulation),
            config,
            pool,
            tree: None,
            stats: SearchStats::default(),
        })
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<P: SimulationPolicy<S> + 'static>(mut self, simulation: P) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Search until `deadline` and return the best action for the player
    /// to move in `state`.
    ///
    /// Returns `None` when the state has no legal actions or when the
    /// deadline expired before any child was expanded. A single legal
    /// action is returned without searching.
    pub fn search(&mut self, state: &S, deadline: Instant) -> Option<S::Action> {
        self.run(MCTSTree::new(state.clone()), deadline)
    }

    /// Search like [`search`](Self::search), considering only root actions
    /// that also appear in `allowed`.
    ///
    /// Deeper levels of the tree are unrestricted. Returns `None` when no
    /// legal action is allowed.
    pub fn search_within(
        &mut self,
        state: &S,
        allowed: &[S::Action],
        deadline: Instant,
    ) -> Option<S::Action> {
        let root = MCTSNode::root_within(state.clone(), allowed);
        self.run(MCTSTree::with_root(root), deadline)
    }

    /// Search for `budget` from now.
    pub fn search_for(&mut self, state: &S, budget: Duration) -> Option<S::Action> {
        self.search(state, Instant::now() + budget)
    }

    fn run(&mut self, tree: MCTSTree<S>, deadline: Instant) -> Option<S::Action> {
        let start = Instant::now();
        self.stats.reset();

        let root = tree.root_node();

        if root.actions().is_empty() {
            log::debug!("Search root has no legal actions");
            self.tree = Some(tree);
            return None;
        }

        if let [only] = root.actions() {
            let only = *only;
            self.tree = Some(tree);
            return Some(only);
        }

        let cancel = Cancellation::new(deadline);
        let counters = SearchCounters::default();
        let streams: Vec<GameRng> = (0..self.config.workers.max(1))
            .map(|_| self.rng.fork())
            .collect();

        let worker = Worker {
            tree: &tree,
            cancel: &cancel,
            counters: &counters,
            selection: &self.selection,
            simulation: self.simulation.as_ref(),
            backpropagation: self.config.backpropagation,
            max_nodes: self.config.max_nodes,
        };

        self.pool.scope(|scope| {
            for rng in streams {
                let worker = &worker;
                scope.spawn(move |_| worker.run(rng));
            }
        });

        let best = best_child(&tree, &mut self.rng);

        self.stats = counters.snapshot();
        self.stats.max_depth = tree.stats().max_depth;
        self.stats.time_us = start.elapsed().as_micros() as u64;

        log::debug!(
            "Search finished: {} iterations, {} nodes, {} cancelled rollouts, {:.0} it/s",
            self.stats.iterations,
            tree.len(),
            self.stats.cancelled_rollouts,
            self.stats.iterations_per_second()
        );

        let action = best.and_then(|id| tree.get(id).action());
        if action.is_none() {
            log::warn!("Search expired before the root was expanded");
        }

        self.tree = Some(tree);
        action
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the tree of the most recent search.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree<S>> {
        self.tree.as_ref()
    }

    /// Get statistics about the tree of the most recent search.
    #[must_use]
    pub fn tree_stats(&self) -> Option<TreeStats> {
        self.tree.as_ref().map(MCTSTree::stats)
    }

    /// Get action visit counts from the root.
    ///
    /// Returns (action, visit_count) pairs in legal-action order.
    pub fn action_visits(&self) -> Vec<(S::Action, u32)> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };

        tree.root_node()
            .children()
            .iter()
            .map(|&id| tree.get(id))
            .filter_map(|child| child.action().map(|a| (a, child.visits())))
            .collect()
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Root child with the best mean reward, ties broken at random.
fn best_child<S: GameState>(tree: &MCTSTree<S>, rng: &mut GameRng) -> Option<NodeId> {
    let root = tree.root_node();
    let parent_visits = root.visits();
    let children = root.children();

    let scored = children
        .iter()
        .map(|&id| (id, MeanReward.score(&tree.get(id).snapshot(), parent_visits)));
    select_max(scored, rng)
}

/// Shared view of one search handed to every worker.
struct Worker<'a, S: GameState> {
    tree: &'a MCTSTree<S>,
    cancel: &'a Cancellation,
    counters: &'a SearchCounters,
    selection: &'a UCT,
    simulation: &'a dyn SimulationPolicy<S>,
    backpropagation: Backpropagation,
    max_nodes: usize,
}

impl<S: GameState> Worker<'_, S> {
    /// Run iterations until cancelled.
    fn run(&self, mut rng: GameRng) {
        while !self.cancel.is_cancelled() {
            if self.max_nodes > 0 && self.tree.len() >= self.max_nodes {
                log::debug!("Node limit {} reached, stopping workers", self.max_nodes);
                self.cancel.cancel();
                break;
            }
            self.iteration(&mut rng);
        }
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&self, rng: &mut GameRng) {
        let leaf = self.select(rng);
        let node = self.tree.get(leaf);

        match rollout(self.simulation, node.state(), rng, self.cancel) {
            Some(outcome) => {
                self.counters.simulations.fetch_add(1, Ordering::Relaxed);
                self.counters
                    .rollout_steps
                    .fetch_add(u64::from(outcome.steps), Ordering::Relaxed);

                self.backpropagate(leaf, &outcome);
                self.counters.iterations.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.counters
                    .cancelled_rollouts
                    .fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Descend from the root until a terminal node or a node that still
    /// has untried actions, expanding the latter.
    fn select(&self, rng: &mut GameRng) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal() {
                return current;
            }
            if !node.is_fully_expanded() {
                return self.expand(current, &node, rng);
            }

            // Read under the lock, score after releasing it.
            let (parent_visits, children) = {
                let stats = node.read();
                (stats.visits, stats.children.clone())
            };

            let scored = children.iter().map(|&id| {
                let snapshot = self.tree.get(id).snapshot();
                (id, self.selection.score(&snapshot, parent_visits))
            });

            match select_max(scored, rng) {
                Some(next) => current = next,
                None => return current,
            }
        }
    }

    /// Materialize every missing child of `node` and return one of the new
    /// children at random.
    ///
    /// Serialized per node by its write lock. A worker that finds the node
    /// already fully expanded gets a random existing child instead.
    fn expand(&self, id: NodeId, node: &MCTSNode<S>, rng: &mut GameRng) -> NodeId {
        let mut stats = node.write();
        node.check_children(&stats);

        let tried = stats.children.len();
        if tried == node.actions().len() {
            return rng.choose(&stats.children).copied().unwrap_or(id);
        }

        let mover = node.state().current_player();
        let mut created: Children = SmallVec::new();

        for action in &node.actions()[tried..] {
            let mut state = node.state().clone();
            if let Err(err) = state.apply(action, mover) {
                panic!(
                    "legal action {:?} rejected at depth {}: {}",
                    action,
                    node.depth(),
                    err
                );
            }

            let child = MCTSNode::new(state, Some(id), Some(*action), node.depth() + 1);
            let child_id = self.tree.alloc(child);
            stats.children.push(child_id);
            created.push(child_id);
        }

        self.counters.nodes_expanded.fetch_add(1, Ordering::Relaxed);
        rng.choose(&created).copied().unwrap_or(id)
    }

    /// Credit a finished rollout to `leaf` and every ancestor.
    fn backpropagate(&self, leaf: NodeId, outcome: &Rollout) {
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = self.tree.get(id);
            let credit = match self.backpropagation {
                Backpropagation::Uniform => outcome.reward,
                Backpropagation::Alternating if node.moved_by() == outcome.perspective => {
                    outcome.reward
                }
                Backpropagation::Alternating => -outcome.reward,
            };

            node.record(credit);
            current = node.parent();
        }
    }
}
