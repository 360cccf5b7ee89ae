//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to score children (UCT, mean reward)
//! - `SimulationPolicy`: How to pick rollout moves (random, priority cells)

use smallvec::SmallVec;

use crate::core::{GameRng, Player};
use crate::rules::GameState;

use super::cancel::Cancellation;
use super::node::StatsSnapshot;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for scoring children during selection.
///
/// The caller picks the maximum score, breaking ties uniformly at random.
pub trait SelectionPolicy: Send + Sync {
    /// Score a child given its statistics and its parent's visit count.
    fn score(&self, child: &StatsSnapshot, parent_visits: u32) -> f64;
}

/// UCT (Upper Confidence bound applied to Trees) selection policy.
///
/// Formula: mean(a) + c * sqrt(ln(N) / n(a)). Unvisited children score
/// `+inf` so they are always tried before any visited sibling.
#[derive(Clone, Copy, Debug)]
pub struct UCT {
    /// Exploration constant `c`.
    pub exploration: f64,
}

impl UCT {
    /// Create a UCT policy with exploration constant `c`.
    #[must_use]
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }
}

impl Default for UCT {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SelectionPolicy for UCT {
    fn score(&self, child: &StatsSnapshot, parent_visits: u32) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }

        // A child can be credited before its parent during backpropagation.
        let ln_parent = (parent_visits.max(1) as f64).ln();
        child.mean_reward() + self.exploration * (ln_parent / child.visits as f64).sqrt()
    }
}

/// UCT with `c = 0`: pure empirical mean reward.
///
/// Used for the final move choice. Unvisited children have no mean and
/// score `-inf`, so they are only picked when nothing was visited.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanReward;

impl SelectionPolicy for MeanReward {
    fn score(&self, child: &StatsSnapshot, _parent_visits: u32) -> f64 {
        if child.visits == 0 {
            f64::NEG_INFINITY
        } else {
            child.mean_reward()
        }
    }
}

/// Pick the highest-scoring item, breaking ties uniformly at random.
///
/// Returns `None` for an empty iterator.
pub fn select_max<T: Copy>(
    scored: impl IntoIterator<Item = (T, f64)>,
    rng: &mut GameRng,
) -> Option<T> {
    let mut best = f64::NEG_INFINITY;
    let mut ties: SmallVec<[T; 9]> = SmallVec::new();

    for (item, score) in scored {
        if score > best {
            best = score;
            ties.clear();
            ties.push(item);
        } else if score == best {
            ties.push(item);
        }
    }

    rng.choose(&ties).copied()
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for picking moves during a rollout.
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Choose one of `actions` (the legal actions of `state`).
    ///
    /// Returns `None` only when `actions` is empty.
    fn choose(&self, state: &S, actions: &[S::Action], rng: &mut GameRng) -> Option<S::Action>;
}

/// Uniform random rollout moves.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<S: GameState> SimulationPolicy<S> for RandomSimulation {
    fn choose(&self, _state: &S, actions: &[S::Action], rng: &mut GameRng) -> Option<S::Action> {
        rng.choose(actions).copied()
    }
}

/// Prefers priority moves (center and corners), uniformly among them;
/// falls back to a uniform random move when none is available.
#[derive(Clone, Debug, Default)]
pub struct PrioritySimulation;

impl<S: GameState> SimulationPolicy<S> for PrioritySimulation {
    fn choose(&self, state: &S, actions: &[S::Action], rng: &mut GameRng) -> Option<S::Action> {
        let preferred: Vec<S::Action> = actions
            .iter()
            .filter(|a| state.is_priority_action(a))
            .copied()
            .collect();

        if preferred.is_empty() {
            rng.choose(actions).copied()
        } else {
            rng.choose(&preferred).copied()
        }
    }
}

// =============================================================================
// Rollout
// =============================================================================

/// Outcome of a finished rollout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rollout {
    /// Evaluation of the final position for `perspective`.
    pub reward: f64,

    /// Player to move in the final position.
    pub perspective: Player,

    /// Plies played.
    pub steps: u32,
}

/// Play `state` out to a terminal position on a private clone.
///
/// Cancellation is checked before every ply. Returns `None` when cancelled
/// so that no partial reward is ever recorded.
pub fn rollout<S, P>(
    policy: &P,
    state: &S,
    rng: &mut GameRng,
    cancel: &Cancellation,
) -> Option<Rollout>
where
    S: GameState,
    P: SimulationPolicy<S> + ?Sized,
{
    let mut sim = state.clone();
    let mut steps = 0;

    while !sim.is_terminal() {
        if cancel.is_cancelled() {
            return None;
        }

        let actions = sim.legal_actions();
        let action = policy.choose(&sim, &actions, rng)?;
        let mover = sim.current_player();

        if let Err(err) = sim.apply(&action, mover) {
            log::error!("Rollout move {:?} rejected: {}", action, err);
            return None;
        }
        steps += 1;
    }

    let perspective = sim.current_player();
    Some(Rollout {
        reward: sim.evaluate(perspective),
        perspective,
        steps,
    })
}
