//! Turn driver: keeps the persistent meta-game in step with the judge and
//! asks the search for each of our moves.
//!
//! The judge is authoritative. The search only considers the judge's valid
//! moves at the root, and a move outside that list is still replaced by the
//! first valid move before it is emitted.

pub mod protocol;

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;

use crate::config::{BotConfig, DriverConfig};
use crate::core::{GameError, Move, Player};
use crate::games::MetaGame;
use crate::mcts::{MCTSSearch, SearchError, SearchStats};
use crate::rules::GameState;

pub use protocol::{write_move, TurnInput};

/// Errors raised while playing a turn.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A move the judge accepted was rejected by our own state.
    #[error("game state out of sync with the judge: {0}")]
    Desync(#[source] GameError),

    #[error("judge listed no valid moves")]
    NoLegalMoves,

    #[error("malformed judge input: {0}")]
    Parse(String),

    #[error("judge I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Plays one side of a meta-game against the judge.
pub struct TurnDriver {
    game: MetaGame,
    search: MCTSSearch<MetaGame>,
    timing: DriverConfig,
    turns: u32,
}

impl TurnDriver {
    /// Create a driver for a fresh game.
    pub fn new(config: &BotConfig) -> Result<Self, DriverError> {
        Ok(Self {
            game: MetaGame::new(config.board_size),
            search: MCTSSearch::new(config.search.clone())?,
            timing: config.driver.clone(),
            turns: 0,
        })
    }

    /// The persistent game state.
    pub fn game(&self) -> &MetaGame {
        &self.game
    }

    /// Turns played so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Statistics of the last search.
    pub fn search_stats(&self) -> &SearchStats {
        self.search.stats()
    }

    /// Search budget for the upcoming turn.
    pub fn budget(&self) -> Duration {
        if self.turns == 0 {
            Duration::from_millis(self.timing.first_turn_budget_ms)
        } else {
            Duration::from_millis(self.timing.turn_budget_ms)
        }
    }

    /// Play one turn and return the move to emit.
    ///
    /// The opponent's move is applied for `Second`, the chosen move for
    /// `First`. The search is limited to the judge's valid moves; the first
    /// listed move is played when it finds nothing usable.
    pub fn play_turn(&mut self, input: &TurnInput) -> Result<Move, DriverError> {
        if let Some(mv) = input.opponent {
            self.game
                .apply(&mv, Player::Second)
                .map_err(DriverError::Desync)?;
            log::debug!("Opponent played {}", mv);
        }

        let fallback = *input.valid_moves.first().ok_or(DriverError::NoLegalMoves)?;
        let budget = self.budget();
        self.turns += 1;

        let deadline = Instant::now() + budget;
        let searched = self
            .search
            .search_within(&self.game, &input.valid_moves, deadline);

        let allowed: FxHashSet<Move> = input.valid_moves.iter().copied().collect();
        let chosen = match searched {
            Some(mv) if allowed.contains(&mv) => mv,
            Some(mv) => {
                log::warn!(
                    "Search picked {} outside the {} valid moves, playing {}",
                    mv,
                    allowed.len(),
                    fallback
                );
                fallback
            }
            None => {
                log::warn!("Search returned no move, playing {}", fallback);
                fallback
            }
        };

        self.game
            .apply(&chosen, Player::First)
            .map_err(DriverError::Desync)?;

        let stats = self.search_stats();
        log::info!(
            "Turn {}: playing {} of {} after {} iterations in {}ms",
            self.turns,
            chosen,
            allowed.len(),
            stats.iterations,
            stats.time_us / 1000
        );

        Ok(chosen)
    }

    /// Play the judge's first valid move without searching.
    ///
    /// Used after `play_turn` failed so the judge still gets an answer.
    pub fn fallback(&mut self, input: &TurnInput) -> Option<Move> {
        let mv = *input.valid_moves.first()?;
        if let Err(err) = self.game.apply(&mv, Player::First) {
            log::warn!("Fallback move {} rejected by local state: {}", mv, err);
        }
        Some(mv)
    }
}

/// Play turns from `reader` until it is exhausted, writing moves to `writer`.
///
/// Desyncs are logged and answered with the fallback move; a turn with no
/// valid moves is skipped. Only I/O and input format errors end the loop.
pub fn run<R: BufRead, W: Write>(
    driver: &mut TurnDriver,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), DriverError> {
    while let Some(input) = TurnInput::read(reader)? {
        match driver.play_turn(&input) {
            Ok(mv) => write_move(writer, mv)?,
            Err(DriverError::NoLegalMoves) => {
                log::error!("No valid moves available");
            }
            Err(err) => {
                log::error!("{}", err);
                if let Some(mv) = driver.fallback(&input) {
                    write_move(writer, mv)?;
                }
            }
        }
    }

    log::info!("Input closed after {} turns", driver.turns());
    Ok(())
}
