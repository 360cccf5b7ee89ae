//! Meta-board: an N×N grid of independent [`Board`]s.
//!
//! A move addresses one cell of the whole grid in global coordinates:
//! `global = sub_index * N + local_index` on each axis. The meta-game is
//! won by a line of sub-board *wins*, using the same row/column/diagonal
//! rule as a single board.

use log::debug;

use crate::core::{GameError, Move, Player};
use crate::rules::GameState;

use super::board::Board;
use super::lines;

/// Grid of sub-boards plus the side to move on the meta level.
///
/// Sub-boards are stored row-major. `Clone` deep-copies every sub-board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetaGame {
    size: usize,
    boards: Vec<Board>,
    to_move: Player,
}

impl MetaGame {
    /// Create a `size`×`size` grid of empty `size`×`size` boards, `First` to move.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Meta-board size must be at least 1");

        Self {
            size,
            boards: vec![Board::new(size); size * size],
            to_move: Player::First,
        }
    }

    /// Assemble a meta-board from existing sub-boards (row-major).
    ///
    /// # Panics
    ///
    /// Panics if the board count is not a square of the sub-board size or if
    /// the sub-boards differ in size.
    #[must_use]
    pub fn from_boards(boards: Vec<Board>, to_move: Player) -> Self {
        let size = boards.first().map(Board::size).unwrap_or(0);
        assert!(size > 0, "Meta-board size must be at least 1");
        assert_eq!(boards.len(), size * size, "Meta-board must hold size*size sub-boards");
        assert!(
            boards.iter().all(|b| b.size() == size),
            "Sub-boards must share one size"
        );

        Self {
            size,
            boards,
            to_move,
        }
    }

    /// Side length of the meta-board (and of every sub-board).
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The player to move on the meta level.
    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Sub-board at meta coordinates, or `None` if out of range.
    #[must_use]
    pub fn sub_board(&self, row: usize, col: usize) -> Option<&Board> {
        if row < self.size && col < self.size {
            Some(&self.boards[row * self.size + col])
        } else {
            None
        }
    }

    /// Translate a global move into (sub-board, local cell).
    ///
    /// ```
    /// use ultimate_mcts::core::Move;
    /// use ultimate_mcts::games::MetaGame;
    ///
    /// let game = MetaGame::new(3);
    /// let (sub, local) = game.locate(Move::new(4, 4));
    /// assert_eq!(sub, Move::new(1, 1));
    /// assert_eq!(local, Move::new(1, 1));
    /// ```
    #[must_use]
    pub fn locate(&self, action: Move) -> (Move, Move) {
        action.split(self.size)
    }

    /// Check whether `player` owns a line of sub-boards they have won.
    #[must_use]
    pub fn has_line(&self, player: Player) -> bool {
        player.is_occupied()
            && lines::has_line(self.size, |r, c| {
                self.boards[r * self.size + c].is_won_by(player)
            })
    }

    /// The player owning a winning line of sub-boards, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        Player::BOTH.into_iter().find(|&p| self.has_line(p))
    }

    /// Check whether every sub-board is finished.
    #[must_use]
    pub fn all_boards_finished(&self) -> bool {
        self.boards.iter().all(Board::is_terminal)
    }

    /// Number of sub-boards won by `player`.
    #[must_use]
    pub fn boards_won(&self, player: Player) -> usize {
        self.boards.iter().filter(|b| b.is_won_by(player)).count()
    }
}

impl GameState for MetaGame {
    type Action = Move;

    fn current_player(&self) -> Player {
        self.to_move
    }

    fn legal_actions(&self) -> Vec<Move> {
        let mut actions = Vec::new();

        for (idx, board) in self.boards.iter().enumerate() {
            if board.is_terminal() {
                continue;
            }

            let sub = Move::new(idx / self.size, idx % self.size);
            actions.extend(
                board
                    .legal_actions()
                    .into_iter()
                    .map(|local| Move::join(sub, local, self.size)),
            );
        }

        actions
    }

    fn apply(&mut self, action: &Move, mover: Player) -> Result<(), GameError> {
        let (sub, local) = self.locate(*action);

        if sub.row >= self.size || sub.col >= self.size {
            debug!("Rejecting {:?}: sub-board {:?} out of range", action, sub);
            return Err(GameError::SubBoardOutOfRange { mv: *action, sub });
        }

        let board = &mut self.boards[sub.row * self.size + sub.col];

        if board.is_terminal() {
            debug!("Rejecting {:?}: sub-board {:?} finished", action, sub);
            return Err(GameError::SubBoardFinished { sub });
        }

        if !board.is_legal(&local) {
            debug!("Rejecting {:?}: local {:?} not legal", action, local);
            return Err(GameError::IllegalAction { sub, local });
        }

        board.apply(&local, mover)?;
        self.to_move = mover.opponent();
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.has_line(Player::First) || self.has_line(Player::Second) || self.all_boards_finished()
    }

    fn evaluate(&self, player: Player) -> f64 {
        if self.has_line(player) {
            return 1.0;
        }
        if self.has_line(player.opponent()) {
            return -1.0;
        }

        // Mean of sub-board scores. Reaching exactly +/-1 would need every
        // sub-board won by one side, which is already a line win above.
        let total: f64 = self.boards.iter().map(|b| b.evaluate(player)).sum();
        total / self.boards.len() as f64
    }

    fn is_priority_action(&self, action: &Move) -> bool {
        let (sub, local) = self.locate(*action);
        self.sub_board(sub.row, sub.col)
            .map(|board| board.is_center_or_corner(local))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for MetaGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.size;
        for global_row in 0..n * n {
            if global_row > 0 && global_row % n == 0 {
                writeln!(f, "{}", vec!["-".repeat(n); n].join("+"))?;
            }

            let mut line = String::with_capacity(n * n + n);
            for global_col in 0..n * n {
                if global_col > 0 && global_col % n == 0 {
                    line.push('|');
                }
                let (sub, local) = Move::new(global_row, global_col).split(n);
                let owner = self.boards[sub.row * n + sub.col]
                    .cell(local.row, local.col)
                    .unwrap_or(Player::Empty);
                line.push(owner.symbol());
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
