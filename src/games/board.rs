//! Single N×N tic-tac-toe board.

use crate::core::{GameError, Move, Player};
use crate::rules::GameState;

use super::lines;

/// Partial credit for owning the center cell (odd sizes only).
const CENTER_CREDIT: f64 = 0.5;

/// Partial credit for owning at least one corner.
const CORNER_CREDIT: f64 = 0.25;

/// A flat N×N grid of cell owners plus the side to move.
///
/// Cells are stored row-major; `Clone` copies the whole grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Player>,
    to_move: Player,
}

impl Board {
    /// Create an empty board with `First` to move.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Board size must be at least 1");

        Self {
            size,
            cells: vec![Player::Empty; size * size],
            to_move: Player::First,
        }
    }

    /// Build a board from text rows using `X` (First), `O` (Second) and any
    /// other character for an empty cell.
    ///
    /// The side to move is derived from the piece counts: `Second` moves
    /// when `First` has more pieces, otherwise `First`.
    ///
    /// ```
    /// use ultimate_mcts::core::Player;
    /// use ultimate_mcts::games::Board;
    ///
    /// let board = Board::from_rows(&["XO.", ".X.", "..."]);
    /// assert_eq!(board.cell(0, 1), Some(Player::Second));
    /// assert_eq!(board.to_move(), Player::Second);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a non-empty square.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(size > 0, "Board size must be at least 1");

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let parsed: Vec<Player> = row
                .chars()
                .map(|c| match c {
                    'X' | 'x' => Player::First,
                    'O' | 'o' => Player::Second,
                    _ => Player::Empty,
                })
                .collect();
            assert_eq!(parsed.len(), size, "Board rows must form a square");
            cells.extend(parsed);
        }

        let firsts = cells.iter().filter(|&&c| c == Player::First).count();
        let seconds = cells.iter().filter(|&&c| c == Player::Second).count();
        let to_move = if firsts > seconds {
            Player::Second
        } else {
            Player::First
        };

        Self {
            size,
            cells,
            to_move,
        }
    }

    /// Side length of the grid.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The player to move.
    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Owner of a cell, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Check whether `player` owns a complete row, column or diagonal.
    #[must_use]
    pub fn has_line(&self, player: Player) -> bool {
        player.is_occupied()
            && lines::has_line(self.size, |r, c| self.cells[r * self.size + c] == player)
    }

    /// The player owning a winning line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        Player::BOTH.into_iter().find(|&p| self.has_line(p))
    }

    /// Check whether `player` has won this board.
    ///
    /// Decided by an exact `evaluate(player) == 1.0` comparison; partial
    /// credit never counts as a win.
    #[must_use]
    pub fn is_won_by(&self, player: Player) -> bool {
        self.evaluate(player) == 1.0
    }

    /// Check whether no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Player::Empty)
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Player::Empty).count()
    }

    /// Check whether a move targets the center or a corner.
    #[must_use]
    pub fn is_center_or_corner(&self, mv: Move) -> bool {
        let last = self.size - 1;
        let center = self.size % 2 == 1 && mv.row == self.size / 2 && mv.col == self.size / 2;
        let corner = (mv.row == 0 || mv.row == last) && (mv.col == 0 || mv.col == last);
        center || corner
    }

    fn control_score(&self, player: Player) -> f64 {
        let last = self.size - 1;
        let mut score = 0.0;

        if self.size % 2 == 1 {
            let mid = self.size / 2;
            if self.cells[mid * self.size + mid] == player {
                score += CENTER_CREDIT;
            }
        }

        let corners = [(0, 0), (0, last), (last, 0), (last, last)];
        if corners
            .iter()
            .any(|&(r, c)| self.cells[r * self.size + c] == player)
        {
            score += CORNER_CREDIT;
        }

        score
    }
}

impl GameState for Board {
    type Action = Move;

    fn current_player(&self) -> Player {
        self.to_move
    }

    fn legal_actions(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Player::Empty)
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
            .collect()
    }

    fn apply(&mut self, action: &Move, mover: Player) -> Result<(), GameError> {
        if !mover.is_occupied() {
            return Err(GameError::InvalidMover(mover));
        }

        let owner = self.cell(action.row, action.col).ok_or(GameError::OutOfBounds {
            mv: *action,
            size: self.size,
        })?;

        if owner.is_occupied() {
            return Err(GameError::CellOccupied { mv: *action, owner });
        }

        self.cells[action.row * self.size + action.col] = mover;
        self.to_move = mover.opponent();
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.has_line(Player::First) || self.has_line(Player::Second) || self.is_full()
    }

    fn evaluate(&self, player: Player) -> f64 {
        if self.has_line(player) {
            return 1.0;
        }
        if self.has_line(player.opponent()) {
            return -1.0;
        }
        self.control_score(player)
    }

    fn is_priority_action(&self, action: &Move) -> bool {
        self.is_center_or_corner(*action)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|p| p.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
