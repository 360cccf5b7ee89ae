//! Judge protocol: one turn of line-oriented input, one move of output.
//!
//! ```text
//! <opponent_row> <opponent_col>      (-1 -1 on the first turn)
//! <valid_action_count>
//! <row> <col>                         (valid_action_count lines)
//! ```

use std::io::{BufRead, Write};

use crate::core::Move;

use super::DriverError;

/// One turn as sent by the judge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnInput {
    /// The opponent's last move, `None` when we move first.
    pub opponent: Option<Move>,

    /// Moves the judge accepts this turn, in the order it listed them.
    pub valid_moves: Vec<Move>,
}

impl TurnInput {
    /// Read one turn. Returns `Ok(None)` on a clean end of input.
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Option<Self>, DriverError> {
        let Some(line) = next_line(reader)? else {
            return Ok(None);
        };
        let opponent = parse_opponent(&line)?;

        let count_line = next_line(reader)?
            .ok_or_else(|| DriverError::Parse("missing valid action count".to_string()))?;
        let count: usize = count_line
            .trim()
            .parse()
            .map_err(|_| DriverError::Parse(format!("bad action count {:?}", count_line.trim())))?;

        // The count is untrusted; grow with the lines actually read.
        let mut valid_moves = Vec::new();
        for i in 0..count {
            let line = next_line(reader)?.ok_or_else(|| {
                DriverError::Parse(format!("expected {} valid actions, got {}", count, i))
            })?;
            valid_moves.push(parse_move(&line)?);
        }

        Ok(Some(Self {
            opponent,
            valid_moves,
        }))
    }

    /// Check whether this is the opening turn of the game for us.
    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.opponent.is_none()
    }
}

/// Emit a move as `<row> <col>` and flush.
pub fn write_move<W: Write>(writer: &mut W, mv: Move) -> std::io::Result<()> {
    writeln!(writer, "{}", mv)?;
    writer.flush()
}

/// Next non-blank line, or `None` at end of input.
fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, DriverError> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
}

fn parse_pair(line: &str) -> Result<(i64, i64), DriverError> {
    let bad = || DriverError::Parse(format!("expected two integers, got {:?}", line.trim()));

    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(row), Some(col), None) => {
            let row = row.parse().map_err(|_| bad())?;
            let col = col.parse().map_err(|_| bad())?;
            Ok((row, col))
        }
        _ => Err(bad()),
    }
}

fn parse_opponent(line: &str) -> Result<Option<Move>, DriverError> {
    match parse_pair(line)? {
        (-1, _) | (_, -1) => Ok(None),
        (row, col) => to_move(row, col).map(Some),
    }
}

fn parse_move(line: &str) -> Result<Move, DriverError> {
    let (row, col) = parse_pair(line)?;
    to_move(row, col)
}

fn to_move(row: i64, col: i64) -> Result<Move, DriverError> {
    match (usize::try_from(row), usize::try_from(col)) {
        (Ok(row), Ok(col)) => Ok(Move::new(row, col)),
        _ => Err(DriverError::Parse(format!("negative coordinate {} {}", row, col))),
    }
}
