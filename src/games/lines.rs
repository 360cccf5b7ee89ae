//! Row, column and diagonal line detection.
//!
//! Shared by [`Board`](super::Board) and [`MetaGame`](super::MetaGame) so both
//! nesting levels apply exactly the same winning rule.

/// Check whether some full row, column or main diagonal satisfies `owns`.
///
/// `owns(row, col)` reports whether the cell belongs to the player being
/// tested. A zero-sized grid has no lines.
pub fn has_line(size: usize, owns: impl Fn(usize, usize) -> bool) -> bool {
    if size == 0 {
        return false;
    }

    let row_win = (0..size).any(|row| (0..size).all(|col| owns(row, col)));
    if row_win {
        return true;
    }

    let col_win = (0..size).any(|col| (0..size).all(|row| owns(row, col)));
    if col_win {
        return true;
    }

    (0..size).all(|i| owns(i, i)) || (0..size).all(|i| owns(i, size - 1 - i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: [&str; 3]) -> impl Fn(usize, usize) -> bool {
        let cells: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == 'X').collect())
            .collect();
        move |row, col| cells[row][col]
    }

    #[test]
    fn test_each_row() {
        assert!(has_line(3, grid(["XXX", "...", "..."])));
        assert!(has_line(3, grid(["...", "XXX", "..."])));
        assert!(has_line(3, grid(["...", "...", "XXX"])));
    }

    #[test]
    fn test_each_column() {
        assert!(has_line(3, grid(["X..", "X..", "X.."])));
        assert!(has_line(3, grid([".X.", ".X.", ".X."])));
        assert!(has_line(3, grid(["..X", "..X", "..X"])));
    }

    #[test]
    fn test_diagonals() {
        assert!(has_line(3, grid(["X..", ".X.", "..X"])));
        assert!(has_line(3, grid(["..X", ".X.", "X.."])));
    }

    #[test]
    fn test_no_line() {
        assert!(!has_line(3, grid(["XX.", "..X", "X.."])));
        assert!(!has_line(3, grid(["...", "...", "..."])));
        assert!(!has_line(0, |_, _| true));
    }
}
