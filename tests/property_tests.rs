//! Property tests for the game rules and the search.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use ultimate_mcts::core::{Move, Player};
use ultimate_mcts::games::{Board, MetaGame};
use ultimate_mcts::mcts::{MCTSConfig, MCTSSearch, SelectionPolicy, StatsSnapshot, UCT};
use ultimate_mcts::rules::GameState;

/// Play `choices` as indices into the legal move list, alternating sides,
/// stopping early at a terminal position.
fn play<S: GameState<Action = Move>>(mut state: S, choices: &[usize]) -> S {
    for &choice in choices {
        if state.is_terminal() {
            break;
        }
        let actions = state.legal_actions();
        let mv = actions[choice % actions.len()];
        let mover = state.current_player();
        state.apply(&mv, mover).unwrap();
    }
    state
}

#[derive(Clone, Copy, Debug)]
enum Line {
    Row(usize),
    Col(usize),
    Diagonal,
    AntiDiagonal,
}

fn line_cells(line: Line, size: usize) -> Vec<(usize, usize)> {
    (0..size)
        .map(|i| match line {
            Line::Row(r) => (r, i),
            Line::Col(c) => (i, c),
            Line::Diagonal => (i, i),
            Line::AntiDiagonal => (i, size - 1 - i),
        })
        .collect()
}

fn line_strategy() -> impl Strategy<Value = (usize, Line)> {
    (2usize..=6).prop_flat_map(|size| {
        let line = prop_oneof![
            (0..size).prop_map(Line::Row),
            (0..size).prop_map(Line::Col),
            Just(Line::Diagonal),
            Just(Line::AntiDiagonal),
        ];
        (Just(size), line)
    })
}

proptest! {
    #[test]
    fn clone_is_independent(choices in prop::collection::vec(0usize..81, 0..40)) {
        let game = play(MetaGame::new(3), &choices);
        let snapshot = game.clone();

        let mut copy = game.clone();
        let actions = copy.legal_actions();
        if let Some(&mv) = actions.first() {
            let mover = copy.current_player();
            copy.apply(&mv, mover).unwrap();
            prop_assert_ne!(&copy, &game);
        }

        prop_assert_eq!(game, snapshot);
    }

    #[test]
    fn board_terminal_iff_line_or_full(choices in prop::collection::vec(0usize..9, 0..9)) {
        let board = play(Board::new(3), &choices);

        let decided = board.winner().is_some();
        prop_assert_eq!(board.is_terminal(), decided || board.legal_actions().is_empty());
    }

    #[test]
    fn meta_terminal_iff_line_or_no_moves(choices in prop::collection::vec(0usize..81, 0..120)) {
        let game = play(MetaGame::new(3), &choices);

        let decided = game.winner().is_some();
        prop_assert_eq!(game.is_terminal(), decided || game.legal_actions().is_empty());
    }

    #[test]
    fn evaluation_is_bounded_and_exact_only_on_wins(
        choices in prop::collection::vec(0usize..81, 0..120),
    ) {
        let game = play(MetaGame::new(3), &choices);

        for player in Player::BOTH {
            let score = game.evaluate(player);
            prop_assert!((-1.0..=1.0).contains(&score));
            prop_assert_eq!(score == 1.0, game.winner() == Some(player));
            prop_assert_eq!(score == -1.0, game.winner() == Some(player.opponent()));
        }
    }

    #[test]
    fn every_line_wins_the_same_way((size, line) in line_strategy(), first in any::<bool>()) {
        let player = if first { Player::First } else { Player::Second };

        let mut board = Board::new(size);
        for (row, col) in line_cells(line, size) {
            board.apply(&Move::new(row, col), player).unwrap();
        }
        prop_assert_eq!(board.winner(), Some(player));
        prop_assert!(board.is_won_by(player));

        // The same shape one level up.
        let mut won = Board::new(size);
        for (row, col) in line_cells(Line::Row(0), size) {
            won.apply(&Move::new(row, col), player).unwrap();
        }
        let mut boards = vec![Board::new(size); size * size];
        for (row, col) in line_cells(line, size) {
            boards[row * size + col] = won.clone();
        }
        let game = MetaGame::from_boards(boards, Player::First);
        prop_assert_eq!(game.winner(), Some(player));
    }

    #[test]
    fn rejected_moves_leave_state_unchanged(
        choices in prop::collection::vec(0usize..81, 0..40),
        row in 0usize..12,
        col in 0usize..12,
    ) {
        let mut game = play(MetaGame::new(3), &choices);
        let before = game.clone();
        let mv = Move::new(row, col);

        if !game.is_legal(&mv) {
            prop_assert!(game.apply(&mv, Player::First).is_err());
            prop_assert_eq!(game, before);
        }
    }

    #[test]
    fn unvisited_child_dominates(
        visits in 1u32..10_000,
        mean in -1.0f64..=1.0,
        parent in 0u32..100_000,
    ) {
        let uct = UCT::default();
        let visited = StatsSnapshot { visits, total_reward: mean * visits as f64 };
        let fresh = StatsSnapshot::default();

        prop_assert!(uct.score(&fresh, parent) > uct.score(&visited, parent));
        prop_assert!(uct.score(&visited, parent).is_finite());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn search_returns_legal_move(choices in prop::collection::vec(0usize..81, 0..30)) {
        let game = play(MetaGame::new(3), &choices);
        prop_assume!(!game.is_terminal());

        let config = MCTSConfig::default().with_max_nodes(300);
        let mut search = MCTSSearch::new(config).unwrap();
        let mv = search.search(&game, Instant::now() + Duration::from_secs(30));

        prop_assert!(mv.is_some());
        prop_assert!(game.legal_actions().contains(&mv.unwrap()));
    }
}
