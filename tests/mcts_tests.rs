//! MCTS integration tests on boards and meta-boards.

use std::time::{Duration, Instant};

use ultimate_mcts::core::{Move, Player};
use ultimate_mcts::games::{Board, MetaGame};
use ultimate_mcts::mcts::{
    Backpropagation, MCTSConfig, MCTSSearch, PrioritySimulation, RandomSimulation,
};
use ultimate_mcts::rules::GameState;

fn deadline() -> Instant {
    Instant::now() + Duration::from_secs(30)
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_returns_action() {
    let game = MetaGame::new(3);
    let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();

    let action = search.search_for(&game, Duration::from_millis(80));

    assert!(action.is_some(), "MCTS should return an action");
    assert!(game.legal_actions().contains(&action.unwrap()));
}

#[test]
fn test_mcts_with_tiny_budget() {
    let game = MetaGame::new(3);
    let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();

    // Even a 1ms budget must never produce an illegal move
    let action = search.search_for(&game, Duration::from_millis(1));

    if let Some(mv) = action {
        assert!(game.legal_actions().contains(&mv));
    }
}

#[test]
fn test_mcts_zero_budget() {
    let game = MetaGame::new(3);
    let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();

    let action = search.search_for(&game, Duration::ZERO);

    if let Some(mv) = action {
        assert!(game.legal_actions().contains(&mv));
    }
    assert_eq!(search.stats().iterations, 0);
}

#[test]
fn test_mcts_mid_game_position() {
    let mut game = MetaGame::new(3);
    let moves = [(4, 4), (3, 3), (0, 0), (8, 8), (1, 1), (2, 2)];
    let mut mover = Player::First;
    for (row, col) in moves {
        game.apply(&Move::new(row, col), mover).unwrap();
        mover = mover.opponent();
    }

    let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();
    let action = search.search_for(&game, Duration::from_millis(50)).unwrap();

    assert!(game.legal_actions().contains(&action));
    assert!(!moves.contains(&(action.row, action.col)));
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let config = MCTSConfig::default()
        .with_workers(1)
        .with_seed(12345)
        .with_max_nodes(500);

    let mut search1 = MCTSSearch::new(config.clone()).unwrap();
    let mut search2 = MCTSSearch::new(config).unwrap();

    let action1 = search1.search(&MetaGame::new(3), deadline());
    let action2 = search2.search(&MetaGame::new(3), deadline());

    assert_eq!(action1, action2, "Same seed should produce same action");
    assert_eq!(search1.stats().iterations, search2.stats().iterations);
}

// =============================================================================
// Tactics
// =============================================================================

#[test]
fn test_mcts_takes_immediate_win() {
    // X to move; (2, 0) completes the left column, (2, 1) would lose it.
    let board = Board::from_rows(&["XO.", "XO.", "..."]);
    assert_eq!(board.to_move(), Player::First);

    let config = MCTSConfig::default().with_backpropagation(Backpropagation::Alternating);
    let mut search = MCTSSearch::new(config)
        .unwrap()
        .with_simulation(RandomSimulation);

    let action = search.search_for(&board, Duration::from_millis(300));

    assert_eq!(action, Some(Move::new(2, 0)));
}

#[test]
fn test_mcts_terminal_state_has_no_move() {
    let board = Board::from_rows(&["XXX", "OO.", "..."]);
    let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();

    assert_eq!(search.search_for(&board, Duration::from_millis(20)), None);
}

#[test]
fn test_mcts_full_meta_board_has_no_move() {
    let drawn = Board::from_rows(&["XOX", "XOO", "OXX"]);
    let game = MetaGame::from_boards(vec![drawn; 9], Player::First);
    assert!(game.is_terminal());

    let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();
    assert_eq!(search.search_for(&game, Duration::from_millis(20)), None);
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[test]
fn test_mcts_statistics() {
    let config = MCTSConfig::default().with_max_nodes(2_000);
    let mut search = MCTSSearch::new(config).unwrap();

    search.search(&MetaGame::new(3), deadline());

    let stats = search.stats();

    assert!(stats.iterations > 0);
    assert!(stats.nodes_expanded > 0, "Should expand some nodes");
    assert_eq!(stats.simulations, stats.iterations);
    assert!(stats.time_us > 0, "Should record time");
    assert!(stats.avg_rollout_length() > 0.0);
}

#[test]
fn test_mcts_tree_stats() {
    let config = MCTSConfig::default().with_max_nodes(1_000);
    let mut search = MCTSSearch::new(config).unwrap();

    search.search(&MetaGame::new(3), deadline());

    let tree_stats = search.tree_stats().unwrap();

    assert!(tree_stats.node_count >= 1_000, "Tree should reach the node limit");
    assert!(tree_stats.max_depth > 0, "Tree should have depth");
    assert!(tree_stats.expanded_count > 0);
    assert!(tree_stats.branching_factor() > 1.0);
}

#[test]
fn test_action_visits() {
    let config = MCTSConfig::default().with_max_nodes(1_000);
    let mut search = MCTSSearch::new(config).unwrap();

    search.search(&MetaGame::new(3), deadline());

    let visits = search.action_visits();
    assert_eq!(visits.len(), 81);

    // Every backpropagated iteration passes through exactly one root child
    let total: u32 = visits.iter().map(|(_, v)| v).sum();
    assert_eq!(total, search.stats().iterations);
}

#[test]
fn test_search_reuses_context() {
    let mut search = MCTSSearch::new(MCTSConfig::default().with_max_nodes(300)).unwrap();

    let mut game = MetaGame::new(3);
    for _ in 0..3 {
        let mv = search.search(&game, deadline()).unwrap();
        assert_eq!(search.tree().unwrap().root_node().state(), &game);

        let mover = game.current_player();
        game.apply(&mv, mover).unwrap();
    }
}

// =============================================================================
// Policy and Configuration Tests
// =============================================================================

#[test]
fn test_mcts_policies_and_backpropagation() {
    for backpropagation in [Backpropagation::Uniform, Backpropagation::Alternating] {
        let config = MCTSConfig::default()
            .with_backpropagation(backpropagation)
            .with_max_nodes(500);

        let mut priority = MCTSSearch::new(config.clone())
            .unwrap()
            .with_simulation(PrioritySimulation);
        let mut random = MCTSSearch::new(config)
            .unwrap()
            .with_simulation(RandomSimulation);

        let game = MetaGame::new(3);
        assert!(priority.search(&game, deadline()).is_some());
        assert!(random.search(&game, deadline()).is_some());
    }
}

#[test]
fn test_mcts_exploration_constant() {
    let explore = MCTSConfig::default()
        .with_exploration(5.0)
        .with_max_nodes(500);
    let exploit = MCTSConfig::default()
        .with_exploration(0.1)
        .with_max_nodes(500);

    let mut search_explore = MCTSSearch::new(explore).unwrap();
    let mut search_exploit = MCTSSearch::new(exploit).unwrap();

    search_explore.search(&Board::new(3), deadline());
    search_exploit.search(&Board::new(3), deadline());

    assert!(search_explore.tree_stats().unwrap().node_count > 1);
    assert!(search_exploit.tree_stats().unwrap().node_count > 1);
    assert_eq!(search_explore.config().exploration_constant, 5.0);
}

#[test]
fn test_mcts_config_serialization() {
    let config = MCTSConfig::default()
        .with_exploration(2.0)
        .with_seed(999)
        .with_backpropagation(Backpropagation::Alternating);

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config, deserialized);
    assert!(json.contains("\"alternating\""));
}
