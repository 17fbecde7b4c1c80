mod common;

use common::ToyBoard;
use trichess_mcts::{enumerator::legal_moves, Board, Color, MCTSConfig, MoveKey, MCTS};

fn searched_config(iterations: usize) -> MCTSConfig {
    MCTSConfig::default()
        .with_seed(42)
        .with_max_iterations(iterations)
}

#[test]
fn test_root_advances_over_opponent_moves() {
    let mut board = ToyBoard::standard().with_max_moves(200);
    let mut mcts = MCTS::new(searched_config(3000));

    let (from, to) = mcts.decide_move(&board).unwrap();
    board.apply_move(from, to).unwrap();

    // Pick the two opponent replies from the explored part of the tree
    let tree = mcts.tree().unwrap();
    let root = tree.get(tree.root());
    assert_eq!(root.mover, Color::Green);
    assert!(root.parent.is_none());
    assert!(root.originating_move.is_none());

    let (green_id, red_id) = root
        .children()
        .iter()
        .find_map(|&g| tree.get(g).children().first().map(|&r| (g, r)))
        .expect("an opponent reply should have been explored");
    let green_move = tree.get(green_id).originating_move.unwrap();
    let red = tree.get(red_id);
    let red_move = red.originating_move.unwrap();
    let expected = (red.visits, red.wins, red.children().len(), red.expanded);

    board.apply_move(green_move.origin, green_move.destination).unwrap();
    board.apply_move(red_move.origin, red_move.destination).unwrap();

    assert!(mcts.advance_root(&board), "both replies are in the tree");

    let tree = mcts.tree().unwrap();
    let root = tree.get(tree.root());
    assert_eq!(
        (root.visits, root.wins, root.children().len(), root.expanded),
        expected,
        "statistics along the matched path must survive re-rooting"
    );
    assert_eq!(root.mover, Color::Blue);
    assert!(root.parent.is_none());
    assert!(root.originating_move.is_none());
    assert_eq!(root.state.move_count(), board.move_count());
}

#[test]
fn test_lookup_miss_rebuilds_fresh_root() {
    let mut board = ToyBoard::standard();
    // No iterations: the chosen child is never expanded, so nothing below it exists
    let mut mcts = MCTS::new(searched_config(0));

    let (from, to) = mcts.decide_move(&board).unwrap();
    board.apply_move(from, to).unwrap();
    for _ in 0..2 {
        let reply = legal_moves(&board)[0];
        board.apply_move(reply.origin, reply.destination).unwrap();
    }

    assert!(!mcts.advance_root(&board));

    let tree = mcts.tree().unwrap();
    assert_eq!(tree.len(), 1);
    let root = tree.get(tree.root());
    assert_eq!((root.visits, root.wins), (0, 0));
    assert!(!root.expanded);
    assert!(root.children().is_empty());
    assert!(root.parent.is_none());
    assert!(root.originating_move.is_none());
    assert_eq!(root.mover, board.turn());
    assert_eq!(root.state.move_count(), board.move_count());
}

#[test]
fn test_decisions_report_reuse() {
    let mut board = ToyBoard::standard().with_max_moves(200);
    let mut mcts = MCTS::new(searched_config(3000));

    let (from, to) = mcts.decide_move(&board).unwrap();
    assert!(!mcts.get_statistics().tree_reused);
    board.apply_move(from, to).unwrap();

    // Opponents play the most visited replies, which are sure to be in the tree
    for _ in 0..2 {
        let tree = mcts.tree().unwrap();
        let mut node = tree.root();
        for index in 1..board.move_count() {
            let played = MoveKey::from(board.move_at(index).unwrap());
            node = tree.get(node).child(&played).unwrap();
        }
        let reply = tree
            .get(node)
            .children()
            .iter()
            .copied()
            .max_by_key(|&id| tree.get(id).visits)
            .and_then(|id| tree.get(id).originating_move)
            .unwrap();
        board.apply_move(reply.origin, reply.destination).unwrap();
    }

    if board.is_game_over() {
        return;
    }
    mcts.decide_move(&board).unwrap();
    let stats = mcts.get_statistics();
    assert!(stats.tree_reused);
    assert_eq!(stats.plies_advanced, 2);
}

#[test]
fn test_deciding_twice_on_same_board_rebuilds() {
    let board = ToyBoard::standard();
    let mut mcts = MCTS::new(searched_config(200));

    let first = mcts.decide_move(&board).unwrap();
    // Our own move was never played, so the kept subtree no longer matches
    let second = mcts.decide_move(&board).unwrap();
    assert!(!mcts.get_statistics().tree_reused);
    assert!(board.is_legal_move(first.0, first.1));
    assert!(board.is_legal_move(second.0, second.1));
}

#[test]
fn test_no_moves_played_keeps_tree_without_reporting_reuse() {
    let board = ToyBoard::standard();
    let mut mcts = MCTS::new(searched_config(40));

    assert!(!mcts.advance_root(&board), "first call builds the tree");
    mcts.search_for_iterations(40).unwrap();

    assert!(mcts.advance_root(&board));
    let tree = mcts.tree().unwrap();
    assert_eq!(tree.get(tree.root()).visits, 40, "tree is kept as it is");
    let stats = mcts.get_statistics();
    assert!(!stats.tree_reused);
    assert_eq!(stats.plies_advanced, 0);

    mcts.decide_move(&board).unwrap();
    let stats = mcts.get_statistics();
    assert!(!stats.tree_reused);
    assert_eq!(stats.plies_advanced, 0);
}

#[test]
fn test_reuse_can_be_disabled() {
    let mut board = ToyBoard::standard().with_max_moves(200);
    let mut mcts = MCTS::new(searched_config(500).with_tree_reuse(false));

    let (from, to) = mcts.decide_move(&board).unwrap();
    board.apply_move(from, to).unwrap();

    assert!(!mcts.advance_root(&board));
    assert_eq!(mcts.tree().unwrap().len(), 1);
}

#[test]
fn test_game_end_releases_tree() {
    let board = ToyBoard::standard();
    let mut mcts = MCTS::new(searched_config(50));
    mcts.decide_move(&board).unwrap();
    assert!(mcts.tree().is_some());

    mcts.on_game_end(&board);
    assert!(mcts.tree().is_none());
}
