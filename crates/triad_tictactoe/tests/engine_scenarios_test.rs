//! End-to-end scenarios through the public engine API.

use std::collections::BTreeSet;
use triad_tictactoe::{GameConfig, GameEngine, MoveOutcome, Outcome, Phase, Player, Position};

fn player(id: u32, symbol: char) -> Player {
    Player::new(id, format!("Player {id}"), symbol, "#000000")
}

fn engine_with(config: GameConfig, players: Vec<Player>) -> GameEngine {
    let mut engine = GameEngine::new(config);
    engine.set_players(players);
    engine
}

#[test]
fn test_single_player_completes_top_row() {
    let x = player(1, 'X');
    let mut engine = engine_with(GameConfig::new(3, 3), vec![x.clone()]);

    engine.make_move(0, 0);
    engine.make_move(0, 1);
    let outcome = engine.make_move(0, 2);

    let expected: BTreeSet<_> = [(0, 0), (0, 1), (0, 2)]
        .into_iter()
        .map(|(r, c)| Position::new(r, c))
        .collect();
    assert_eq!(
        outcome,
        MoveOutcome::Won {
            winner: x.clone(),
            cells: expected.clone()
        }
    );
    let state = engine.state();
    assert_eq!(state.winner().map(Player::id), Some(x.id()));
    assert_eq!(state.winning_cells(), &expected);
    assert!(state.game_over());
    assert_eq!(engine.outcome(), Some(Outcome::Winner(x)));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut engine = engine_with(
        GameConfig::new(3, 3),
        vec![player(1, 'X'), player(2, 'O')],
    );
    // Final board: X O X / X O O / O X X
    let moves = [
        (0, 0), (0, 1), (0, 2), (1, 1), (1, 0),
        (1, 2), (2, 1), (2, 0), (2, 2),
    ];
    for (i, (row, col)) in moves.into_iter().enumerate() {
        let outcome = engine.make_move(row, col);
        if i < moves.len() - 1 {
            assert!(
                matches!(outcome, MoveOutcome::Continued { .. }),
                "move {i} ended the game early: {outcome:?}"
            );
        } else {
            assert_eq!(outcome, MoveOutcome::Draw);
        }
    }

    let state = engine.state();
    assert!(state.game_over());
    assert!(state.winner().is_none());
    assert!(state.winning_cells().is_empty());
    assert_eq!(engine.outcome(), Some(Outcome::Draw));
    assert_eq!(engine.phase(), Phase::Ended);
}

#[test]
fn test_board_size_clamped_to_range() {
    let mut engine = GameEngine::default();
    engine.change_board_size(15);
    assert_eq!(engine.config().board_size(), 12);
    assert_eq!(engine.state().board().total_cells(), 144);

    engine.change_board_size(1);
    assert_eq!(engine.config().board_size(), 3);
    assert_eq!(engine.config().win_condition(), 3);
}

#[test]
fn test_win_condition_clamped_and_board_reset() {
    let mut engine = engine_with(GameConfig::new(5, 4), vec![player(1, 'X')]);
    engine.make_move(2, 2);
    engine.make_move(3, 3);

    engine.change_win_condition(10);

    assert_eq!(engine.config().win_condition(), 5);
    assert_eq!(engine.state().move_count(), 0);
    assert_eq!(engine.state().board().occupied_count(), 0);
    assert!(!engine.state().game_over());
}

#[test]
fn test_negative_coordinates_ignored() {
    let mut engine = engine_with(GameConfig::new(3, 3), vec![player(1, 'X')]);
    let before = engine.state().clone();

    let outcome = engine.make_move(-1, 0);

    assert!(!outcome.is_applied());
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_three_players_anti_diagonal_win_on_large_board() {
    let mut engine = engine_with(
        GameConfig::new(7, 4),
        vec![player(1, 'X'), player(2, 'O'), player(3, 'Δ')],
    );
    // Player 3 builds the anti-diagonal (0,6) (1,5) (2,4) (3,3).
    let rounds = [
        [(6, 0), (6, 1), (0, 6)],
        [(5, 0), (5, 2), (1, 5)],
        [(6, 3), (6, 5), (3, 3)],
        [(4, 0), (4, 1), (2, 4)],
    ];
    let mut last = MoveOutcome::Draw;
    for round in rounds {
        for (row, col) in round {
            last = engine.make_move(row, col);
        }
    }

    match last {
        MoveOutcome::Won { winner, cells } => {
            assert_eq!(winner.symbol(), 'Δ');
            assert_eq!(cells.len(), 4);
            assert!(cells.contains(&Position::new(0, 6)));
            assert!(cells.contains(&Position::new(3, 3)));
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert_eq!(engine.state().current_player_index(), 2);
}

#[test]
fn test_reset_after_win_allows_replay() {
    let mut engine = engine_with(GameConfig::new(3, 3), vec![player(1, 'X')]);
    for col in 0..3 {
        engine.make_move(1, col);
    }
    assert_eq!(engine.phase(), Phase::Ended);

    engine.reset_game();
    assert_eq!(engine.phase(), Phase::InProgress);
    assert!(engine.state().winner().is_none());
    assert!(engine.make_move(1, 1).is_applied());
}
