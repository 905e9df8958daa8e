//! Undo
//!
//! Tests to ensure undoing moves exactly restores earlier game states.

use chess_rules::fen::Fen;
use chess_rules::*;

#[test]
fn undo_restores_every_ply() {
    let moves = [
        "e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6", "d8d2", "b1d2", "b7c6", "g1f3",
        "c6b5", "e1g1", "b5b4", "c2c4", "b4c3", "b2c3", "e7e5", "d2b3", "f8a3", "c1a3",
    ];
    let mut game = Game::with_seed(Position::start_position(), 17);
    let mut snapshots = vec![(game.position().to_fen(), game.hash(), game.status())];

    for text in moves {
        game.apply_text(text).unwrap();
        snapshots.push((game.position().to_fen(), game.hash(), game.status()));
    }
    assert_eq!(game.ply(), moves.len());
    assert_eq!(
        game.position().to_fen(),
        "rnb1k2r/p4ppp/5n2/4p3/8/BNP2N2/P4PPP/R2Q1RK1 b kq - 0 11"
    );

    for (i, text) in moves.iter().enumerate().rev() {
        let undone = game.undo().unwrap();
        assert_eq!(undone.to_string(), *text);
        assert_eq!(game.ply(), i);
        let (fen, hash, status) = &snapshots[i];
        assert_eq!(&game.position().to_fen(), fen);
        assert_eq!(game.hash(), *hash);
        assert_eq!(game.status(), *status);
    }

    assert_eq!(game.position(), game.base_position());
    assert_eq!(game.undo().unwrap_err().kind(), ErrorKind::EmptyHistory);
}

#[test]
fn undo_then_replay_matches() {
    let mut game = Game::new();
    for text in ["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4"] {
        game.apply_text(text).unwrap();
    }
    let fen = game.position().to_fen();
    let hash = game.hash();

    let mut undone = Vec::new();
    for _ in 0..3 {
        undone.push(game.undo().unwrap());
    }
    for move_ in undone.into_iter().rev() {
        game.apply(move_).unwrap();
    }
    assert_eq!(game.position().to_fen(), fen);
    assert_eq!(game.hash(), hash);
}

#[test]
fn undo_empty_game_is_an_error() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 12 40").unwrap();
    let err = game.undo().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyHistory);
    assert_eq!(game.position().to_fen(), "4k3/8/8/8/8/8/8/R3K3 w - - 12 40");
}

#[test]
fn game_from_moves_matches_played_game() {
    let base = Position::start_position();
    let mut played = Game::new();
    for text in ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4"] {
        played.apply_text(text).unwrap();
    }
    let moves: Vec<Move> = played.moves().collect();

    let replayed = Game::with_moves(base, &moves).unwrap();
    assert_eq!(replayed.position(), played.position());
    assert_eq!(replayed.status(), played.status());
    assert_eq!(replayed.ply(), 7);
}
