//! Mates
//!
//! Tests to ensure checkmate and stalemate are detected,
//! and that a finished game accepts no further moves.

use chess_rules::coretypes::{Color, Color::*};
use chess_rules::*;

/// Play `moves` from `fen`, and check the final status and loser.
fn mate_tester(fen: &str, moves: &[&str], expected: GameStatus, to_move: Color) {
    let mut game = Game::from_fen(fen).unwrap();
    for text in moves {
        assert!(!game.status().is_terminal(), "game ended before {text}");
        game.apply_text(text).unwrap();
    }

    assert_eq!(game.status(), expected);
    assert_eq!(game.position().side_to_move(), to_move);
    assert!(game.legal_moves().is_empty());
}

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn scholars_mate() {
    let moves = ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"];
    mate_tester(START, &moves, GameStatus::Checkmate, Black);
}

#[test]
fn fools_mate() {
    let moves = ["f2f3", "e7e5", "g2g4", "d8h4"];
    mate_tester(START, &moves, GameStatus::Checkmate, White);
}

#[test]
fn back_rank_mate() {
    mate_tester(
        "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
        &["a1a8"],
        GameStatus::Checkmate,
        Black,
    );
}

#[test]
fn smothered_mate() {
    mate_tester(
        "6rk/6pp/8/6N1/8/8/8/6K1 w - - 0 1",
        &["g5f7"],
        GameStatus::Checkmate,
        Black,
    );
}

#[test]
fn promotion_mates() {
    let fen = "k7/2P5/1K6/8/8/8/8/8 w - - 0 1";
    mate_tester(fen, &["c7c8q"], GameStatus::Checkmate, Black);
    mate_tester(fen, &["c7c8r"], GameStatus::Checkmate, Black);

    // An underpromotion to a knight gives the king b8, and leaves too little to mate.
    let mut game = Game::from_fen(fen).unwrap();
    game.apply_text("c7c8n").unwrap();
    assert_eq!(game.status(), GameStatus::DrawInsufficientMaterial);
    assert_eq!(game.legal_moves().len(), 1);

    // With a pawn left on the board the same underpromotion plays on.
    let mut game = Game::from_fen("k7/2P5/1K6/8/8/8/7P/8 w - - 0 1").unwrap();
    game.apply_text("c7c8n").unwrap();
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.legal_moves().len(), 1);
}

#[test]
fn mate_with_pinned_defender() {
    // The f6 bishop could take on d8, but the c3 bishop pins it to the king.
    mate_tester(
        "7k/7p/4Nb2/8/8/2B5/8/3R2K1 w - - 0 1",
        &["d1d8"],
        GameStatus::Checkmate,
        Black,
    );
}

#[test]
fn stalemates() {
    mate_tester(
        "k7/8/8/2Q5/8/8/8/7K w - - 0 1",
        &["c5b6"],
        GameStatus::Stalemate,
        Black,
    );
    mate_tester(
        "7k/8/6KP/8/8/8/8/8 b - - 0 1",
        &["h8g8", "h6h7", "g8h8", "g6h6"],
        GameStatus::Stalemate,
        Black,
    );
}

#[test]
fn finished_games_reject_moves() {
    let mut game = Game::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(game.legal_moves().is_empty());
    assert_eq!(
        game.apply_text("h8g8").unwrap_err().kind(),
        ErrorKind::IllegalMove
    );
    assert_eq!(game.apply_text("h8h7").unwrap_err().kind(), ErrorKind::IllegalMove);
}

#[test]
fn undo_out_of_checkmate() {
    let mut game = Game::from_fen(START).unwrap();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.apply_text(text).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Checkmate);

    game.undo().unwrap();
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert!(game.legal_moves().iter().any(|m| m.to_string() == "d8h4"));
}

#[test]
fn reversed_fools_mate() {
    let moves = ["e2e4", "f7f6", "d2d4", "g7g5", "d1h5"];
    mate_tester(START, &moves, GameStatus::Checkmate, Black);
}

#[test]
fn check_is_reported() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    game.apply_text("a1a8").unwrap();
    assert_eq!(game.status(), GameStatus::Check);
    assert!(game.status().is_check());
    assert!(!game.status().is_terminal());
    // Only the seventh rank is safe.
    assert_eq!(game.legal_moves().len(), 3);
}
