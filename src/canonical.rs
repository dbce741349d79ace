//! Alternate views of a position, used for navigation links only.
//!
//! The symmetry transforms work on the board field of the FEN and drop
//! castling rights, en passant and clocks, which do not survive a mirror.

use serde::Serialize;
use shakmaty::{Color, Setup};

use crate::position::setup_fen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalViews {
    pub white_fen: String,
    pub black_fen: String,
    pub horizontal_fen: String,
    pub vertical_fen: String,
    pub swapped_fen: String,
}

impl CanonicalViews {
    pub fn of(setup: &Setup) -> CanonicalViews {
        let board = setup.board.to_string();
        let turn = turn_char(setup.turn);

        CanonicalViews {
            white_fen: with_turn(setup.clone(), Color::White),
            black_fen: with_turn(setup.clone(), Color::Black),
            horizontal_fen: bare_fen(&mirror_horizontal(&board), turn),
            vertical_fen: bare_fen(&mirror_vertical(&board), turn),
            swapped_fen: bare_fen(&swap_colors(&board), turn),
        }
    }
}

/// Full FEN of the setup with `turn` to move.
pub fn with_turn(mut setup: Setup, turn: Color) -> String {
    if setup.turn != turn {
        setup.turn = turn;
        // A double push is never capturable by the side that made it.
        setup.ep_square = None;
    }
    setup_fen(setup)
}

/// Mirror files: a-file and h-file trade places.
pub fn mirror_horizontal(board: &str) -> String {
    board
        .split('/')
        .map(|rank| rank.chars().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

/// Mirror ranks: first and eighth rank trade places.
pub fn mirror_vertical(board: &str) -> String {
    board.split('/').rev().collect::<Vec<_>>().join("/")
}

/// Swap piece colours without touching squares.
pub fn swap_colors(board: &str) -> String {
    board
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

fn bare_fen(board: &str, turn: char) -> String {
    format!("{board} {turn} - - 0 1")
}

fn turn_char(color: Color) -> char {
    match color {
        Color::White => 'w',
        Color::Black => 'b',
    }
}
