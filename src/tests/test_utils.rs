use bevy_ecs::prelude::*;

use crate::components::{Board, CascadeClock, ChainBanner, Input, Piece, Position};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, Rules};
use crate::session::{CascadeMode, Session};

pub const TEST_SEED: u64 = 7;

/// Builds a standard board from text rows aligned to the floor. `.` is
/// empty, a digit is a color id.
pub fn board_from_rows(rows: &[&str]) -> Board {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    let top = BOARD_HEIGHT - rows.len();
    for (i, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if let Some(color) = ch.to_digit(10) {
                board.set(top + i, col, color as u8);
            }
        }
    }
    board
}

pub fn board_with(cells: &[(usize, usize, u8)]) -> Board {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    for &(row, col, color) in cells {
        board.set(row, col, color);
    }
    board
}

pub fn session_on(board: Board) -> Session {
    Session::from_board(Rules::default(), TEST_SEED, board)
}

/// Column 5 filled from row 2 down with alternating colors, so the first
/// lock tops out.
pub fn topped_out_board() -> Board {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    for row in 2..BOARD_HEIGHT {
        board.set(row, 5, if row % 2 == 0 { 1 } else { 2 });
    }
    board
}

/// A stack that resolves into a two-wave chain once a domino colored
/// (top 2, bottom 1) lands in column 0: four 1s clear for 400, then the
/// falling 2 completes a row of four 2s for 600.
pub fn two_chain_session(mode: CascadeMode) -> Session {
    let board = board_with(&[
        (17, 0, 1),
        (18, 0, 1),
        (19, 0, 1),
        (19, 1, 2),
        (19, 2, 2),
        (19, 3, 2),
    ]);
    let mut session = session_on(board).with_mode(mode);
    session.active = Piece::from_cells(&[(0, 1, 2), (1, 1, 1)]);
    session.position = Position::new(-1, 0);
    session
}

/// Creates a test world with a session and the per-frame resources.
pub fn create_test_world(session: Session) -> World {
    let mut world = World::new();
    world.insert_resource(session);
    world.insert_resource(Input::default());
    world.insert_resource(ChainBanner::default());
    world.insert_resource(CascadeClock::default());
    world.insert_resource(crate::Time::new());
    world
}
