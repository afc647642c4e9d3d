#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod position_tests {
    use crate::components::Position;

    #[test]
    fn test_position_offset() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.offset(-1, 0), Position::new(4, 10));
        assert_eq!(pos.offset(1, 1), Position::new(6, 11));
        assert_eq!(pos.offset(0, -11), Position::new(5, -1));
    }
}

#[cfg(test)]
mod piece_tests {
    use crate::components::Piece;

    // Center plus all four arms, each with its own color
    fn plus() -> Piece {
        Piece::from_cells(&[(0, 1, 1), (1, 2, 2), (2, 1, 3), (1, 0, 4), (1, 1, 5)])
    }

    #[test]
    fn test_domino_colors() {
        let mut colors = [3, 1].into_iter();
        let piece = Piece::domino(|| colors.next().unwrap());

        assert_eq!(piece.color(0, 1), 3);
        assert_eq!(piece.color(1, 1), 1);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(0, 1, 3), (1, 1, 1)]);
    }

    #[test]
    fn test_rotate_cw_moves_arms_clockwise() {
        let rotated = plus().rotated_cw();

        // left -> top, top -> right, right -> bottom, bottom -> left
        assert_eq!(rotated.color(0, 1), 4);
        assert_eq!(rotated.color(1, 2), 1);
        assert_eq!(rotated.color(2, 1), 2);
        assert_eq!(rotated.color(1, 0), 3);
        assert_eq!(rotated.color(1, 1), 5);
    }

    #[test]
    fn test_rotate_ccw_moves_arms_counterclockwise() {
        let rotated = plus().rotated_ccw();

        assert_eq!(rotated.color(0, 1), 2);
        assert_eq!(rotated.color(1, 2), 3);
        assert_eq!(rotated.color(2, 1), 4);
        assert_eq!(rotated.color(1, 0), 1);
        assert_eq!(rotated.color(1, 1), 5);
    }

    #[test]
    fn test_domino_rotations() {
        let domino = Piece::from_cells(&[(0, 1, 1), (1, 1, 2)]);

        let cw: Vec<_> = domino.rotated_cw().cells().collect();
        assert_eq!(cw, vec![(1, 1, 2), (1, 2, 1)]);

        let ccw: Vec<_> = domino.rotated_ccw().cells().collect();
        assert_eq!(ccw, vec![(1, 0, 1), (1, 1, 2)]);
    }

    #[test]
    fn test_rotation_cycles() {
        let piece = plus();
        let mut spun = piece;
        for _ in 0..4 {
            spun = spun.rotated_cw();
        }
        assert_eq!(spun, piece);
        assert_eq!(piece.rotated_cw().rotated_ccw(), piece);
    }

    #[test]
    fn test_corners_stay_empty() {
        let piece = plus().rotated_cw().rotated_cw().rotated_ccw();
        for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert!(!piece.is_filled(row, col));
            assert_eq!(piece.color(row, col), 0);
        }
    }

    #[test]
    #[should_panic(expected = "corner")]
    fn test_corner_cell_rejected() {
        let _ = Piece::from_cells(&[(0, 0, 1)]);
    }
}

#[cfg(test)]
mod board_tests {
    use crate::components::{Board, Piece, Position};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

    fn domino() -> Piece {
        Piece::from_cells(&[(0, 1, 1), (1, 1, 2)])
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        assert_eq!(board.width(), BOARD_WIDTH);
        assert_eq!(board.height(), BOARD_HEIGHT);
        assert_eq!(board.occupied_count(), 0);
        assert!(board.is_settled());
    }

    #[test]
    fn test_set_and_clear_keep_color_in_sync() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(3, 4, 2);
        assert!(board.is_occupied(3, 4));
        assert_eq!(board.color(3, 4), 2);
        assert_eq!(board.cell(3, 4), Some(2));

        board.clear(3, 4);
        assert!(!board.is_occupied(3, 4));
        assert_eq!(board.color(3, 4), 0);
        assert_eq!(board.cell(3, 4), None);

        board.set(0, 0, 1);
        board.set(19, 9, 7);
        board.reset();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.color(19, 9), 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_read_out_of_bounds_panics() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let _ = board.is_occupied(BOARD_HEIGHT, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_write_out_of_bounds_panics() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(0, BOARD_WIDTH, 1);
    }

    #[test]
    #[should_panic(expected = "reserved")]
    fn test_set_color_zero_panics() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(0, 0, 0);
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let piece = domino();

        // The domino sits in local column 1
        assert!(!board.collides(&piece, Position::new(4, 0)));
        assert!(!board.collides(&piece, Position::new(-1, 0)));
        assert!(board.collides(&piece, Position::new(-2, 0)));
        assert!(!board.collides(&piece, Position::new(8, 0)));
        assert!(board.collides(&piece, Position::new(9, 0)));

        assert!(!board.collides(&piece, Position::new(4, 18)));
        assert!(board.collides(&piece, Position::new(4, 19)));
    }

    #[test]
    fn test_rows_above_board_never_collide() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(0, 5, 3);
        let piece = domino();

        assert!(!board.collides(&piece, Position::new(4, -2)));
        // Bottom cell reaches row 0
        assert!(board.collides(&piece, Position::new(4, -1)));
        assert!(board.collides(&piece, Position::new(4, 0)));
    }

    #[test]
    fn test_rotation_kicks_left_off_right_wall() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let rotated = domino().rotated_cw();

        // Column 9 domino turning right would poke into column 10
        let origin = board.attempt_rotation(&rotated, Position::new(8, 5));
        assert_eq!(origin, Some(Position::new(7, 5)));
    }

    #[test]
    fn test_rotation_kicks_right_off_left_wall() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let rotated = domino().rotated_ccw();

        let origin = board.attempt_rotation(&rotated, Position::new(-1, 5));
        assert_eq!(origin, Some(Position::new(0, 5)));
    }

    #[test]
    fn test_rotation_kicks_up() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        for col in [4, 6, 7] {
            board.set(19, col, 1);
        }
        let rotated = domino().rotated_cw();

        // In place, left and right all hit the floor row; up is free
        let origin = board.attempt_rotation(&rotated, Position::new(4, 18));
        assert_eq!(origin, Some(Position::new(4, 17)));
    }

    #[test]
    fn test_rotation_rejected_when_no_kick_fits() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                board.set(row, col, 1);
            }
        }
        board.clear(10, 5);
        board.clear(11, 5);

        let rotated = domino().rotated_cw();
        assert_eq!(board.attempt_rotation(&rotated, Position::new(4, 10)), None);
    }

    #[test]
    fn test_lock_piece_drops_cells_above_board() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.lock_piece(&domino(), Position::new(4, -1));

        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.cell(0, 5), Some(2));
    }

    #[test]
    fn test_ghost_drops_each_cell() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(19, 6, 4);
        let flat = domino().rotated_cw();

        let ghost = board.ghost_cells(&flat, Position::new(4, 0));
        assert_eq!(ghost, vec![(19, 5, 2), (18, 6, 1)]);
    }

    #[test]
    fn test_gravity_step_moves_one_frame() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(15, 0, 1);
        board.set(17, 0, 2);

        assert!(board.gravity_step());
        assert_eq!(board.cell(19, 0), Some(2));
        assert_eq!(board.cell(16, 0), Some(1));
        assert!(!board.is_settled());

        assert!(board.gravity_step());
        assert_eq!(board.cell(18, 0), Some(1));
        assert!(board.is_settled());

        assert!(!board.gravity_step());
    }

    #[test]
    fn test_collapse_compacts_columns_in_order() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set(2, 3, 1);
        board.set(10, 3, 2);
        board.set(17, 3, 3);
        board.set(19, 4, 4);

        assert!(board.collapse());
        assert_eq!(board.cell(17, 3), Some(1));
        assert_eq!(board.cell(18, 3), Some(2));
        assert_eq!(board.cell(19, 3), Some(3));
        assert_eq!(board.cell(19, 4), Some(4));
        assert_eq!(board.occupied_count(), 4);
        assert!(board.is_settled());

        assert!(!board.collapse());
    }
}

#[cfg(test)]
mod resource_tests {
    use crate::components::{ChainBanner, Input};

    #[test]
    fn test_input_idle() {
        let mut input = Input::default();
        assert!(input.is_idle());
        input.soft_drop = Some(false);
        assert!(!input.is_idle());
        let input = Input {
            rotate_ccw: true,
            ..Input::default()
        };
        assert!(!input.is_idle());
    }

    #[test]
    fn test_chain_banner_fades() {
        let mut banner = ChainBanner::default();
        assert!(!banner.is_visible());

        banner.show(3);
        assert!(banner.is_visible());
        assert!((banner.strength() - 1.0).abs() < f32::EPSILON);

        banner.update(1.0);
        assert!(banner.is_visible());
        banner.update(1.0);
        assert!(!banner.is_visible());
        assert!(banner.timer.abs() < f32::EPSILON);

        // Single waves are not announced
        banner.show(1);
        assert!(!banner.is_visible());
    }
}
