#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use crate::game::{KICK_OFFSETS, PIECE_SIZE};

/// Board-relative coordinate of a piece's local top-left corner. `y` may be
/// negative while a piece hangs above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

type Matrix<T> = [[T; PIECE_SIZE]; PIECE_SIZE];

fn is_corner(row: usize, col: usize) -> bool {
    (row == 0 || row == PIECE_SIZE - 1) && (col == 0 || col == PIECE_SIZE - 1)
}

/// The falling unit: a 3x3 matrix of colored cells. Only the center and its
/// four orthogonal neighbours are ever filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Piece {
    shape: Matrix<bool>,
    colors: Matrix<u8>,
}

impl Piece {
    /// A vertical domino filling the top and center cells of the middle
    /// column. The top color is drawn first.
    pub fn domino(mut pick_color: impl FnMut() -> u8) -> Self {
        let mut piece = Self::default();
        for row in 0..2 {
            piece.shape[row][1] = true;
            piece.colors[row][1] = pick_color();
        }
        piece
    }

    /// Builds a piece from `(row, col, color)` triples in local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if a cell is outside the 3x3 matrix, sits on a corner, or has
    /// color 0.
    #[must_use]
    pub fn from_cells(cells: &[(usize, usize, u8)]) -> Self {
        let mut piece = Self::default();
        for &(row, col, color) in cells {
            assert!(
                row < PIECE_SIZE && col < PIECE_SIZE,
                "piece cell ({row}, {col}) is outside the local matrix"
            );
            assert!(!is_corner(row, col), "piece cell ({row}, {col}) is a corner");
            assert!(color != 0, "piece cell ({row}, {col}) has no color");
            piece.shape[row][col] = true;
            piece.colors[row][col] = color;
        }
        piece
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.shape[row][col]
    }

    #[must_use]
    pub fn color(&self, row: usize, col: usize) -> u8 {
        self.colors[row][col]
    }

    #[must_use]
    pub fn shape(&self) -> &Matrix<bool> {
        &self.shape
    }

    #[must_use]
    pub fn colors(&self) -> &Matrix<u8> {
        &self.colors
    }

    /// Filled cells as `(local_row, local_col, color)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        (0..PIECE_SIZE).flat_map(move |row| {
            (0..PIECE_SIZE)
                .filter(move |&col| self.shape[row][col])
                .map(move |col| (row, col, self.colors[row][col]))
        })
    }

    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        self.remap(|row, col| (PIECE_SIZE - 1 - col, row))
    }

    #[must_use]
    pub fn rotated_ccw(&self) -> Self {
        self.remap(|row, col| (col, PIECE_SIZE - 1 - row))
    }

    // `source(row, col)` names the cell whose content lands on (row, col).
    fn remap(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let mut rotated = Self::default();
        for row in 0..PIECE_SIZE {
            for col in 0..PIECE_SIZE {
                if is_corner(row, col) {
                    continue;
                }
                let (src_row, src_col) = source(row, col);
                rotated.shape[row][col] = self.shape[src_row][src_col];
                rotated.colors[row][col] = self.colors[src_row][src_col];
            }
        }
        rotated
    }
}

/// The settled stack: occupancy plus a parallel color matrix, indexed
/// `[row][col]` with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    occupied: Vec<Vec<bool>>,
    colors: Vec<Vec<u8>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            occupied: vec![vec![false; width]; height],
            colors: vec![vec![0; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn check_bounds(&self, row: usize, col: usize) {
        assert!(
            row < self.height && col < self.width,
            "board access ({row}, {col}) outside {}x{}",
            self.height,
            self.width
        );
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.check_bounds(row, col);
        self.occupied[row][col]
    }

    /// Color id at `(row, col)`, 0 when empty.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    #[must_use]
    pub fn color(&self, row: usize, col: usize) -> u8 {
        self.check_bounds(row, col);
        self.colors[row][col]
    }

    /// `Some(color)` for an occupied cell.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.is_occupied(row, col).then(|| self.colors[row][col])
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board or `color` is 0.
    pub fn set(&mut self, row: usize, col: usize, color: u8) {
        self.check_bounds(row, col);
        assert!(color != 0, "color 0 is reserved for empty cells");
        self.occupied[row][col] = true;
        self.colors[row][col] = color;
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.check_bounds(row, col);
        self.occupied[row][col] = false;
        self.colors[row][col] = 0;
    }

    pub fn reset(&mut self) {
        for row in &mut self.occupied {
            row.fill(false);
        }
        for row in &mut self.colors {
            row.fill(0);
        }
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().flatten().filter(|&&cell| cell).count()
    }

    // Rows above the board are open sky; everything else outside is wall.
    fn blocks(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return true;
        }
        row >= 0 && self.occupied[row as usize][col as usize]
    }

    /// True when `piece` placed with its top-left at `origin` overlaps a wall,
    /// the floor, or a settled cell.
    #[must_use]
    pub fn collides(&self, piece: &Piece, origin: Position) -> bool {
        piece.cells().any(|(row, col, _)| {
            self.blocks(origin.y + row as i32, origin.x + col as i32)
        })
    }

    /// Tries the kick offsets in order and returns the first origin at which
    /// `rotated` fits.
    #[must_use]
    pub fn attempt_rotation(&self, rotated: &Piece, origin: Position) -> Option<Position> {
        KICK_OFFSETS
            .iter()
            .map(|&(dx, dy)| origin.offset(dx, dy))
            .find(|&candidate| !self.collides(rotated, candidate))
    }

    /// Writes the piece's on-board cells into the grid. Cells above the top
    /// row are dropped.
    pub fn lock_piece(&mut self, piece: &Piece, origin: Position) {
        for (row, col, color) in piece.cells() {
            let y = origin.y + row as i32;
            let x = origin.x + col as i32;
            if y >= 0 && y < self.height as i32 && x >= 0 && x < self.width as i32 {
                self.set(y as usize, x as usize, color);
            }
        }
    }

    /// Landing row of every piece cell, each dropped on its own through empty
    /// board cells. This is a display aid and ignores the piece's other cells.
    #[must_use]
    pub fn ghost_cells(&self, piece: &Piece, origin: Position) -> Vec<(usize, usize, u8)> {
        let mut ghost = Vec::new();
        for (row, col, color) in piece.cells() {
            let x = origin.x + col as i32;
            let mut y = origin.y + row as i32;
            if x < 0 || x >= self.width as i32 {
                continue;
            }
            while y + 1 < self.height as i32 && !self.blocks(y + 1, x) {
                y += 1;
            }
            if y >= 0 && y < self.height as i32 {
                ghost.push((y as usize, x as usize, color));
            }
        }
        ghost
    }

    /// One animation frame of gravity: every cell falls until it meets the
    /// cell that was below it before this step. Returns whether anything moved.
    pub fn gravity_step(&mut self) -> bool {
        let mut moved = false;
        let mut occupied = vec![vec![false; self.width]; self.height];
        let mut colors = vec![vec![0; self.width]; self.height];

        for row in (0..self.height).rev() {
            for col in 0..self.width {
                if !self.occupied[row][col] {
                    continue;
                }
                let mut target = row;
                while target + 1 < self.height && !self.occupied[target + 1][col] {
                    target += 1;
                }
                moved |= target != row;
                occupied[target][col] = true;
                colors[target][col] = self.colors[row][col];
            }
        }

        self.occupied = occupied;
        self.colors = colors;
        moved
    }

    /// Compacts every column downward in one pass, keeping the vertical order
    /// of cells. Returns whether anything moved.
    pub fn collapse(&mut self) -> bool {
        let mut moved = false;
        let mut occupied = vec![vec![false; self.width]; self.height];
        let mut colors = vec![vec![0; self.width]; self.height];

        for col in 0..self.width {
            let mut settle = self.height;
            for row in (0..self.height).rev() {
                if !self.occupied[row][col] {
                    continue;
                }
                settle -= 1;
                moved |= settle != row;
                occupied[settle][col] = true;
                colors[settle][col] = self.colors[row][col];
            }
        }

        self.occupied = occupied;
        self.colors = colors;
        moved
    }

    /// True when no cell has an empty cell directly beneath it.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (0..self.height.saturating_sub(1)).all(|row| {
            (0..self.width).all(|col| !self.occupied[row][col] || self.occupied[row + 1][col])
        })
    }
}

// Keyboard state collected between ticks, drained by the input system
#[derive(bevy_ecs::prelude::Resource, Debug, Clone, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hard_drop: bool,
    pub soft_drop: Option<bool>, // Only sent when the held state changes
}

impl Input {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !(self.left || self.right || self.rotate_cw || self.rotate_ccw || self.hard_drop)
            && self.soft_drop.is_none()
    }
}

// Paces stepped cascades so each gravity frame and clear wave stays on screen
#[derive(bevy_ecs::prelude::Resource, Debug, Clone)]
pub struct CascadeClock {
    pub step_seconds: f32,
    pub timer: f32,
}

impl Default for CascadeClock {
    fn default() -> Self {
        Self {
            step_seconds: 0.06,
            timer: 0.0,
        }
    }
}

// "CHAIN xN!" banner, visible while the timer is positive
#[derive(bevy_ecs::prelude::Resource, Debug, Clone, Default)]
pub struct ChainBanner {
    pub chain: u32,
    pub timer: f32,
    pub seen_lock: u64, // Lock count whose cascade has already been announced
}

impl ChainBanner {
    pub const DURATION: f32 = 1.5;

    pub fn show(&mut self, chain: u32) {
        self.chain = chain;
        self.timer = Self::DURATION;
    }

    pub fn update(&mut self, delta_seconds: f32) {
        self.timer = (self.timer - delta_seconds).max(0.0);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.timer > 0.0 && self.chain > 1
    }

    /// 1.0 when just shown, fading to 0.0.
    #[must_use]
    pub fn strength(&self) -> f32 {
        self.timer / Self::DURATION
    }
}
