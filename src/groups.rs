#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Scores are truncated towards zero on purpose
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use log::{debug, info};

use crate::components::Board;
use crate::game::{CLEARS_PER_LEVEL, MIN_GROUP_SIZE, POINTS_PER_CELL};
use crate::session::GameState;

/// Marker grid for one clear pass.
#[derive(Debug, Clone)]
pub struct Visited {
    width: usize,
    marks: Vec<bool>,
}

impl Visited {
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            width: board.width(),
            marks: vec![false; board.width() * board.height()],
        }
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.marks[row * self.width + col]
    }

    fn insert(&mut self, row: usize, col: usize) {
        self.marks[row * self.width + col] = true;
    }
}

/// Collects the 4-connected region of occupied `color` cells reachable from
/// `(start_row, start_col)` that are not yet in `visited`, marking them.
#[must_use]
pub fn find_group(
    board: &Board,
    start_row: usize,
    start_col: usize,
    color: u8,
    visited: &mut Visited,
) -> Vec<(usize, usize)> {
    let matches = |visited: &Visited, row: usize, col: usize| {
        board.is_occupied(row, col) && board.color(row, col) == color && !visited.contains(row, col)
    };

    let mut group = Vec::new();
    if !matches(visited, start_row, start_col) {
        return group;
    }

    visited.insert(start_row, start_col);
    let mut stack = vec![(start_row, start_col)];
    while let Some((row, col)) = stack.pop() {
        group.push((row, col));

        // down, up, right, left
        let neighbours = [
            (row + 1 < board.height()).then(|| (row + 1, col)),
            row.checked_sub(1).map(|up| (up, col)),
            (col + 1 < board.width()).then(|| (row, col + 1)),
            col.checked_sub(1).map(|left| (row, left)),
        ];
        for (next_row, next_col) in neighbours.into_iter().flatten() {
            if matches(visited, next_row, next_col) {
                visited.insert(next_row, next_col);
                stack.push((next_row, next_col));
            }
        }
    }
    group
}

/// Result of a single clear pass over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearPass {
    pub cells: usize,
    pub groups: u32,
    pub points: u32,
    pub leveled_up: bool,
}

impl ClearPass {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }
}

/// Removes every group of at least `MIN_GROUP_SIZE` cells, scoring
/// `cells * 100 * chain_multiplier` per group, and advances the clear counter
/// and level. The level rises by at most one per pass.
pub fn clear_groups(board: &mut Board, state: &mut GameState, chain_multiplier: f64) -> ClearPass {
    let mut visited = Visited::new(board);
    let mut pass = ClearPass::default();

    for row in 0..board.height() {
        for col in 0..board.width() {
            if !board.is_occupied(row, col) || visited.contains(row, col) {
                continue;
            }
            let color = board.color(row, col);
            let group = find_group(board, row, col, color, &mut visited);
            if group.len() < MIN_GROUP_SIZE {
                continue;
            }

            for &(cell_row, cell_col) in &group {
                board.clear(cell_row, cell_col);
            }
            let points = (group.len() as f64 * POINTS_PER_CELL * chain_multiplier) as u32;
            debug!(
                "Cleared group of {} (color {color}) for {points} points",
                group.len()
            );
            state.score = state.score.saturating_add(points);
            pass.points = pass.points.saturating_add(points);
            pass.cells += group.len();
            pass.groups += 1;
        }
    }

    if pass.groups > 0 {
        state.clears += pass.groups;
        if state.clears / CLEARS_PER_LEVEL >= state.level {
            state.level += 1;
            pass.leveled_up = true;
            info!("Level up: {}", state.level);
        }
    }

    pass
}
