#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::{info, trace};

use crate::components::{Board, Piece, Position};
use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, Rules, SPAWN_X, SPAWN_Y, STARTING_LEVEL, fall_interval,
};

/// Scoring and progression counters for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    /// Cumulative number of groups cleared.
    pub clears: u32,
    /// Depth of the current (or most recent) cascade.
    pub chain: u32,
    /// Chain size shown by the presenter; zeroed by a lock without clears.
    pub last_chain: u32,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            clears: 0,
            chain: 0,
            last_chain: 0,
            game_over: false,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Discrete requests from the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop(bool),
    RotateCw,
    RotateCcw,
    HardDrop,
    /// Seconds elapsed since the previous tick.
    Tick(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Locking,
    Spawning,
    Cascading,
    GameOver,
}

/// How a lock is resolved: all at once, or one `cascade_step` call at a time
/// so the caller can draw between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadeMode {
    #[default]
    Instant,
    Stepped,
}

/// Owner of all mutable game state: board, active/next pair, counters and the
/// color stream.
#[derive(Resource, Debug, Clone)]
pub struct Session {
    pub(crate) board: Board,
    pub(crate) active: Piece,
    pub(crate) position: Position,
    pub(crate) next: Piece,
    pub(crate) state: GameState,
    pub(crate) rules: Rules,
    pub(crate) phase: Phase,
    pub(crate) mode: CascadeMode,
    pub(crate) rng: fastrand::Rng,
    pub(crate) fall_timer: f64,
    pub(crate) soft_drop: bool,
    pub(crate) report: crate::cascade::CascadeReport,
    pub(crate) locks: u64,
}

impl Session {
    #[must_use]
    pub fn new(rules: Rules, seed: u64) -> Self {
        Self::from_board(rules, seed, Board::new(BOARD_WIDTH, BOARD_HEIGHT))
    }

    /// Starts a session on a pre-built stack.
    #[must_use]
    pub fn from_board(rules: Rules, seed: u64, board: Board) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let active = Self::draw_piece(&mut rng, &rules);
        let next = Self::draw_piece(&mut rng, &rules);
        info!(
            "New session: {} colors, base interval {:.2}s, seed {seed}",
            rules.color_count(),
            rules.base_fall_interval()
        );
        Self {
            board,
            active,
            position: Self::spawn_position(),
            next,
            state: GameState::default(),
            rules,
            phase: Phase::Falling,
            mode: CascadeMode::default(),
            rng,
            fall_timer: 0.0,
            soft_drop: false,
            report: crate::cascade::CascadeReport::default(),
            locks: 0,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: CascadeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn spawn_position() -> Position {
        Position::new(SPAWN_X, SPAWN_Y)
    }

    pub(crate) fn draw_piece(rng: &mut fastrand::Rng, rules: &Rules) -> Piece {
        Piece::domino(|| rng.u8(1..=rules.color_count()))
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active(&self) -> &Piece {
        &self.active
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn next(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn mode(&self) -> CascadeMode {
        self.mode
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Intents are ignored unless a piece is falling.
    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.phase != Phase::Falling
    }

    /// Number of pieces locked so far.
    #[must_use]
    pub fn locks(&self) -> u64 {
        self.locks
    }

    #[must_use]
    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    /// Seconds between automatic drops at the current level.
    #[must_use]
    pub fn fall_interval(&self) -> f64 {
        fall_interval(
            self.rules.base_fall_interval(),
            self.state.level,
            self.soft_drop,
        )
    }

    /// Applies one intent. Returns whether it changed anything.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.is_input_locked() {
            trace!("Ignoring {intent:?} while {:?}", self.phase);
            return false;
        }
        match intent {
            Intent::MoveLeft => self.shift(-1),
            Intent::MoveRight => self.shift(1),
            Intent::SoftDrop(active) => {
                let changed = self.soft_drop != active;
                self.soft_drop = active;
                changed
            }
            Intent::RotateCw => self.rotate(self.active.rotated_cw()),
            Intent::RotateCcw => self.rotate(self.active.rotated_ccw()),
            Intent::HardDrop => {
                self.hard_drop();
                true
            }
            Intent::Tick(elapsed) => self.tick(elapsed),
        }
    }

    fn shift(&mut self, dx: i32) -> bool {
        let target = self.position.offset(dx, 0);
        if self.board.collides(&self.active, target) {
            trace!("Move to {target:?} blocked");
            return false;
        }
        self.position = target;
        true
    }

    fn rotate(&mut self, rotated: Piece) -> bool {
        match self.board.attempt_rotation(&rotated, self.position) {
            Some(origin) => {
                self.active = rotated;
                self.position = origin;
                true
            }
            None => {
                trace!("Rotation at {:?} rejected", self.position);
                false
            }
        }
    }

    /// Advances the fall timer; drops one row (or locks) once the interval
    /// has elapsed.
    fn tick(&mut self, elapsed: f64) -> bool {
        self.fall_timer += elapsed;
        if self.fall_timer < self.fall_interval() {
            return false;
        }
        self.fall_timer = 0.0;
        self.step_down();
        true
    }

    fn step_down(&mut self) {
        let below = self.position.offset(0, 1);
        if self.board.collides(&self.active, below) {
            self.lock();
        } else {
            self.position = below;
        }
    }

    fn hard_drop(&mut self) {
        while !self.board.collides(&self.active, self.position.offset(0, 1)) {
            self.position.y += 1;
        }
        self.lock();
    }

    fn lock(&mut self) {
        match self.mode {
            CascadeMode::Instant => {
                self.lock_and_cascade();
            }
            CascadeMode::Stepped => self.begin_lock(),
        }
    }

    /// Per-cell landing rows of the active piece, for display.
    #[must_use]
    pub fn ghost(&self) -> Vec<(usize, usize, u8)> {
        self.board.ghost_cells(&self.active, self.position)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            active: self.active,
            position: self.position,
            next: self.next,
            ghost: self.ghost(),
            score: self.state.score,
            level: self.state.level,
            clears: self.state.clears,
            chain: self.state.chain,
            last_chain: self.state.last_chain,
            phase: self.phase,
            game_over: self.is_game_over(),
        }
    }
}

/// Read-only copy of everything a presenter needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub active: Piece,
    pub position: Position,
    pub next: Piece,
    pub ghost: Vec<(usize, usize, u8)>,
    pub score: u32,
    pub level: u32,
    pub clears: u32,
    pub chain: u32,
    pub last_chain: u32,
    pub phase: Phase,
    pub game_over: bool,
}
