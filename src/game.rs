#![warn(clippy::all, clippy::pedantic)]

use std::fmt;

use serde::{Deserialize, Serialize};

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Pieces live in a 3x3 local matrix rotating around [1][1]
pub const PIECE_SIZE: usize = 3;

// Spawn point of the piece's local top-left corner
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 1;
pub const SPAWN_Y: i32 = 0;

// Group clearing and scoring
pub const MIN_GROUP_SIZE: usize = 4;
pub const POINTS_PER_CELL: f64 = 100.0;
pub const CHAIN_BONUS: f64 = 0.5; // Added to the score multiplier for every previous wave in a chain

// Level progression
pub const STARTING_LEVEL: u32 = 1;
pub const CLEARS_PER_LEVEL: u32 = 5;

// Timing (seconds)
pub const SOFT_DROP_INTERVAL: f64 = 0.025;
pub const LEVEL_SPEED_BASE: f64 = 0.5;
pub const LEVEL_SPEED_STEP: f64 = 0.25;

// Supported palette sizes
pub const MIN_COLORS: u8 = 4;
pub const MAX_COLORS: u8 = 7;

/// Offsets tried in order when a rotated piece collides: in place, left,
/// right, up, up-left, up-right.
pub const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    #[must_use]
    pub fn color_count(self) -> u8 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 5,
            Difficulty::Hard => 6,
            Difficulty::VeryHard => 7,
        }
    }

    #[must_use]
    pub fn base_fall_interval(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 0.6,
            Difficulty::VeryHard => 0.45,
        }
    }

    #[must_use]
    pub fn rules(self) -> Rules {
        Rules {
            color_count: self.color_count(),
            base_fall_interval: self.base_fall_interval(),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
        }
    }
}

/// Difficulty parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    color_count: u8,
    base_fall_interval: f64,
}

impl Rules {
    pub fn new(color_count: u8, base_fall_interval: f64) -> Result<Self, RulesError> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&color_count) {
            return Err(RulesError::ColorCount(color_count));
        }
        if !base_fall_interval.is_finite() || base_fall_interval <= 0.0 {
            return Err(RulesError::FallInterval(base_fall_interval));
        }
        Ok(Self {
            color_count,
            base_fall_interval,
        })
    }

    #[must_use]
    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    #[must_use]
    pub fn base_fall_interval(&self) -> f64 {
        self.base_fall_interval
    }
}

impl Default for Rules {
    fn default() -> Self {
        Difficulty::default().rules()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RulesError {
    ColorCount(u8),
    FallInterval(f64),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::ColorCount(count) => write!(
                f,
                "color count {count} is outside the supported range {MIN_COLORS}..={MAX_COLORS}"
            ),
            RulesError::FallInterval(interval) => {
                write!(f, "fall interval {interval} must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for RulesError {}

/// Seconds between automatic one-row drops.
#[must_use]
pub fn fall_interval(base_fall_interval: f64, level: u32, soft_drop: bool) -> f64 {
    let base = if soft_drop {
        SOFT_DROP_INTERVAL
    } else {
        base_fall_interval
    };
    base / (LEVEL_SPEED_BASE + f64::from(level) * LEVEL_SPEED_STEP)
}
