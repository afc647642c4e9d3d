#![warn(clippy::all, clippy::pedantic)]

use log::{debug, info};

use crate::game::CHAIN_BONUS;
use crate::groups::{ClearPass, clear_groups};
use crate::session::{Phase, Session};

/// Totals for one lock-and-cascade resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    pub chain: u32,
    pub cells: usize,
    pub groups: u32,
    pub points: u32,
    pub game_over: bool,
}

/// What a single `cascade_step` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Not cascading; nothing to do.
    Idle,
    /// Cells fell; call again.
    Fell,
    /// A clear wave removed groups at the given chain depth; call again.
    Cleared { chain: u32, pass: ClearPass },
    /// The board is stable and the session is falling again or over.
    Settled(CascadeReport),
}

impl Session {
    /// Commits the active piece, promotes the next piece and enters
    /// `Cascading`. No-op unless a piece is falling.
    pub fn begin_lock(&mut self) {
        if self.phase != Phase::Falling {
            return;
        }

        self.phase = Phase::Locking;
        info!("Locking piece at {:?}", self.position);
        self.board.lock_piece(&self.active, self.position);
        self.locks += 1;

        self.phase = Phase::Spawning;
        self.active = self.next;
        self.next = Self::draw_piece(&mut self.rng, &self.rules);
        self.position = Self::spawn_position();
        self.fall_timer = 0.0;
        debug!("Spawned next piece, preview refreshed");

        self.state.chain = 0;
        self.report = CascadeReport::default();
        self.phase = Phase::Cascading;
    }

    /// Advances a cascade by one unit of work: a single gravity frame while
    /// cells are still falling, otherwise one clear pass.
    pub fn cascade_step(&mut self) -> CascadeStep {
        self.advance(false)
    }

    /// Locks the active piece and resolves the whole cascade at once.
    pub fn lock_and_cascade(&mut self) -> CascadeReport {
        self.begin_lock();
        self.resolve_cascade()
    }

    /// Runs any pending cascade to completion.
    pub fn resolve_cascade(&mut self) -> CascadeReport {
        loop {
            match self.advance(true) {
                CascadeStep::Settled(report) => return report,
                CascadeStep::Idle => return self.report,
                CascadeStep::Fell | CascadeStep::Cleared { .. } => {}
            }
        }
    }

    fn advance(&mut self, full_collapse: bool) -> CascadeStep {
        if self.phase != Phase::Cascading {
            return CascadeStep::Idle;
        }

        // Settle before every clear pass, the first one after a lock included
        let moved = if full_collapse {
            self.board.collapse()
        } else {
            self.board.gravity_step()
        };
        if moved {
            return CascadeStep::Fell;
        }

        let multiplier = 1.0 + CHAIN_BONUS * f64::from(self.state.chain);
        let pass = clear_groups(&mut self.board, &mut self.state, multiplier);
        if !pass.is_empty() {
            self.state.chain += 1;
            self.state.last_chain = self.state.chain;
            self.report.chain = self.state.chain;
            self.report.cells += pass.cells;
            self.report.groups += pass.groups;
            self.report.points = self.report.points.saturating_add(pass.points);
            debug!(
                "Chain {}: {} cells in {} groups (x{multiplier})",
                self.state.chain, pass.cells, pass.groups
            );
            return CascadeStep::Cleared {
                chain: self.state.chain,
                pass,
            };
        }

        CascadeStep::Settled(self.finish_cascade())
    }

    fn finish_cascade(&mut self) -> CascadeReport {
        self.board.collapse();
        if self.state.chain == 0 {
            self.state.last_chain = 0;
        }

        if self.board.collides(&self.active, self.position) {
            self.phase = Phase::GameOver;
            self.state.game_over = true;
            self.report.game_over = true;
            info!("Game over with score {}", self.state.score);
        } else {
            self.phase = Phase::Falling;
        }

        if self.report.chain > 0 {
            info!(
                "Cascade settled: chain {}, {} points",
                self.report.chain, self.report.points
            );
        }
        self.report
    }
}
