use bevy_ecs::prelude::*;
use crossterm::event::KeyCode;
use log::{error, info};

use crate::Time;
use crate::components::{CascadeClock, ChainBanner, Input};
use crate::config::{Config, ConfigError};
use crate::menu::{Menu, MenuState};
use crate::session::{CascadeMode, Session, Snapshot};

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(ChainBanner::default());
        world.insert_resource(CascadeClock {
            step_seconds: config.cascade_step().as_secs_f32(),
            timer: 0.0,
        });

        Self {
            world,
            should_quit: false,
            menu: Menu::with_selection(config.difficulty),
            config,
        }
    }

    /// Starts a session at the difficulty highlighted in the menu.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        let difficulty = self.menu.selected_difficulty();
        let rules = self.config.rules_for(difficulty)?;
        let mode = if self.config.animate_cascade {
            CascadeMode::Stepped
        } else {
            CascadeMode::Instant
        };
        let seed = self.config.seed_or_random();
        info!("Starting {} game", difficulty.label());

        self.world
            .insert_resource(Session::new(rules, seed).with_mode(mode));
        self.world.insert_resource(Input::default());
        self.world.insert_resource(ChainBanner::default());
        self.world.resource_mut::<CascadeClock>().timer = 0.0;
        self.menu.state = MenuState::Game;
        Ok(())
    }

    pub fn return_to_menu(&mut self) {
        self.world.remove_resource::<Session>();
        self.menu.state = MenuState::DifficultySelect;
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.world.get_resource::<Session>().map(Session::snapshot)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.world
            .get_resource::<Session>()
            .is_some_and(Session::is_game_over)
    }

    /// Maps a key press onto the menu or the pending `Input`.
    pub fn on_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('q' | 'Q')) {
            self.should_quit = true;
            return;
        }

        match self.menu.state {
            MenuState::DifficultySelect => match code {
                KeyCode::Up | KeyCode::Char('w') => self.menu.prev_option(),
                KeyCode::Down | KeyCode::Char('s') => self.menu.next_option(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Err(e) = self.start() {
                        error!("Failed to start game: {e}");
                    }
                }
                _ => {}
            },
            MenuState::Game if self.is_game_over() => {
                if code == KeyCode::Enter {
                    self.return_to_menu();
                }
            }
            MenuState::Game => {
                let mut input = self.world.resource_mut::<Input>();
                // Soft drop stays on until any other key arrives
                input.soft_drop = Some(code == KeyCode::Down);
                match code {
                    KeyCode::Left | KeyCode::Char('a') => input.left = true,
                    KeyCode::Right | KeyCode::Char('d') => input.right = true,
                    KeyCode::Char('z' | 'Z') => input.rotate_ccw = true,
                    KeyCode::Char('x' | 'X') => input.rotate_cw = true,
                    KeyCode::Up | KeyCode::Char(' ') | KeyCode::Enter => input.hard_drop = true,
                    _ => {}
                }
            }
        }
    }

    // Presentation timers that run regardless of game state
    pub fn on_tick(&mut self) {
        let delta = self.world.resource::<Time>().delta_seconds();
        self.world.resource_mut::<ChainBanner>().update(delta);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
