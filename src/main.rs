#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::Context;
use chainfall::Time;
use chainfall::app::{App, AppResult};
use chainfall::config::{self, Config};
use chainfall::menu::MenuState;
use chainfall::{systems, ui};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "chainfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .context("failed to create log file")?;

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Chainfall");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame_rate = config.frame_duration();
    let app = App::new(config);
    let res = run_app(&mut terminal, app, frame_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App, frame_rate: Duration) -> AppResult<()> {
    let mut last_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = frame_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    debug!("Key event: {key:?}");
                    app.on_key(key.code);
                }
            }
        }

        if last_tick.elapsed() >= frame_rate {
            let delta_seconds = last_tick.elapsed().as_secs_f32();
            last_tick = Instant::now();
            app.world.resource_mut::<Time>().update();

            if app.menu.state == MenuState::Game {
                systems::input_system(&mut app.world);
                systems::game_tick_system(&mut app.world, delta_seconds);
            }
            app.on_tick();
        }
    }
}
