#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use crate::app::App;
use crate::components::{ChainBanner, Piece};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, PIECE_SIZE, SPAWN_X, SPAWN_Y};
use crate::menu::{self, MenuState};
use crate::session::Snapshot;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

const CELL_WIDTH: u16 = 2; // Each cell is 2 characters wide
const INFO_WIDTH: u16 = 24;

/// Terminal color for a board color id.
#[must_use]
pub fn cell_color(color: u8) -> Color {
    match color {
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

#[must_use]
pub fn min_game_size() -> (u16, u16) {
    let board_width = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
    let board_height = BOARD_HEIGHT as u16 + 2;
    (board_width + INFO_WIDTH, board_height + 2)
}

pub fn render(f: &mut Frame, app: &App) {
    if app.menu.state == MenuState::DifficultySelect {
        let area = f.area();
        menu::render_menu(f, area, &app.menu);
        return;
    }

    let (min_width, min_height) = min_game_size();
    if f.area().width < min_width || f.area().height < min_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Chainfall"));
        f.render_widget(warning_text, centered_rect(50, 30, f.area()));
        return;
    }

    let Some(snapshot) = app.snapshot() else {
        return;
    };
    let banner = app.world.resource::<ChainBanner>();

    let board_width = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(INFO_WIDTH)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BOARD_HEIGHT as u16 + 2),
            Constraint::Min(0),
        ])
        .split(main_layout[0]);

    render_board(f, &snapshot, app.config.show_ghost, game_layout[0]);
    render_info(f, &snapshot, banner, main_layout[1]);
}

fn put_cell(f: &mut Frame, area: Rect, row: usize, col: usize, symbol: &str, color: Color) {
    let x = area.left() + col as u16 * CELL_WIDTH;
    let y = area.top() + row as u16;
    if x + CELL_WIDTH > area.right() || y >= area.bottom() {
        return;
    }
    for dx in 0..CELL_WIDTH {
        if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
        }
    }
}

fn render_board(f: &mut Frame, snapshot: &Snapshot, show_ghost: bool, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Chainfall");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let board = &snapshot.board;
    for row in 0..board.height() {
        for col in 0..board.width() {
            if let Some(color) = board.cell(row, col) {
                put_cell(f, inner, row, col, "█", cell_color(color));
            }
        }
    }

    if snapshot.game_over {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        let area = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        f.render_widget(game_over, area);
        return;
    }

    // Spawn cells: the game ends when these are filled after a lock
    let spawn_col = (SPAWN_X + 1) as usize;
    for row in (SPAWN_Y as usize)..(SPAWN_Y as usize + 2) {
        if !board.is_occupied(row, spawn_col) {
            put_cell(f, inner, row, spawn_col, "X", Color::DarkGray);
        }
    }

    if show_ghost {
        for &(row, col, color) in &snapshot.ghost {
            if !board.is_occupied(row, col) {
                put_cell(f, inner, row, col, "·", cell_color(color));
            }
        }
    }

    for (row, col, color) in snapshot.active.cells() {
        let y = snapshot.position.y + row as i32;
        let x = snapshot.position.x + col as i32;
        if y >= 0 && x >= 0 && (y as usize) < board.height() && (x as usize) < board.width() {
            put_cell(f, inner, y as usize, x as usize, "█", cell_color(color));
        }
    }
}

fn render_info(f: &mut Frame, snapshot: &Snapshot, banner: &ChainBanner, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                    // Chain banner
            Constraint::Length(PIECE_SIZE as u16 + 2), // Next piece
            Constraint::Length(5),                    // Stats
            Constraint::Min(3),                       // Controls
        ])
        .split(area);

    if banner.is_visible() {
        let modifier = if banner.strength() > 0.5 {
            Modifier::BOLD
        } else {
            Modifier::DIM
        };
        f.render_widget(
            Paragraph::new(format!("CHAIN x{}!", banner.chain))
                .style(Style::default().fg(Color::LightMagenta).add_modifier(modifier)),
            layout[0],
        );
    }

    render_next_piece(f, &snapshot.next, layout[1]);

    let stats = format!(
        "Score: {}\nLevel: {}\nClears: {}",
        snapshot.score, snapshot.level, snapshot.clears
    );
    f.render_widget(
        Paragraph::new(stats).wrap(Wrap { trim: true }),
        layout[2],
    );

    let controls = if snapshot.game_over {
        "GAME OVER!\nEnter: Menu\nQ: Quit"
    } else {
        "←/→: Move\n\
        Z/X: Rotate\n\
        ↓: Soft drop\n\
        ↑/Space: Hard drop\n\
        Q: Quit"
    };
    f.render_widget(
        Paragraph::new(controls)
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true }),
        layout[3],
    );
}

pub fn render_next_piece(f: &mut Frame, piece: &Piece, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner = block.inner(area);
    f.render_widget(block, area);
    for (row, col, color) in piece.cells() {
        put_cell(f, inner, row, col, "█", cell_color(color));
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
