#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::game::Difficulty;

// ASCII art title, one string per line
const TITLE: [&str; 5] = [
    " ███ █  █  ██  ███ █  █ ████  ██  █    █   ",
    "█    █  █ █  █  █  ██ █ █    █  █ █    █   ",
    "█    ████ ████  █  █ ██ ███  ████ █    █   ",
    "█    █  █ █  █  █  █  █ █    █  █ █    █   ",
    " ███ █  █ █  █ ███ █  █ █    █  █ ████ ████",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    DifficultySelect,
    Game,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub state: MenuState,
    pub selected: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::DifficultySelect,
            selected: 0,
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `difficulty` highlighted.
    #[must_use]
    pub fn with_selection(difficulty: Difficulty) -> Self {
        let selected = Difficulty::ALL
            .iter()
            .position(|&d| d == difficulty)
            .unwrap_or(0);
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn next_option(&mut self) {
        self.selected = (self.selected + 1) % Difficulty::ALL.len();
    }

    pub fn prev_option(&mut self) {
        self.selected = (self.selected + Difficulty::ALL.len() - 1) % Difficulty::ALL.len();
    }

    #[must_use]
    pub fn selected_difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.selected]
    }
}

pub fn render_menu(f: &mut Frame, area: Rect, menu: &Menu) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(TITLE.len() as u16),
            Constraint::Length(2),
            Constraint::Length(Difficulty::ALL.len() as u16 + 2),
            Constraint::Min(2),
        ])
        .split(area);

    let palette = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
    ];
    let title: Vec<Line> = TITLE
        .iter()
        .zip(palette.iter().cycle())
        .map(|(line, &color)| Line::from(Span::styled(*line, Style::default().fg(color))))
        .collect();
    f.render_widget(
        Paragraph::new(Text::from(title)).alignment(Alignment::Center),
        layout[1],
    );

    f.render_widget(
        Paragraph::new("Select Difficulty").alignment(Alignment::Center),
        layout[2],
    );

    let options: Vec<Line> = Difficulty::ALL
        .iter()
        .enumerate()
        .map(|(i, difficulty)| {
            let label = format!(
                "{:<10} {} colors  {:.2}s",
                difficulty.label(),
                difficulty.color_count(),
                difficulty.base_fall_interval()
            );
            let style = if i == menu.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(label, style))
        })
        .collect();
    f.render_widget(
        Paragraph::new(Text::from(options))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM)),
        layout[3],
    );

    f.render_widget(
        Paragraph::new("↑/↓: Choose   Enter: Start   Q: Quit")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout[4],
    );
}
