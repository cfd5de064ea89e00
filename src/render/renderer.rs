use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, EndReason, GameStatus, Position, Snapshot};
use crate::metrics::GameMetrics;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

pub fn cell_kind(snapshot: &Snapshot<'_>, pos: Position) -> CellKind {
    if snapshot.head() == Some(pos) {
        CellKind::Head
    } else if snapshot.snake.contains(&pos) {
        CellKind::Body
    } else if snapshot.food == Some(pos) {
        CellKind::Food
    } else {
        CellKind::Empty
    }
}

/// Head glyph facing the direction of travel
pub fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot<'_>,
        metrics: &GameMetrics,
        show_grid: bool,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let board = match snapshot.status {
            GameStatus::Idle => self.render_start_screen(snapshot),
            GameStatus::Running | GameStatus::Paused => self.render_grid(snapshot, show_grid),
            GameStatus::Over => self.render_game_over(snapshot),
        };
        frame.render_widget(board, game_area);

        frame.render_widget(self.render_controls(snapshot), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>, show_grid: bool) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match cell_kind(snapshot, pos) {
                    CellKind::Head => Span::styled(
                        head_glyph(snapshot.direction),
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    ),
                    CellKind::Body => Span::styled("■ ", Style::default().fg(Color::Green)),
                    CellKind::Food => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    CellKind::Empty if show_grid => {
                        Span::styled("· ", Style::default().fg(Color::DarkGray))
                    }
                    CellKind::Empty => Span::raw("  "),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border_color) = if snapshot.status == GameStatus::Paused {
            (" Snake - PAUSED ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        let border_type = if snapshot.wall_collision {
            BorderType::Double
        } else {
            BorderType::Rounded
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(snapshot.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", snapshot.speed), value),
            Span::raw("    "),
            Span::styled("Difficulty: ", label),
            Span::styled(snapshot.difficulty.as_str(), value),
            Span::raw("    "),
            Span::styled("Walls: ", label),
            Span::styled(if snapshot.wall_collision { "on" } else { "wrap" }, value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_screen(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!(
                "{}x{} grid, {} difficulty",
                snapshot.grid_width, snapshot.grid_height, snapshot.difficulty
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let (headline, color) = match snapshot.end_reason {
            Some(EndReason::BoardFull) => ("YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if snapshot.new_high_score {
            text.push(Line::from(vec![Span::styled(
                "New High Score!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let pause_hint = if snapshot.status == GameStatus::Paused {
            " resume | "
        } else {
            " pause | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw("/"),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" reset | "),
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" difficulty | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("C", Style::default().fg(Color::Cyan)),
            Span::raw(" walls | "),
            Span::styled("G", Style::default().fg(Color::Cyan)),
            Span::raw(" grid | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
