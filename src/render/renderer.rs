use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GamePhase, GameState, Position};
use crate::metrics::GameMetrics;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
/// Every grid cell is drawn two columns wide so it looks square
const CELL_WIDTH: u16 = 2;

const HEAD_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const BODY_STYLE: Style = Style::new().fg(Color::Green);
const FOOD_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const EMPTY_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Grid dimensions that fit a terminal of the given size, borders and
/// header/footer included.
pub fn grid_size_for(area: Rect) -> (usize, usize) {
    let width = area.width.saturating_sub(2) / CELL_WIDTH;
    let height = area
        .height
        .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + 2);
    (width as usize, height as usize)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Game area
                Constraint::Length(FOOTER_HEIGHT), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = board_rect(chunks[1], state);
        frame.render_widget(self.render_grid(state), board_area);

        if let Some(overlay) = self.render_overlay(state) {
            let popup = popup_rect(board_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(overlay, popup);
        }

        let controls = self.render_controls(state.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled("█ ", HEAD_STYLE)
                } else if state.snake.occupies(pos) {
                    Span::styled("■ ", BODY_STYLE)
                } else if pos == state.food {
                    Span::styled("● ", FOOD_STYLE)
                } else {
                    Span::styled("· ", EMPTY_STYLE)
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border_color = match state.phase {
            GamePhase::Ended => Color::Red,
            GamePhase::Paused => Color::Yellow,
            GamePhase::Ready | GamePhase::Running => Color::White,
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(state.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled(state.phase.label(), Style::default().fg(Color::Cyan)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    /// Message box drawn over the board outside of normal play
    fn render_overlay(&self, state: &GameState) -> Option<Paragraph<'_>> {
        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let hint = |t: &'static str| Span::styled(t, Style::default().fg(Color::Gray));

        let (title, color, mut text) = match state.phase {
            GamePhase::Running => return None,
            GamePhase::Ready => (
                "SNAKE",
                Color::Cyan,
                vec![Line::from(vec![
                    hint("Press "),
                    key("Space"),
                    hint(" to start"),
                ])],
            ),
            GamePhase::Paused => (
                "PAUSED",
                Color::Yellow,
                vec![Line::from(vec![
                    hint("Press "),
                    key("Space"),
                    hint(" to resume"),
                ])],
            ),
            GamePhase::Ended => (
                "GAME OVER",
                Color::Red,
                vec![
                    Line::from(vec![
                        Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                        Span::styled(
                            state.score.to_string(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(vec![
                        hint("Press "),
                        key("Space"),
                        hint(" to play again"),
                    ]),
                ],
            ),
        };

        if state.phase == GamePhase::Ended && state.new_record {
            text.insert(
                1,
                Line::from(Span::styled(
                    "New record!",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )),
            );
        }

        let mut lines = vec![Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(text);

        Some(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        )
    }

    fn render_controls(&self, phase: GamePhase) -> Paragraph<'_> {
        let action = match phase {
            GamePhase::Running => " pause | ",
            GamePhase::Paused => " resume | ",
            GamePhase::Ready | GamePhase::Ended => " start | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(action),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Area of the bordered board, centred in `area`
fn board_rect(area: Rect, state: &GameState) -> Rect {
    let cells = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    let width = cells(state.grid_width)
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2);
    let height = cells(state.grid_height).saturating_add(2);
    centered(area, width, height)
}

fn popup_rect(board: Rect) -> Rect {
    centered(board, 30.min(board.width), 6.min(board.height))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    cell
}
