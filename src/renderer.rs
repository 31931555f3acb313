use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::GridSize;
use crate::grid::Vector2i;
use crate::session::{SessionState, TickResult};

/// Terminal columns per grid cell; two columns keep cells roughly square.
const CELL_WIDTH: u16 = 2;

const GLYPH_SEGMENT: &str = "██";
const GLYPH_FOOD: &str = "●";

const HINT_MOVE: &str = "[arrows/wasd/hjkl] move  [q/esc] quit";
const HINT_RESTART: &str = "[r/enter] restart";
const HINT_QUIT: &str = "[q/esc] quit";

/// Colors for every drawn element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub border: Color,
    pub status: Color,
    pub overlay: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    border: Color::DarkGray,
    status: Color::White,
    overlay: Color::Yellow,
};

/// Renders one frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &TickResult, grid: GridSize, theme: &Theme) {
    let [board_row, status_row] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let board_area = board_rect(board_row, grid);
    let block = Block::bordered().border_style(Style::new().fg(theme.border));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, grid, snapshot, theme);
    render_snake(frame, inner, grid, snapshot, theme);
    render_status(frame, status_row, snapshot, theme);

    if snapshot.state.is_terminal() {
        render_overlay(frame, board_area, snapshot, theme);
    }
}

fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid.side.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.side.saturating_add(2);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn render_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    snapshot: &TickResult,
    theme: &Theme,
) {
    if snapshot.state == SessionState::BoardFull {
        return;
    }
    let Some((x, y)) = logical_to_terminal(inner, grid, snapshot.food_cell) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    snapshot: &TickResult,
    theme: &Theme,
) {
    let buffer = frame.buffer_mut();

    // Tail to head, so the head is drawn last when it overlaps a segment.
    for (index, segment) in snapshot.body_cells.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(x, y, GLYPH_SEGMENT, style);
    }
}

fn render_status(frame: &mut Frame<'_>, area: Rect, snapshot: &TickResult, theme: &Theme) {
    let line = Line::from(vec![
        Span::raw(format!("Score {}", snapshot.score)),
        Span::raw("  "),
        Span::raw(format!("Length {}", snapshot.body_cells.len())),
        Span::raw("  "),
        Span::raw(format!("Tick {}", snapshot.tick)),
        Span::raw("  "),
        Span::styled(HINT_MOVE, Style::new().fg(Color::DarkGray)),
    ]);

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.status)),
        area,
    );
}

fn render_overlay(frame: &mut Frame<'_>, board: Rect, snapshot: &TickResult, theme: &Theme) {
    let title = match snapshot.state {
        SessionState::BoardFull => "BOARD FULL",
        _ => "GAME OVER",
    };

    let [row] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(board);
    let [popup] = Layout::horizontal([Constraint::Length(30)])
        .flex(Flex::Center)
        .areas(row);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::new()
                .fg(theme.overlay)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(HINT_RESTART),
        Line::from(HINT_QUIT),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Vector2i) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
