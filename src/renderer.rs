use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};
use ratatui::Frame;

use crate::config::{GridSize, Palette};
use crate::food::Food;
use crate::game::{GameState, TickReport};
use crate::snake::{Position, Snake};

/// Terminal columns per board cell, so cells come out roughly square.
const CELL_COLUMNS: u16 = 2;

const CELL_GLYPH: &str = "  ";

const CONTROLS_HINT: &str = "arrows/WASD steer  q/Esc quit";

/// Contents of one board cell as far as drawing is concerned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Something that knows how to put itself on the board.
pub trait Drawable {
    fn draw(&self, canvas: &mut BoardCanvas);
}

impl Drawable for Snake {
    fn draw(&self, canvas: &mut BoardCanvas) {
        for segment in self.segments() {
            canvas.paint(*segment, Tile::Snake);
        }
    }
}

impl Drawable for Food {
    fn draw(&self, canvas: &mut BoardCanvas) {
        canvas.paint(self.position, Tile::Food);
    }
}

/// Retained board picture, updated incrementally after each tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardCanvas {
    bounds: GridSize,
    tiles: Vec<Tile>,
}

impl BoardCanvas {
    /// Creates an empty canvas for a board of `bounds` cells.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self {
            bounds,
            tiles: vec![Tile::Empty; bounds.total_cells()],
        }
    }

    /// Creates a canvas showing the current state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut canvas = Self::new(state.bounds());
        canvas.redraw(state);
        canvas
    }

    /// Clears everything and draws food and snake from scratch.
    pub fn redraw(&mut self, state: &GameState) {
        self.tiles.fill(Tile::Empty);
        state.food().draw(self);
        state.snake().draw(self);
    }

    /// Brings the canvas up to date after `report`.
    ///
    /// Only the vacated tail, the food and the new head are touched unless
    /// the snake restarted, in which case the whole board is redrawn.
    pub fn apply(&mut self, report: &TickReport, state: &GameState) {
        if report.event.is_restart() {
            self.redraw(state);
            return;
        }

        if let Some(vacated) = report.vacated {
            self.paint(vacated, Tile::Empty);
        }
        state.food().draw(self);
        self.paint(state.snake().head(), Tile::Snake);
    }

    /// Sets one cell, ignoring positions outside the board.
    pub fn paint(&mut self, position: Position, tile: Tile) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = tile;
        }
    }

    /// Returns the tile at `position`; off-board positions read as empty.
    #[must_use]
    pub fn tile(&self, position: Position) -> Tile {
        self.index(position)
            .map_or(Tile::Empty, |index| self.tiles[index])
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.bounds) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.bounds.width) + x)
    }
}

/// Bordered board widget drawing a [`BoardCanvas`].
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub canvas: &'a BoardCanvas,
    pub palette: &'a Palette,
}

impl BoardView<'_> {
    /// Terminal size needed to show the whole board including its border.
    #[must_use]
    pub fn required_size(bounds: GridSize) -> (u16, u16) {
        (
            bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2),
            bounds.height.saturating_add(2),
        )
    }

    fn tile_style(&self, tile: Tile) -> Style {
        let color = match tile {
            Tile::Empty => self.palette.background,
            Tile::Snake => self.palette.snake,
            Tile::Food => self.palette.food,
        };
        Style::new().bg(color)
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(
            Style::new()
                .fg(self.palette.border)
                .bg(self.palette.background),
        );
        let inner = block.inner(area);
        block.render(area, buf);

        let bounds = self.canvas.bounds();
        for y in 0..bounds.height {
            for x in 0..bounds.width {
                let Some((column, row)) = cell_origin(inner, x, y) else {
                    continue;
                };

                let tile = self.canvas.tile(Position {
                    x: i32::from(x),
                    y: i32::from(y),
                });
                buf.set_string(column, row, CELL_GLYPH, self.tile_style(tile));
            }
        }
    }
}

/// Renders the board and the status line for one frame.
pub fn render(frame: &mut Frame<'_>, state: &GameState, canvas: &BoardCanvas, palette: &Palette) {
    let [board_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let (width, height) = BoardView::required_size(canvas.bounds());
    frame.render_widget(
        BoardView { canvas, palette },
        centered(board_area, width, height),
    );

    frame.render_widget(
        Paragraph::new(Line::from(status_line(state))).style(Style::new().fg(palette.status)),
        status_area,
    );
}

/// Text shown under the board.
#[must_use]
pub fn status_line(state: &GameState) -> String {
    format!(
        "length {}  restarts {}  tick {}   {CONTROLS_HINT}",
        state.snake().len(),
        state.restarts,
        state.tick_count
    )
}

fn cell_origin(inner: Rect, x: u16, y: u16) -> Option<(u16, u16)> {
    let column = inner.x.checked_add(x.checked_mul(CELL_COLUMNS)?)?;
    let row = inner.y.checked_add(y)?;
    if column.saturating_add(CELL_COLUMNS) > inner.right() || row >= inner.bottom() {
        return None;
    }

    Some((column, row))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
