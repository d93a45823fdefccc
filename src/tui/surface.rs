//! # Terminal Surface
//!
//! Cell-addressed drawing for the compositor and the line editor.
//!
//! Callers position a cursor, pick a style and write text, curses-style.
//! Writes land in an off-screen `Buffer` that persists between frames, never
//! wrap, and are clipped at the right edge. `present()` pushes that buffer
//! (plus the panel overlay) through ratatui's `Terminal::draw`, which only
//! emits the cells that changed since the last frame.
//!
//! Geometry is never cached: `width()` and `height()` ask the backend every
//! time, and the canvas is rebuilt blank when the terminal changes size.

use std::fmt;
use std::io;

use crossterm::execute;
use crossterm::style::Print;
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};

use crate::core::config::BellMode;
use crate::tui::component::Component;
use crate::tui::components::panel::{PanelState, PanelView};

/// Colours below this count are treated as "no colour support".
const MIN_COLORS: u16 = 8;

#[derive(Debug)]
pub enum SurfaceError {
    Io(io::Error),
    /// The ratatui backend failed while flushing a frame.
    Backend(String),
    /// The terminal cannot show colours. Fatal at startup.
    NoColorSupport,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Io(e) => write!(f, "terminal I/O error: {e}"),
            SurfaceError::Backend(msg) => write!(f, "terminal backend error: {msg}"),
            SurfaceError::NoColorSupport => {
                write!(f, "this terminal does not support colours, which mailview requires")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

impl From<io::Error> for SurfaceError {
    fn from(e: io::Error) -> Self {
        SurfaceError::Io(e)
    }
}

/// Text attributes that can be switched on and off independently of colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Reverse,
}

impl Attr {
    fn modifier(self) -> Modifier {
        match self {
            Attr::Reverse => Modifier::REVERSED,
        }
    }
}

/// The two reserved colour pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPair {
    /// Unread rows: red on black.
    Attention,
    /// Everything else: white on black.
    Body,
}

impl ColorPair {
    pub fn style(self) -> Style {
        match self {
            ColorPair::Attention => Style::default().fg(Color::Red).bg(Color::Black),
            ColorPair::Body => Style::default().fg(Color::White).bg(Color::Black),
        }
    }
}

/// A bounded character grid with a write cursor.
///
/// Rows and columns are zero-based; `(0, 0)` is the top-left cell.
pub trait Surface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;

    fn move_cursor(&mut self, row: u16, col: u16);
    /// Current `(row, col)` of the write cursor.
    fn cursor(&self) -> (u16, u16);
    /// Write at the cursor and advance it. Stops at the right edge.
    fn write(&mut self, text: &str);

    fn set_color(&mut self, pair: ColorPair);
    fn set_attribute(&mut self, attr: Attr);
    fn clear_attribute(&mut self, attr: Attr);
    /// Back to the terminal's default colours with no attributes.
    fn reset_style(&mut self);

    /// Blank every cell and home the cursor.
    fn clear(&mut self);
    /// Report an operation that could not apply.
    fn beep(&mut self);
    /// Show or hide the terminal's own cursor. Returns the previous setting.
    fn set_cursor_visible(&mut self, visible: bool) -> bool;

    /// Flush everything written so far to the terminal.
    fn present(&mut self) -> Result<(), SurfaceError>;

    fn panel(&self) -> &PanelState;
    fn panel_mut(&mut self) -> &mut PanelState;
}

/// The [`Surface`] over a ratatui terminal.
pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
    canvas: Buffer,
    cursor: (u16, u16),
    style: Style,
    cursor_visible: bool,
    bell: BellMode,
    alerts: usize,
    panel: PanelState,
}

impl<B: Backend> Screen<B> {
    pub fn new(terminal: Terminal<B>, bell: BellMode) -> Self {
        let mut screen = Self {
            terminal,
            canvas: Buffer::empty(Rect::ZERO),
            cursor: (0, 0),
            style: Style::default(),
            cursor_visible: false,
            bell,
            alerts: 0,
            panel: PanelState::default(),
        };
        screen.sync_canvas();
        screen
    }

    /// How many times [`Surface::beep`] has been called.
    pub fn alerts(&self) -> usize {
        self.alerts
    }

    /// The off-screen grid, as written so far.
    pub fn canvas(&self) -> &Buffer {
        &self.canvas
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn area(&self) -> Rect {
        match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width, size.height),
            Err(e) => {
                warn!("Failed to query terminal size: {}", e);
                self.canvas.area
            }
        }
    }

    /// Start a blank canvas if the terminal changed size since the last write.
    fn sync_canvas(&mut self) {
        let area = self.area();
        if self.canvas.area != area {
            debug!(
                "Terminal resized to {}x{}, resetting canvas",
                area.width, area.height
            );
            self.canvas = Buffer::empty(area);
        }
    }
}

impl<B: Backend> Surface for Screen<B> {
    fn width(&self) -> u16 {
        self.area().width
    }

    fn height(&self) -> u16 {
        self.area().height
    }

    fn move_cursor(&mut self, row: u16, col: u16) {
        self.cursor = (row, col);
    }

    fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    fn write(&mut self, text: &str) {
        self.sync_canvas();
        let (row, col) = self.cursor;
        let area = self.canvas.area;
        if row >= area.height || col >= area.width {
            return;
        }

        // Overwrite every property of the cell, not just the ones set in `style`.
        let style = Style::reset().patch(self.style);
        let max_width = usize::from(area.width - col);
        let (end_col, _) = self.canvas.set_stringn(col, row, text, max_width, style);
        self.cursor = (row, end_col);
    }

    fn set_color(&mut self, pair: ColorPair) {
        let colors = pair.style();
        self.style.fg = colors.fg;
        self.style.bg = colors.bg;
    }

    fn set_attribute(&mut self, attr: Attr) {
        self.style = self.style.add_modifier(attr.modifier());
    }

    fn clear_attribute(&mut self, attr: Attr) {
        self.style = self.style.remove_modifier(attr.modifier());
    }

    fn reset_style(&mut self) {
        self.style = Style::default();
    }

    fn clear(&mut self) {
        self.sync_canvas();
        self.canvas.reset();
        self.cursor = (0, 0);
    }

    fn beep(&mut self) {
        self.alerts += 1;
        if self.bell == BellMode::Audible
            && let Err(e) = execute!(io::stdout(), Print('\x07'))
        {
            warn!("Failed to ring the bell: {}", e);
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) -> bool {
        std::mem::replace(&mut self.cursor_visible, visible)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.sync_canvas();
        let Self {
            terminal,
            canvas,
            cursor,
            cursor_visible,
            panel,
            ..
        } = self;

        terminal
            .draw(|frame| {
                let area = frame.area();
                let buf = frame.buffer_mut();
                let shared = buf.area.intersection(canvas.area);
                for y in shared.top()..shared.bottom() {
                    for x in shared.left()..shared.right() {
                        buf[(x, y)] = canvas[(x, y)].clone();
                    }
                }

                if panel.is_visible() {
                    PanelView::new(panel).render(frame, area);
                }

                // Without a cursor position ratatui hides the cursor.
                if *cursor_visible {
                    let (row, col) = *cursor;
                    frame.set_cursor_position(Position::new(col, row));
                }
            })
            .map_err(|e| SurfaceError::Backend(e.to_string()))?;
        Ok(())
    }

    fn panel(&self) -> &PanelState {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut PanelState {
        &mut self.panel
    }
}

/// The screen the binary draws on.
pub type TerminalScreen = Screen<CrosstermBackend<io::Stdout>>;

/// Take over the terminal: colours checked, raw mode with key decoding,
/// alternate screen, terminal cursor hidden.
///
/// Missing colour support is reported before the terminal is touched.
pub fn setup(bell: BellMode) -> Result<TerminalScreen, SurfaceError> {
    let colors = crossterm::style::available_color_count();
    if colors < MIN_COLORS {
        return Err(SurfaceError::NoColorSupport);
    }
    debug!("Terminal reports {} colours", colors);

    let terminal = ratatui::try_init()?;
    let mut screen = Screen::new(terminal, bell);
    screen.set_cursor_visible(false);
    Ok(screen)
}
