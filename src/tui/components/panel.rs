//! # Panel Overlay
//!
//! A bordered, titled box of free text docked above the status row.
//! Scripts fill it through [`PanelState`]; the surface draws it on top of
//! the current view at present time, so hiding it restores the view
//! underneath without a redraw.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::component::Component;

/// Panels smaller than this (borders plus one line) are not drawn.
const MIN_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    visible: bool,
    title: String,
    lines: Vec<String>,
}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
    }
}

pub struct PanelView<'a> {
    state: &'a PanelState,
}

impl<'a> PanelView<'a> {
    pub fn new(state: &'a PanelState) -> Self {
        Self { state }
    }

    /// Where the panel goes inside `area`: full width, above the last row,
    /// tall enough for the wrapped text but never more than half the screen.
    pub fn placement(&self, area: Rect) -> Option<Rect> {
        let inner_width = usize::from(area.width.saturating_sub(4)).max(1);
        let lines = self.wrapped(inner_width).len();
        let wanted = u16::try_from(lines + 2).unwrap_or(u16::MAX);
        let height = wanted.min(area.height / 2).max(MIN_HEIGHT);

        // Leave the status row alone.
        let available = area.height.saturating_sub(1);
        if height > available || area.width < 4 {
            return None;
        }
        Some(Rect::new(area.x, area.y + available - height, area.width, height))
    }

    fn wrapped(&self, width: usize) -> Vec<String> {
        self.state
            .lines
            .iter()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(line, width)
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect()
                }
            })
            .collect()
    }
}

impl Component for PanelView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(overlay) = self.placement(area) else {
            return;
        };

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", self.state.title))
            .padding(Padding::horizontal(1));
        let inner_width = usize::from(block.inner(overlay).width).max(1);
        let text = self.wrapped(inner_width).join("\n");

        frame.render_widget(Paragraph::new(text).block(block), overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn panel(title: &str, lines: &[&str]) -> PanelState {
        let mut state = PanelState::default();
        state.set_title(title);
        state.set_lines(lines.iter().copied());
        state.show();
        state
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_toggle_and_accessors() {
        let mut state = PanelState::default();
        state.set_lines(vec![String::from("a"), String::from("b")]);
        assert_eq!(state.lines(), ["a", "b"]);
        assert!(!state.is_visible());
        state.toggle();
        assert!(state.is_visible());
        state.hide();
        assert!(!state.is_visible());
    }

    #[test]
    fn test_placement_docks_above_status_row() {
        let state = panel("Help", &["one", "two"]);
        let area = Rect::new(0, 0, 40, 20);
        let placed = PanelView::new(&state).placement(area).unwrap();
        assert_eq!(placed.height, 4);
        assert_eq!(placed.bottom(), 19);
    }

    #[test]
    fn test_placement_caps_at_half_screen() {
        let state = panel("Help", &["line"; 50]);
        let placed = PanelView::new(&state)
            .placement(Rect::new(0, 0, 40, 20))
            .unwrap();
        assert_eq!(placed.height, 10);
    }

    #[test]
    fn test_placement_has_minimum_height() {
        let state = panel("Empty", &[]);
        let placed = PanelView::new(&state)
            .placement(Rect::new(0, 0, 40, 4))
            .unwrap();
        assert_eq!(placed.height, 3);
        assert!(
            PanelView::new(&state)
                .placement(Rect::new(0, 0, 40, 3))
                .is_none()
        );
    }

    #[test]
    fn test_renders_title_and_text() {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let state = panel("Keys", &["q quit"]);
        terminal
            .draw(|f| PanelView::new(&state).render(f, f.area()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(" Keys "));
        assert!(text.contains("q quit"));
    }
}
