//! # Line Editor
//!
//! Reads one line of text at the current cursor position. Supports cursor
//! movement, in-place edits, history recall (Up/Down) and Tab completion.
//! Keys that cannot apply ring the bell.
//!
//! ## Drawing
//!
//! The line is redrawn from its anchor after every key: the buffer, one
//! trailing blank to erase a just-deleted character, then blanks to the right
//! edge. The terminal cursor is made visible for the duration of the call and
//! restored afterwards.
//!
//! Lines wider than the screen are clipped rather than scrolled.

mod session;

pub use session::{EditEvent, EditSession};

use std::time::Duration;

use log::debug;

use crate::core::completion::Completer;
use crate::core::history::History;
use crate::tui::component::EventHandler;
use crate::tui::event::InputSource;
use crate::tui::surface::{Surface, SurfaceError};
use crate::tui::text::{columns, pad_to_columns};

pub struct LineEditor {
    capacity: usize,
    completer: Completer,
    poll_timeout: Duration,
}

impl LineEditor {
    /// `capacity` counts one reserved slot, so lines hold at most
    /// `capacity - 1` characters.
    pub fn new(capacity: usize, completer: Completer, poll_timeout: Duration) -> Self {
        Self {
            capacity,
            completer,
            poll_timeout,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Edit a line starting at the surface cursor until Enter, then append
    /// it to `history` and return it. Empty lines are returned (and recorded)
    /// too.
    pub fn read_line(
        &self,
        surface: &mut dyn Surface,
        input: &mut dyn InputSource,
        history: &mut History,
    ) -> Result<String, SurfaceError> {
        let anchor = surface.cursor();
        let was_visible = surface.set_cursor_visible(true);

        let result = self.edit(surface, input, history, anchor);

        surface.set_cursor_visible(was_visible);
        let line = result?;
        debug!("read_line: {:?}", line);
        history.add(line.clone());
        Ok(line)
    }

    fn edit(
        &self,
        surface: &mut dyn Surface,
        input: &mut dyn InputSource,
        history: &History,
        anchor: (u16, u16),
    ) -> Result<String, SurfaceError> {
        let mut session = EditSession::new(self.capacity, history, &self.completer);
        loop {
            draw_line(surface, &session, anchor);
            surface.present()?;

            let event = input.next_event(self.poll_timeout)?;
            match session.handle_event(&event) {
                Some(EditEvent::Submit(line)) => return Ok(line),
                Some(EditEvent::Alert) => surface.beep(),
                None => {}
            }
        }
    }
}

fn draw_line(surface: &mut dyn Surface, session: &EditSession, anchor: (u16, u16)) {
    let (row, col) = anchor;
    let mut line = session.text();
    line.push(' ');
    let to_edge = usize::from(surface.width()).saturating_sub(usize::from(col));

    surface.move_cursor(row, col);
    surface.write(&pad_to_columns(&line, to_edge));

    let before_cursor: String = session.chars()[..session.pos()].iter().collect();
    let cursor_col = usize::from(col) + columns(&before_cursor);
    surface.move_cursor(row, u16::try_from(cursor_col).unwrap_or(u16::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::completion::CATALOG;
    use crate::test_support::{ScriptedInput, row_text, test_screen};
    use crate::tui::event::TuiEvent;

    fn editor(capacity: usize) -> LineEditor {
        LineEditor::new(
            capacity,
            Completer::new(CATALOG, Some("/home/me".into())),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_read_line_returns_and_records() {
        let mut screen = test_screen(40, 5);
        screen.move_cursor(4, 1);
        let mut input = ScriptedInput::typing("abo").then(TuiEvent::Complete).submit();
        let mut history = History::new();

        let line = editor(64).read_line(&mut screen, &mut input, &mut history).unwrap();

        assert_eq!(line, "abort");
        assert_eq!(history.get(0), Some("abort"));
        assert_eq!(row_text(&screen, 4).trim_end(), " abort");
    }

    #[test]
    fn test_cursor_follows_edit_position() {
        let mut screen = test_screen(40, 5);
        screen.move_cursor(2, 3);
        let mut input = ScriptedInput::typing("abcd")
            .then(TuiEvent::CursorLeft)
            .then(TuiEvent::CursorLeft)
            .submit();
        let mut history = History::new();
        editor(64).read_line(&mut screen, &mut input, &mut history).unwrap();

        // The last draw happened before Enter, with the cursor after "ab".
        assert_eq!(screen.cursor(), (2, 5));
    }

    #[test]
    fn test_deleted_character_is_erased() {
        let mut screen = test_screen(20, 3);
        let mut input = ScriptedInput::typing("abc")
            .then(TuiEvent::Backspace)
            .submit();
        let mut history = History::new();
        editor(64).read_line(&mut screen, &mut input, &mut history).unwrap();

        assert_eq!(row_text(&screen, 0), format!("ab{}", " ".repeat(18)));
    }

    #[test]
    fn test_alerts_ring_the_bell() {
        let mut screen = test_screen(20, 3);
        let mut input = ScriptedInput::typing("")
            .then(TuiEvent::CursorLeft)
            .then(TuiEvent::CursorUp)
            .submit();
        let mut history = History::new();
        let line = editor(64).read_line(&mut screen, &mut input, &mut history).unwrap();

        assert_eq!(line, "");
        assert_eq!(screen.alerts(), 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_carries_between_calls() {
        let mut screen = test_screen(20, 3);
        let mut history = History::new();
        let editor = editor(64);

        let mut first = ScriptedInput::typing("one").submit();
        editor.read_line(&mut screen, &mut first, &mut history).unwrap();

        screen.move_cursor(0, 0);
        let mut second = ScriptedInput::typing("")
            .then(TuiEvent::CursorUp)
            .submit();
        let line = editor.read_line(&mut screen, &mut second, &mut history).unwrap();

        assert_eq!(line, "one");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_cursor_visibility_restored() {
        let mut screen = test_screen(20, 3);
        let mut input = ScriptedInput::typing("x").submit();
        let mut history = History::new();
        editor(64).read_line(&mut screen, &mut input, &mut history).unwrap();
        assert!(!screen.set_cursor_visible(false));
    }

    #[test]
    fn test_input_error_propagates() {
        let mut screen = test_screen(20, 3);
        // No Enter: the script runs dry.
        let mut input = ScriptedInput::typing("abc");
        let mut history = History::new();
        let result = editor(64).read_line(&mut screen, &mut input, &mut history);

        assert!(matches!(result, Err(SurfaceError::Io(_))));
        assert!(history.is_empty());
        assert!(!screen.set_cursor_visible(false));
    }
}
