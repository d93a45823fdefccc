use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Decoded terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    InputChar(char),
    Submit,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    Backspace,
    Delete,
    /// Tab
    Complete,
    Escape,
    PageUp,
    PageDown,
    /// Ctrl+C
    ForceQuit,
    /// The read timed out, or the terminal reported something that is not
    /// a user action (a key release).
    Tick,
    Resize,
    /// A key with no meaning anywhere in mailview.
    Unsupported,
}

/// Where key events come from. The terminal in production, a script in tests.
pub trait InputSource {
    /// Wait up to `timeout` for the next event. A timeout yields [`TuiEvent::Tick`].
    fn next_event(&mut self, timeout: Duration) -> io::Result<TuiEvent>;
}

/// Reads events from the controlling terminal through crossterm.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_event(&mut self, timeout: Duration) -> io::Result<TuiEvent> {
        poll_event_timeout(timeout)
    }
}

pub fn poll_event_timeout(timeout: Duration) -> io::Result<TuiEvent> {
    if !event::poll(timeout)? {
        return Ok(TuiEvent::Tick);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(_, _) => TuiEvent::Resize,
        _ => TuiEvent::Tick,
    })
}

fn translate_key(key_event: KeyEvent) -> TuiEvent {
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    if key_event.kind != KeyEventKind::Press {
        return TuiEvent::Tick;
    }

    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => TuiEvent::ForceQuit,
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => TuiEvent::CursorHome,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => TuiEvent::CursorEnd,
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => TuiEvent::Unsupported,
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::ALT) => TuiEvent::Unsupported,
        (_, KeyCode::Char(c)) => TuiEvent::InputChar(c),
        (_, KeyCode::Enter) => TuiEvent::Submit,
        (_, KeyCode::Left) => TuiEvent::CursorLeft,
        (_, KeyCode::Right) => TuiEvent::CursorRight,
        (_, KeyCode::Up) => TuiEvent::CursorUp,
        (_, KeyCode::Down) => TuiEvent::CursorDown,
        (_, KeyCode::Home) => TuiEvent::CursorHome,
        (_, KeyCode::End) => TuiEvent::CursorEnd,
        (_, KeyCode::Backspace) => TuiEvent::Backspace,
        (_, KeyCode::Delete) => TuiEvent::Delete,
        (_, KeyCode::Tab) => TuiEvent::Complete,
        (_, KeyCode::Esc) => TuiEvent::Escape,
        (_, KeyCode::PageUp) => TuiEvent::PageUp,
        (_, KeyCode::PageDown) => TuiEvent::PageDown,
        _ => TuiEvent::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TuiEvent {
        translate_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_printable_keys() {
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::NONE), TuiEvent::InputChar('x'));
        assert_eq!(press(KeyCode::Char('X'), KeyModifiers::SHIFT), TuiEvent::InputChar('X'));
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(press(KeyCode::Char('a'), KeyModifiers::CONTROL), TuiEvent::CursorHome);
        assert_eq!(press(KeyCode::Char('e'), KeyModifiers::CONTROL), TuiEvent::CursorEnd);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), TuiEvent::ForceQuit);
        assert_eq!(press(KeyCode::Char('z'), KeyModifiers::CONTROL), TuiEvent::Unsupported);
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(press(KeyCode::Tab, KeyModifiers::NONE), TuiEvent::Complete);
        assert_eq!(press(KeyCode::Delete, KeyModifiers::NONE), TuiEvent::Delete);
        assert_eq!(press(KeyCode::Home, KeyModifiers::NONE), TuiEvent::CursorHome);
        assert_eq!(press(KeyCode::F(5), KeyModifiers::NONE), TuiEvent::Unsupported);
    }

    #[test]
    fn test_release_is_not_input() {
        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_key(release), TuiEvent::Tick);
    }
}
