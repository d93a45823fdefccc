//! Editing state for one `read_line` call.
//!
//! The session owns the buffer and the cursor. History and the completion
//! catalog are borrowed, since they outlive any single prompt.

use crate::core::completion::Completer;
use crate::core::history::History;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// What a key did, when it did more than edit the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Submit(String),
    /// The key could not apply (buffer full, cursor at an edge, ...).
    Alert,
}

pub struct EditSession<'a> {
    buffer: Vec<char>,
    /// Cursor as a char index, `0..=buffer.len()`.
    pos: usize,
    /// Including the slot reserved for the terminator, so at most
    /// `capacity - 1` characters are ever held.
    capacity: usize,
    history: &'a History,
    /// `history.len()` means "not browsing".
    history_offset: usize,
    completer: &'a Completer,
}

impl<'a> EditSession<'a> {
    pub fn new(capacity: usize, history: &'a History, completer: &'a Completer) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            pos: 0,
            capacity,
            history,
            history_offset: history.len(),
            completer,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.buffer
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    fn max_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    /// Swap in a whole new line and park the cursor at its end.
    fn replace(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.extend(text.chars().take(self.max_len()));
        self.pos = self.buffer.len();
    }

    fn insert(&mut self, c: char) -> Option<EditEvent> {
        if self.buffer.len() + 1 >= self.capacity {
            return Some(EditEvent::Alert);
        }
        self.buffer.insert(self.pos, c);
        self.pos += 1;
        None
    }

    fn complete(&mut self) -> Option<EditEvent> {
        if self.buffer.is_empty() || self.pos == 0 {
            return None;
        }
        let prefix: String = self.buffer[..self.pos].iter().collect();
        if let Some(completion) = self.completer.complete(&prefix) {
            self.replace(&completion);
        }
        None
    }

    fn history_prev(&mut self) -> Option<EditEvent> {
        if self.history_offset == 0 {
            return Some(EditEvent::Alert);
        }
        self.history_offset -= 1;
        let entry = self.history.get(self.history_offset).unwrap_or_default();
        self.replace(entry);
        None
    }

    fn history_next(&mut self) -> Option<EditEvent> {
        let next = self.history_offset + 1;
        if next < self.history.len() {
            self.history_offset = next;
            let entry = self.history.get(next).unwrap_or_default();
            self.replace(entry);
            None
        } else {
            self.history_offset = self.history.len();
            Some(EditEvent::Alert)
        }
    }
}

impl EventHandler for EditSession<'_> {
    type Event = EditEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditEvent> {
        let alert = Some(EditEvent::Alert);
        match event {
            TuiEvent::Submit => Some(EditEvent::Submit(self.text())),
            TuiEvent::InputChar(c) => self.insert(*c),
            TuiEvent::CursorLeft => {
                if self.pos == 0 {
                    return alert;
                }
                self.pos -= 1;
                None
            }
            TuiEvent::CursorRight => {
                if self.pos >= self.buffer.len() {
                    return alert;
                }
                self.pos += 1;
                None
            }
            TuiEvent::CursorHome => {
                self.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.pos = self.buffer.len();
                None
            }
            TuiEvent::Backspace => {
                if self.pos == 0 {
                    return alert;
                }
                self.pos -= 1;
                self.buffer.remove(self.pos);
                None
            }
            TuiEvent::Delete => {
                if self.pos >= self.buffer.len() {
                    return alert;
                }
                self.buffer.remove(self.pos);
                None
            }
            TuiEvent::Complete => self.complete(),
            TuiEvent::CursorUp => self.history_prev(),
            TuiEvent::CursorDown => self.history_next(),
            TuiEvent::Tick | TuiEvent::Resize => None,
            _ => alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::completion::CATALOG;

    fn completer() -> Completer {
        Completer::new(CATALOG, Some("/home/me".into()))
    }

    fn type_str(session: &mut EditSession, text: &str) {
        for c in text.chars() {
            assert_eq!(session.handle_event(&TuiEvent::InputChar(c)), None);
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        type_str(&mut session, "hello");
        assert_eq!(session.pos(), 5);
        assert_eq!(
            session.handle_event(&TuiEvent::Submit),
            Some(EditEvent::Submit("hello".into()))
        );
    }

    #[test]
    fn test_insert_in_middle() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        type_str(&mut session, "ac");
        session.handle_event(&TuiEvent::CursorLeft);
        type_str(&mut session, "b");
        assert_eq!(session.text(), "abc");
        assert_eq!(session.pos(), 2);
    }

    #[test]
    fn test_capacity_reserves_one_slot() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(4, &history, &completer);
        type_str(&mut session, "abc");
        assert_eq!(
            session.handle_event(&TuiEvent::InputChar('d')),
            Some(EditEvent::Alert)
        );
        assert_eq!(session.text(), "abc");
    }

    #[test]
    fn test_cursor_bounds_alert() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        assert_eq!(session.handle_event(&TuiEvent::CursorLeft), Some(EditEvent::Alert));
        assert_eq!(session.handle_event(&TuiEvent::CursorRight), Some(EditEvent::Alert));
        assert_eq!(session.handle_event(&TuiEvent::Backspace), Some(EditEvent::Alert));
        assert_eq!(session.handle_event(&TuiEvent::Delete), Some(EditEvent::Alert));
    }

    #[test]
    fn test_home_end() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        type_str(&mut session, "abc");
        session.handle_event(&TuiEvent::CursorHome);
        assert_eq!(session.pos(), 0);
        session.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(session.pos(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        type_str(&mut session, "abcd");
        session.handle_event(&TuiEvent::Backspace);
        assert_eq!(session.text(), "abc");
        session.handle_event(&TuiEvent::CursorHome);
        session.handle_event(&TuiEvent::Delete);
        assert_eq!(session.text(), "bc");
        assert_eq!(session.pos(), 0);
    }

    #[test]
    fn test_tab_completes_prefix_before_cursor() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(64, &history, &completer);
        type_str(&mut session, "abo");
        assert_eq!(session.handle_event(&TuiEvent::Complete), None);
        assert_eq!(session.text(), "abort");
        assert_eq!(session.pos(), 5);
    }

    #[test]
    fn test_tab_without_match_changes_nothing() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(64, &history, &completer);
        type_str(&mut session, "zzz");
        assert_eq!(session.handle_event(&TuiEvent::Complete), None);
        assert_eq!(session.text(), "zzz");

        session.handle_event(&TuiEvent::CursorHome);
        assert_eq!(session.handle_event(&TuiEvent::Complete), None);
        assert_eq!(session.text(), "zzz");
    }

    #[test]
    fn test_tilde_expands() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(64, &history, &completer);
        type_str(&mut session, "~/mail");
        session.handle_event(&TuiEvent::Complete);
        assert_eq!(session.text(), "/home/me");
        assert_eq!(session.pos(), "/home/me".len());
    }

    #[test]
    fn test_completion_truncated_to_capacity() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(4, &history, &completer);
        type_str(&mut session, "ab");
        session.handle_event(&TuiEvent::Complete);
        assert_eq!(session.text(), "abo");
    }

    #[test]
    fn test_history_navigation() {
        let history: History = ["one", "two"].into_iter().collect();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        assert_eq!(session.history_offset(), 2);

        assert_eq!(session.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(session.text(), "two");
        assert_eq!(session.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(session.text(), "one");
        assert_eq!(session.handle_event(&TuiEvent::CursorUp), Some(EditEvent::Alert));
        assert_eq!(session.text(), "one");

        assert_eq!(session.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(session.text(), "two");
        assert_eq!(session.handle_event(&TuiEvent::CursorDown), Some(EditEvent::Alert));
        assert_eq!(session.history_offset(), 2);
        // The buffer keeps the last entry shown.
        assert_eq!(session.text(), "two");
    }

    #[test]
    fn test_empty_history_alerts() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        assert_eq!(session.handle_event(&TuiEvent::CursorUp), Some(EditEvent::Alert));
        assert_eq!(session.handle_event(&TuiEvent::CursorDown), Some(EditEvent::Alert));
    }

    #[test]
    fn test_unrecognised_keys_alert() {
        let history = History::new();
        let completer = completer();
        let mut session = EditSession::new(16, &history, &completer);
        assert_eq!(session.handle_event(&TuiEvent::PageUp), Some(EditEvent::Alert));
        assert_eq!(session.handle_event(&TuiEvent::Unsupported), Some(EditEvent::Alert));
        assert_eq!(session.handle_event(&TuiEvent::Tick), None);
        assert_eq!(session.handle_event(&TuiEvent::Resize), None);
    }
}
