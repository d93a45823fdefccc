//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::core::action::Action;
use crate::core::config::BellMode;
use crate::tui::event::{InputSource, TuiEvent};
use crate::tui::hooks::ScriptHooks;
use crate::tui::surface::{Screen, Surface};

/// A silent screen over an in-memory terminal.
pub fn test_screen(width: u16, height: u16) -> Screen<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    Screen::new(terminal, BellMode::Silent)
}

/// The symbols of one canvas row, as written (not yet presented).
pub fn row_text(screen: &Screen<TestBackend>, row: u16) -> String {
    let canvas = screen.canvas();
    (0..canvas.area.width)
        .map(|x| canvas[(x, row)].symbol())
        .collect()
}

/// Hooks that remember every call.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub headers: Vec<String>,
    pub clears: usize,
    pub read: Vec<String>,
    pub executed: Vec<String>,
}

impl RecordingHooks {
    pub fn with_headers(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl ScriptHooks for RecordingHooks {
    fn clear_screen(&mut self, surface: &mut dyn Surface) {
        self.clears += 1;
        surface.clear();
    }

    fn on_read_message(&mut self, path: &str) {
        self.read.push(path.to_string());
    }

    fn lookup_table(&self, name: &str) -> Vec<String> {
        match name {
            "headers" => self.headers.clone(),
            _ => Vec::new(),
        }
    }

    fn execute(&mut self, code: &str) -> Option<Action> {
        self.executed.push(code.to_string());
        Action::from_command(code)
    }
}

/// Replays a fixed list of events, then fails like a closed terminal.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<TuiEvent>,
}

impl ScriptedInput {
    pub fn typing(text: &str) -> Self {
        Self {
            events: text.chars().map(TuiEvent::InputChar).collect(),
        }
    }

    pub fn then(mut self, event: TuiEvent) -> Self {
        self.events.push_back(event);
        self
    }

    pub fn submit(self) -> Self {
        self.then(TuiEvent::Submit)
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self, _timeout: Duration) -> io::Result<TuiEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}
