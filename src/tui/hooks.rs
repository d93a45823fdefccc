//! # Script Hooks
//!
//! The seam between the display and whatever user scripting sits above it.
//! Renderers call out through [`ScriptHooks`] at fixed points: before
//! painting a message, after a message has been shown, and whenever they
//! need a user-supplied table such as the header list.
//!
//! [`ConfigHooks`] is the built-in implementation. It serves tables from the
//! config file and runs commands through [`Action::from_command`].

use log::debug;

use crate::core::action::Action;
use crate::tui::surface::Surface;

pub trait ScriptHooks {
    /// Called before the message view paints. Scripts may draw a backdrop
    /// instead of blanking the screen.
    fn clear_screen(&mut self, surface: &mut dyn Surface) {
        surface.clear();
    }

    /// Called once per message-view render with the displayed message's path.
    fn on_read_message(&mut self, path: &str);

    /// A named list of strings, empty when the table is not defined.
    fn lookup_table(&self, name: &str) -> Vec<String>;

    /// Run a line of user code. Returns what the code asked the host to do.
    fn execute(&mut self, code: &str) -> Option<Action>;
}

/// Hooks backed by the resolved configuration.
#[derive(Debug, Default)]
pub struct ConfigHooks {
    headers: Vec<String>,
    read: Vec<String>,
}

impl ConfigHooks {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            read: Vec::new(),
        }
    }

    /// Message paths reported since the last call, oldest first.
    pub fn take_read(&mut self) -> Vec<String> {
        std::mem::take(&mut self.read)
    }
}

impl ScriptHooks for ConfigHooks {
    fn on_read_message(&mut self, path: &str) {
        if self.read.last().map(String::as_str) != Some(path) {
            self.read.push(path.to_string());
        }
    }

    fn lookup_table(&self, name: &str) -> Vec<String> {
        match name {
            "headers" => self.headers.clone(),
            _ => Vec::new(),
        }
    }

    fn execute(&mut self, code: &str) -> Option<Action> {
        let action = Action::from_command(code);
        debug!("execute {:?} -> {:?}", code, action);
        action
    }
}
