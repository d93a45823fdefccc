//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, draws the views, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Every pass through the loop redraws the active view onto the surface and
//! presents it. ratatui diffs against the previous frame, so an idle redraw
//! (a poll timeout) sends nothing to the terminal. Switching modes blanks the
//! canvas first, since the views only overwrite the cells they use.

mod component;
pub mod components;
pub mod event;
pub mod hooks;
pub mod surface;
pub mod text;
pub mod ui;

use std::time::Duration;

use log::{debug, info};

use crate::core::action::{Action, Effect, PanelCommand, update};
use crate::core::completion::Completer;
use crate::core::config::ResolvedConfig;
use crate::core::history::History;
use crate::core::snapshot::Snapshot;
use crate::core::state::{App, Mode};
use crate::tui::components::LineEditor;
use crate::tui::event::{InputSource, TerminalInput, TuiEvent};
use crate::tui::hooks::{ConfigHooks, ScriptHooks};
use crate::tui::surface::{Surface, SurfaceError};

/// Rows moved by PageUp/PageDown.
const PAGE: isize = 10;

const HELP_TITLE: &str = "Keys";
const HELP_LINES: [&str; 4] = [
    "j/k or Up/Down  move      Enter/l  open      Esc/h  back",
    "Space  check folder   c  clear checks",
    ":  command prompt (Tab completes, Up/Down recall)",
    "?  toggle this panel   q  quit",
];

struct TerminalModeGuard;

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        ratatui::restore();
        info!("Terminal restored");
    }
}

/// Take over the terminal and run until the user quits.
pub fn run(config: ResolvedConfig, snapshot: Snapshot) -> Result<(), SurfaceError> {
    let mut screen = surface::setup(config.bell)?;
    let _terminal_mode_guard = TerminalModeGuard;

    let mut host = Host::new(&config, snapshot);
    host.run(&mut screen, &mut TerminalInput)
}

/// Map a key to an action for the given mode. `None` means the key is ignored.
pub fn key_action(mode: &Mode, event: &TuiEvent) -> Option<Action> {
    use TuiEvent::*;

    let action = match (mode, event) {
        (_, ForceQuit | InputChar('q')) => Action::Quit,
        (_, InputChar(':')) => Action::Prompt,
        (_, InputChar('?')) => Action::Panel(PanelCommand::Toggle),
        (_, Submit | CursorRight | InputChar('l')) => Action::Open,
        (_, Escape | CursorLeft | InputChar('h')) => Action::Back,

        (Mode::FolderList, CursorDown | InputChar('j')) => Action::ScrollFolder(1),
        (Mode::FolderList, CursorUp | InputChar('k')) => Action::ScrollFolder(-1),
        (Mode::FolderList, PageDown) => Action::ScrollFolder(PAGE),
        (Mode::FolderList, PageUp) => Action::ScrollFolder(-PAGE),
        (Mode::FolderList, InputChar(' ')) => Action::ToggleSelectedFolder,
        (Mode::FolderList, InputChar('c')) => Action::ClearSelectedFolders,

        (Mode::MessageIndex, CursorDown | InputChar('j')) => Action::ScrollIndex(1),
        (Mode::MessageIndex, CursorUp | InputChar('k')) => Action::ScrollIndex(-1),
        (Mode::MessageIndex, PageDown) => Action::ScrollIndex(PAGE),
        (Mode::MessageIndex, PageUp) => Action::ScrollIndex(-PAGE),

        (Mode::MessageView, CursorDown | InputChar('j')) => Action::ScrollMessage(1),
        (Mode::MessageView, CursorUp | InputChar('k')) => Action::ScrollMessage(-1),
        (Mode::MessageView, PageDown | InputChar(' ')) => Action::ScrollMessage(PAGE),
        (Mode::MessageView, PageUp) => Action::ScrollMessage(-PAGE),

        _ => return None,
    };
    Some(action)
}

/// Everything the loop carries between frames.
pub struct Host {
    app: App,
    snapshot: Snapshot,
    hooks: ConfigHooks,
    history: History,
    editor: LineEditor,
    folder_format: String,
    poll_timeout: Duration,
}

impl Host {
    pub fn new(config: &ResolvedConfig, snapshot: Snapshot) -> Self {
        let mut app = App::new();
        app.folder_limit = config.folder_limit.clone();
        app.index_format = config.index_format.clone();
        snapshot.populate(&mut app, &config.folder_format);

        let poll_timeout = Duration::from_millis(config.poll_timeout_ms);
        Self {
            app,
            snapshot,
            hooks: ConfigHooks::new(config.headers.clone()),
            history: History::new(),
            editor: LineEditor::new(config.prompt_capacity, Completer::from_env(), poll_timeout),
            folder_format: config.folder_format.clone(),
            poll_timeout,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn run(
        &mut self,
        surface: &mut dyn Surface,
        input: &mut dyn InputSource,
    ) -> Result<(), SurfaceError> {
        // Key help until a script gives the panel something else.
        let panel = surface.panel_mut();
        if panel.title().is_empty() {
            panel.set_title(HELP_TITLE);
            panel.set_lines(HELP_LINES);
        }

        let mut drawn_mode = None;
        loop {
            if drawn_mode.as_ref() != Some(&self.app.mode) {
                debug!("Mode is now {}", self.app.mode);
                self.hooks.clear_screen(surface);
                drawn_mode = Some(self.app.mode.clone());
            }
            self.draw(surface)?;

            let event = input.next_event(self.poll_timeout)?;
            let Some(action) = key_action(&self.app.mode, &event) else {
                continue;
            };
            if !self.dispatch(action, surface, input)? {
                break;
            }
        }

        info!("Leaving the event loop");
        Ok(())
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        ui::refresh(&mut self.app, surface, &mut self.hooks);
        for path in self.hooks.take_read() {
            if let Effect::MarkRead(path) = update(&mut self.app, Action::MessageRead(path)) {
                self.snapshot.mark_read(&path);
                self.reload_folders();
            }
        }
        ui::draw_status(surface, &self.app.status_message);
        surface.present()
    }

    fn reload_folders(&mut self) {
        self.app.all_folders = self.snapshot.folder_entries(&self.folder_format);
        self.app.apply_folder_limit();
    }

    /// Apply `action`. Returns `false` once the user has asked to quit.
    fn dispatch(
        &mut self,
        action: Action,
        surface: &mut dyn Surface,
        input: &mut dyn InputSource,
    ) -> Result<bool, SurfaceError> {
        match update(&mut self.app, action) {
            Effect::None => {}
            Effect::Quit => return Ok(false),
            Effect::LoadMessages => {
                self.app.messages = self.snapshot.messages_in(&self.app.checked_folders);
            }
            Effect::MarkRead(path) => {
                self.snapshot.mark_read(&path);
                self.reload_folders();
            }
            Effect::Panel(command) => self.apply_panel(command, surface),
            Effect::Prompt => return self.prompt(surface, input),
        }
        Ok(true)
    }

    fn apply_panel(&mut self, command: PanelCommand, surface: &mut dyn Surface) {
        let panel = surface.panel_mut();
        match command {
            PanelCommand::Show => panel.show(),
            PanelCommand::Hide => panel.hide(),
            PanelCommand::Toggle => panel.toggle(),
            PanelCommand::Visible => {
                let state = if panel.is_visible() { "visible" } else { "hidden" };
                self.app.status_message = format!("Panel: {state}");
            }
            PanelCommand::Title(Some(title)) => panel.set_title(title),
            PanelCommand::Title(None) => {
                self.app.status_message = format!("Panel title: {}", panel.title());
            }
            PanelCommand::Text(Some(lines)) => panel.set_lines(lines),
            PanelCommand::Text(None) => {
                self.app.status_message = format!("Panel: {} lines", panel.lines().len());
            }
        }
    }

    /// Read a command on the status row and run it through the hooks.
    fn prompt(
        &mut self,
        surface: &mut dyn Surface,
        input: &mut dyn InputSource,
    ) -> Result<bool, SurfaceError> {
        ui::draw_status(surface, ":");
        let row = surface.height().saturating_sub(1);
        surface.move_cursor(row, 1);
        let line = self.editor.read_line(surface, input, &mut self.history)?;

        let command = line.trim();
        if command.is_empty() {
            return Ok(true);
        }
        match self.hooks.execute(command) {
            Some(action) => self.dispatch(action, surface, input),
            None => {
                self.app.status_message = format!("Unknown command: {command}");
                Ok(true)
            }
        }
    }
}
