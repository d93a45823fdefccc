//! # Actions
//!
//! Everything that can happen in mailview becomes an `Action`.
//! User presses `j`? That's `Action::ScrollFolder(1)` in the folder list.
//! A script runs `scroll_index_down`? Same path, via [`Action::from_command`].
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` the host must carry out (quit, reload messages, prompt, ...).
//! No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::state::{App, MessageEntry, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Move the folder highlight by a signed number of rows.
    ScrollFolder(isize),
    ScrollFolderTo(usize),
    ScrollIndex(isize),
    ScrollIndexTo(usize),
    /// Scroll the open message body by a signed number of lines.
    ScrollMessage(isize),
    ToggleSelectedFolder,
    ClearSelectedFolders,
    /// Descend: folder list → index → message.
    Open,
    /// Ascend: message → index → folder list.
    Back,
    SetMode(Mode),
    SetLimit(String),
    MessageRead(String),
    Panel(PanelCommand),
    /// Report on the open message's attachments or body parts.
    Mime(MimeQuery),
    Prompt,
    Refresh,
}

/// Panel operations. The panel itself lives on the surface, so these pass
/// straight through `update()` to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Show,
    Hide,
    Toggle,
    /// Report whether the panel is showing.
    Visible,
    /// Set the title, or report it when `None`.
    Title(Option<String>),
    /// Replace the body lines, or report how many there are when `None`.
    Text(Option<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeQuery {
    /// Every attachment, or just the 1-based `n`th.
    Attachments(Option<usize>),
    CountAttachments,
    BodyParts,
    CountBodyParts,
    HasBodyPart(String),
}

/// Side effects the host performs after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// The checked folder set changed; rebuild `App::messages`.
    LoadMessages,
    /// Persist the read state of this message upstream.
    MarkRead(String),
    Panel(PanelCommand),
    Prompt,
}

impl Action {
    /// Map a command line such as `"scroll_index_down"` or
    /// `"global_mode index"` to an action. Unknown commands yield `None`.
    pub fn from_command(line: &str) -> Option<Action> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (line, None),
        };
        let position = || arg.and_then(|a| a.parse::<usize>().ok());
        let text = || arg.filter(|a| !a.is_empty()).map(str::to_string);

        Some(match name {
            "exit" | "abort" => Action::Quit,
            "scroll_maildir_down" => Action::ScrollFolder(1),
            "scroll_maildir_up" => Action::ScrollFolder(-1),
            "scroll_maildir_to" => Action::ScrollFolderTo(position()?),
            "scroll_index_down" => Action::ScrollIndex(1),
            "scroll_index_up" => Action::ScrollIndex(-1),
            "scroll_index_to" => Action::ScrollIndexTo(position()?),
            "scroll_message_down" => Action::ScrollMessage(1),
            "scroll_message_up" => Action::ScrollMessage(-1),
            "toggle_selected_folder" => Action::ToggleSelectedFolder,
            "clear_selected_folders" => Action::ClearSelectedFolders,
            "select_maildir" => Action::Open,
            "global_mode" => Action::SetMode(arg?.parse().ok()?),
            "maildir_limit" => Action::SetLimit(arg?.to_string()),
            "refresh_display" | "clear" => Action::Refresh,
            "prompt" => Action::Prompt,
            "panel_show" => Action::Panel(PanelCommand::Show),
            "panel_hide" => Action::Panel(PanelCommand::Hide),
            "panel_toggle" => Action::Panel(PanelCommand::Toggle),
            "panel_visible" => Action::Panel(PanelCommand::Visible),
            "panel_title" => Action::Panel(PanelCommand::Title(text())),
            // Lines are separated by a literal `\n` in the argument.
            "panel_text" => Action::Panel(PanelCommand::Text(
                text().map(|t| t.split("\\n").map(str::to_string).collect()),
            )),
            "attachments" => Action::Mime(MimeQuery::Attachments(position())),
            "count_attachments" => Action::Mime(MimeQuery::CountAttachments),
            "get_body_parts" => Action::Mime(MimeQuery::BodyParts),
            "count_body_parts" => Action::Mime(MimeQuery::CountBodyParts),
            "has_body_part" => Action::Mime(MimeQuery::HasBodyPart(text()?)),
            _ => return None,
        })
    }
}

fn describe_mime(message: &MessageEntry, query: &MimeQuery) -> String {
    match query {
        MimeQuery::Attachments(None) if message.attachments().is_empty() => {
            String::from("No attachments")
        }
        MimeQuery::Attachments(None) => message.attachments().join(", "),
        MimeQuery::Attachments(Some(n)) => match message.attachment(*n) {
            Some(name) => format!("Attachment {n}: {name}"),
            None => format!("No attachment {n}"),
        },
        MimeQuery::CountAttachments => format!("Attachments: {}", message.count_attachments()),
        MimeQuery::BodyParts if message.body_parts().is_empty() => {
            String::from("No body parts")
        }
        MimeQuery::BodyParts => message.body_parts().join(", "),
        MimeQuery::CountBodyParts => format!("Body parts: {}", message.count_body_parts()),
        MimeQuery::HasBodyPart(content_type) => {
            let answer = if message.has_body_part(content_type) { "yes" } else { "no" };
            format!("{content_type}: {answer}")
        }
    }
}

fn offset_by(current: usize, delta: isize) -> usize {
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    }
}

/// Apply `action` to `app`.
///
/// Scrolling past the end of a list is left for the renderers to normalise:
/// the folder list wraps back to the top, the index stops at the last row.
pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,
        Action::ScrollFolder(delta) => {
            app.selected_folder = offset_by(app.selected_folder, delta);
            Effect::None
        }
        Action::ScrollFolderTo(index) => {
            app.selected_folder = index;
            Effect::None
        }
        Action::ScrollIndex(delta) => {
            app.selected_message = offset_by(app.selected_message, delta);
            app.message_offset = 0;
            Effect::None
        }
        Action::ScrollIndexTo(index) => {
            app.selected_message = index;
            app.message_offset = 0;
            Effect::None
        }
        Action::ScrollMessage(delta) => {
            let max = app
                .current_message()
                .map(|m| m.body.len().saturating_sub(1))
                .unwrap_or(0);
            app.message_offset = offset_by(app.message_offset, delta).min(max);
            Effect::None
        }
        Action::ToggleSelectedFolder => {
            let Some(path) = app.current_folder().map(|f| f.path.clone()) else {
                return Effect::None;
            };
            if app.is_checked(&path) {
                app.checked_folders.retain(|p| *p != path);
            } else {
                app.checked_folders.push(path);
            }
            Effect::LoadMessages
        }
        Action::ClearSelectedFolders => {
            app.checked_folders.clear();
            Effect::LoadMessages
        }
        Action::Open => match app.mode {
            Mode::FolderList => {
                if app.checked_folders.is_empty()
                    && let Some(path) = app.current_folder().map(|f| f.path.clone())
                {
                    app.checked_folders.push(path);
                }
                app.mode = Mode::MessageIndex;
                app.selected_message = 0;
                Effect::LoadMessages
            }
            Mode::MessageIndex if !app.messages.is_empty() => {
                app.mode = Mode::MessageView;
                app.message_offset = 0;
                Effect::None
            }
            _ => Effect::None,
        },
        Action::Back => {
            app.mode = match app.mode {
                Mode::MessageView => Mode::MessageIndex,
                _ => Mode::FolderList,
            };
            app.message_offset = 0;
            Effect::None
        }
        Action::SetMode(mode) => {
            app.mode = mode;
            Effect::None
        }
        Action::SetLimit(limit) => {
            app.folder_limit = limit;
            app.apply_folder_limit();
            app.status_message = format!("Limit: {}", app.folder_limit);
            Effect::None
        }
        Action::MessageRead(path) => {
            let mut changed = false;
            for message in app.messages.iter_mut().filter(|m| m.path == path) {
                changed |= message.is_unread();
                message.flags.mark_read();
            }
            if changed {
                Effect::MarkRead(path)
            } else {
                Effect::None
            }
        }
        Action::Panel(command) => Effect::Panel(command),
        Action::Mime(query) => {
            app.status_message = match app.current_message() {
                Some(message) => describe_mime(message, &query),
                None => String::from("No message selected"),
            };
            Effect::None
        }
        Action::Prompt => Effect::Prompt,
        Action::Refresh => Effect::None,
    }
}
