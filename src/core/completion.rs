//! # Completion
//!
//! Single-candidate prefix completion for the line editor. The catalog is the
//! set of operations the scripting runtime can call; keep it sorted, the
//! first match wins.

use std::path::PathBuf;

/// Names of the externally callable operations, sorted.
pub const CATALOG: &[&str] = &[
    "abort",
    "add_selected_folder",
    "attachments",
    "clear",
    "clear_selected_folders",
    "compose",
    "count_attachments",
    "count_body_parts",
    "count_maildirs",
    "count_messages",
    "current_maildir",
    "current_maildirs",
    "current_message",
    "delete",
    "dump_stack",
    "editor",
    "exec",
    "executable",
    "exit",
    "file_exists",
    "from",
    "get_body_parts",
    "get_variables",
    "global_mode",
    "has_body_part",
    "header",
    "index_format",
    "index_limit",
    "is_directory",
    "is_new",
    "jump_index_to",
    "jump_maildir_to",
    "maildir_format",
    "maildir_limit",
    "maildir_prefix",
    "maildirs_matching",
    "mark_new",
    "mark_read",
    "message_filter",
    "mime_type",
    "msg",
    "panel_hide",
    "panel_show",
    "panel_text",
    "panel_title",
    "panel_toggle",
    "panel_visible",
    "prompt",
    "prompt_chars",
    "prompt_maildir",
    "prompt_yn",
    "refresh_display",
    "reply",
    "save",
    "save_message",
    "screen_height",
    "screen_width",
    "scroll_index_down",
    "scroll_index_to",
    "scroll_index_up",
    "scroll_maildir_down",
    "scroll_maildir_to",
    "scroll_maildir_up",
    "scroll_message_down",
    "scroll_message_up",
    "select_maildir",
    "selected_folders",
    "send_email",
    "sendmail_path",
    "sent_mail",
    "set_selected_folder",
    "sleep",
    "toggle_selected_folder",
];

/// Looks up the one completion for a typed prefix.
#[derive(Debug, Clone)]
pub struct Completer {
    catalog: &'static [&'static str],
    home: Option<String>,
}

impl Completer {
    pub fn new(catalog: &'static [&'static str], home: Option<PathBuf>) -> Self {
        Self {
            catalog,
            home: home.map(|h| h.to_string_lossy().into_owned()),
        }
    }

    /// The built-in catalog, with `~` bound to the user's home directory if
    /// one can be found.
    pub fn from_env() -> Self {
        Self::new(CATALOG, dirs::home_dir())
    }

    /// Complete `input` to a single candidate.
    ///
    /// Input starting with `~` completes to the home directory alone; whatever
    /// followed the tilde is dropped. Otherwise the first catalog name
    /// starting with `input` wins.
    pub fn complete(&self, input: &str) -> Option<String> {
        if input.is_empty() {
            return None;
        }

        if input.starts_with('~')
            && let Some(home) = &self.home
        {
            return Some(home.clone());
        }

        self.catalog
            .iter()
            .find(|name| name.starts_with(input))
            .map(|name| name.to_string())
    }
}
