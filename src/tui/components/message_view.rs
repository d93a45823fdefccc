//! # Message View
//!
//! Headers, then attachments, then a scrolled window of the body:
//!
//! ```text
//! Date: Mon, 5 Oct 2026
//! From: alice
//! Attachment 1 - notes.txt
//!                               <- one blank separator row
//! body[offset]
//! body[offset + 1]
//! ...
//! ```
//!
//! Which headers appear is a user table looked up through the script hooks,
//! so the renderer has no opinion beyond [`DEFAULT_HEADERS`].

use crate::core::config::DEFAULT_HEADERS;
use crate::core::state::App;
use crate::tui::hooks::ScriptHooks;
use crate::tui::surface::Surface;
use crate::tui::text::truncate_to_columns;

pub const NO_MESSAGES: &str = "No messages";

/// Rows below the body that stay unused: one for the separator above the
/// body, one for the status line.
const BODY_RESERVED_ROWS: usize = 2;

pub fn draw(app: &mut App, surface: &mut dyn Surface, hooks: &mut dyn ScriptHooks) {
    let Some(selected) = app.clamp_message_selection() else {
        surface.clear();
        surface.reset_style();
        surface.move_cursor(3, 3);
        surface.write(NO_MESSAGES);
        return;
    };

    hooks.clear_screen(surface);
    surface.reset_style();

    let mut headers = hooks.lookup_table("headers");
    if headers.is_empty() {
        headers = DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect();
    }

    let message = &app.messages[selected];
    let width = usize::from(surface.width());
    let height = usize::from(surface.height());
    let mut row = 0;

    for id in &headers {
        let name = header_label(id);
        let value = message.format(id);
        let value = truncate_to_columns(&value, width.saturating_sub(name.len() + 4));
        put_line(surface, row, &format!("{name}: {value}"));
        row += 1;
    }

    for (index, path) in message.attachments().iter().enumerate() {
        put_line(surface, row, &format!("Attachment {} - {}", index + 1, path));
        row += 1;
    }

    let top = headers.len() + message.count_attachments();
    let shown = message.body.len().min(height.saturating_sub(top));
    for i in 0..shown.saturating_sub(BODY_RESERVED_ROWS) {
        let line = message
            .body
            .get(i + app.message_offset)
            .map(String::as_str)
            .unwrap_or_default();
        put_line(surface, i + top + 1, truncate_to_columns(line, width));
    }

    let path = message.path.clone();
    hooks.on_read_message(&path);
}

/// `"$SUBJECT"` → `"Subject"`.
pub fn header_label(id: &str) -> String {
    let lower = id.strip_prefix('$').unwrap_or(id).to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn put_line(surface: &mut dyn Surface, row: usize, text: &str) {
    let Ok(row) = u16::try_from(row) else {
        return;
    };
    if row < surface.height() {
        surface.move_cursor(row, 0);
        surface.write(text);
    }
}
