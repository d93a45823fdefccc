//! # Display Compositor
//!
//! Picks the renderer for the active mode and owns the status line.
//! Nothing here flushes; the host calls `present()` once the frame is done.

use log::warn;

use crate::core::state::{App, Mode};
use crate::tui::components::{folder_list, message_index, message_view};
use crate::tui::hooks::ScriptHooks;
use crate::tui::surface::Surface;
use crate::tui::text::truncate_to_columns;

/// Draw the active mode onto `surface`.
///
/// May correct stale selections in `app` (see `App::clamp_*`).
pub fn refresh(app: &mut App, surface: &mut dyn Surface, hooks: &mut dyn ScriptHooks) {
    match app.mode.clone() {
        Mode::FolderList => folder_list::draw(app, surface),
        Mode::MessageIndex => message_index::draw(app, surface),
        Mode::MessageView => message_view::draw(app, surface, hooks),
        Mode::Unknown(name) => {
            warn!("refresh: no renderer for mode {:?}", name);
            hooks.clear_screen(surface);
            surface.reset_style();
            surface.move_cursor(3, 3);
            surface.write(&format!("UNKNOWN MODE: '{name}'"));
        }
    }
}

/// Blank the bottom row.
pub fn clear_status(surface: &mut dyn Surface) {
    let Some(row) = surface.height().checked_sub(1) else {
        return;
    };
    let blank = " ".repeat(usize::from(surface.width()));
    surface.reset_style();
    surface.move_cursor(row, 0);
    surface.write(&blank);
}

/// Replace the bottom row with `text`, cut to the screen width.
pub fn draw_status(surface: &mut dyn Surface, text: &str) {
    clear_status(surface);
    let Some(row) = surface.height().checked_sub(1) else {
        return;
    };
    let width = usize::from(surface.width());
    surface.move_cursor(row, 0);
    surface.write(truncate_to_columns(text, width));
}
