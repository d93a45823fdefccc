//! # Folder List
//!
//! One row per visible folder, starting at the highlighted one. The top row
//! is always the selection and is drawn in reverse video; folders with
//! unread mail use the attention colours.

use crate::core::state::App;
use crate::tui::surface::{Attr, ColorPair, Surface};
use crate::tui::text::{columns, pad_to_columns};

/// Row the "nothing to show" message goes on.
const EMPTY_ROW: u16 = 2;
/// Rows start this far from the left edge.
const LEFT_MARGIN: u16 = 2;

pub fn draw(app: &mut App, surface: &mut dyn Surface) {
    let Some(selected) = app.clamp_folder_selection() else {
        draw_empty(&app.folder_limit, surface);
        return;
    };

    let row_width = usize::from(surface.width()).saturating_sub(3);
    // The last row belongs to the status line.
    for row in 0..surface.height().saturating_sub(1) {
        let folder = app.folders.get(selected + usize::from(row));
        let unread = folder.is_some_and(|f| f.unread > 0);
        let line = folder
            .map(|f| f.format(app.is_checked(&f.path)))
            .unwrap_or_default();

        surface.reset_style();
        surface.set_color(if unread {
            ColorPair::Attention
        } else {
            ColorPair::Body
        });
        if row == 0 {
            surface.set_attribute(Attr::Reverse);
        }
        surface.move_cursor(row, LEFT_MARGIN);
        surface.write(&pad_to_columns(&line, row_width));
    }
    surface.reset_style();
}

fn draw_empty(limit: &str, surface: &mut dyn Surface) {
    let message = format!("No maildirs found matching the limit '{limit}'.");
    let col = usize::from(surface.width()).saturating_sub(columns(&message)) / 2;

    surface.clear();
    surface.reset_style();
    surface.move_cursor(EMPTY_ROW, u16::try_from(col).unwrap_or(0));
    surface.write(&message);
}
