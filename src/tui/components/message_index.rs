//! # Message Index
//!
//! One row per message of the checked folders, starting at the highlighted
//! one. Unread rows use the attention colours; the selection row is reversed.

use crate::core::state::App;
use crate::tui::surface::{Attr, ColorPair, Surface};
use crate::tui::text::fit_to_columns;

pub const NO_FOLDERS_SELECTED: &str =
    "You have no selected folders, so there are no messages to display.";
pub const NO_MESSAGES_IN_SELECTION: &str = "There are no messages in the selected folders:";

const LEFT_MARGIN: u16 = 2;
/// Where the list of checked folders starts under the diagnostic.
const FOLDER_LIST_ROW: u16 = 4;
const FOLDER_LIST_COL: u16 = 5;

pub fn draw(app: &mut App, surface: &mut dyn Surface) {
    let Some(selected) = app.clamp_message_selection() else {
        draw_empty(&app.checked_folders, surface);
        return;
    };

    let row_width = usize::from(surface.width()).saturating_sub(3);
    for row in 0..surface.height().saturating_sub(1) {
        let message = app.messages.get(selected + usize::from(row));
        let unread = message.is_some_and(|m| m.is_unread());
        let line = message
            .map(|m| m.format(&app.index_format))
            .unwrap_or_default();

        surface.reset_style();
        match (unread, row == 0) {
            (true, true) => {
                surface.set_color(ColorPair::Attention);
                surface.set_attribute(Attr::Reverse);
            }
            (true, false) => surface.set_color(ColorPair::Attention),
            // A read selection keeps the terminal's own colours.
            (false, true) => surface.set_attribute(Attr::Reverse),
            (false, false) => surface.set_color(ColorPair::Body),
        }
        surface.move_cursor(row, LEFT_MARGIN);
        surface.write(&fit_to_columns(&line, row_width));
    }
    surface.reset_style();
}

fn draw_empty(checked: &[String], surface: &mut dyn Surface) {
    surface.clear();
    surface.reset_style();
    surface.move_cursor(2, 2);

    if checked.is_empty() {
        surface.write(NO_FOLDERS_SELECTED);
        return;
    }
    surface.write(NO_MESSAGES_IN_SELECTION);

    let last_row = surface.height().saturating_sub(1);
    for (row, path) in (FOLDER_LIST_ROW..last_row).zip(checked) {
        surface.move_cursor(row, FOLDER_LIST_COL);
        surface.write(path);
    }
}
