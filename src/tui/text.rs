//! Column arithmetic for fixed-width rows.
//!
//! Widths are terminal columns, not bytes or chars: a CJK character takes two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn columns(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// The longest prefix of `text` that fits in `max` columns.
pub fn truncate_to_columns(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (index, c) in text.char_indices() {
        let width = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + width > max {
            return &text[..index];
        }
        used += width;
    }
    text
}

/// `text` followed by spaces up to `min` columns. Never shortens.
pub fn pad_to_columns(text: &str, min: usize) -> String {
    let fill = min.saturating_sub(columns(text));
    let mut padded = String::with_capacity(text.len() + fill);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', fill));
    padded
}

/// Exactly `width` columns: truncated or padded as needed.
pub fn fit_to_columns(text: &str, width: usize) -> String {
    pad_to_columns(truncate_to_columns(text, width), width)
}
