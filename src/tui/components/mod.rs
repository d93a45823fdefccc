//! # TUI Components
//!
//! ## Views
//!
//! The three mailview views draw directly onto a
//! [`Surface`](crate::tui::surface::Surface), row by row, and keep no state
//! of their own. Everything they show comes from `App` plus, for the message
//! view, the script hooks:
//! - `folder_list`: folders under the current limit
//! - `message_index`: messages of the checked folders
//! - `message_view`: one message
//!
//! ## Interactive Pieces
//!
//! - `line_editor`: the `:` prompt, with history and completion
//! - `panel`: a titled text overlay drawn over whatever view is active
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── folder_list.rs
//! ├── message_index.rs
//! ├── message_view.rs
//! ├── panel.rs
//! └── line_editor/
//!     ├── mod.rs        (read_line and redraw)
//!     └── session.rs    (buffer, cursor, key handling)
//! ```

pub mod folder_list;
pub mod line_editor;
pub mod message_index;
pub mod message_view;
pub mod panel;

pub use line_editor::LineEditor;
pub use panel::{PanelState, PanelView};
