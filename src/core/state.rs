//! # Application State
//!
//! The one owned context object for mailview. The host constructs it once,
//! then lends it to the compositor and the line editor by `&mut` reference.
//! Nothing here knows about the terminal.
//!
//! ```text
//! App
//! ├── mode: Mode                      // which view is active
//! ├── folders: Vec<FolderEntry>       // visible folders (limit applied)
//! ├── all_folders: Vec<FolderEntry>   // every known folder
//! ├── messages: Vec<MessageEntry>     // messages of the checked folders
//! ├── checked_folders: Vec<String>    // multi-select set, insertion order
//! ├── selected_folder: usize          // highlighted folder row
//! ├── selected_message: usize         // highlighted message row
//! ├── message_offset: usize           // body lines scrolled in MessageView
//! ├── folder_limit: String            // "all", "new" or a path pattern
//! ├── index_format: String            // template for index rows
//! └── status_message: String          // status line text
//! ```
//!
//! Selection indices may go stale when the underlying sequences shrink. The
//! renderers normalise them through the `clamp_*` methods, and the correction
//! is visible to whoever reads the state afterwards.

use std::fmt;
use std::str::FromStr;

/// Default template for message index rows.
pub const DEFAULT_INDEX_FORMAT: &str = "[$FLAGS] $FROM - $SUBJECT";
/// Default template for folder list rows.
pub const DEFAULT_FOLDER_FORMAT: &str = "[$CHECKED] - $UNREAD/$TOTAL - $PATH";

/// The exclusive top-level view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    FolderList,
    MessageIndex,
    MessageView,
    /// A mode name nothing knows how to draw. Kept so it can be reported.
    Unknown(String),
}

impl Mode {
    /// The name the scripting runtime uses for this mode.
    pub fn name(&self) -> &str {
        match self {
            Mode::FolderList => "maildir",
            Mode::MessageIndex => "index",
            Mode::MessageView => "message",
            Mode::Unknown(name) => name,
        }
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "maildir" => Mode::FolderList,
            "index" => Mode::MessageIndex,
            "message" => Mode::MessageView,
            other => Mode::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maildir flag letters attached to a message (e.g. `"NS"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(String);

impl Flags {
    pub fn new(flags: impl Into<String>) -> Self {
        Self(flags.into())
    }

    /// `N` marks a message nobody has read yet.
    pub fn is_unread(&self) -> bool {
        self.0.contains('N')
    }

    pub fn mark_read(&mut self) {
        self.0.retain(|c| c != 'N');
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A mail folder as the folder list shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderEntry {
    pub path: String,
    /// Row template, see [`FolderEntry::format`].
    pub format: String,
    pub unread: usize,
    pub total: usize,
}

impl FolderEntry {
    pub fn new(path: impl Into<String>, unread: usize, total: usize) -> Self {
        Self {
            path: path.into(),
            format: DEFAULT_FOLDER_FORMAT.to_string(),
            unread,
            total,
        }
    }

    /// Last path component, used by `$NAME`.
    pub fn name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.path)
    }

    /// Expand the row template. `checked` is membership of the multi-select set.
    pub fn format(&self, checked: bool) -> String {
        expand_template(&self.format, |var| match var {
            "CHECKED" => Some(if checked { "x" } else { " " }.to_string()),
            "UNREAD" => Some(self.unread.to_string()),
            "TOTAL" => Some(self.total.to_string()),
            "PATH" => Some(self.path.clone()),
            "NAME" => Some(self.name().to_string()),
            _ => None,
        })
    }
}

/// One header line of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

/// A message as the index and the viewer show it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEntry {
    pub path: String,
    pub flags: Flags,
    pub headers: Vec<HeaderField>,
    pub body: Vec<String>,
    pub attachments: Vec<String>,
    /// MIME content types of the body parts (e.g. `text/plain`).
    pub parts: Vec<String>,
}

impl MessageEntry {
    pub fn new(path: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            flags: Flags::new(flags),
            headers: Vec::new(),
            body: Vec::new(),
            attachments: Vec::new(),
            parts: Vec::new(),
        }
    }

    pub fn is_unread(&self) -> bool {
        self.flags.is_unread()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Expand a template such as `"[$FLAGS] $FROM - $SUBJECT"`.
    ///
    /// `$FLAGS` and `$PATH` are built in; every other `$VAR` is a header
    /// lookup, empty when the header is missing. A bare `"$DATE"` therefore
    /// yields the value of the Date header.
    pub fn format(&self, template: &str) -> String {
        expand_template(template, |var| match var {
            "FLAGS" => Some(self.flags.as_str().to_string()),
            "PATH" => Some(self.path.clone()),
            header => Some(self.header(header).unwrap_or_default().to_string()),
        })
    }

    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    pub fn count_attachments(&self) -> usize {
        self.attachments.len()
    }

    /// 1-based attachment lookup, the numbering the viewer displays.
    pub fn attachment(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.attachments.get(i))
            .map(String::as_str)
    }

    pub fn body_parts(&self) -> &[String] {
        &self.parts
    }

    pub fn count_body_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn has_body_part(&self, content_type: &str) -> bool {
        self.parts.iter().any(|p| p == content_type)
    }
}

/// Replace every `$NAME` (ASCII letters, digits, `_`) with `lookup(NAME)`.
/// Variables the lookup rejects are left as written.
fn expand_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let var = &after[..len];
        match (var.is_empty(), lookup(&var.to_ascii_uppercase())) {
            (false, Some(value)) => out.push_str(&value),
            _ => {
                out.push('$');
                out.push_str(var);
            }
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}

pub struct App {
    pub mode: Mode,
    pub folders: Vec<FolderEntry>,
    pub all_folders: Vec<FolderEntry>,
    pub messages: Vec<MessageEntry>,
    pub checked_folders: Vec<String>,
    pub selected_folder: usize,
    pub selected_message: usize,
    pub message_offset: usize,
    pub folder_limit: String,
    pub index_format: String,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::FolderList,
            folders: Vec::new(),
            all_folders: Vec::new(),
            messages: Vec::new(),
            checked_folders: Vec::new(),
            selected_folder: 0,
            selected_message: 0,
            message_offset: 0,
            folder_limit: String::from("all"),
            index_format: DEFAULT_INDEX_FORMAT.to_string(),
            status_message: String::from("Welcome to mailview!"),
        }
    }

    pub fn is_checked(&self, path: &str) -> bool {
        self.checked_folders.iter().any(|p| p == path)
    }

    /// Reset a stale folder selection to the top of the list.
    ///
    /// Returns the (possibly corrected) index, or `None` for an empty list.
    pub fn clamp_folder_selection(&mut self) -> Option<usize> {
        if self.folders.is_empty() {
            return None;
        }
        if self.selected_folder >= self.folders.len() {
            self.selected_folder = 0;
        }
        Some(self.selected_folder)
    }

    /// Pull a stale message selection back to the last message.
    ///
    /// Returns the (possibly corrected) index, or `None` for an empty list.
    pub fn clamp_message_selection(&mut self) -> Option<usize> {
        let count = self.messages.len();
        if count == 0 {
            return None;
        }
        if self.selected_message >= count {
            self.selected_message = count - 1;
        }
        Some(self.selected_message)
    }

    pub fn current_folder(&self) -> Option<&FolderEntry> {
        self.folders.get(self.selected_folder)
    }

    pub fn current_message(&self) -> Option<&MessageEntry> {
        self.messages.get(self.selected_message)
    }

    /// Recompute `folders` from `all_folders` under the current limit.
    ///
    /// `all` keeps everything, `new` keeps folders with unread mail, anything
    /// else is a case-insensitive substring match on the path.
    pub fn apply_folder_limit(&mut self) {
        let limit = self.folder_limit.to_lowercase();
        self.folders = self
            .all_folders
            .iter()
            .filter(|f| match limit.as_str() {
                "all" => true,
                "new" => f.unread > 0,
                pattern => f.path.to_lowercase().contains(pattern),
            })
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> MessageEntry {
        let mut msg = MessageEntry::new("/mail/inbox/cur/1:2,", "N");
        msg.headers = vec![
            HeaderField { name: "From".into(), value: "alice@example.com".into() },
            HeaderField { name: "Subject".into(), value: "Lunch?".into() },
        ];
        msg.attachments = vec!["menu.pdf".into(), "map.png".into()];
        msg.parts = vec!["text/plain".into(), "text/html".into()];
        msg
    }

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert_eq!(app.mode, Mode::FolderList);
        assert_eq!(app.folder_limit, "all");
        assert_eq!(app.selected_folder, 0);
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_mode_round_trips_names() {
        for name in ["maildir", "index", "message"] {
            assert_eq!(name.parse::<Mode>().unwrap().name(), name);
        }
        assert_eq!("bogus".parse::<Mode>().unwrap(), Mode::Unknown("bogus".into()));
    }

    #[test]
    fn test_flags_unread() {
        let mut flags = Flags::new("NS");
        assert!(flags.is_unread());
        flags.mark_read();
        assert!(!flags.is_unread());
        assert_eq!(flags.as_str(), "S");
    }

    #[test]
    fn test_folder_format() {
        let folder = FolderEntry::new("/home/me/Maildir/work", 3, 10);
        assert_eq!(folder.format(true), "[x] - 3/10 - /home/me/Maildir/work");
        assert_eq!(folder.format(false), "[ ] - 3/10 - /home/me/Maildir/work");
        assert_eq!(folder.name(), "work");
    }

    #[test]
    fn test_message_format_uses_headers() {
        let msg = message();
        assert_eq!(msg.format(DEFAULT_INDEX_FORMAT), "[N] alice@example.com - Lunch?");
        assert_eq!(msg.format("$DATE"), "");
        assert_eq!(msg.format("$subject"), "Lunch?");
    }

    #[test]
    fn test_template_keeps_lone_dollar() {
        let mut f = FolderEntry::new("x", 0, 0);
        f.format = "cost: $ 5 $BOGUS".to_string();
        assert_eq!(f.format(false), "cost: $ 5 $BOGUS");
    }

    #[test]
    fn test_mime_queries() {
        let msg = message();
        assert_eq!(msg.count_attachments(), 2);
        assert_eq!(msg.attachment(1), Some("menu.pdf"));
        assert_eq!(msg.attachment(0), None);
        assert_eq!(msg.attachment(3), None);
        assert_eq!(msg.count_body_parts(), 2);
        assert!(msg.has_body_part("text/html"));
        assert!(!msg.has_body_part("text"));
    }

    #[test]
    fn test_clamp_folder_selection_resets_to_zero() {
        let mut app = App::new();
        app.folders = vec![FolderEntry::new("a", 0, 0), FolderEntry::new("b", 0, 0)];
        app.selected_folder = 7;
        assert_eq!(app.clamp_folder_selection(), Some(0));
        assert_eq!(app.selected_folder, 0);
    }

    #[test]
    fn test_clamp_message_selection_pulls_to_last() {
        let mut app = App::new();
        app.messages = vec![message(), message(), message()];
        app.selected_message = 9;
        assert_eq!(app.clamp_message_selection(), Some(2));
        assert_eq!(app.selected_message, 2);

        app.messages.clear();
        assert_eq!(app.clamp_message_selection(), None);
    }

    #[test]
    fn test_apply_folder_limit() {
        let mut app = App::new();
        app.all_folders = vec![
            FolderEntry::new("/m/Inbox", 2, 5),
            FolderEntry::new("/m/lists/rust", 0, 50),
            FolderEntry::new("/m/Sent", 0, 9),
        ];

        app.apply_folder_limit();
        assert_eq!(app.folders.len(), 3);

        app.folder_limit = "new".into();
        app.apply_folder_limit();
        assert_eq!(app.folders.len(), 1);
        assert_eq!(app.folders[0].path, "/m/Inbox");

        app.folder_limit = "LISTS".into();
        app.apply_folder_limit();
        assert_eq!(app.folders.len(), 1);
        assert_eq!(app.folders[0].path, "/m/lists/rust");
    }
}
