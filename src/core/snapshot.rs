//! # Mailbox Snapshots
//!
//! Read folders and messages from a TOML snapshot so the viewer has something
//! to show without a mail store behind it.
//!
//! ```toml
//! [[folders]]
//! path = "/home/me/Maildir/inbox"
//!
//! [[folders.messages]]
//! path = "/home/me/Maildir/inbox/cur/1:2,"
//! flags = "N"
//! headers = { date = "Mon, 5 Oct 2026", from = "alice", subject = "Hi" }
//! body = "line one\nline two"
//! attachments = ["notes.txt"]
//! parts = ["text/plain"]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::core::state::{App, FolderEntry, HeaderField, MessageEntry};

#[derive(Deserialize, Debug, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub folders: Vec<FolderData>,
}

#[derive(Deserialize, Debug)]
pub struct FolderData {
    pub path: String,
    #[serde(default)]
    pub messages: Vec<MessageData>,
}

#[derive(Deserialize, Debug)]
pub struct MessageData {
    pub path: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub parts: Vec<String>,
}

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "snapshot I/O error: {e}"),
            SnapshotError::Parse(e) => write!(f, "snapshot parse error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let contents = fs::read_to_string(path).map_err(SnapshotError::Io)?;
    let snapshot = parse_snapshot(&contents)?;
    info!(
        "Loaded snapshot from {} ({} folders)",
        path.display(),
        snapshot.folders.len()
    );
    Ok(snapshot)
}

pub fn parse_snapshot(contents: &str) -> Result<Snapshot, SnapshotError> {
    toml::from_str(contents).map_err(SnapshotError::Parse)
}

impl MessageData {
    fn to_entry(&self) -> MessageEntry {
        let mut entry = MessageEntry::new(&self.path, &self.flags);
        entry.headers = self
            .headers
            .iter()
            .map(|(name, value)| HeaderField {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        entry.body = self.body.lines().map(str::to_string).collect();
        entry.attachments = self.attachments.clone();
        entry.parts = self.parts.clone();
        entry
    }
}

impl Snapshot {
    /// Folder rows, with counts taken from the messages each folder holds.
    pub fn folder_entries(&self, format: &str) -> Vec<FolderEntry> {
        self.folders
            .iter()
            .map(|folder| {
                let unread = folder
                    .messages
                    .iter()
                    .filter(|m| m.flags.contains('N'))
                    .count();
                let mut entry = FolderEntry::new(&folder.path, unread, folder.messages.len());
                entry.format = format.to_string();
                entry
            })
            .collect()
    }

    /// Messages of the given folders, in folder order then file order.
    pub fn messages_in(&self, paths: &[String]) -> Vec<MessageEntry> {
        paths
            .iter()
            .filter_map(|path| self.folders.iter().find(|f| &f.path == path))
            .flat_map(|folder| folder.messages.iter().map(MessageData::to_entry))
            .collect()
    }

    /// Record that a message was read so folder counts follow.
    pub fn mark_read(&mut self, message_path: &str) {
        for folder in &mut self.folders {
            for message in &mut folder.messages {
                if message.path == message_path && message.flags.contains('N') {
                    debug!("Marking {} read", message_path);
                    message.flags.retain(|c| c != 'N');
                }
            }
        }
    }

    /// Replace the folder lists in `app` and re-apply its limit.
    pub fn populate(&self, app: &mut App, folder_format: &str) {
        app.all_folders = self.folder_entries(folder_format);
        app.apply_folder_limit();
        app.messages = self.messages_in(&app.checked_folders);
    }
}
