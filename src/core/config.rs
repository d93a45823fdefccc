//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mailview/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::{DEFAULT_FOLDER_FORMAT, DEFAULT_INDEX_FORMAT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MailviewConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Header identifiers shown above a message body, e.g. `"$SUBJECT"`.
    pub headers: Option<Vec<String>>,
    pub folder_format: Option<String>,
    pub index_format: Option<String>,
    pub folder_limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub prompt_capacity: Option<usize>,
    pub poll_timeout_ms: Option<u64>,
    pub bell: Option<BellMode>,
}

/// How the editor and the host report an operation that could not apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BellMode {
    /// Ring the terminal bell.
    #[default]
    Audible,
    /// Count the alert but make no noise.
    Silent,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HEADERS: [&str; 4] = ["$DATE", "$FROM", "$TO", "$SUBJECT"];
pub const DEFAULT_PROMPT_CAPACITY: usize = 1024;
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_FOLDER_LIMIT: &str = "all";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// May be empty; the message view falls back to [`DEFAULT_HEADERS`].
    pub headers: Vec<String>,
    pub folder_format: String,
    pub index_format: String,
    pub folder_limit: String,
    pub prompt_capacity: usize,
    pub poll_timeout_ms: u64,
    pub bell: BellMode,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mailview/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mailview").join("config.toml"))
}

/// Load config from `~/.mailview/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MailviewConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MailviewConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MailviewConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MailviewConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<MailviewConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# mailview configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [display]
# headers = ["$DATE", "$FROM", "$TO", "$SUBJECT"]
# folder_format = "[$CHECKED] - $UNREAD/$TOTAL - $PATH"
# index_format = "[$FLAGS] $FROM - $SUBJECT"
# folder_limit = "all"               # "all", "new", or a path pattern (MAILVIEW_LIMIT)

# [input]
# prompt_capacity = 1024             # longest prompt line, counting one reserved slot
# poll_timeout_ms = 1000             # how long a key read waits before redrawing
# bell = "audible"                   # "audible" or "silent"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_limit` is the `--limit` flag (None = not specified).
pub fn resolve(config: &MailviewConfig, cli_limit: Option<&str>) -> ResolvedConfig {
    // Folder limit: CLI → env → config → default
    let folder_limit = cli_limit
        .map(|s| s.to_string())
        .or_else(|| std::env::var("MAILVIEW_LIMIT").ok())
        .or_else(|| config.display.folder_limit.clone())
        .unwrap_or_else(|| DEFAULT_FOLDER_LIMIT.to_string());

    ResolvedConfig {
        headers: config.display.headers.clone().unwrap_or_default(),
        folder_format: config
            .display
            .folder_format
            .clone()
            .unwrap_or_else(|| DEFAULT_FOLDER_FORMAT.to_string()),
        index_format: config
            .display
            .index_format
            .clone()
            .unwrap_or_else(|| DEFAULT_INDEX_FORMAT.to_string()),
        folder_limit,
        // One slot is reserved, so anything below 2 could never hold a character.
        prompt_capacity: config
            .input
            .prompt_capacity
            .unwrap_or(DEFAULT_PROMPT_CAPACITY)
            .max(2),
        poll_timeout_ms: config
            .input
            .poll_timeout_ms
            .unwrap_or(DEFAULT_POLL_TIMEOUT_MS),
        bell: config.input.bell.unwrap_or_default(),
    }
}
