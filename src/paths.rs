//! Centralized path definitions for healthdesk
//!
//! Single source of truth for every filesystem path healthdesk uses.
//!
//! ## Layout
//!
//! ```text
//! ~/.config/healthdesk/
//! └── config.toml               # Server, storage, auth and summary settings
//!
//! ~/.local/share/healthdesk/    # Default data dir (overridable in config)
//! ├── store.json                # Identities, sessions, profiles, records
//! └── files/                    # Credential documents
//!     └── {identity}/{type}.{ext}
//! ```
//!
//! `HEALTHDESK_CONFIG` points at an alternative config file.

use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "HEALTHDESK_CONFIG";

/// Application directory name
const APP_DIR: &str = "healthdesk";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Credential documents subdirectory
const FILES_DIR: &str = "files";

/// Get the config directory.
///
/// Returns `~/.config/healthdesk/` on Linux.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config")).join(APP_DIR)
}

/// Get the config file path.
///
/// Honours `HEALTHDESK_CONFIG` when set and non-empty.
#[must_use]
pub fn config_file() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_dir().join(CONFIG_FILE),
    }
}

/// Get the default data directory.
///
/// Returns `~/.local/share/healthdesk/` on Linux.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Directory holding credential documents under a data dir
#[must_use]
pub fn files_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(FILES_DIR)
}
