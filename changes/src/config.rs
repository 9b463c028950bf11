//! User configuration for the `changes` binary.
//!
//! Read from `$XDG_CONFIG_HOME/changes/config.toml`, falling back to
//! `~/.config/changes/config.toml`. Every key is optional:
//!
//! ```toml
//! theme = "catppuccin-mocha"
//! server_url = "http://localhost:8099"
//! auth_token = "..."
//! log_file = "/tmp/changes.log"
//! on_apply_fail = "notify-send 'apply failed'"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_THEME: &str = "catppuccin-mocha";
const DEFAULT_SERVER_URL: &str = "http://localhost:8099";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name passed to `Theme::from_name`.
    pub theme: String,
    /// Base URL of the plan server.
    pub server_url: String,
    /// Bearer token sent with every plan server request.
    pub auth_token: Option<String>,
    /// Where tracing output goes. Defaults to `changes.log` in the config directory.
    pub log_file: Option<PathBuf>,
    /// Shell command run after a failed apply. See `hook.rs`.
    pub on_apply_fail: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            server_url: DEFAULT_SERVER_URL.to_owned(),
            auth_token: None,
            log_file: None,
            on_apply_fail: None,
        }
    }
}

impl Config {
    /// Resolved log file location.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir().join("changes.log"))
    }
}

/// Returns the `changes` config directory.
///
/// Prefers `$XDG_CONFIG_HOME/changes`; falls back to `~/.config/changes`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("changes")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Loads the config at `path`.
///
/// A missing file yields the defaults. A file that cannot be parsed is
/// reported on stderr and also yields the defaults; config errors never stop
/// the review from starting. This runs before logging is set up, hence stderr.
pub fn load(path: &Path) -> Config {
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("changes: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}
