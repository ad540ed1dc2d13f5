//! Startup configuration for curator.
//!
//! Read once from `$XDG_CONFIG_HOME/curator/config.toml` (falling back to
//! `~/.config/curator/config.toml`) before the terminal is initialized.
//! Config errors are soft failures: a line on stderr and defaults, never a
//! refused startup.

use serde::Deserialize;
use std::path::PathBuf;

/// Contents of `config.toml`. Every field has a default so a partial or
/// missing file still produces a usable config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the curation backend.
    pub server_url: String,
    /// Bearer token for authenticated requests. `None` sends requests
    /// unauthenticated; obtaining a token is outside this client's scope.
    pub token: Option<String>,
    /// Theme name resolved via `Theme::from_name`.
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_owned(),
            token: None,
            theme: "catppuccin-mocha".to_owned(),
        }
    }
}

/// Returns the path to the curator config file.
fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("curator").join("config.toml")
}

/// Loads the config, degrading to defaults on any failure.
///
/// A missing file is silent; a parse error is reported on stderr (the TUI
/// is not up yet) before falling back.
pub fn load() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("curator: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}
