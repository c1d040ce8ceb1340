//! Configuration file loading with precedence handling.

use crate::model::{ViewKey, ViewKind};
use crate::state::Seed;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// No server URL from any source.
    #[error("No server configured; pass --server or set HONKVIEW_SERVER")]
    MissingServer,

    /// `start_page` names no known view.
    #[error("Unknown start page: {0}")]
    UnknownStartPage(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/honkview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the honk server.
    #[serde(default)]
    pub server: Option<String>,

    /// Anti-forgery token sent with every action.
    #[serde(default)]
    pub csrf: Option<String>,

    /// Session cookie header value.
    #[serde(default)]
    pub cookie: Option<String>,

    /// View shown at startup (wire name, e.g. "home", "convoy").
    #[serde(default)]
    pub start_page: Option<String>,

    /// Argument of the startup view.
    #[serde(default)]
    pub start_arg: Option<String>,

    /// Seconds between timer refreshes; 0 disables.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,

    /// Read (fetch-view) timeout in seconds.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,

    /// Write (submit-action) timeout in seconds.
    #[serde(default)]
    pub write_timeout_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL of the honk server, if any source gave one.
    pub server: Option<String>,
    /// Anti-forgery token; empty when unset.
    pub csrf: String,
    /// Session cookie header value.
    pub cookie: Option<String>,
    /// Wire name of the startup view.
    pub start_page: String,
    /// Argument of the startup view.
    pub start_arg: String,
    /// `None` disables timer refresh.
    pub refresh_interval: Option<Duration>,
    /// Bound on fetch-view requests.
    pub read_timeout: Duration,
    /// Bound on submit-action requests.
    pub write_timeout: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            server: None,
            csrf: String::new(),
            cookie: None,
            start_page: ViewKind::Home.wire_name().to_string(),
            start_arg: String::new(),
            refresh_interval: None,
            read_timeout: Duration::from_secs(15),
            write_timeout: Duration::from_secs(30),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Server base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingServer` if no source provided one.
    pub fn server(&self) -> Result<&str, ConfigError> {
        self.server
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingServer)
    }

    /// View shown at startup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownStartPage` if `start_page` is not a
    /// view wire name.
    pub fn start_key(&self) -> Result<ViewKey, ConfigError> {
        let kind: ViewKind = self
            .start_page
            .parse()
            .map_err(|_| ConfigError::UnknownStartPage(self.start_page.clone()))?;
        Ok(ViewKey::new(kind, self.start_arg.clone()))
    }

    /// Initial engine state for this configuration.
    ///
    /// The startup view carries no pre-rendered items; the engine fetches
    /// it on boot.
    ///
    /// # Errors
    ///
    /// See [`ResolvedConfig::start_key`].
    pub fn seed(&self) -> Result<Seed, ConfigError> {
        Ok(Seed::new(self.start_key()?, self.csrf.clone()))
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/honkview/honkview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("honkview").join("honkview.log")
    } else {
        PathBuf::from("honkview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/honkview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("honkview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HONKVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/honkview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("HONKVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `HONKVIEW_SERVER`, `HONKVIEW_CSRF` and `HONKVIEW_COOKIE`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(server) = std::env::var("HONKVIEW_SERVER") {
        config.server = Some(server);
    }
    if let Ok(csrf) = std::env::var("HONKVIEW_CSRF") {
        config.csrf = csrf;
    }
    if let Ok(cookie) = std::env::var("HONKVIEW_COOKIE") {
        config.cookie = Some(cookie);
    }
    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        server: config.server.or(defaults.server),
        csrf: config.csrf.unwrap_or(defaults.csrf),
        cookie: config.cookie.or(defaults.cookie),
        start_page: config.start_page.unwrap_or(defaults.start_page),
        start_arg: config.start_arg.unwrap_or(defaults.start_arg),
        refresh_interval: match config.refresh_interval_secs {
            Some(secs) => interval(secs),
            None => defaults.refresh_interval,
        },
        read_timeout: config
            .read_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.read_timeout),
        write_timeout: config
            .write_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.write_timeout),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

fn interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Values given on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--server`
    pub server: Option<String>,
    /// `--csrf`
    pub csrf: Option<String>,
    /// `--cookie`
    pub cookie: Option<String>,
    /// `--page`
    pub page: Option<String>,
    /// `--arg`
    pub arg: Option<String>,
    /// `--refresh-interval`
    pub refresh_interval_secs: Option<u64>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(server) = cli.server {
        config.server = Some(server);
    }
    if let Some(csrf) = cli.csrf {
        config.csrf = csrf;
    }
    if let Some(cookie) = cli.cookie {
        config.cookie = Some(cookie);
    }
    if let Some(page) = cli.page {
        // A different page never inherits the configured argument.
        if page != config.start_page {
            config.start_arg.clear();
        }
        config.start_page = page;
    }
    if let Some(arg) = cli.arg {
        config.start_arg = arg;
    }
    if let Some(secs) = cli.refresh_interval_secs {
        config.refresh_interval = interval(secs);
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
