//! Configuration resolution for barstream.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/barstream/settings.json)
//! 3. File named by `BARSTREAM_CONFIG`
//! 4. Environment variables (highest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::protocol::{Header, PROTOCOL_VERSION};
use crate::stream::{Framing, StreamOptions};

/// Environment variable naming an extra settings file.
pub const CONFIG_ENV: &str = "BARSTREAM_CONFIG";

/// Complete barstream configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

/// Protocol stream configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Indent JSON output for humans.
    pub pretty: bool,
    pub framing: Framing,
    pub version: u32,
    pub stop_signal: i32,
    pub cont_signal: i32,
    pub click_events: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            framing: Framing::default(),
            version: PROTOCOL_VERSION,
            stop_signal: 0,
            cont_signal: 0,
            click_events: false,
        }
    }
}

impl StreamConfig {
    pub const fn header(&self) -> Header {
        Header::new(self.version)
            .with_stop_signal(self.stop_signal)
            .with_cont_signal(self.cont_signal)
            .with_click_events(self.click_events)
    }

    pub const fn options(&self) -> StreamOptions {
        StreamOptions {
            pretty: self.pretty,
            framing: self.framing,
        }
    }
}

/// Status generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Milliseconds between status lines.
    pub interval_ms: u64,
    pub log_level: String,
    /// Emit JSON log lines on stderr.
    pub log_json: bool,
    /// Stop after this many lines. Runs until interrupted when unset.
    pub max_ticks: Option<u64>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            log_level: "info".to_string(),
            log_json: false,
            max_ticks: None,
        }
    }
}

/// Load configuration with hierarchical resolution from the real
/// environment.
pub fn load_config() -> Result<Config> {
    let extra = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load_config_from(
        global_config_path().as_deref(),
        extra.as_deref(),
        |key| std::env::var(key).ok(),
    )
}

/// Load configuration from explicit locations.
///
/// Missing files are skipped; unreadable or malformed ones are errors.
/// `env` looks up override variables by name.
pub fn load_config_from(
    global: Option<&Path>,
    extra: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let mut config = Config::default();

    for path in [global, extra].into_iter().flatten() {
        if path.exists() {
            config = load_config_file(path)?;
        }
    }

    apply_env_overrides(&mut config, env)?;
    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("barstream").join("settings.json"))
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn apply_env_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(val) = env("BARSTREAM_PRETTY") {
        config.stream.pretty = parse_bool("BARSTREAM_PRETTY", &val)?;
    }
    if let Some(val) = env("BARSTREAM_FRAMING") {
        config.stream.framing = val.parse()?;
    }
    if let Some(val) = env("BARSTREAM_CLICK_EVENTS") {
        config.stream.click_events = parse_bool("BARSTREAM_CLICK_EVENTS", &val)?;
    }
    if let Some(val) = env("BARSTREAM_INTERVAL_MS") {
        config.status.interval_ms = val
            .parse()
            .map_err(|e| Error::Config(format!("Invalid BARSTREAM_INTERVAL_MS {val:?}: {e}")))?;
    }
    if let Some(val) = env("BARSTREAM_LOG_LEVEL") {
        config.status.log_level = val;
    }
    if let Some(val) = env("BARSTREAM_LOG_JSON") {
        config.status.log_json = parse_bool("BARSTREAM_LOG_JSON", &val)?;
    }
    Ok(())
}

fn parse_bool(key: &str, val: &str) -> Result<bool> {
    match val.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::Config(format!("Invalid {key} {val:?}: expected a boolean"))),
    }
}
