//! RON configuration for the live monitor.
//!
//! Every field has a default, so a partial file (or no file at all) works.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use live_client::{ClientError, ConnectionSettings, Endpoint};
use live_core::{CoreSettings, DEFAULT_MAX_TRANSCRIPT_LINES, DEFAULT_SUMMARY_HOLD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "./youtarr_live.ron";
/// Reconnect delays below this would spin without yielding.
const MIN_RECONNECT_DELAY_MS: u64 = 1;

/// Where the loaded settings came from; reported once logging is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub reconnect: ReconnectConfig,
    pub display: DisplayConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the Youtarr web UI is served from.
    pub page_url: String,
    /// Backend port when the UI runs on a separate development server.
    pub dev_port: Option<u16>,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            page_url: "http://localhost:3087".to_string(),
            dev_port: None,
            path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectConfig {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutChoice {
    Wide,
    Compact,
    /// Pick from the terminal width in `COLUMNS`.
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub layout: LayoutChoice,
    pub summary_hold_ms: u64,
    pub max_transcript_lines: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            layout: LayoutChoice::Auto,
            summary_hold_ms: DEFAULT_SUMMARY_HOLD.as_millis() as u64,
            max_transcript_lines: DEFAULT_MAX_TRANSCRIPT_LINES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PermissionChoice {
    Granted,
    Denied,
    /// Undecided; the first completed download enables notifications.
    #[default]
    Ask,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub permission: PermissionChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub destination: LogDestination,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: "info".to_string(),
            file: PathBuf::from("./youtarr_live.log"),
        }
    }
}

impl AppConfig {
    pub fn connection_settings(&self) -> Result<ConnectionSettings, ClientError> {
        let endpoint = Endpoint::from_page_url(&self.server.page_url, self.server.dev_port)?
            .with_path(&self.server.path);
        let base_ms = self.reconnect.base_delay_ms.max(MIN_RECONNECT_DELAY_MS);
        let max_ms = self.reconnect.max_delay_ms.max(base_ms);
        Ok(ConnectionSettings {
            url: endpoint.url()?,
            base_delay: Duration::from_millis(base_ms),
            max_delay: Duration::from_millis(max_ms),
        })
    }

    pub fn core_settings(&self) -> CoreSettings {
        CoreSettings {
            summary_hold: Duration::from_millis(self.display.summary_hold_ms),
            max_transcript_lines: self.display.max_transcript_lines,
        }
    }
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<(AppConfig, ConfigSource), ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok((AppConfig::default(), ConfigSource::Defaults));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((config, ConfigSource::File))
}
