//! TOML-based configuration persistence.
//!
//! Reads and writes `AppConfig` as `config.toml` in the per-user config
//! directory (see [`paths`](super::paths)), or at the path given with
//! `--config`.
//!
//! Example:
//!
//! ```toml
//! log_level = "info"
//! default_target = "255.255.255.255:9"
//! bind_address = "0.0.0.0:0"
//!
//! [storage]
//! mode = "file"
//! hosts_file = "/srv/wol/hosts.toml"
//!
//! [[seed_hosts]]
//! name = "nas"
//! mac = "1c:69:7a:65:2d:98"
//! target = "192.168.4.255:9"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default ...)]`, so an empty file, a missing
//! file, and an older file lacking newer keys all produce a working config.
//!
//! # Storage modes
//!
//! - `file` (default): hosts are loaded from and saved to the host file.
//! - `memory`: hosts start as `seed_hosts` and changes are never written.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wol_core::HostRecord;

use crate::infrastructure::network::waker::DEFAULT_BIND_ADDR;
use crate::infrastructure::storage::paths::{app_dir, AppDir};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the XDG/HOME nor the APPDATA variables locate a config directory.
    #[error("cannot locate a config directory; pass --config or set HOME")]
    NoConfigDir,

    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid config document.
    #[error("config {path} is invalid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot encode config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// `bind_address` is not an `ip:port` socket address.
    #[error("invalid bind_address {value:?}: {reason}")]
    InvalidBindAddress { value: String, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Wake target used when a host is added without one.
    #[serde(default = "default_target")]
    pub default_target: String,
    /// Local address wake sockets bind to.  Port `0` means ephemeral.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Initial hosts for `memory` mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seed_hosts: Vec<HostRecord>,
}

/// Where the host list lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: StorageMode,
    /// Overrides the default host file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
}

/// Host list backend selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Persisted, user-editable list in a TOML file.
    #[default]
    File,
    /// Fixed list from `seed_hosts`; edits last only for the process.
    Memory,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_target() -> String {
    "255.255.255.255:9".to_string()
}
fn default_bind_address() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_target: default_target(),
            bind_address: default_bind_address(),
            storage: StorageConfig::default(),
            seed_hosts: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parses [`AppConfig::bind_address`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddress`] if it is not `ip:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddress {
                value: self.bind_address.clone(),
                reason: e.to_string(),
            })
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns `config.toml` inside the per-user `wol` config directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] when the environment does not locate
/// one.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    app_dir(AppDir::Config)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Reads the config at `path`.  A missing file yields [`AppConfig::default`].
///
/// # Errors
///
/// [`ConfigError::Read`] for I/O failures other than "not found", and
/// [`ConfigError::Parse`] for malformed TOML or wrongly typed fields.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `config` to `path`, creating missing parent directories.
///
/// # Errors
///
/// [`ConfigError::Write`] for I/O failures and [`ConfigError::Serialize`] if
/// encoding fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
