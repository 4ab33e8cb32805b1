//! Configuration loading and typed config structures for Retrowatch.
//!
//! The configuration lives in `retrowatch.yaml` (path overridable with
//! `RETROWATCH_CONFIG`). Every field has a default, so an empty or
//! missing file yields a working setup pointed at `localhost:55355`.

use std::path::Path;

use serde::Deserialize;

use crate::detector::{ChangeMode, SignificantField};
use crate::transport::Platform;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "retrowatch.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but do not make sense together.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration. Mirrors the structure of `retrowatch.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Where the remote process listens and how hard to try reaching it.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Poll timer settings.
    #[serde(default)]
    pub poll: PollConfig,

    /// Broadcast hub settings.
    #[serde(default)]
    pub hub: HubConfig,

    /// Change detection policy.
    #[serde(default)]
    pub change: ChangeConfig,

    /// HTTP/WebSocket observer settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `RETROWATCH_REMOTE_HOST` overrides `remote.host`
    /// - `RETROWATCH_REMOTE_PORT` overrides `remote.port`
    /// - `RETROWATCH_OBSERVER_PORT` overrides `observer.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_file`] when the file exists.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `RETROWATCH_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a port override is not a
    /// valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("RETROWATCH_REMOTE_HOST") {
            self.remote.host = val;
        }
        if let Ok(val) = std::env::var("RETROWATCH_REMOTE_PORT") {
            self.remote.port = parse_port("RETROWATCH_REMOTE_PORT", &val)?;
        }
        if let Ok(val) = std::env::var("RETROWATCH_OBSERVER_PORT") {
            self.observer.port = parse_port("RETROWATCH_OBSERVER_PORT", &val)?;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::Invalid(String::from(
                "poll.interval_ms must be greater than zero",
            )));
        }
        if self.remote.base_timeout_ms == 0 {
            return Err(ConfigError::Invalid(String::from(
                "remote.base_timeout_ms must be greater than zero",
            )));
        }
        if self.remote.base_timeout_ms > self.remote.max_timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "remote.base_timeout_ms ({}) exceeds remote.max_timeout_ms ({})",
                self.remote.base_timeout_ms, self.remote.max_timeout_ms
            )));
        }
        if self.remote.read_attempts == 0 {
            return Err(ConfigError::Invalid(String::from(
                "remote.read_attempts must be at least 1",
            )));
        }
        if self.remote.failure_threshold == 0 {
            return Err(ConfigError::Invalid(String::from(
                "remote.failure_threshold must be at least 1",
            )));
        }
        if self.hub.queue_capacity == 0 {
            return Err(ConfigError::Invalid(String::from(
                "hub.queue_capacity must be at least 1",
            )));
        }
        if self.change.mode == ChangeMode::SignificantFields && self.change.fields.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "change.fields must not be empty in significant_fields mode",
            )));
        }
        Ok(())
    }
}

fn parse_port(var: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("{var}={value} is not a valid port: {e}")))
}

/// Remote process connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteConfig {
    /// Hostname of the emulator.
    #[serde(default = "default_remote_host")]
    pub host: String,

    /// UDP port of the emulator's network command interface.
    #[serde(default = "default_remote_port")]
    pub port: u16,

    /// Platform whose address space is inspected.
    #[serde(default = "default_platform")]
    pub platform: Platform,

    /// Starting per-attempt read timeout in milliseconds.
    #[serde(default = "default_base_timeout_ms")]
    pub base_timeout_ms: u64,

    /// Ceiling for the adaptive timeout in milliseconds.
    #[serde(default = "default_max_timeout_ms")]
    pub max_timeout_ms: u64,

    /// Attempts per range read.
    #[serde(default = "default_read_attempts")]
    pub read_attempts: u32,

    /// First retry delay in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Retry delay ceiling in milliseconds.
    #[serde(default = "default_retry_backoff_cap_ms")]
    pub retry_backoff_cap_ms: u64,

    /// Consecutive failures before the connection is declared down.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// First reconnect delay in milliseconds.
    #[serde(default = "default_reconnect_backoff_ms")]
    pub reconnect_backoff_ms: u64,

    /// Reconnect delay ceiling in milliseconds.
    #[serde(default = "default_reconnect_backoff_cap_ms")]
    pub reconnect_backoff_cap_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: default_remote_host(),
            port: default_remote_port(),
            platform: default_platform(),
            base_timeout_ms: default_base_timeout_ms(),
            max_timeout_ms: default_max_timeout_ms(),
            read_attempts: default_read_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            retry_backoff_cap_ms: default_retry_backoff_cap_ms(),
            failure_threshold: default_failure_threshold(),
            reconnect_backoff_ms: default_reconnect_backoff_ms(),
            reconnect_backoff_cap_ms: default_reconnect_backoff_cap_ms(),
        }
    }
}

/// Poll timer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollConfig {
    /// Milliseconds between cycle starts.
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Broadcast hub configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HubConfig {
    /// Per-subscriber queue depth. A subscriber whose queue fills is dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Change detection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeConfig {
    /// Compare a field subset or the full domain content.
    #[serde(default)]
    pub mode: ChangeMode,

    /// Fields compared in `significant_fields` mode.
    #[serde(default = "default_significant_fields")]
    pub fields: Vec<SignificantField>,
}

impl Default for ChangeConfig {
    fn default() -> Self {
        Self {
            mode: ChangeMode::default(),
            fields: default_significant_fields(),
        }
    }
}

/// Observer (HTTP + WebSocket) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Bind address.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_remote_host() -> String {
    String::from("localhost")
}

const fn default_remote_port() -> u16 {
    55355
}

const fn default_platform() -> Platform {
    Platform::GameBoy
}

const fn default_base_timeout_ms() -> u64 {
    250
}

const fn default_max_timeout_ms() -> u64 {
    5000
}

const fn default_read_attempts() -> u32 {
    2
}

const fn default_retry_backoff_ms() -> u64 {
    50
}

const fn default_retry_backoff_cap_ms() -> u64 {
    1000
}

const fn default_failure_threshold() -> u32 {
    5
}

const fn default_reconnect_backoff_ms() -> u64 {
    500
}

const fn default_reconnect_backoff_cap_ms() -> u64 {
    10_000
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_queue_capacity() -> usize {
    32
}

fn default_significant_fields() -> Vec<SignificantField> {
    SignificantField::DEFAULT_SET.to_vec()
}

fn default_observer_host() -> String {
    String::from("0.0.0.0")
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}
