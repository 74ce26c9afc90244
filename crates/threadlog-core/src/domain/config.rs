//! Logger setup configuration

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Level;

/// Default file prefix for the root logger
pub const DEFAULT_PREFIX: &str = "app";

/// Default size bound of a single log file (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups to keep
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Environment variable names read by [`LogConfig::from_env`]
pub mod env_keys {
    pub const PREFIX: &str = "THREADLOG_PREFIX";
    pub const MAX_BYTES: &str = "THREADLOG_MAX_BYTES";
    pub const BACKUP_COUNT: &str = "THREADLOG_BACKUP_COUNT";
    pub const MIN_LEVEL: &str = "THREADLOG_MIN_LEVEL";
}

/// Parameters for a rotating file sink
///
/// `prefix` only applies to the root logger; context loggers get their
/// prefix from the setup call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path prefix of generated log files, may contain directories
    pub prefix: String,

    /// Maximum file size before rotation (bytes)
    pub max_bytes: u64,

    /// Number of rotated backups to keep
    pub backup_count: usize,

    /// Minimum level accepted by sinks built from this config
    pub min_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            min_level: Level::MOST_PERMISSIVE,
        }
    }
}

impl LogConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_backup_count(mut self, backup_count: usize) -> Self {
        self.backup_count = backup_count;
        self
    }

    pub fn with_min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    /// Defaults overlaid with `THREADLOG_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    ///
    /// Values that fail to parse are skipped with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(prefix) = lookup(env_keys::PREFIX).filter(|p| !p.trim().is_empty()) {
            config.prefix = prefix;
        }

        if let Some(raw) = lookup(env_keys::MAX_BYTES) {
            match raw.trim().parse::<u64>() {
                Ok(max_bytes) => config.max_bytes = max_bytes,
                Err(e) => warn!("Ignoring {}={:?}: {}", env_keys::MAX_BYTES, raw, e),
            }
        }

        if let Some(raw) = lookup(env_keys::BACKUP_COUNT) {
            match raw.trim().parse::<usize>() {
                Ok(count) => config.backup_count = count,
                Err(e) => warn!("Ignoring {}={:?}: {}", env_keys::BACKUP_COUNT, raw, e),
            }
        }

        if let Some(raw) = lookup(env_keys::MIN_LEVEL) {
            match Level::parse(&raw) {
                Some(level) => config.min_level = level,
                None => warn!("Ignoring {}={:?}: unknown level", env_keys::MIN_LEVEL, raw),
            }
        }

        config
    }
}
