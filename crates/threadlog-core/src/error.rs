//! Setup errors
//!
//! None of these cross into caller code from the public setup entry points;
//! the registry reports them through the fallback path and carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while building logging infrastructure
#[derive(Debug, Error)]
pub enum LogSetupError {
    /// The parent directory of a log file could not be created
    #[error("Failed to create log directory {dir:?}: {source}")]
    DirectoryCreation {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened
    #[error("Failed to open log file {path:?}: {source}")]
    SinkConstruction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rotation settings are unusable
    #[error("Invalid rotation settings for {path:?}: max_bytes must be positive, got {max_bytes}")]
    InvalidRotation { path: PathBuf, max_bytes: u64 },
}

/// Result of an idempotent sink attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A new sink was built and attached
    Attached,
    /// An equivalent sink was already attached; nothing changed
    DuplicateAttachmentAvoided,
}

impl AttachOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, AttachOutcome::Attached)
    }
}
