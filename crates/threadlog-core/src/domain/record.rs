//! Log records and the shared line format

use chrono::{DateTime, Local};

use super::Level;

/// Name printed in place of the root logger's empty name
pub const ROOT_DISPLAY_NAME: &str = "root";

/// Timestamp layout of every line, e.g. `2024-03-05 07:08:09,042`
pub const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// A single log entry, before formatting
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub logger_name: String,
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            logger_name: logger_name.into(),
            level,
            message: message.into(),
        }
    }

    /// Logger name as shown in output (`root` for the unnamed logger)
    pub fn display_name(&self) -> &str {
        if self.logger_name.is_empty() {
            ROOT_DISPLAY_NAME
        } else {
            &self.logger_name
        }
    }

    /// Render as `timestamp - logger_name - level - message`, newline-terminated
    pub fn format_line(&self) -> String {
        format!(
            "{} - {} - {} - {}\n",
            self.timestamp.format(LINE_TIMESTAMP_FORMAT),
            self.display_name(),
            self.level,
            self.message
        )
    }
}
