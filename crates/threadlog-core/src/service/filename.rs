//! Timestamped log filenames
//!
//! Names have whole-second resolution: `{prefix}_{YYYYMMDDHHMMSS}.log`.
//! Two files generated for the same prefix within one second get the same
//! name. Callers create one file per logger setup, not per record, and the
//! registry treats a repeated prefix as the same target.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;

pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Generate a log file path for `prefix` using the current local time
pub fn generate_log_filename(prefix: &str) -> PathBuf {
    generate_log_filename_at(prefix, &Local::now())
}

/// Generate a log file path for `prefix` at a given instant
pub fn generate_log_filename_at<Tz>(prefix: &str, at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    PathBuf::from(format!(
        "{}_{}.log",
        prefix,
        at.format(FILENAME_TIMESTAMP_FORMAT)
    ))
}
