//! Sink construction

use std::path::{Path, PathBuf};

use super::rotating_file::RotatingFileWriter;
use super::sink::{ConsoleSink, FileSink};
use crate::{Level, LogSetupError, SinkTarget};

/// Resolve `path` against the working directory without touching the disk
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Build a rotating file sink for `path`
///
/// The sink's target carries the absolute path so attachments can be
/// compared by equality. The file is opened (and created) immediately.
pub fn make_file_sink(
    path: &Path,
    max_bytes: u64,
    backup_count: usize,
    min_level: Level,
) -> Result<FileSink, LogSetupError> {
    let path = absolute_path(path);

    if max_bytes == 0 {
        return Err(LogSetupError::InvalidRotation { path, max_bytes });
    }

    let writer = RotatingFileWriter::open(&path, max_bytes, backup_count).map_err(|source| {
        LogSetupError::SinkConstruction {
            path: path.clone(),
            source,
        }
    })?;

    Ok(FileSink::new(SinkTarget::file(path, None), min_level, writer))
}

/// Build a standard output sink
pub fn make_console_sink(min_level: Level) -> ConsoleSink {
    ConsoleSink::new(min_level)
}
