//! Log sinks

use parking_lot::Mutex;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::diagnostics;
use super::rotating_file::RotatingFileWriter;
use crate::{Level, SinkTarget};

/// Run of failed writes on one sink, reported once when it starts and once
/// when it ends
#[derive(Debug, Default)]
struct WriteHealth {
    failing: AtomicBool,
    dropped: AtomicU64,
}

impl WriteHealth {
    fn record(&self, target: &SinkTarget, result: io::Result<()>, dropped_line: bool) {
        match result {
            Ok(()) => {
                if self.failing.swap(false, Ordering::AcqRel) {
                    let dropped = self.dropped.swap(0, Ordering::AcqRel);
                    diagnostics::report_write_recovered(target, dropped);
                }
            }
            Err(e) => {
                if dropped_line {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
                if !self.failing.swap(true, Ordering::AcqRel) {
                    diagnostics::report_write_failure(target, &e);
                }
            }
        }
    }
}

/// Rotating file sink
///
/// Every write and rotation holds the writer lock, so lines from concurrent
/// threads never interleave and each size boundary triggers one rotation.
#[derive(Debug)]
pub struct FileSink {
    target: SinkTarget,
    min_level: Level,
    writer: Mutex<RotatingFileWriter>,
    health: WriteHealth,
}

impl FileSink {
    pub(crate) fn new(target: SinkTarget, min_level: Level, writer: RotatingFileWriter) -> Self {
        Self {
            target,
            min_level,
            writer: Mutex::new(writer),
            health: WriteHealth::default(),
        }
    }

    /// Tag the sink with the prefix its path was generated from
    pub fn with_prefix(mut self, prefix: Option<&Path>) -> Self {
        if let SinkTarget::File { prefix: tag, .. } = &mut self.target {
            *tag = prefix.map(Path::to_path_buf);
        }
        self
    }

    pub fn target(&self) -> &SinkTarget {
        &self.target
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        self.writer.lock().write_line(line)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

/// Standard output sink
#[derive(Debug)]
pub struct ConsoleSink {
    target: SinkTarget,
    min_level: Level,
    health: WriteHealth,
}

impl ConsoleSink {
    pub(crate) fn new(min_level: Level) -> Self {
        Self {
            target: SinkTarget::Console,
            min_level,
            health: WriteHealth::default(),
        }
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        // Locked handle keeps the whole line together
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// A destination for formatted log lines
#[derive(Debug)]
pub enum LogSink {
    File(FileSink),
    Console(ConsoleSink),
}

impl LogSink {
    pub fn target(&self) -> &SinkTarget {
        match self {
            LogSink::File(sink) => &sink.target,
            LogSink::Console(sink) => &sink.target,
        }
    }

    pub fn min_level(&self) -> Level {
        match self {
            LogSink::File(sink) => sink.min_level,
            LogSink::Console(sink) => sink.min_level,
        }
    }

    pub fn accepts(&self, level: Level) -> bool {
        level >= self.min_level()
    }

    /// Whether the last write or flush on this sink failed
    pub fn is_failing(&self) -> bool {
        self.health().failing.load(Ordering::Acquire)
    }

    /// Lines dropped since the current run of failures began
    pub fn dropped_lines(&self) -> u64 {
        self.health().dropped.load(Ordering::Acquire)
    }

    fn health(&self) -> &WriteHealth {
        match self {
            LogSink::File(sink) => &sink.health,
            LogSink::Console(sink) => &sink.health,
        }
    }

    /// Write a formatted line if `level` passes this sink's threshold
    ///
    /// I/O failures drop the line for this sink and never reach the caller.
    /// The first failure of a run and the recovery after it are reported on
    /// the diagnostic stream.
    pub fn emit(&self, level: Level, line: &str) {
        if !self.accepts(level) {
            return;
        }

        let result = match self {
            LogSink::File(sink) => sink.write_line(line),
            LogSink::Console(sink) => sink.write_line(line),
        };

        self.health().record(self.target(), result, true);
    }

    pub fn flush(&self) {
        let result = match self {
            LogSink::File(sink) => sink.flush(),
            LogSink::Console(sink) => sink.flush(),
        };

        self.health().record(self.target(), result, false);
    }
}
