//! Named loggers

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::sink::LogSink;
use crate::{AttachOutcome, Level, LogRecord, LogSetupError, SinkTarget};

/// A logger identified by name, fanning records out to its sinks
///
/// The root logger has the empty name. Named loggers hold the root as
/// parent and, while `propagate` is set, also hand accepted records to the
/// root's sinks.
pub struct NamedLogger {
    name: String,
    level: RwLock<Level>,
    sinks: RwLock<Vec<Arc<LogSink>>>,
    parent: Option<Arc<NamedLogger>>,
    propagate: AtomicBool,
}

impl NamedLogger {
    pub(crate) fn root() -> Self {
        Self::new(String::new(), None)
    }

    pub(crate) fn new(name: impl Into<String>, parent: Option<Arc<NamedLogger>>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(Level::MOST_PERMISSIVE),
            sinks: RwLock::new(Vec::new()),
            parent,
            propagate: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn propagates(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn has_sinks(&self) -> bool {
        !self.sinks.read().is_empty()
    }

    pub fn sink_targets(&self) -> Vec<SinkTarget> {
        self.sinks.read().iter().map(|s| s.target().clone()).collect()
    }

    /// Attach the sink built by `build` unless one with the same destination
    /// is already attached
    ///
    /// The check and the push happen under one write lock, so concurrent
    /// callers for the same target attach exactly once.
    pub(crate) fn attach_if_absent<F>(
        &self,
        target: &SinkTarget,
        build: F,
    ) -> Result<AttachOutcome, LogSetupError>
    where
        F: FnOnce() -> Result<LogSink, LogSetupError>,
    {
        let mut sinks = self.sinks.write();

        if sinks.iter().any(|s| s.target().same_destination(target)) {
            debug!(logger = %self.display_name(), ?target, "Sink already attached");
            return Ok(AttachOutcome::DuplicateAttachmentAvoided);
        }

        let sink = build()?;
        sinks.push(Arc::new(sink));
        debug!(logger = %self.display_name(), ?target, "Attached sink");

        Ok(AttachOutcome::Attached)
    }

    /// Log `message` at `level`
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }

        let line = LogRecord::new(self.name.as_str(), level, message.to_string()).format_line();
        self.emit_to_sinks(level, &line);

        if self.propagates() {
            if let Some(parent) = &self.parent {
                parent.emit_to_sinks(level, &line);
            }
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }

    pub fn flush(&self) {
        for sink in self.snapshot() {
            sink.flush();
        }
    }

    fn emit_to_sinks(&self, level: Level, line: &str) {
        for sink in self.snapshot() {
            sink.emit(level, line);
        }
    }

    /// Copy of the sink list, so no lock is held during I/O
    fn snapshot(&self) -> Vec<Arc<LogSink>> {
        self.sinks.read().clone()
    }

    fn display_name(&self) -> &str {
        if self.is_root() {
            crate::ROOT_DISPLAY_NAME
        } else {
            &self.name
        }
    }
}

impl fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sink_targets())
            .field("propagate", &self.propagates())
            .finish()
    }
}
