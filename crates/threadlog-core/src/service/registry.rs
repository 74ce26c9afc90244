//! Logger registry - name-keyed loggers with idempotent sink setup

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::diagnostics;
use super::directory::ensure_parent_dir;
use super::filename::generate_log_filename;
use super::handler_factory::{absolute_path, make_console_sink, make_file_sink};
use super::logger::NamedLogger;
use super::sink::LogSink;
use crate::{AttachOutcome, Level, LogConfig, LogSetupError, SinkTarget};

/// Owns the root logger and every named logger for the process
///
/// Share it as `Arc<LoggerRegistry>` and hand a clone to each worker.
/// Setup calls are idempotent per target: repeating them never stacks
/// duplicate sinks on a logger.
pub struct LoggerRegistry {
    config: LogConfig,
    root: Arc<NamedLogger>,
    loggers: RwLock<HashMap<String, Arc<NamedLogger>>>,
}

impl LoggerRegistry {
    /// Create a registry with default settings
    pub fn new() -> Self {
        Self::with_config(LogConfig::default())
    }

    /// Create a registry whose parameterless setup calls use `config`
    pub fn with_config(config: LogConfig) -> Self {
        Self {
            config,
            root: Arc::new(NamedLogger::root()),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn root(&self) -> Arc<NamedLogger> {
        Arc::clone(&self.root)
    }

    /// Logger name used for a worker context
    pub fn context_logger_name(context_id: impl Display) -> String {
        format!("context_{}", context_id)
    }

    /// Look up a logger without creating it (`""` is the root)
    pub fn get(&self, name: &str) -> Option<Arc<NamedLogger>> {
        if name.is_empty() {
            return Some(self.root());
        }
        self.loggers.read().get(name).cloned()
    }

    /// Get or create the logger called `name` (`""` is the root)
    pub fn logger(&self, name: &str) -> Arc<NamedLogger> {
        if name.is_empty() {
            return self.root();
        }

        // Fast path: logger exists
        {
            let loggers = self.loggers.read();
            if let Some(logger) = loggers.get(name) {
                return Arc::clone(logger);
            }
        }

        // Slow path: create it
        let mut loggers = self.loggers.write();

        // Double-check (another thread might have created it)
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let logger = Arc::new(NamedLogger::new(name, Some(self.root())));
        loggers.insert(name.to_string(), Arc::clone(&logger));
        debug!("Created logger {}", name);
        logger
    }

    /// Names of every named logger created so far, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Configure the root logger with the registry's settings
    pub fn setup_root(&self) {
        let config = self.config.clone();
        self.setup_root_with(&config);
    }

    /// Configure the root logger with a rotating file and the console
    ///
    /// Repeating the call with the same prefix leaves the sink list as is.
    pub fn setup_root_with(&self, config: &LogConfig) {
        self.root.set_level(Level::MOST_PERMISSIVE);

        let path = generate_log_filename(&config.prefix);
        if self.provision_directory(&path) {
            let prefix = Some(config.prefix.as_str());
            if let Err(e) = self.attach_file_sink(&self.root, &path, prefix, config) {
                diagnostics::report_setup_failure(&self.root, &e);
            }
        }

        self.attach_console_sink(&self.root, config.min_level);
        info!("Root logger configured with prefix {:?}", config.prefix);
    }

    /// Configure (or reuse) the logger for worker context `context_id`
    ///
    /// The logger is named `context_{id}`; `prefix` defaults to that name.
    /// A file sink is attached only if none already targets the generated
    /// path or prefix. Failures are reported and the logger is returned in
    /// whatever state it reached.
    pub fn setup_context_logger(
        &self,
        context_id: impl Display,
        prefix: Option<&str>,
    ) -> Arc<NamedLogger> {
        let config = self.config.clone();
        self.setup_context_logger_with(context_id, prefix, &config)
    }

    /// Like [`setup_context_logger`](Self::setup_context_logger) with explicit
    /// rotation settings (`config.prefix` is not used)
    pub fn setup_context_logger_with(
        &self,
        context_id: impl Display,
        prefix: Option<&str>,
        config: &LogConfig,
    ) -> Arc<NamedLogger> {
        let name = Self::context_logger_name(context_id);
        let logger = self.logger(&name);
        logger.set_level(Level::MOST_PERMISSIVE);

        let prefix = prefix.unwrap_or(&name);
        let path = generate_log_filename(prefix);

        if !self.provision_directory(&path) {
            return logger;
        }

        match self.attach_file_sink(&logger, &path, Some(prefix), config) {
            Ok(AttachOutcome::Attached) => info!("Logger {} writing to {:?}", name, path),
            Ok(AttachOutcome::DuplicateAttachmentAvoided) => {}
            Err(e) => diagnostics::report_setup_failure(&self.root, &e),
        }

        logger
    }

    /// Attach a rotating file sink for `path` to `logger` unless an
    /// equivalent one is already there
    ///
    /// `prefix` is compared in absolute form, so `logs/x` and `./logs/x` name
    /// the same target.
    pub fn attach_file_sink(
        &self,
        logger: &NamedLogger,
        path: &Path,
        prefix: Option<&str>,
        config: &LogConfig,
    ) -> Result<AttachOutcome, LogSetupError> {
        let prefix = prefix.map(|p| absolute_path(Path::new(p)));
        let target = SinkTarget::file(absolute_path(path), prefix.as_deref());

        logger.attach_if_absent(&target, || {
            make_file_sink(path, config.max_bytes, config.backup_count, config.min_level)
                .map(|sink| LogSink::File(sink.with_prefix(prefix.as_deref())))
        })
    }

    /// Attach a console sink to `logger` unless it already has one
    pub fn attach_console_sink(&self, logger: &NamedLogger, min_level: Level) -> AttachOutcome {
        logger
            .attach_if_absent(&SinkTarget::Console, || {
                Ok(LogSink::Console(make_console_sink(min_level)))
            })
            .unwrap_or(AttachOutcome::DuplicateAttachmentAvoided)
    }

    /// Flush every sink of every logger
    pub fn flush_all(&self) {
        self.root.flush();
        let loggers: Vec<Arc<NamedLogger>> = self.loggers.read().values().cloned().collect();
        for logger in loggers {
            logger.flush();
        }
    }

    fn provision_directory(&self, path: &Path) -> bool {
        match ensure_parent_dir(path) {
            Ok(()) => true,
            Err(e) => {
                diagnostics::report_setup_failure(&self.root, &e);
                false
            }
        }
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
