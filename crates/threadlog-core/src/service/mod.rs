//! Logging services
//!
//! Built leaves first: filenames and directories, then rotating writers and
//! sinks, then the named loggers, the registry that owns them and the
//! per-thread binding that finds them again.

mod context_binding;
mod diagnostics;
mod directory;
mod filename;
mod handler_factory;
mod logger;
mod registry;
mod rotating_file;
mod sink;

pub use context_binding::{BindingGuard, ContextBinding};
pub use directory::ensure_parent_dir;
pub use filename::{generate_log_filename, generate_log_filename_at, FILENAME_TIMESTAMP_FORMAT};
pub use handler_factory::{absolute_path, make_console_sink, make_file_sink};
pub use logger::NamedLogger;
pub use registry::LoggerRegistry;
pub use rotating_file::{backup_path, RotatingFileWriter};
pub use sink::{ConsoleSink, FileSink, LogSink};
