//! # Threadlog Core Library
//!
//! Logging isolation for processes with many concurrent worker threads.
//! Every worker writes to its own size-rotated file while the root logger
//! keeps a shared file and the console.
//!
//! ## Modules
//!
//! - `domain` - Levels, records, configuration and sink descriptors
//! - `error` - Setup errors and attachment outcomes
//! - `service` - Filename generation, directory provisioning, sink
//!   construction, the logger registry and per-thread binding
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use threadlog_core::{ContextBinding, LoggerRegistry};
//!
//! let registry = Arc::new(LoggerRegistry::new());
//! registry.setup_root();
//!
//! let worker_registry = Arc::clone(&registry);
//! std::thread::spawn(move || {
//!     let logger = worker_registry.setup_context_logger(0, Some("logs/thread_0"));
//!     ContextBinding::bind(logger);
//!
//!     // Shared code only needs the registry to find the right logger
//!     ContextBinding::resolve(&worker_registry).info("worker started");
//! })
//! .join()
//! .unwrap();
//! ```

pub mod domain;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use error::{AttachOutcome, LogSetupError};
pub use service::*;
