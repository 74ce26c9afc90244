//! Domain types
//!
//! Value objects shared by every part of the logging core:
//! - `Level` severity ordering
//! - `LogRecord` and the shared line format
//! - `LogConfig` setup parameters
//! - `SinkTarget` comparable sink descriptor

pub mod config;
mod level;
mod record;
mod sink_target;

pub use config::*;
pub use level::*;
pub use record::*;
pub use sink_target::*;
