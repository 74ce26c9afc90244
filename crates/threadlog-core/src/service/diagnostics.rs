//! Fallback reporting for failures inside the logging core

use std::io::{self, Write};
use tracing::{error, info, warn};

use super::logger::NamedLogger;
use crate::{Level, LogRecord, LogSetupError, SinkTarget};

/// Report a setup failure through the best channel still available
///
/// Goes through the root logger when it has sinks, otherwise to stderr.
pub(crate) fn report_setup_failure(root: &NamedLogger, err: &LogSetupError) {
    error!(error = %err, "Logging setup failed");

    if root.has_sinks() {
        root.error(err);
    } else {
        let record = LogRecord::new(root.name(), Level::Error, err.to_string());
        write_stderr(&record.format_line());
    }
}

/// Report the first line a sink dropped in a run of failed writes
///
/// Never routed through a logger: the failing sink may belong to it.
pub(crate) fn report_write_failure(target: &SinkTarget, err: &io::Error) {
    warn!(target_sink = ?target, error = %err, "Dropping log lines");
    write_stderr(&format!(
        "threadlog: failed to write to {:?}: {}; dropping lines until it recovers\n",
        target, err
    ));
}

/// Report a sink accepting lines again after a run of failed writes
pub(crate) fn report_write_recovered(target: &SinkTarget, dropped: u64) {
    info!(target_sink = ?target, dropped, "Log sink recovered");
    write_stderr(&format!(
        "threadlog: writing to {:?} again after dropping {} line(s)\n",
        target, dropped
    ));
}

fn write_stderr(text: &str) {
    write_fallback(&mut io::stderr().lock(), text);
}

/// Last-resort write; an error here has nowhere left to go and is discarded
fn write_fallback(out: &mut impl Write, text: &str) {
    let _ = out.write_all(text.as_bytes());
    let _ = out.flush();
}
