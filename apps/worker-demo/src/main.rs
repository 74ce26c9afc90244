//! Threadlog worker demo
//!
//! Configures the root logger, then runs several worker threads that each
//! bind their own rotating log file and call shared routines that log
//! without knowing which worker they run on.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use threadlog_core::{ContextBinding, LogConfig, LoggerRegistry};
use tracing::{error, info};

mod common;
mod telemetry;

const DEFAULT_WORKER_PREFIX: &str = "logs/中文/中文_特殊￥_/thread_";

#[derive(Debug, Parser)]
#[command(name = "threadlog-demo", about = "Per-thread rotating log files demo")]
struct Args {
    /// Number of worker threads
    #[arg(long, default_value_t = 3)]
    workers: usize,

    /// Iterations per worker
    #[arg(long, default_value_t = 3000)]
    iterations: usize,

    /// Worker log prefix; the worker index is appended
    #[arg(long, default_value = DEFAULT_WORKER_PREFIX)]
    prefix: String,

    /// Root log prefix (overrides THREADLOG_PREFIX)
    #[arg(long)]
    root_prefix: Option<String>,

    /// Directory for the process's own diagnostics
    #[arg(long, default_value = "logs/diagnostics")]
    diagnostics_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let _guard = telemetry::init_tracing(&args.diagnostics_dir)?;

    let mut config = LogConfig::from_env();
    if let Some(root_prefix) = &args.root_prefix {
        config.prefix = root_prefix.clone();
    }

    let registry = Arc::new(LoggerRegistry::with_config(config));
    registry.setup_root();

    let root = registry.root();
    root.debug("This is a debug message from the main module");
    root.info("This is an info message from the main module");

    let mut handles = Vec::with_capacity(args.workers);
    for worker_id in 0..args.workers {
        let registry = Arc::clone(&registry);
        let prefix = format!("{}{}", args.prefix, worker_id);
        let iterations = args.iterations;

        let handle = thread::Builder::new()
            .name(format!("worker-{worker_id}"))
            .spawn(move || run_worker(&registry, worker_id, &prefix, iterations))?;
        handles.push(handle);
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("A worker thread panicked");
        }
    }

    registry.flush_all();
    info!("All {} workers finished", args.workers);
    println!("All threads have completed.");

    Ok(())
}

fn run_worker(registry: &LoggerRegistry, worker_id: usize, prefix: &str, iterations: usize) {
    let logger = registry.setup_context_logger(worker_id, Some(prefix));
    ContextBinding::bind(Arc::clone(&logger));

    for iteration in 0..iterations {
        common::inventory_check(registry);
        common::billing_sync(registry);
        logger.info(format_args!(
            "Thread {} is in iteration {}",
            worker_id, iteration
        ));
    }
}
