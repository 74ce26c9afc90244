//! Context binding integration tests
//!
//! Shared code resolving the calling thread's logger:
//! - Fallback to the root logger when nothing is bound
//! - Per-thread isolation of bindings
//! - Propagation of worker records to the shared root sink

use std::sync::Arc;
use std::thread;
use tests::{
    only_file_path, parse_line, prefix_in, ContextBinding, Level, LogConfig, LoggerRegistry,
    SinkTarget,
};

/// Stand-in for library code that never sees a logger handle
fn shared_routine(registry: &LoggerRegistry, tag: &str) {
    let logger = ContextBinding::resolve(registry);
    logger.warning(format_args!("{tag} warning"));
    logger.info(format_args!("{tag} info"));
}

#[test]
fn test_unbound_resolves_to_root_and_emits() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = LogConfig::default().with_prefix(prefix_in(temp_dir.path(), "main/app"));
    let registry = Arc::new(LoggerRegistry::with_config(config));
    registry.setup_root();

    let worker_registry = Arc::clone(&registry);
    let resolved_root = thread::spawn(move || {
        shared_routine(&worker_registry, "unbound");
        ContextBinding::resolve(&worker_registry).is_root()
    })
    .join()
    .unwrap();

    assert!(resolved_root);
    let content = std::fs::read_to_string(only_file_path(&registry.root())).unwrap();
    assert!(content.contains(" - root - WARNING - unbound warning"));
    assert!(content.contains(" - root - INFO - unbound info"));
}

#[test]
fn test_bound_threads_write_only_their_own_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(LoggerRegistry::new());

    let handles: Vec<_> = (0..4)
        .map(|id| {
            let registry = Arc::clone(&registry);
            let prefix = prefix_in(temp_dir.path(), &format!("workers/thread_{id}"));
            thread::spawn(move || {
                ContextBinding::bind(registry.setup_context_logger(id, Some(&prefix)));
                for _ in 0..50 {
                    shared_routine(&registry, &format!("worker-{id}"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for id in 0..4 {
        let logger = registry.get(&format!("context_{id}")).unwrap();
        let content = std::fs::read_to_string(only_file_path(&logger)).unwrap();
        let lines: Vec<_> = content.lines().map(|l| parse_line(l).unwrap()).collect();

        assert_eq!(lines.len(), 100);
        assert!(lines.iter().all(|l| l.logger == format!("context_{id}")));
        assert!(lines
            .iter()
            .all(|l| l.message.starts_with(&format!("worker-{id} "))));
    }
}

#[test]
fn test_worker_records_propagate_to_root() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let root_path = temp_dir.path().join("root.log");
    registry
        .attach_file_sink(&registry.root(), &root_path, None, registry.config())
        .unwrap();

    let worker_registry = Arc::clone(&registry);
    let prefix = prefix_in(temp_dir.path(), "prop/thread_0");
    thread::spawn(move || {
        ContextBinding::bind(worker_registry.setup_context_logger(0, Some(&prefix)));
        shared_routine(&worker_registry, "propagated");
    })
    .join()
    .unwrap();

    let root_content = std::fs::read_to_string(&root_path).unwrap();
    assert!(root_content.contains(" - context_0 - WARNING - propagated warning"));
    assert!(root_content.contains(" - context_0 - INFO - propagated info"));
}

#[test]
fn test_sink_threshold_applies_to_propagated_records() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let root_path = temp_dir.path().join("errors-only.log");
    let errors_only = LogConfig::default().with_min_level(Level::Error);
    registry
        .attach_file_sink(&registry.root(), &root_path, None, &errors_only)
        .unwrap();

    let logger = registry.setup_context_logger(5, Some(&prefix_in(temp_dir.path(), "t/thread_5")));
    logger.info("kept local");
    logger.error("kept everywhere");

    let root_content = std::fs::read_to_string(&root_path).unwrap();
    assert_eq!(root_content.lines().count(), 1);
    assert!(root_content.contains("ERROR - kept everywhere"));

    let own_content = std::fs::read_to_string(only_file_path(&logger)).unwrap();
    assert_eq!(own_content.lines().count(), 2);
}

#[test]
fn test_scoped_binding_on_worker_thread() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let prefix = prefix_in(temp_dir.path(), "scoped/thread_8");

    let worker_registry = Arc::clone(&registry);
    let names = thread::spawn(move || {
        let logger = worker_registry.setup_context_logger(8, Some(&prefix));
        let inside = {
            let _guard = ContextBinding::scoped(logger);
            ContextBinding::resolve(&worker_registry).name().to_string()
        };
        let after = ContextBinding::resolve(&worker_registry).name().to_string();
        (inside, after)
    })
    .join()
    .unwrap();

    assert_eq!(names, ("context_8".to_string(), String::new()));
    assert!(registry
        .get("context_8")
        .unwrap()
        .sink_targets()
        .iter()
        .all(SinkTarget::is_file));
}
