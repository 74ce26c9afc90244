//! Rotation integration tests
//!
//! Size-bounded rotation through a configured context logger:
//! - One rotation per boundary crossing
//! - No lost or duplicated records
//! - Never more than `backup_count + 1` files
//! - Recovery after the log directory disappears

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use tests::{
    file_set, files_sharing_name, only_file_path, parse_line, prefix_in, read_lines, LogConfig,
    LoggerRegistry,
};

/// Every file fits the bound, and the first line of each newer file would
/// not have fit into the file before it
fn assert_tight_boundaries(active: &Path, max_bytes: u64) {
    let files = file_set(active);
    for pair in files.windows(2) {
        let older_len = std::fs::metadata(&pair[0]).unwrap().len();
        let newer = std::fs::read_to_string(&pair[1]).unwrap();
        let first_line_len = newer.lines().next().map_or(0, |l| l.len() as u64 + 1);

        assert!(older_len <= max_bytes, "{:?} exceeds bound", pair[0]);
        assert!(
            older_len + first_line_len > max_bytes,
            "{:?} rotated before it was full",
            pair[0]
        );
    }
}

fn record_numbers(active: &Path) -> Vec<usize> {
    read_lines(active)
        .iter()
        .map(|line| {
            let parsed = parse_line(line).expect("well-formed line");
            parsed
                .message
                .strip_prefix("record ")
                .and_then(|n| n.parse().ok())
                .expect("numbered record")
        })
        .collect()
}

#[test]
fn test_rotation_keeps_every_record_when_backups_suffice() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = LogConfig::default().with_max_bytes(2048).with_backup_count(100);

    let logger =
        registry.setup_context_logger_with(0, Some(&prefix_in(temp_dir.path(), "rot/a")), &config);
    for n in 0..500 {
        logger.info(format_args!("record {n:05}"));
    }

    let active = only_file_path(&logger);
    assert!(file_set(&active).len() > 1, "expected at least one rotation");
    assert_eq!(record_numbers(&active), (0..500).collect::<Vec<_>>());
    assert_tight_boundaries(&active, 2048);
}

#[test]
fn test_rotation_purges_beyond_backup_count() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = LogConfig::default().with_max_bytes(1024).with_backup_count(3);

    let logger =
        registry.setup_context_logger_with(1, Some(&prefix_in(temp_dir.path(), "rot/b")), &config);
    for n in 0..1000 {
        logger.info(format_args!("record {n:05}"));
    }

    let active = only_file_path(&logger);
    assert_eq!(files_sharing_name(&active), 4);
    assert_tight_boundaries(&active, 1024);

    // Retained records are the newest ones, in order, with no gaps
    let numbers = record_numbers(&active);
    assert!(!numbers.is_empty());
    assert_eq!(*numbers.last().unwrap(), 999);
    let first = numbers[0];
    assert_eq!(numbers, (first..1000).collect::<Vec<_>>());
}

#[test]
fn test_zero_backups_keeps_single_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = LogConfig::default().with_max_bytes(512).with_backup_count(0);

    let logger =
        registry.setup_context_logger_with(2, Some(&prefix_in(temp_dir.path(), "rot/c")), &config);
    for n in 0..200 {
        logger.info(format_args!("record {n:05}"));
    }

    let active = only_file_path(&logger);
    assert_eq!(files_sharing_name(&active), 1);
    assert!(std::fs::metadata(&active).unwrap().len() <= 512);
    assert_eq!(*record_numbers(&active).last().unwrap(), 199);
}

#[test]
fn test_concurrent_writers_share_one_sink() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let config = LogConfig::default().with_max_bytes(4096).with_backup_count(500);
    let logger = registry.setup_context_logger_with(
        "shared",
        Some(&prefix_in(temp_dir.path(), "rot/shared")),
        &config,
    );

    let writers = 8;
    let per_writer = 400;
    let barrier = Arc::new(Barrier::new(writers));

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for n in 0..per_writer {
                    logger.info(format_args!("writer {w} record {n}"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let active = only_file_path(&logger);
    let lines = read_lines(&active);
    assert_eq!(lines.len(), writers * per_writer);

    let unique: HashSet<String> = lines
        .iter()
        .map(|line| {
            let parsed = parse_line(line).expect("no interleaved partial lines");
            assert_eq!(parsed.logger, "context_shared");
            assert_eq!(parsed.level, "INFO");
            parsed.message
        })
        .collect();
    assert_eq!(unique.len(), writers * per_writer);

    assert_tight_boundaries(&active, 4096);
}

#[test]
fn test_logger_recovers_after_directory_returns() {
    let temp_dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = LogConfig::default().with_max_bytes(200).with_backup_count(10);

    let logger = registry.setup_context_logger_with(
        3,
        Some(&prefix_in(temp_dir.path(), "vanishing/thread_3")),
        &config,
    );
    let active = only_file_path(&logger);
    let dir = active.parent().unwrap().to_path_buf();

    for n in 0..2 {
        logger.info(format_args!("record {n:05}"));
    }

    // Rotations now fail to reopen the file; the records are dropped
    std::fs::remove_dir_all(&dir).unwrap();
    for n in 2..12 {
        logger.info(format_args!("record {n:05}"));
    }
    assert!(!dir.exists());

    std::fs::create_dir_all(&dir).unwrap();
    for n in 100..105 {
        logger.info(format_args!("record {n:05}"));
    }

    assert_eq!(record_numbers(&active), (100..105).collect::<Vec<_>>());
    assert_eq!(file_set(&active).len(), 2);
    assert_tight_boundaries(&active, 200);
}
