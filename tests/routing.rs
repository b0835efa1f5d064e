//! Severity routing through a logger composed from `LogConfig`.

use splitlog::logger::LevelFilter;
use splitlog::{
    Error, HookResult, Level, LogConfig, Logger, MemorySink, Record, RotationConfig, Sink,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn find(dir: &Path, name: &str) -> Option<PathBuf> {
    for entry in fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = find(&path, name) {
                return Some(found);
            }
        } else if path.file_name().is_some_and(|n| n == name) {
            return Some(path);
        }
    }
    None
}

fn read(dir: &Path, name: &str) -> String {
    find(dir, name).map_or_else(String::new, |p| fs::read_to_string(p).unwrap())
}

/// Record lines only, without stack trace continuation lines.
fn records(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|l| Level::all().iter().any(|lv| l.contains(&format!("\t{}\t", lv.as_capital_str()))))
        .collect()
}

fn build(root: &Path, simple: bool, console: &MemorySink) -> Logger {
    let config = LogConfig::new()
        .app_name("svc")
        .simple(simple)
        .root_dir(root.to_string_lossy());
    let console: Arc<dyn Sink> = Arc::new(console.clone());
    Logger::from_config_with_console(&config, Some(console))
}

#[test]
fn split_mode_routes_each_record_to_one_file() {
    let dir = tempdir().unwrap();
    let console = MemorySink::new();
    let logger = build(dir.path(), false, &console);

    logger.debug("d-msg").unwrap();
    logger.info("i-msg").unwrap();
    logger.warn("w-msg").unwrap();
    logger.error("e-msg").unwrap();

    let debug = read(dir.path(), "debug.log");
    let err = read(dir.path(), "err.log");

    assert_eq!(records(&debug).len(), 3);
    assert!(debug.contains("\tDEBUG\t"));
    assert!(debug.contains("i-msg"));
    assert!(debug.contains("w-msg"));
    assert!(!debug.contains("e-msg"));

    assert_eq!(records(&err).len(), 1);
    assert!(err.contains("\tERROR\t"));
    assert!(err.contains("e-msg"));
    assert!(!err.contains("w-msg"));

    // One console line per record, never two.
    assert_eq!(console.len(), 4);
}

#[test]
fn files_live_under_app_directory() {
    let dir = tempdir().unwrap();
    let logger = build(dir.path(), false, &MemorySink::new());
    logger.error("x").unwrap();

    let err = find(dir.path(), "err.log").unwrap();
    assert!(err.starts_with(dir.path().join("svc")));
}

#[test]
fn err_stream_carries_stacktrace() {
    let dir = tempdir().unwrap();
    let console = MemorySink::new();
    let logger = build(dir.path(), false, &console);

    logger.warn("no trace").unwrap();
    logger.error("with trace").unwrap();

    let err = read(dir.path(), "err.log");
    let first = err.lines().next().unwrap();
    assert!(first.ends_with("with trace"));
    assert!(err.lines().count() > 1, "{err}");

    let debug = read(dir.path(), "debug.log");
    assert_eq!(debug.lines().count(), 1);
}

#[test]
fn simple_mode_writes_only_debug_file() {
    let dir = tempdir().unwrap();
    let console = MemorySink::new();
    let logger = build(dir.path(), true, &console);

    logger.info("i-msg").unwrap();
    logger.error("e-msg").unwrap();

    let debug = read(dir.path(), "debug.log");
    assert_eq!(debug.lines().count(), 2);
    assert!(debug.contains("e-msg"));
    assert!(find(dir.path(), "err.log").is_none());
    assert_eq!(console.len(), 2);
}

#[test]
fn exit_record_lands_in_err_stream() {
    let dir = tempdir().unwrap();
    let console = MemorySink::new();
    let logger = build(dir.path(), false, &console);

    logger.exit_record("shutting down").unwrap();

    let err = read(dir.path(), "err.log");
    assert!(err.contains("\tERROR\t"));
    assert!(err.contains("shutting down\t === err exit === \n"));
    assert!(!err.contains("\n\n"), "{err}");
    assert!(records(&read(dir.path(), "debug.log")).is_empty());
    assert!(console.contents().contains("=== err exit ==="));
}

#[test]
fn templated_variants_resolve_arguments() {
    let dir = tempdir().unwrap();
    let console = MemorySink::new();
    let logger = build(dir.path(), false, &console);

    logger.infof("user %s logged in %d times", &[&"ana", &3]).unwrap();
    logger.warnf("", &[&"a", &1, &true]).unwrap();

    let lines = console.lines();
    assert!(lines[0].ends_with("user ana logged in 3 times"));
    assert!(lines[1].ends_with("a1true"));
}

#[test]
fn console_disabled_in_config() {
    let dir = tempdir().unwrap();
    let config = LogConfig::new()
        .console(false)
        .root_dir(dir.path().to_string_lossy());
    let logger = Logger::from_config(&config);

    assert!(logger.cores().iter().all(|core| core.sink_count() == 1));
}

#[derive(Debug)]
struct Broken;

impl Sink for Broken {
    fn write(&self, _line: &[u8]) -> Result<(), Error> {
        Err(io::Error::other("disk full").into())
    }

    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[test]
fn failing_sink_does_not_starve_the_others() {
    let healthy = MemorySink::new();
    let logger = Logger::builder()
        .core(LevelFilter::AtLeast(Level::Debug))
        .sink(Broken)
        .sink(healthy.clone())
        .done()
        .build();

    let err = logger.info("still written").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(healthy.len(), 1);
}

#[test]
fn hook_failures_are_aggregated() {
    let sink = MemorySink::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let logger = Logger::builder()
        .core(LevelFilter::AtLeast(Level::Debug))
        .sink(sink.clone())
        .done()
        .hook("pager", |_: &Record| -> HookResult { Err("pager unreachable".into()) })
        .hook("counter", move |_: &Record| -> HookResult {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .hook("mail", |_: &Record| -> HookResult { Err("smtp refused".into()) })
        .build();

    logger.warn("below hook threshold").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let Err(Error::Hook(failures)) = logger.error("boom") else {
        panic!("expected hook errors");
    };
    let names: Vec<_> = failures.iter().map(|f| f.hook.as_str()).collect();
    assert_eq!(names, ["pager", "mail"]);
    assert_eq!(failures[1].message, "smtp refused");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(sink.len(), 2);
}

#[test]
fn hooks_from_config_see_error_records() {
    let dir = tempdir().unwrap();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let config = LogConfig::new()
        .root_dir(dir.path().to_string_lossy())
        .hook("count", move |record: &Record| -> HookResult {
            assert!(record.level >= Level::Error);
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    let logger = Logger::from_config_with_console(&config, None);

    logger.info("ignored").unwrap();
    logger.error("seen").unwrap();
    logger.exit_record("seen too").unwrap();

    assert_eq!(logger.hook_count(), 1);
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_writers_never_interleave() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 200;

    let dir = tempdir().unwrap();
    let console = MemorySink::new();
    let logger = build(dir.path(), false, &console);

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let logger = &logger;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("worker-{t}-line-{i}-end")).unwrap();
                }
            });
        }
    });

    let debug = read(dir.path(), "debug.log");
    let lines: Vec<_> = debug.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert!(lines.iter().all(|l| l.contains("\tINFO\t") && l.ends_with("-end")));
    assert_eq!(console.len(), THREADS * PER_THREAD);
}

#[test]
fn exit_record_completes_while_err_stream_is_busy() {
    let dir = tempdir().unwrap();
    // Large enough that the exit record stays in the active err.log.
    let config = LogConfig::new()
        .root_dir(dir.path().to_string_lossy())
        .rotation(RotationConfig {
            max_size_mb: 1024,
            ..RotationConfig::default()
        });
    let logger = Arc::new(Logger::from_config_with_console(&config, None));
    let stop = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut i = 0;
                while !stop.load(Ordering::Relaxed) {
                    logger.error(format!("writer-{t}-{i}")).unwrap();
                    i += 1;
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    let (tx, rx) = mpsc::channel();
    let exiting = Arc::clone(&logger);
    thread::spawn(move || {
        let result = exiting.exit_record("boom");
        let _ = tx.send(result.is_ok());
    });

    let finished = rx.recv_timeout(Duration::from_secs(10));
    stop.store(true, Ordering::Relaxed);
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(finished, Ok(true), "exit_record did not return in time");
    let err = read(dir.path(), "err.log");
    assert!(err.contains("boom\t === err exit === "));
}
