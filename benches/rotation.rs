use criterion::{Criterion, criterion_group, criterion_main};
use splitlog::LogConfig;
use splitlog::logger::Logger;
use splitlog::rotate::{RotatingWriter, RotationPolicy};
use std::hint::black_box;
use tempfile::TempDir;

const LINE: &[u8] = b"2025-01-15 14:30:00.000\tINFO\tsrc/main.rs:42\trequest completed in 12ms\n";

fn bench_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("RotatingWriter::write");

    let tmp = TempDir::new().expect("failed to create temp dir");
    let writer = RotatingWriter::new(tmp.path().join("plain.log"), RotationPolicy::new());
    group.bench_function("no-rotation", |b| {
        b.iter(|| writer.write(black_box(LINE)).expect("write failed"));
    });

    // Rotates roughly every 100 lines, keeping two uncompressed backups.
    let policy = RotationPolicy::new()
        .max_size_bytes(LINE.len() as u64 * 100)
        .max_backups(2)
        .compress(false);
    let rotating = RotatingWriter::new(tmp.path().join("rotating.log"), policy);
    group.bench_function("rotating", |b| {
        b.iter(|| rotating.write(black_box(LINE)).expect("write failed"));
    });

    group.finish();
}

fn bench_logger(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let config = LogConfig::new()
        .console(false)
        .root_dir(tmp.path().to_string_lossy());
    let logger = Logger::from_config(&config);

    c.bench_function("Logger::info (split)", |b| {
        b.iter(|| logger.info(black_box("request completed")).expect("log failed"));
    });

    logger.flush().expect("flush failed");
}

criterion_group!(benches, bench_writer, bench_logger);
criterion_main!(benches);
