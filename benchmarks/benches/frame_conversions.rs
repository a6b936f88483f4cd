//! Frame Conversion Benchmarks
//!
//! Throughput of the per-step transforms used when recording and replaying
//! relative end-effector actions.
//!
//! Run with: cargo bench --bench frame_conversions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use robot_io::{
    euler_to_quat, quat_to_euler, quat_to_rotvec, rotvec_to_quat, to_relative,
    to_relative_all_frames, to_tcp_frame, to_world_frame, Orientation,
};
use robot_io_benchmarks::SampleSet;

/// Batch sizes to test
const BATCH_SIZES: &[usize] = &[1, 64, 1024];

/// Benchmark tool-frame relative motion over batches of pose pairs
fn bench_to_relative(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_relative");
    group.measurement_time(Duration::from_secs(5));

    for &size in BATCH_SIZES {
        let pairs = SampleSet::new().pose_pairs(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("tool_frame", size), &pairs, |b, pairs| {
            b.iter(|| {
                for p in pairs {
                    let _ = black_box(to_relative(
                        &p.pos_old, &p.orn_old, &p.pos_new, &p.orn_new,
                    ));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("all_frames", size), &pairs, |b, pairs| {
            b.iter(|| {
                for p in pairs {
                    let _ = black_box(to_relative_all_frames(
                        &p.pos_old, &p.orn_old, &p.pos_new, &p.orn_new,
                    ));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark world <-> tool conversions of a single delta
fn bench_frame_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_switch");

    let mut samples = SampleSet::new();
    let rel_pos = samples.position();
    let rel_orn = Orientation::Euler(samples.euler());
    let tcp_orn = Orientation::QuatXyzw(samples.quaternion());

    group.bench_function("to_tcp_frame", |b| {
        b.iter(|| to_tcp_frame(black_box(&rel_pos), black_box(&rel_orn), black_box(&tcp_orn)))
    });

    group.bench_function("to_world_frame", |b| {
        b.iter(|| to_world_frame(black_box(&rel_pos), black_box(&rel_orn), black_box(&tcp_orn)))
    });

    group.finish();
}

/// Benchmark orientation codec conversions
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("orientation_codec");

    let mut samples = SampleSet::new();
    let quat = samples.quaternion();
    let euler = samples.euler();
    let rotvec = samples.rotvec();

    group.bench_function("quat_to_euler", |b| b.iter(|| quat_to_euler(black_box(&quat))));
    group.bench_function("euler_to_quat", |b| b.iter(|| euler_to_quat(black_box(&euler))));
    group.bench_function("quat_to_rotvec", |b| b.iter(|| quat_to_rotvec(black_box(&quat))));
    group.bench_function("rotvec_to_quat", |b| b.iter(|| rotvec_to_quat(black_box(&rotvec))));

    group.finish();
}

criterion_group!(benches, bench_to_relative, bench_frame_switch, bench_codec);
criterion_main!(benches);
