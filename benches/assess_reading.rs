//! Benchmarks for classifier training and single-reading assessment.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crop_stress_advisor::{AssessorConfig, CropAssessor, Reading};

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier_training");
    group.sample_size(10);

    for trees in [10, 50, 100].iter() {
        let config = AssessorConfig {
            n_trees: *trees,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(trees), trees, |b, _| {
            b.iter(|| CropAssessor::new(black_box(&config)).unwrap());
        });
    }

    group.finish();
}

fn bench_assess(c: &mut Criterion) {
    let assessor = CropAssessor::new(&AssessorConfig::default()).unwrap();
    let healthy = Reading::for_stage("Emergence (VE)").with_values([27.0, 75.0, 70.0, 6.5, 20000.0]);
    let stressed = Reading::for_stage("Reproductive (R1–R3)").with_values([41.0, 40.0, 55.0, 8.4, 30000.0]);

    c.bench_function("assess_healthy_reading", |b| {
        b.iter(|| assessor.assess(black_box(&healthy)).unwrap())
    });
    c.bench_function("assess_stressed_reading", |b| {
        b.iter(|| assessor.assess(black_box(&stressed)).unwrap())
    });

    let batch: Vec<Reading> = (0..1000).map(|_| stressed.clone()).collect();
    c.bench_function("assess_all_1000", |b| {
        b.iter(|| assessor.assess_all(black_box(&batch)).unwrap())
    });
}

criterion_group!(benches, bench_training, bench_assess);
criterion_main!(benches);
