use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use microstore::Registry;

fn bind_benchmark(c: &mut Criterion) {
    c.bench_function("bind_new_key", |b| {
        b.iter(|| {
            let registry: Registry = Registry::new();
            registry.bind(black_box("values.loaded"), black_box("key"), |_| {});
            registry
        });
    });
}

fn rebind_benchmark(c: &mut Criterion) {
    let registry: Registry = Registry::new();
    for i in 0..10 {
        registry.bind("values.loaded", format!("key-{i}"), |_| {});
    }

    c.bench_function("rebind_existing_key", |b| {
        b.iter(|| {
            registry.bind("values.loaded", black_box("key-9"), |_| {});
        });
    });
}

fn unbind_benchmark(c: &mut Criterion) {
    let registry: Registry = Registry::new();

    c.bench_function("bind_then_unbind", |b| {
        b.iter(|| {
            registry.bind("values.loaded", "key", |_| {});
            black_box(registry.unbind("values.loaded", "key"));
        });
    });
}

fn trigger_missing_benchmark(c: &mut Criterion) {
    let registry: Registry = Registry::new();
    registry.bind("values.loaded", "key", |_| {});

    c.bench_function("trigger_unknown_event", |b| {
        b.iter(|| {
            black_box(registry.trigger(black_box("values.saved"))).ok();
        });
    });
}

fn trigger_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger");

    for subscriber_count in [1, 10, 100].iter() {
        let registry: Registry = Registry::new();

        for i in 0..*subscriber_count {
            registry.bind("values.loaded", format!("key-{i}"), |_| {
                // Empty subscriber
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                b.iter(|| {
                    black_box(registry.trigger("values.loaded")).ok();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bind_benchmark,
    rebind_benchmark,
    unbind_benchmark,
    trigger_missing_benchmark,
    trigger_benchmark,
);
criterion_main!(benches);
