use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scene_core::{audit, CountRange, SceneConfig, SceneGenerator};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for vehicles in [3, 8, 32] {
        let mut config = SceneConfig::default();
        config.vehicles.count = CountRange::exactly(vehicles);
        let generator = match SceneGenerator::new(config) {
            Ok(g) => g,
            Err(e) => panic!("bench config rejected: {e}"),
        };
        group.bench_function(format!("{vehicles}_vehicles"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(generator.generate(seed).ok());
            });
        });
    }

    let generator = SceneGenerator::new(SceneConfig::default()).ok();
    if let Some(scene) = generator.and_then(|g| g.generate(42).ok()) {
        group.bench_function("audit_default", |b| b.iter(|| black_box(audit(&scene))));
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
