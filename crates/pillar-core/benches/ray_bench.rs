use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pillar_core::waveform::{diagonal, extent, lateral_position};
use pillar_core::{Ray, RayField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_lateral_position_1000(c: &mut Criterion) {
    c.bench_function("lateral_position_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let y = -1000.0 + i as f64 * 2.0;
                black_box(lateral_position(y, 12.0, 0.007, 1.1, 3.5, 100.0, 1000.0));
            }
        });
    });
}

fn bench_ray_path_1080p(c: &mut Criterion) {
    let ray = Ray::random(&mut StdRng::seed_from_u64(11));
    let limit = extent(diagonal(1920.0, 1080.0));
    let mut points = Vec::new();
    c.bench_function("ray_path_1080p", |b| {
        b.iter(|| {
            ray.path_into(black_box(4.2), limit, &mut points);
            black_box(&points);
        });
    });
}

fn bench_field_regenerate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(12);
    let mut field = RayField::generate(&mut rng);
    c.bench_function("field_regenerate", |b| {
        b.iter(|| {
            field.regenerate(&mut rng);
            black_box(field.len());
        });
    });
}

criterion_group!(
    benches,
    bench_lateral_position_1000,
    bench_ray_path_1080p,
    bench_field_regenerate,
);
criterion_main!(benches);
