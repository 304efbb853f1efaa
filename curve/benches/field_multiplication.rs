use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_scalar_ops(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xB3);
    let a = ScalarField::random(&mut rng);
    let b = ScalarField::random(&mut rng);

    c.bench_function("scalar_add", |bencher| {
        bencher.iter(|| black_box(a) + black_box(b))
    });

    c.bench_function("scalar_mul", |bencher| {
        bencher.iter(|| black_box(a) * black_box(b))
    });

    c.bench_function("scalar_inverse", |bencher| {
        bencher.iter(|| black_box(a).inverse())
    });
}

criterion_group!(benches, bench_scalar_ops);
criterion_main!(benches);
