use criterion::{black_box, criterion_group, criterion_main, Criterion};
use edwards::{BaseField, RandomField, ScalarField, ScalarVector};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_scalar_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = ScalarField::random(&mut rng);
    let b = ScalarField::random(&mut rng);
    c.bench_function("scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_base_mul(c: &mut Criterion) {
    let a = BaseField::from_canonical_u64(123456789);
    let b = -BaseField::from_canonical_u64(987654321);
    c.bench_function("base_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_scalar_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = ScalarField::random_nonzero(&mut rng);
    c.bench_function("scalar_invert", |bencher| {
        bencher.iter(|| black_box(black_box(a).invert()))
    });
}

fn bench_batch_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: ScalarVector = (0..256)
        .map(|_| ScalarField::random_nonzero(&mut rng))
        .collect();
    c.bench_function("scalar_batch_invert_256", |bencher| {
        bencher.iter(|| black_box(black_box(&values).invert()))
    });
}

criterion_group!(
    benches,
    bench_scalar_mul,
    bench_base_mul,
    bench_scalar_invert,
    bench_batch_invert
);
criterion_main!(benches);
