use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edwards::{hash_to_point, multiexp, Affine, Group, Projective, RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_scalar(rng: &mut StdRng) -> ScalarField {
    ScalarField::random(rng)
}

fn bench_affine_add(c: &mut Criterion) {
    let g = Affine::generator();
    let h = g.double();
    c.bench_function("affine_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
}

fn bench_projective_add(c: &mut Criterion) {
    let g = Projective::generator();
    let h = g.double();
    c.bench_function("projective_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
}

fn bench_projective_double(c: &mut Criterion) {
    let g = Projective::generator();
    c.bench_function("projective_double", |bencher| {
        bencher.iter(|| black_box(black_box(g).double()))
    });
}

fn bench_projective_scalar_mul(c: &mut Criterion) {
    let g = Projective::generator();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("projective_scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul(black_box(&scalar))))
    });
    c.bench_function("projective_scalar_mul_windowed", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul_windowed(black_box(&scalar))))
    });
    c.bench_function("projective_mul_generator", |bencher| {
        bencher.iter(|| black_box(Projective::mul_generator(black_box(&scalar))))
    });
}

fn bench_hash_to_point(c: &mut Criterion) {
    c.bench_function("hash_to_point", |bencher| {
        bencher.iter(|| black_box(hash_to_point("bench", &[&black_box(7u64)])))
    });
}

fn bench_multiexp(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("multiexp");
    for size in [16usize, 64, 256, 1024] {
        let scalars: Vec<ScalarField> = (0..size).map(|_| random_scalar(&mut rng)).collect();
        let points: Vec<Projective> = (0..size)
            .map(|_| Projective::mul_generator(&random_scalar(&mut rng)))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| black_box(multiexp(black_box(&scalars), black_box(&points))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_affine_add,
    bench_projective_add,
    bench_projective_double,
    bench_projective_scalar_mul,
    bench_hash_to_point,
    bench_multiexp
);
criterion_main!(benches);
