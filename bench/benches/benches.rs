use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use noise_core::{
    Bounds2D, Builder2D, Fbm2D, NoiseGenerator2D, NoiseGenerator3D, OpenSimplex, Perlin2D,
    Perlin3D, Quality, Scale2D, Select2D, seeded,
};

const SIZE: usize = 257;
const SEED: u64 = 2025;

// Sum over a SIZE×SIZE sweep of the unit square scaled by 8
fn sweep2<N: NoiseGenerator2D>(noise: &N) -> f64 {
    let mut total = 0.0;
    for y in 0..SIZE {
        for x in 0..SIZE {
            total += noise.get2(x as f64 / SIZE as f64 * 8.0, y as f64 / SIZE as f64 * 8.0);
        }
    }
    total
}

fn bench_perlin2(c: &mut Criterion) {
    for quality in [Quality::Fast, Quality::Standard, Quality::High] {
        let perlin = Perlin2D::new(&mut seeded(SEED), quality);
        c.bench_function(&format!("Perlin2D {:?} {}x{}", quality, SIZE, SIZE), |b| {
            b.iter(|| black_box(sweep2(&perlin)))
        });
    }
}

fn bench_perlin3(c: &mut Criterion) {
    let perlin = Perlin3D::new(&mut seeded(SEED));
    c.bench_function("Perlin3D get2 sweep", |b| b.iter(|| black_box(sweep2(&perlin))));
    c.bench_function("Perlin3D get3 64^3", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for z in 0..64 {
                for y in 0..64 {
                    for x in 0..64 {
                        total += perlin.get3(x as f64 * 0.13, y as f64 * 0.13, z as f64 * 0.13);
                    }
                }
            }
            black_box(total)
        })
    });
}

fn bench_simplex(c: &mut Criterion) {
    let simplex = OpenSimplex::new(&mut seeded(SEED));
    c.bench_function("OpenSimplex get2 sweep", |b| b.iter(|| black_box(sweep2(&simplex))));
    c.bench_function("OpenSimplex get3 64^3", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for z in 0..64 {
                for y in 0..64 {
                    for x in 0..64 {
                        total += simplex.get3(x as f64 * 0.13, y as f64 * 0.13, z as f64 * 0.13);
                    }
                }
            }
            black_box(total)
        })
    });
}

fn bench_operators(c: &mut Criterion) {
    let perlin = Perlin2D::new(&mut seeded(SEED), Quality::High);
    let simplex = OpenSimplex::new(&mut seeded(SEED + 1));

    let fbm = Fbm2D::with_params(&perlin, 6, 0.5, 2.0, 1.0);
    c.bench_function("Fbm2D 6 octaves sweep", |b| b.iter(|| black_box(sweep2(&fbm))));

    let mask = Scale2D::new(&simplex, 0.5, 0.5);
    let select = Select2D::new(&fbm, &perlin, &mask, 0.2, 0.8).with_edge_falloff(0.1);
    c.bench_function("Select2D falloff sweep", |b| b.iter(|| black_box(sweep2(&select))));
}

fn bench_builder(c: &mut Criterion) {
    let perlin = Perlin2D::new(&mut seeded(SEED), Quality::Standard);
    let fbm = Fbm2D::with_params(&perlin, 6, 0.5, 2.0, 1.0);
    let bounds = Bounds2D::new(0.0, 0.0, 8.0, 8.0);

    c.bench_function("Builder2D build + min_max", |b| {
        b.iter(|| {
            let mut builder = Builder2D::new(&fbm, SIZE, SIZE).with_bounds(bounds);
            builder.build();
            black_box(builder.min_max())
        })
    });
    c.bench_function("Builder2D build_par + min_max", |b| {
        b.iter(|| {
            let mut builder = Builder2D::new(&fbm, SIZE, SIZE).with_bounds(bounds);
            builder.build_par();
            black_box(builder.min_max())
        })
    });
}

criterion_group!(
    benches,
    bench_perlin2,
    bench_perlin3,
    bench_simplex,
    bench_operators,
    bench_builder
);
criterion_main!(benches);
