use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery::kepler::{solve_kepler, KeplerSettings};

/// Uniform random mean anomaly in [0, 360)
#[inline]
fn rand_mean_anomaly(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * 360.0
}

fn bench_cases(c: &mut Criterion, name: &str, seed: u64, eccentricity: std::ops::Range<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let settings = KeplerSettings::default();
    let samples = 10_000usize;

    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| {
                        (
                            rand_mean_anomaly(&mut rng),
                            rng.random_range(eccentricity.clone()),
                        )
                    })
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    let sol = solve_kepler(black_box(m), black_box(e), &settings);
                    black_box(sol.ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Closed-form regime: e ≤ 0.006 (Venus, Neptune-like)
fn bench_closed_form(c: &mut Criterion) {
    bench_cases(c, "solve_kepler/closed_form_e<=0.006", 0xFEEDFACE, 0.0..0.006);
}

/// Planetary regime: e ∈ (0.006, 0.21] (Moon, Mercury, Mars, giants)
fn bench_planetary(c: &mut Criterion) {
    bench_cases(c, "solve_kepler/planetary_e<=0.21", 0xDEADBEEF, 0.0061..0.21);
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.99)
fn bench_high_e(c: &mut Criterion) {
    bench_cases(c, "solve_kepler/high_e_0.7..0.99", 0xBADF00D, 0.7..0.99);
}

/// Fixed "stress" case near perihelion of a very eccentric orbit.
fn bench_fixed_stress(c: &mut Criterion) {
    let settings = KeplerSettings::default();

    c.bench_function("solve_kepler/fixed_stress_case", |b| {
        b.iter(|| {
            let sol = solve_kepler(black_box(0.5), black_box(0.99), &settings);
            black_box(sol.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_closed_form, bench_planetary, bench_high_e, bench_fixed_stress
);
criterion_main!(benches);
