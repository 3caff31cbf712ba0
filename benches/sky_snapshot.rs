use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery::observers::Observer;
use orrery::orrery::{Orrery, OrreryConfig};
use orrery::time::EpochOffset;

/// Random epoch offsets over 1950–2050 and random observers.
fn make_requests(rng: &mut StdRng, samples: usize) -> Vec<(EpochOffset, Observer)> {
    (0..samples)
        .map(|_| {
            let d = EpochOffset::new(rng.random_range(-18_262.0..18_262.0));
            let observer =
                Observer::new(rng.random_range(-89.0..89.0), rng.random_range(-180.0..180.0))
                    .unwrap();
            (d, observer)
        })
        .collect()
}

fn bench_snapshot(c: &mut Criterion, name: &str, config: OrreryConfig) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let orrery = Orrery::new(config);

    c.bench_function(name, |b| {
        b.iter_batched(
            || make_requests(&mut rng, 200),
            |requests| {
                for (d, observer) in requests {
                    let sky = orrery.positions(black_box(d), &observer);
                    black_box(sky.ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Positions only
fn bench_positions(c: &mut Criterion) {
    bench_snapshot(
        c,
        "sky_snapshot/positions",
        OrreryConfig {
            compute_speed: false,
            ..Default::default()
        },
    );
}

/// Positions, longitude speeds and topocentric corrections for every body
fn bench_full(c: &mut Criterion) {
    bench_snapshot(
        c,
        "sky_snapshot/speed_and_extra_accuracy",
        OrreryConfig {
            extra_accuracy: true,
            ..Default::default()
        },
    );
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_positions, bench_full
);
criterion_main!(benches);
