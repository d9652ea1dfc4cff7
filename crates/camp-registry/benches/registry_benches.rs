//! Criterion benchmarks for camp-registry hot paths.
//!
//! Covers: the composite interaction handler, lazy decay, and per-actor
//! locking through `ActorCamps`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};

use camp_core::config::CampConfig;
use camp_core::traits::NoopTracker;
use camp_core::types::{ActorId, CategoryId, InteractionSubject, Zone};
use camp_registry::{ActorCamps, CampRegistry};

const T0: u64 = 1_700_000_000;

fn subjects(n: usize) -> Vec<InteractionSubject> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| InteractionSubject {
            kind: rng.gen_range(0..64),
            zone: Some(Zone {
                id: rng.gen_range(0..16),
                instanced: rng.gen_bool(0.25),
            }),
        })
        .collect()
}

fn bench_handle_interaction(c: &mut Criterion) {
    let clock = Arc::new(AtomicU64::new(T0));
    let tick = clock.clone();
    let mut reg = CampRegistry::with_clock(
        ActorId(1),
        CampConfig::default(),
        Arc::new(NoopTracker),
        move || tick.load(Ordering::Relaxed),
    )
    .unwrap();
    let subjects = subjects(1024);
    let mut i = 0usize;

    c.bench_function("handle_interaction", |b| {
        b.iter(|| {
            clock.fetch_add(7, Ordering::Relaxed);
            let subject = &subjects[i % subjects.len()];
            i += 1;
            reg.handle_interaction(black_box(Some(subject)))
        })
    });
}

fn bench_decay_all(c: &mut Criterion) {
    let clock = Arc::new(AtomicU64::new(T0));
    let tick = clock.clone();
    let mut reg = CampRegistry::with_clock(
        ActorId(1),
        CampConfig::default(),
        Arc::new(NoopTracker),
        move || tick.load(Ordering::Relaxed),
    )
    .unwrap();
    for id in 1..=256u32 {
        reg.set_interactions(CategoryId(id), 1_500);
    }

    c.bench_function("decay_all_256", |b| {
        b.iter(|| {
            clock.fetch_add(60, Ordering::Relaxed);
            black_box(reg.decay_all())
        })
    });
}

fn bench_actor_camps(c: &mut Criterion) {
    let camps =
        ActorCamps::with_clock(CampConfig::default(), Arc::new(NoopTracker), || T0).unwrap();
    let subjects = subjects(256);
    let mut i = 0usize;

    c.bench_function("actor_camps_with_actor", |b| {
        b.iter(|| {
            let subject = subjects[i % subjects.len()];
            let actor = ActorId((i % 64) as u64);
            i += 1;
            camps.with_actor(actor, |reg| reg.handle_interaction(black_box(Some(&subject))))
        })
    });
}

criterion_group!(
    benches,
    bench_handle_interaction,
    bench_decay_all,
    bench_actor_camps
);
criterion_main!(benches);
