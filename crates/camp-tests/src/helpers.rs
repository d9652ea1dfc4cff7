//! Shared test helpers for scenario and property tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use camp_core::config::CampConfig;
use camp_core::traits::ChangeTracker;
use camp_core::types::{ActorId, InteractionSubject, Zone};
use camp_registry::CampRegistry;

/// Unix time every test clock starts at.
pub const T0: u64 = 1_700_000_000;

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn starting_at(now: u64) -> Self {
        Self(Arc::new(AtomicU64::new(now)))
    }

    pub fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }
}

/// Change tracker that counts signals.
#[derive(Debug, Default)]
pub struct CountingTracker(AtomicUsize);

impl CountingTracker {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl ChangeTracker for CountingTracker {
    fn mark_changed(&self, _actor: ActorId) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A registry for actor 1 wired to a manual clock and a counting tracker.
pub fn registry(config: CampConfig) -> (CampRegistry, ManualClock, Arc<CountingTracker>) {
    let clock = ManualClock::starting_at(T0);
    let tracker = Arc::new(CountingTracker::default());
    let c = clock.clone();
    let reg = CampRegistry::with_clock(ActorId(1), config, tracker.clone(), move || c.now())
        .expect("default-derived test config is valid");
    (reg, clock, tracker)
}

/// A creature of `kind` in open-terrain zone `zone`.
pub fn creature(kind: u16, zone: u32) -> InteractionSubject {
    InteractionSubject {
        kind,
        zone: Some(Zone {
            id: zone,
            instanced: false,
        }),
    }
}
