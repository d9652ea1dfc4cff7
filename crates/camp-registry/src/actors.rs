//! One registry per actor, each behind its own lock.
//!
//! Actors never share records. A gameplay tick for one actor locks only that
//! actor's registry for the full `get_or_create -> decay -> bonus ->
//! increment` sequence; other actors proceed in parallel.

use std::sync::Arc;

use camp_core::config::CampConfig;
use camp_core::error::CampError;
use camp_core::traits::ChangeTracker;
use camp_core::types::ActorId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::registry::{system_now, CampRegistry};

type SharedClock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Registries for every live actor.
pub struct ActorCamps {
    registries: DashMap<ActorId, Arc<Mutex<CampRegistry>>>,
    config: CampConfig,
    tracker: Arc<dyn ChangeTracker>,
    clock: SharedClock,
}

impl std::fmt::Debug for ActorCamps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorCamps")
            .field("actors", &self.registries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ActorCamps {
    /// Create an empty set using the system clock.
    pub fn new(config: CampConfig, tracker: Arc<dyn ChangeTracker>) -> Result<Self, CampError> {
        Self::with_clock(config, tracker, system_now)
    }

    /// Create an empty set with a custom clock shared by every registry.
    pub fn with_clock(
        config: CampConfig,
        tracker: Arc<dyn ChangeTracker>,
        clock: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Result<Self, CampError> {
        config.validate()?;
        Ok(Self {
            registries: DashMap::new(),
            config,
            tracker,
            clock: Arc::new(clock),
        })
    }

    fn new_registry(&self, actor: ActorId) -> CampRegistry {
        let clock = Arc::clone(&self.clock);
        CampRegistry::from_parts(
            actor,
            self.config.clone(),
            Arc::clone(&self.tracker),
            Box::new(move || clock()),
        )
    }

    fn registry(&self, actor: ActorId) -> Arc<Mutex<CampRegistry>> {
        let entry = self.registries.entry(actor).or_insert_with(|| {
            debug!(%actor, "camp: registry created");
            Arc::new(Mutex::new(self.new_registry(actor)))
        });
        Arc::clone(&*entry)
    }

    /// Run `f` against `actor`'s registry under that actor's lock, creating
    /// the registry on first use.
    ///
    /// The map shard is released before `f` runs, so a slow closure only
    /// blocks its own actor.
    ///
    /// The per-actor lock is not reentrant: calling `with_actor` for the same
    /// actor from inside `f` deadlocks.
    pub fn with_actor<R>(&self, actor: ActorId, f: impl FnOnce(&mut CampRegistry) -> R) -> R {
        let registry = self.registry(actor);
        let mut guard = registry.lock();
        f(&mut *guard)
    }

    /// Install a registry restored from storage.
    ///
    /// Fails with [`CampError::ActorExists`] if the actor already has a
    /// registry; `remove` it first to replace it.
    pub fn insert(&self, registry: CampRegistry) -> Result<(), CampError> {
        if registry.config() != &self.config {
            return Err(CampError::InvalidConfig(format!(
                "registry for {} uses a different config",
                registry.actor()
            )));
        }
        match self.registries.entry(registry.actor()) {
            Entry::Occupied(_) => Err(CampError::ActorExists(registry.actor())),
            Entry::Vacant(slot) => {
                debug!(actor = %registry.actor(), records = registry.len(), "camp: registry installed");
                slot.insert(Arc::new(Mutex::new(registry)));
                Ok(())
            }
        }
    }

    /// Drop `actor`'s registry, e.g. when the actor leaves the world.
    pub fn remove(&self, actor: ActorId) -> bool {
        self.registries.remove(&actor).is_some()
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.registries.contains_key(&actor)
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}
