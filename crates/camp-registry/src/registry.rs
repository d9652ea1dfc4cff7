//! The per-actor camp registry.
//!
//! [`CampRegistry`] is the sole mutator of an actor's [`CampRecord`]s. Every
//! mutation that changes state signals the injected [`ChangeTracker`] once;
//! no-ops stay silent.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use camp_core::config::CampConfig;
use camp_core::error::CampError;
use camp_core::record::CampRecord;
use camp_core::traits::ChangeTracker;
use camp_core::types::{ActorId, CategoryId, CategoryKeys, InteractionBonus, InteractionSubject};
use tracing::{debug, error};

pub(crate) type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

pub(crate) fn system_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Result of [`CampRegistry::get_or_create`].
#[derive(Debug, Clone, Copy)]
pub enum RecordEntry<'a> {
    Existing(&'a CampRecord),
    Created(&'a CampRecord),
}

impl<'a> RecordEntry<'a> {
    pub fn record(&self) -> &'a CampRecord {
        match *self {
            Self::Existing(r) | Self::Created(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Everything a mutation needs besides the record map.
struct Context {
    actor: ActorId,
    config: CampConfig,
    tracker: Arc<dyn ChangeTracker>,
    clock: Clock,
}

impl Context {
    fn now(&self) -> u64 {
        (self.clock)()
    }

    fn cap(&self, category: CategoryId) -> u32 {
        self.config.max_interactions(category)
    }

    fn mark_changed(&self) {
        self.tracker.mark_changed(self.actor);
    }
}

/// Camp records for exactly one actor.
///
/// Not internally synchronized: callers sharing a registry across threads
/// hold a per-actor lock for the whole read-modify-write (see
/// [`ActorCamps`](crate::ActorCamps)).
pub struct CampRegistry {
    records: BTreeMap<CategoryId, CampRecord>,
    ctx: Context,
}

impl fmt::Debug for CampRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CampRegistry")
            .field("actor", &self.ctx.actor)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl CampRegistry {
    /// Create an empty registry using the system clock.
    pub fn new(
        actor: ActorId,
        config: CampConfig,
        tracker: Arc<dyn ChangeTracker>,
    ) -> Result<Self, CampError> {
        Self::with_clock(actor, config, tracker, system_now)
    }

    /// Create an empty registry with a custom clock returning Unix seconds.
    pub fn with_clock(
        actor: ActorId,
        config: CampConfig,
        tracker: Arc<dyn ChangeTracker>,
        clock: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Result<Self, CampError> {
        config.validate()?;
        Ok(Self::from_parts(actor, config, tracker, Box::new(clock)))
    }

    /// Build without validating `config`. Callers must have validated it.
    pub(crate) fn from_parts(
        actor: ActorId,
        config: CampConfig,
        tracker: Arc<dyn ChangeTracker>,
        clock: Clock,
    ) -> Self {
        Self {
            records: BTreeMap::new(),
            ctx: Context {
                actor,
                config,
                tracker,
                clock,
            },
        }
    }

    /// Load persisted records into an empty registry.
    ///
    /// Counts above the configured cap are clamped. Loading is not a change,
    /// so the tracker is not signalled.
    pub fn restore(
        mut self,
        records: impl IntoIterator<Item = CampRecord>,
    ) -> Result<Self, CampError> {
        for mut record in records {
            if record.owner != self.ctx.actor {
                return Err(CampError::OwnerMismatch {
                    expected: self.ctx.actor,
                    got: record.owner,
                });
            }
            let category = record.category;
            record.interactions = record.interactions.min(self.ctx.cap(category));
            match self.records.entry(category) {
                Entry::Occupied(_) => return Err(CampError::DuplicateCategory(category)),
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }
        debug!(actor = %self.ctx.actor, records = self.records.len(), "camp: restored");
        Ok(self)
    }

    pub fn actor(&self) -> ActorId {
        self.ctx.actor
    }

    pub fn config(&self) -> &CampConfig {
        &self.ctx.config
    }

    /// Cap for `category` under this registry's configuration.
    pub fn max_interactions(&self, category: CategoryId) -> u32 {
        self.ctx.cap(category)
    }

    // --- lookups ---

    pub fn has_record(&self, category: CategoryId) -> bool {
        self.records.contains_key(&category)
    }

    pub fn get_record(&self, category: CategoryId) -> Option<&CampRecord> {
        self.records.get(&category)
    }

    /// Return the record for `category`, creating an empty one if absent.
    pub fn get_or_create(&mut self, category: CategoryId) -> RecordEntry<'_> {
        match self.records.entry(category) {
            Entry::Occupied(slot) => RecordEntry::Existing(slot.into_mut()),
            Entry::Vacant(slot) => {
                let record = CampRecord::new(self.ctx.actor, category, self.ctx.now());
                RecordEntry::Created(slot.insert(record))
            }
        }
    }

    /// Stored interaction count, `0` when no record exists.
    pub fn current_interactions(&self, category: CategoryId) -> u32 {
        self.records
            .get(&category)
            .map(|r| r.interactions)
            .unwrap_or(0)
    }

    /// Whether an existing record has reached its cap.
    pub fn has_max_interactions(&self, category: CategoryId) -> bool {
        self.records
            .get(&category)
            .is_some_and(|r| r.is_at_cap(self.ctx.cap(category)))
    }

    /// Bonus the next interaction would see, ignoring pending decay.
    ///
    /// `1.0` when no record exists. Does not mutate.
    pub fn bonus(&self, category: CategoryId) -> f64 {
        self.records
            .get(&category)
            .map(|r| r.bonus(self.ctx.cap(category)))
            .unwrap_or(1.0)
    }

    /// All records, ordered by category. Read-only.
    pub fn records(&self) -> impl Iterator<Item = &CampRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // --- mutations ---

    fn record_mut(&mut self, category: CategoryId) -> &mut CampRecord {
        let actor = self.ctx.actor;
        let now = self.ctx.now();
        self.records
            .entry(category)
            .or_insert_with(|| CampRecord::new(actor, category, now))
    }

    /// Overwrite the count for `category`, clamped to its cap.
    pub fn set_interactions(&mut self, category: CategoryId, value: u32) {
        let now = self.ctx.now();
        let cap = self.ctx.cap(category);
        let record = self.record_mut(category);
        record.set(value, cap, now);
        let interactions = record.interactions;
        self.ctx.mark_changed();
        debug!(actor = %self.ctx.actor, %category, interactions, "camp: set");
    }

    /// Add `amount` interactions to `category`, clamped to its cap.
    ///
    /// Returns `false` without touching the record when it is already at
    /// cap.
    pub fn increment(&mut self, category: CategoryId, amount: u32) -> bool {
        let now = self.ctx.now();
        let cap = self.ctx.cap(category);
        let record = self.record_mut(category);
        if !record.increment(amount, cap, now) {
            debug!(actor = %self.ctx.actor, %category, cap, "camp: increment skipped at cap");
            return false;
        }
        let interactions = record.interactions;
        self.ctx.mark_changed();
        debug!(actor = %self.ctx.actor, %category, amount, interactions, "camp: increment");
        true
    }

    /// Subtract `amount` interactions from `category`, floored at zero.
    ///
    /// No-op when no record exists.
    pub fn decrement(&mut self, category: CategoryId, amount: u32) -> bool {
        let Some(record) = self.records.get_mut(&category) else {
            return false;
        };
        record.decrement(amount);
        let interactions = record.interactions;
        self.ctx.mark_changed();
        debug!(actor = %self.ctx.actor, %category, amount, interactions, "camp: decrement");
        true
    }

    /// Remove the record for `category`. Returns whether one existed.
    pub fn erase_record(&mut self, category: CategoryId) -> bool {
        if self.records.remove(&category).is_none() {
            return false;
        }
        self.ctx.mark_changed();
        debug!(actor = %self.ctx.actor, %category, "camp: erased");
        true
    }

    /// Remove every record. Signals the tracker once if anything was removed.
    pub fn erase_all(&mut self) -> usize {
        let removed = self.records.len();
        if removed == 0 {
            return 0;
        }
        self.records.clear();
        self.ctx.mark_changed();
        debug!(actor = %self.ctx.actor, removed, "camp: erased all");
        removed
    }

    // --- decay ---

    /// Apply pending decay to `category`. Returns whether anything changed.
    pub fn apply_decay(&mut self, category: CategoryId) -> bool {
        let now = self.ctx.now();
        let interval = self.ctx.config.decay_interval_secs;
        let Some(record) = self.records.get_mut(&category) else {
            return false;
        };
        if !record.apply_decay(now, interval) {
            return false;
        }
        let interactions = record.interactions;
        self.ctx.mark_changed();
        debug!(actor = %self.ctx.actor, %category, interactions, "camp: decayed");
        true
    }

    /// Apply pending decay to every record. Signals the tracker at most once.
    pub fn decay_all(&mut self) -> usize {
        let now = self.ctx.now();
        let interval = self.ctx.config.decay_interval_secs;
        let decayed = self
            .records
            .values_mut()
            .map(|r| r.apply_decay(now, interval))
            .filter(|&changed| changed)
            .count();
        if decayed > 0 {
            self.ctx.mark_changed();
            debug!(actor = %self.ctx.actor, decayed, "camp: decayed all");
        }
        decayed
    }

    // --- composite ---

    /// Charge one interaction against `category` and return the bonus it
    /// earned.
    ///
    /// Order matters: decay first, read the bonus, then count the current
    /// interaction, so the bonus reflects pressure up to but excluding this
    /// event.
    fn charge(&mut self, category: CategoryId) -> f64 {
        let now = self.ctx.now();
        let cap = self.ctx.cap(category);
        let interval = self.ctx.config.decay_interval_secs;
        let record = self.record_mut(category);

        let decayed = record.apply_decay(now, interval);
        let bonus = record.bonus(cap);
        let incremented = record.increment(1, cap, now);
        let interactions = record.interactions;

        if decayed || incremented {
            self.ctx.mark_changed();
        }
        debug!(actor = %self.ctx.actor, %category, bonus, interactions, "camp: charged");
        bonus
    }

    /// Charge every present key and collect the bonuses. Absent keys stay at
    /// `0.0`.
    pub fn handle_keys(&mut self, keys: CategoryKeys) -> InteractionBonus {
        let mut bonus = InteractionBonus::default();
        if let Some(key) = keys.type_key {
            bonus.type_bonus = self.charge(key);
        }
        if let Some(key) = keys.area_key {
            bonus.area_bonus = self.charge(key);
        }
        if let Some(key) = keys.rest_key {
            bonus.rest_bonus = self.charge(key);
        }
        bonus
    }

    /// Handle a gameplay interaction, e.g. a defeated creature.
    ///
    /// An absent or invalid subject is logged at error level and yields an
    /// all-zero bonus without touching any record.
    pub fn handle_interaction(&mut self, subject: Option<&InteractionSubject>) -> InteractionBonus {
        let keys = subject
            .ok_or_else(|| CampError::InvalidSubject("no subject".into()))
            .and_then(InteractionSubject::category_keys);

        match keys {
            Ok(keys) => self.handle_keys(keys),
            Err(e) => {
                error!(actor = %self.ctx.actor, "camp: interaction rejected: {e}");
                InteractionBonus::default()
            }
        }
    }
}
