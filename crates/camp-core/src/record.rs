//! Per-category interaction counter.
//!
//! Pure state transitions: no clock, no logging, no dirty signalling. The
//! caller supplies `now` and the cap, and each transition reports whether it
//! changed the record so the owning registry can decide what to signal.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::types::{ActorId, CategoryId};

/// One camp category's counter state for one actor.
///
/// Identity is `(owner, category)`: two records with the same key compare
/// equal regardless of their counters.
///
/// # Invariants
///
/// * `interactions <= cap(category)` after every registry operation
/// * `owner` never changes after creation
#[derive(Debug, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct CampRecord {
    pub category: CategoryId,
    pub owner: ActorId,
    /// Recent interactions, bounded by the category cap.
    pub interactions: u32,
    /// Unix seconds of the last decay, set or increment.
    pub last_decay: u64,
}

impl CampRecord {
    /// A fresh record with no interactions.
    pub fn new(owner: ActorId, category: CategoryId, now: u64) -> Self {
        Self {
            category,
            owner,
            interactions: 0,
            last_decay: now,
        }
    }

    /// Identity key.
    pub fn key(&self) -> (ActorId, CategoryId) {
        (self.owner, self.category)
    }

    /// Whether the counter has reached `cap`.
    pub fn is_at_cap(&self, cap: u32) -> bool {
        self.interactions >= cap
    }

    /// Remaining reward potential: `1 - interactions / cap`, in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use camp_core::record::CampRecord;
    /// use camp_core::types::{ActorId, CategoryId};
    ///
    /// let mut rec = CampRecord::new(ActorId(1), CategoryId(5), 0);
    /// rec.interactions = 1000;
    /// assert_eq!(rec.bonus(2000), 0.5);
    /// ```
    pub fn bonus(&self, cap: u32) -> f64 {
        if cap == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.interactions.min(cap)) / f64::from(cap);
        1.0 - ratio
    }

    /// Overwrite the counter, clamped to `cap`, and refresh the timestamp.
    pub fn set(&mut self, value: u32, cap: u32, now: u64) {
        self.interactions = value.min(cap);
        self.last_decay = now;
    }

    /// Add `amount`, clamped to `cap`.
    ///
    /// A record already at `cap` is left untouched (timestamp included) and
    /// `false` is returned. Otherwise the timestamp is refreshed and `true`
    /// is returned. The addition never wraps: an overflowing sum clamps to
    /// `cap`, which covers `cap == u32::MAX`.
    pub fn increment(&mut self, amount: u32, cap: u32, now: u64) -> bool {
        if self.is_at_cap(cap) {
            return false;
        }

        self.last_decay = now;
        self.interactions = match self.interactions.checked_add(amount) {
            None => cap,
            Some(sum) if sum >= cap => cap,
            Some(sum) => sum,
        };
        true
    }

    /// Subtract `amount`, floored at zero.
    pub fn decrement(&mut self, amount: u32) {
        self.interactions = self.interactions.saturating_sub(amount);
    }

    /// Apply lazy decay: one point per `interval_secs` elapsed since
    /// `last_decay`.
    ///
    /// Returns `false` (and leaves the record untouched) when less than one
    /// interval has passed, when the clock is behind `last_decay`, or when
    /// `interval_secs` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use camp_core::record::CampRecord;
    /// use camp_core::types::{ActorId, CategoryId};
    ///
    /// let mut rec = CampRecord::new(ActorId(1), CategoryId(5), 1_000);
    /// rec.interactions = 10;
    /// assert!(rec.apply_decay(1_125, 60));
    /// assert_eq!(rec.interactions, 8);
    /// assert_eq!(rec.last_decay, 1_125);
    /// ```
    pub fn apply_decay(&mut self, now: u64, interval_secs: u64) -> bool {
        let amount = decay_amount(self.last_decay, now, interval_secs);
        if amount == 0 {
            return false;
        }

        self.last_decay = now;
        self.interactions = self.interactions.saturating_sub(amount);
        true
    }
}

impl PartialEq for CampRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CampRecord {}

impl Hash for CampRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Interaction points decayed between `last` and `now`.
///
/// `floor((now - last) / interval_secs)`, zero when `now <= last` or
/// `interval_secs == 0`, saturating at `u32::MAX`.
pub fn decay_amount(last: u64, now: u64, interval_secs: u64) -> u32 {
    if interval_secs == 0 {
        return 0;
    }
    let elapsed = now.saturating_sub(last);
    u32::try_from(elapsed / interval_secs).unwrap_or(u32::MAX)
}
