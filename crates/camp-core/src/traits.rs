//! Collaborator interfaces for the camp registry.
//!
//! - [`ChangeTracker`] — dirty sink observed by the persistence layer

use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::ActorId;

/// Receives "changes pending" signals when a registry mutates an actor's
/// camp state.
///
/// The registry never performs I/O. A storage layer watches this signal to
/// decide when to write the actor out.
pub trait ChangeTracker: Send + Sync {
    /// Mark `actor` as having unsaved camp changes.
    fn mark_changed(&self, actor: ActorId);
}

/// Tracker that discards every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl ChangeTracker for NoopTracker {
    fn mark_changed(&self, _actor: ActorId) {}
}

/// Single-actor dirty flag.
///
/// Set by [`ChangeTracker::mark_changed`], cleared by [`DirtyFlag::take`].
#[derive(Debug, Default)]
pub struct DirtyFlag {
    dirty: AtomicBool,
}

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether changes are pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}

impl ChangeTracker for DirtyFlag {
    fn mark_changed(&self, _actor: ActorId) {
        self.dirty.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_flag_take_clears() {
        let flag = DirtyFlag::new();
        assert!(!flag.is_dirty());
        flag.mark_changed(ActorId(1));
        assert!(flag.is_dirty());
        assert!(flag.take());
        assert!(!flag.is_dirty());
        assert!(!flag.take());
    }

    #[test]
    fn tracker_is_object_safe() {
        let flag = DirtyFlag::new();
        let dyn_t: &dyn ChangeTracker = &flag;
        dyn_t.mark_changed(ActorId(3));
        assert!(flag.is_dirty());

        let noop: &dyn ChangeTracker = &NoopTracker;
        noop.mark_changed(ActorId(3));
    }
}
