//! # camp-registry — Per-actor interaction decay bookkeeping.
//!
//! All counter arithmetic is integer-only; the only float is the derived
//! bonus multiplier handed to reward code.
//!
//! - **Caps**: rest, type and area camps saturate at different interaction
//!   counts.
//! - **Lazy decay**: one interaction point decays per elapsed interval,
//!   evaluated when a record is touched, never on a timer.
//! - **Bonus**: `1 - interactions / cap`, read after decay and before the
//!   current interaction is counted.
//! - **Per-actor locking**: [`ActorCamps`] owns one registry per actor behind
//!   its own mutex.

pub mod actors;
pub mod registry;

pub use actors::ActorCamps;
pub use registry::{CampRegistry, RecordEntry};
