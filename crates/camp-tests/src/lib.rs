//! Scenario and property test suite for camp bookkeeping.
//!
//! Integration tests drive [`camp_registry::CampRegistry`] through the
//! public surface only, with a manual clock and a counting change tracker.

pub mod helpers;
