//! # camp-core
//! Foundation types and traits for camp interaction decay.

pub mod config;
pub mod constants;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;
