//! Error types for camp bookkeeping.
use thiserror::Error;

use crate::types::{ActorId, CategoryId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CampError {
    #[error("invalid interaction subject: {0}")] InvalidSubject(String),
    #[error("invalid config: {0}")] InvalidConfig(String),
    #[error("record owned by {got}, expected {expected}")] OwnerMismatch { expected: ActorId, got: ActorId },
    #[error("duplicate record for category {0}")] DuplicateCategory(CategoryId),
    #[error("{0} already has a registry")] ActorExists(ActorId),
}
