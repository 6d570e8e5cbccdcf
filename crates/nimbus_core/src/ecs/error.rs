//! # ECS Error Types
//!
//! Errors for world operations that address something that isn't there.
//! Nothing a system does during a tick returns these.

use thiserror::Error;

use super::entity::EntityId;

/// Errors that can occur when mutating a [`World`](super::World).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was never registered, was removed, or the handle is stale.
    #[error("no such entity: {0}")]
    NoSuchEntity(EntityId),

    /// System names must be unique so removal is unambiguous.
    #[error("a system named `{0}` is already registered")]
    DuplicateSystem(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
