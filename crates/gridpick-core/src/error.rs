//! Error types for gridpick

use thiserror::Error;

use crate::domain::RaceId;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Team,
    Driver,
    Race,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Team => "team",
            EntityKind::Driver => "driver",
            EntityKind::Race => "race",
        };
        f.write_str(name)
    }
}

/// Main error type for store and engine operations.
///
/// None of these are retried; all are surfaced synchronously to the caller
/// for user-facing display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// A delete was blocked because dependent rows still reference the
    /// entity. Distinct from `NotFound` so callers can render a specific
    /// message.
    #[error("cannot delete {kind} {id}: it still has {dependents}")]
    HasDependents {
        kind: EntityKind,
        id: i64,
        dependents: &'static str,
    },

    /// A pick mutation was attempted on a race that already has recorded
    /// results.
    #[error("race {race} is closed: results have been recorded")]
    RaceClosed { race: RaceId },
}

/// Result type alias for gridpick operations
pub type Result<T> = std::result::Result<T, StoreError>;
