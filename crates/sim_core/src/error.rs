//! Error types for the simulation core.
//!
//! Scenario input problems surface as [ScenarioError] before any event runs.
//! Everything raised while the event loop is active is a [SimError]; those
//! indicate a sequencing bug rather than a recoverable condition.

use std::path::PathBuf;

use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Fatal failures of the event loop.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("event queue is empty")]
    EmptyQueue,

    #[error("invariant violated for {entity}: {reason}")]
    InvariantViolation { entity: String, reason: String },

    #[error("entity {0:?} is not part of the simulation")]
    UnknownEntity(Entity),

    #[error("{event} at t={timestamp} failed")]
    EventFailed {
        timestamp: u64,
        event: &'static str,
        #[source]
        source: Box<SimError>,
    },

    #[error("simulation has already run; build a new one per scenario")]
    AlreadyRun,

    #[error("simulation did not drain after {0} steps")]
    StepLimitExceeded(usize),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

impl SimError {
    pub(crate) fn invariant(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::InvariantViolation {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

/// Shorthand result type for the event loop.
pub type SimResult<T> = Result<T, SimError>;

/// Malformed or inconsistent scenario input.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },

    #[error("line {line}: unknown event kind '{value}'")]
    UnknownEventKind { line: usize, value: String },

    #[error("line {line}: {source}")]
    InvalidPosition {
        line: usize,
        #[source]
        source: PositionParseError,
    },

    #[error("line {line}: speed must be a positive integer, got '{value}'")]
    InvalidSpeed { line: usize, value: String },

    #[error("line {line}: patience must be a non-negative integer, got '{value}'")]
    InvalidPatience { line: usize, value: String },

    #[error("line {line}: unexpected trailing input '{value}'")]
    TrailingTokens { line: usize, value: String },

    #[error("{kind} '{id}' appears more than once")]
    DuplicateIdentity { kind: &'static str, id: String },

    #[error("failed to read scenario {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A `row,col` token that does not describe a grid position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid position '{0}', expected 'row,col'")]
pub struct PositionParseError(pub String);

/// Failures writing telemetry to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
