//! Error types for stat derivation and combat resolution.
//!
//! Every recoverable failure is represented by the `CombatError` enum.
//! Failures are raised at the action boundary before any actor state is
//! touched, so callers can log them and carry on with the encounter.

use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[StatId]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A payable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Hp,
    Mp,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Hp => write!(f, "HP"),
            Resource::Mp => write!(f, "MP"),
        }
    }
}

/// Errors that can occur while building actors or resolving actions.
///
/// # Examples
///
/// ```rust
/// use skirmish::CombatError;
///
/// let err = CombatError::UnknownReference {
///     kind: "skill",
///     id: "fireball".to_string(),
/// };
/// assert_eq!(err.to_string(), "Unknown skill: fireball");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CombatError {
    /// A content record lacks a required field with no safe default.
    #[error("{record} '{id}' is missing required field '{field}'")]
    ConfigurationMissing {
        record: &'static str,
        id: String,
        field: &'static str,
    },

    /// A content record has every required field but could not be decoded.
    #[error("{record} '{id}' is malformed: {reason}")]
    MalformedRecord {
        record: &'static str,
        id: String,
        reason: String,
    },

    /// The actor cannot pay an action's cost.
    #[error("{actor} needs {required} {resource} but has {available}")]
    InsufficientResource {
        actor: String,
        resource: Resource,
        required: u32,
        available: u32,
    },

    /// An action or factory call referenced content that is not loaded.
    #[error("Unknown {kind}: {id}")]
    UnknownReference { kind: &'static str, id: String },

    /// A session was asked about an actor it does not hold.
    #[error("Unknown actor in encounter: {0}")]
    UnknownActor(String),

    /// A session was asked to process a turn after it finished.
    #[error("Encounter is already finished")]
    EncounterFinished,

    /// A dependency cycle was detected between rating formulas.
    ///
    /// If `a` depends on `b` and `b` depends on `a`, the path is `[a, b, a]`.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<StatId> },

    /// Rules could not be parsed or hold values outside their domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CombatError>;
