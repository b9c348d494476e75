//! Error types for the agenda core.

use thiserror::Error;

use crate::item::ItemKind;

/// Errors that can occur in store, recurrence and reminder operations.
///
/// The `Display` text is the short message shown to the user.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Cannot create events in the past")]
    EmptyRecurrence,

    #[error("The events already exist in the calendar")]
    DuplicateEvent,

    #[error("{kind} not found: {id}")]
    NotFound { kind: ItemKind, id: String },

    #[error("Could not save changes: {0}")]
    Persistence(String),

    #[error("Invalid recurrence rule: {0}")]
    Recurrence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AgendaError {
    fn from(e: serde_json::Error) -> Self {
        AgendaError::Serialization(e.to_string())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
