use crate::EventKind;
use thiserror::Error;

/// Raised when a decoded event does not satisfy the schema of its event kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("{kind} event carries no arguments")]
    MissingArgs { kind: EventKind },

    #[error("{kind} event is missing field(s): {}", fields.join(", "))]
    MissingFields {
        kind: EventKind,
        fields: Vec<&'static str>,
    },

    #[error("{kind} event field {field} is not a {expected}")]
    MistypedField {
        kind: EventKind,
        field: &'static str,
        expected: &'static str,
    },

    #[error("expected a {expected} event, got {actual}")]
    KindMismatch { expected: EventKind, actual: String },

    #[error("{kind} record reads more fields than its schema lists")]
    SchemaExhausted { kind: EventKind },

    #[error("unknown event kind: {0}")]
    UnknownKind(String),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid event format: {0}")]
    InvalidEventFormat(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Event source error: {0}")]
    Source(String),
}
