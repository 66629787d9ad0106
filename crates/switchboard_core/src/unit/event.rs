//! Closed vocabulary of model event types.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Event type tag carried by every model notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelEvent {
    Call,
    Complete,
    Append,
    Create,
    Stored,
    Update,
    Delete,
    Error,
}

impl ModelEvent {
    /// Stable string id used by string-keyed callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => MODEL_EVENT_CALL,
            Self::Complete => MODEL_EVENT_COMPLETE,
            Self::Append => MODEL_EVENT_APPEND,
            Self::Create => MODEL_EVENT_CREATE,
            Self::Stored => MODEL_EVENT_STORED,
            Self::Update => MODEL_EVENT_UPDATE,
            Self::Delete => MODEL_EVENT_DELETE,
            Self::Error => MODEL_EVENT_ERROR,
        }
    }

    /// All event types in vocabulary order.
    pub fn all() -> [ModelEvent; 8] {
        [
            Self::Call,
            Self::Complete,
            Self::Append,
            Self::Create,
            Self::Stored,
            Self::Update,
            Self::Delete,
            Self::Error,
        ]
    }
}

impl Display for ModelEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelEvent {
    type Err = ModelEventError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_model_event(value)
    }
}

pub const MODEL_EVENT_CALL: &str = "call";
pub const MODEL_EVENT_COMPLETE: &str = "complete";
pub const MODEL_EVENT_APPEND: &str = "append";
pub const MODEL_EVENT_CREATE: &str = "create";
pub const MODEL_EVENT_STORED: &str = "stored";
pub const MODEL_EVENT_UPDATE: &str = "update";
pub const MODEL_EVENT_DELETE: &str = "delete";
pub const MODEL_EVENT_ERROR: &str = "error";

const SUPPORTED_MODEL_EVENT_STRINGS: &[&str] = &[
    MODEL_EVENT_CALL,
    MODEL_EVENT_COMPLETE,
    MODEL_EVENT_APPEND,
    MODEL_EVENT_CREATE,
    MODEL_EVENT_STORED,
    MODEL_EVENT_UPDATE,
    MODEL_EVENT_DELETE,
    MODEL_EVENT_ERROR,
];

/// Returns the supported model event strings.
pub fn supported_model_events() -> &'static [&'static str] {
    SUPPORTED_MODEL_EVENT_STRINGS
}

/// Parses one model event type. Surrounding whitespace is ignored; the
/// remaining text must match a vocabulary entry exactly, case included.
pub fn parse_model_event(value: &str) -> Result<ModelEvent, ModelEventError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ModelEventError::EmptyEventType);
    }

    match normalized {
        MODEL_EVENT_CALL => Ok(ModelEvent::Call),
        MODEL_EVENT_COMPLETE => Ok(ModelEvent::Complete),
        MODEL_EVENT_APPEND => Ok(ModelEvent::Append),
        MODEL_EVENT_CREATE => Ok(ModelEvent::Create),
        MODEL_EVENT_STORED => Ok(ModelEvent::Stored),
        MODEL_EVENT_UPDATE => Ok(ModelEvent::Update),
        MODEL_EVENT_DELETE => Ok(ModelEvent::Delete),
        MODEL_EVENT_ERROR => Ok(ModelEvent::Error),
        other => Err(ModelEventError::UnsupportedEventType(other.to_string())),
    }
}

/// Model event type parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEventError {
    EmptyEventType,
    UnsupportedEventType(String),
}

impl Display for ModelEventError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEventType => write!(f, "model event type must not be empty"),
            Self::UnsupportedEventType(value) => {
                write!(f, "model event type is unsupported: {value}")
            }
        }
    }
}

impl Error for ModelEventError {}
