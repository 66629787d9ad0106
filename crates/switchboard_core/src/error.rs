//! Registration and unit failure taxonomy.
//!
//! # Invariants
//! - `InvalidRegistration` and `Duplicate` are raised before any state is touched.
//! - `Constructor` carries the unit's own error untouched in `source`.
//! - Unmet dependencies are not errors; see `Registration::Skipped`.
//! - `ModuleLoad` only carries loader failures that are not "unavailable".

use crate::loader::LoadError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for code running inside a unit (constructors, handlers, methods).
pub type UnitResult<T> = Result<T, UnitError>;

/// Malformed registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRegistration {
    MissingName,
    InvalidName(String),
    MissingParams,
    MissingScope,
    InvalidScope(String),
    MissingConstructor,
}

impl Display for InvalidRegistration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "unit name must not be empty"),
            Self::InvalidName(value) => write!(f, "unit name is invalid: {value}"),
            Self::MissingParams => write!(f, "registration params are missing"),
            Self::MissingScope => write!(f, "registration scope must not be empty"),
            Self::InvalidScope(value) => write!(f, "registration scope is invalid: {value}"),
            Self::MissingConstructor => write!(f, "controller constructor is missing"),
        }
    }
}

impl Error for InvalidRegistration {}

/// Failure returned by `register`.
#[derive(Debug)]
pub enum RegistrationError {
    Invalid(InvalidRegistration),
    Duplicate { scope: String, name: String },
    Constructor { path: String, source: UnitError },
    /// A missing dependency was fetched but failed to load.
    ModuleLoad { path: String, source: LoadError },
}

impl RegistrationError {
    /// Returns the unit-raised error for constructor failures.
    pub fn unit_error(&self) -> Option<&UnitError> {
        match self {
            Self::Constructor { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "invalid registration: {err}"),
            Self::Duplicate { scope, name } => {
                write!(f, "unit already registered: {scope}/{name}")
            }
            Self::Constructor { path, source } => {
                write!(f, "construction of {path} failed: {source}")
            }
            Self::ModuleLoad { path, source } => {
                write!(f, "dependency of {path} failed to load: {source}")
            }
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Duplicate { .. } => None,
            Self::Constructor { source, .. } => Some(source),
            Self::ModuleLoad { source, .. } => Some(source),
        }
    }
}

impl From<InvalidRegistration> for RegistrationError {
    fn from(value: InvalidRegistration) -> Self {
        Self::Invalid(value)
    }
}

/// Failure raised by unit code.
#[derive(Debug)]
pub enum UnitError {
    Raised(String),
    UnknownMethod { method: String },
    Registration(Box<RegistrationError>),
}

impl UnitError {
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised(message.into())
    }
}

impl Display for UnitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raised(message) => write!(f, "{message}"),
            Self::UnknownMethod { method } => write!(f, "unit has no method `{method}`"),
            Self::Registration(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UnitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registration(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<RegistrationError> for UnitError {
    fn from(value: RegistrationError) -> Self {
        Self::Registration(Box::new(value))
    }
}
