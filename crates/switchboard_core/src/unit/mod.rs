//! Unit data model: identifiers, declarations, shells and context handles.
//!
//! # Responsibility
//! - Define what a controller/model unit is made of.
//! - Validate unit names and scopes before any registry sees them.
//!
//! # Invariants
//! - A unit is identified by `(scope, name)`; its path is `scope/name`.
//! - Names and scopes are non-blank and never contain `/`, so a path splits
//!   back into exactly one scope and one name. Any other text is accepted.

pub mod context;
pub mod declaration;
pub mod event;
pub mod shell;

use crate::error::InvalidRegistration;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Per-registration identifier, fresh for every successful registration.
pub type UnitId = Uuid;

static SEGMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/]+$").expect("segment pattern is a valid regex"));

/// Fully-qualified unit path.
pub fn unit_path(scope: &str, name: &str) -> String {
    format!("{scope}/{name}")
}

/// Checks a unit name; empty and malformed names are distinct failures.
pub fn validate_name(name: &str) -> Result<(), InvalidRegistration> {
    if name.trim().is_empty() {
        return Err(InvalidRegistration::MissingName);
    }
    if !SEGMENT_PATTERN.is_match(name) {
        return Err(InvalidRegistration::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Checks a scope value taken from registration params.
pub fn validate_scope(scope: Option<&str>) -> Result<&str, InvalidRegistration> {
    let scope = match scope {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(InvalidRegistration::MissingScope),
    };
    if !SEGMENT_PATTERN.is_match(scope) {
        return Err(InvalidRegistration::InvalidScope(scope.to_string()));
    }
    Ok(scope)
}
