//! Event routing for view, model and application notifications.
//!
//! # Responsibility
//! - Hold each controller's declared handlers under its registration.
//! - Fan a notification out to every matching handler, synchronously.
//!
//! # Invariants
//! - View dispatch only considers units of the target scope.
//! - Model dispatch matches `(model_key, event)` across all scopes.

pub mod dispatch;
pub mod event_router;
