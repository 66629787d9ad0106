//! Scope bookkeeping and dependency gating.
//!
//! # Responsibility
//! - Track which units exist under which scope, in registration order.
//! - Answer whether a controller's declared models are all present.
//!
//! # Invariants
//! - `(scope, name)` pairs are unique within one registry.
//! - Registry mutation never runs unit code.

pub mod dependency_gate;
pub mod scope_registry;
