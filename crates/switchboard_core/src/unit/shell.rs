//! Self-reference shell handed to controller constructors.
//!
//! # Responsibility
//! - Exist before the constructor runs so closures can capture it.
//! - Receive the constructor's events and methods exactly once afterwards.
//!
//! # Invariants
//! - Every clone of `Me` points at the same cell; nothing is snapshotted.
//! - No borrow is held while a method runs, so methods may call each other.
//! - A released shell keeps its scope but drops events and methods.

use crate::error::{UnitError, UnitResult};
use crate::unit::declaration::{Declaration, Events, Methods};
use crate::unit::event::ModelEvent;
use crate::unit::UnitId;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

#[derive(Default)]
struct ShellState {
    id: Option<UnitId>,
    scope: Option<String>,
    events: Events,
    methods: Methods,
}

/// Shared handle to a unit's own state ("me").
#[derive(Clone, Default)]
pub struct Me {
    inner: Rc<RefCell<ShellState>>,
}

impl Me {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scope the unit lives in; `None` while the constructor is still running.
    pub fn scope(&self) -> Option<String> {
        self.inner.borrow().scope.clone()
    }

    /// Registration id; `None` until the unit is inserted.
    pub fn id(&self) -> Option<UnitId> {
        self.inner.borrow().id
    }

    pub fn is_populated(&self) -> bool {
        self.inner.borrow().scope.is_some()
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.inner.borrow().methods.contains_key(name)
    }

    pub fn method_names(&self) -> Vec<String> {
        self.inner.borrow().methods.keys().cloned().collect()
    }

    pub fn view_events(&self) -> Vec<String> {
        self.inner.borrow().events.view_names()
    }

    pub fn model_events(&self) -> Vec<(String, ModelEvent)> {
        self.inner.borrow().events.model_keys()
    }

    /// Invokes a method by name, resolved at call time.
    pub fn call(&self, name: &str, args: &[Value]) -> UnitResult<Value> {
        let method = self.inner.borrow().methods.get(name).cloned();
        match method {
            Some(method) => method(args),
            None => Err(UnitError::UnknownMethod {
                method: name.to_string(),
            }),
        }
    }

    /// Returns true when both handles refer to the same shell.
    pub fn same_as(&self, other: &Me) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copies the constructor result onto the shell and returns the events
    /// for the router.
    pub(crate) fn populate(&self, scope: &str, declaration: Declaration) -> Events {
        let Declaration { events, methods } = declaration;
        let mut state = self.inner.borrow_mut();
        state.scope = Some(scope.to_string());
        state.events = events.clone();
        state.methods = methods;
        events
    }

    pub(crate) fn assign_id(&self, id: UnitId) {
        self.inner.borrow_mut().id = Some(id);
    }

    /// Drops events and methods, breaking cycles through captured handles.
    pub(crate) fn release(&self) {
        let (events, methods) = {
            let mut state = self.inner.borrow_mut();
            (
                std::mem::take(&mut state.events),
                std::mem::take(&mut state.methods),
            )
        };
        // Handlers may hold `Me` clones; drop them outside the borrow.
        drop(events);
        drop(methods);
    }
}

impl Debug for Me {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Me")
            .field("id", &state.id)
            .field("scope", &state.scope)
            .field("view", &state.events.view_names())
            .field("methods", &state.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
