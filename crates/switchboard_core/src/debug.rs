//! Read-only introspection over registries and routes.
//!
//! Intended for diagnostics and tests. Obtained through `Core::debug()`,
//! which only answers while debug mode is enabled.

use crate::error::UnitResult;
use crate::router::dispatch::notify_model;
use crate::runtime::CoreInner;
use crate::unit::context::NotifyHandle;
use crate::unit::event::{ModelEvent, ModelEventError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Diagnostic namespace of one core.
pub struct Diagnostics {
    core: Rc<CoreInner>,
}

impl Diagnostics {
    pub(crate) fn new(core: Rc<CoreInner>) -> Self {
        Self { core }
    }

    /// Controller scopes mapped to their paths in registration order.
    pub fn list(&self) -> BTreeMap<String, Vec<String>> {
        self.core.controllers.borrow().list()
    }

    /// Model scopes mapped to their paths in registration order.
    pub fn model_list(&self) -> BTreeMap<String, Vec<String>> {
        self.core.models.borrow().list()
    }

    /// View events declared by the controller at `path`; empty when unknown.
    pub fn msg(&self, path: &str) -> Vec<String> {
        self.core
            .router
            .borrow()
            .view_event_names(path)
            .unwrap_or_default()
    }

    /// Notifier bound to `scope`, as a view would use it.
    pub fn app(&self, scope: &str) -> NotifyHandle {
        NotifyHandle::new(&self.core, scope)
    }

    /// Model-side notifier. The model need not be registered.
    pub fn model(&self, scope: &str, name: &str) -> ModelHandle {
        ModelHandle {
            core: self.core.clone(),
            scope: scope.to_string(),
            name: name.to_string(),
        }
    }
}

/// Handle that emits events on behalf of one model.
pub struct ModelHandle {
    core: Rc<CoreInner>,
    scope: String,
    name: String,
}

impl ModelHandle {
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prepares a notifier for `event`; nothing fires until `call`.
    pub fn notify(&self, event: ModelEvent) -> ModelNotifier {
        ModelNotifier {
            core: self.core.clone(),
            model: self.name.clone(),
            event,
        }
    }

    pub fn notify_str(&self, event: &str) -> Result<ModelNotifier, ModelEventError> {
        Ok(self.notify(event.parse()?))
    }
}

/// Deferred model notification.
pub struct ModelNotifier {
    core: Rc<CoreInner>,
    model: String,
    event: ModelEvent,
}

impl ModelNotifier {
    pub fn event(&self) -> ModelEvent {
        self.event
    }

    /// Fires the event with `args` as positional arguments.
    pub fn call(&self, args: &[Value]) -> UnitResult<()> {
        notify_model(&self.core.router, &self.model, self.event, args).map(|_| ())
    }
}
