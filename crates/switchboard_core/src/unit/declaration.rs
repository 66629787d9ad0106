//! Constructor output: declared event maps and methods.
//!
//! # Invariants
//! - Model events are keyed by the closed `ModelEvent` vocabulary.
//! - Re-declaring the same key replaces the earlier handler.

use crate::error::UnitResult;
use crate::unit::event::ModelEvent;
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Handler for a view event; receives the notification payload.
pub type ViewHandler = Rc<dyn Fn(&Value) -> UnitResult<()>>;
/// Handler for a model event; receives positional arguments.
pub type ModelHandler = Rc<dyn Fn(&[Value]) -> UnitResult<()>>;
/// Named unit method callable through `Me::call`.
pub type Method = Rc<dyn Fn(&[Value]) -> UnitResult<Value>>;

pub type ViewEvents = BTreeMap<String, ViewHandler>;
pub type ModelEvents = BTreeMap<String, BTreeMap<ModelEvent, ModelHandler>>;
pub type Methods = BTreeMap<String, Method>;

/// Event interests of one unit.
#[derive(Clone, Default)]
pub struct Events {
    pub view: ViewEvents,
    pub model: ModelEvents,
}

impl Events {
    pub fn is_empty(&self) -> bool {
        self.view.is_empty() && self.model.is_empty()
    }

    /// Declared view event names, sorted.
    pub fn view_names(&self) -> Vec<String> {
        self.view.keys().cloned().collect()
    }

    /// Declared `(model_key, event)` pairs, sorted.
    pub fn model_keys(&self) -> Vec<(String, ModelEvent)> {
        self.model
            .iter()
            .flat_map(|(key, handlers)| handlers.keys().map(move |event| (key.clone(), *event)))
            .collect()
    }
}

/// Value returned by a controller constructor.
#[derive(Clone, Default)]
pub struct Declaration {
    pub(crate) events: Events,
    pub(crate) methods: Methods,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares interest in a view event within the unit's own scope.
    pub fn on_view<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Value) -> UnitResult<()> + 'static,
    {
        self.events.view.insert(event.into(), Rc::new(handler));
        self
    }

    /// Declares interest in `event` for the model keyed by `model_key`.
    pub fn on_model<F>(mut self, model_key: impl Into<String>, event: ModelEvent, handler: F) -> Self
    where
        F: Fn(&[Value]) -> UnitResult<()> + 'static,
    {
        self.events
            .model
            .entry(model_key.into())
            .or_default()
            .insert(event, Rc::new(handler));
        self
    }

    /// Adds a named method. A method called `init` runs once after registration.
    pub fn method<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> UnitResult<Value> + 'static,
    {
        self.methods.insert(name.into(), Rc::new(handler));
        self
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }
}
