//! Routing tables for view and model events.

use crate::registry::scope_registry::UnitEntry;
use crate::unit::declaration::{Events, ModelHandler, ViewHandler};
use crate::unit::event::ModelEvent;
use crate::unit::UnitId;

#[derive(Clone)]
struct Route {
    id: UnitId,
    seq: u64,
    scope: String,
    path: String,
    events: Events,
}

/// Event interests of every registered controller, in registration order.
#[derive(Default)]
pub struct EventRouter {
    routes: Vec<Route>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the routes of a freshly registered unit.
    pub fn attach(&mut self, entry: &UnitEntry, events: Events) {
        self.routes.push(Route {
            id: entry.id,
            seq: entry.seq,
            scope: entry.scope.clone(),
            path: entry.path(),
            events,
        });
    }

    /// Removes the routes of one unit and hands them back for disposal.
    pub fn detach(&mut self, id: UnitId) -> Option<Events> {
        let index = self.routes.iter().position(|route| route.id == id)?;
        Some(self.routes.remove(index).events)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Declared view events for a fully-qualified path.
    pub fn view_event_names(&self, path: &str) -> Option<Vec<String>> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.events.view_names())
    }

    /// First matching view handler in `scope` registered after `after`.
    pub fn next_view_handler(
        &self,
        scope: &str,
        event: &str,
        after: Option<u64>,
    ) -> Option<(u64, String, ViewHandler)> {
        self.routes
            .iter()
            .filter(|route| after.map_or(true, |seq| route.seq > seq))
            .filter(|route| route.scope == scope)
            .find_map(|route| {
                route
                    .events
                    .view
                    .get(event)
                    .map(|handler| (route.seq, route.path.clone(), handler.clone()))
            })
    }

    /// First matching model handler in any scope registered after `after`.
    pub fn next_model_handler(
        &self,
        model_key: &str,
        event: ModelEvent,
        after: Option<u64>,
    ) -> Option<(u64, String, ModelHandler)> {
        self.routes
            .iter()
            .filter(|route| after.map_or(true, |seq| route.seq > seq))
            .find_map(|route| {
                route
                    .events
                    .model
                    .get(model_key)
                    .and_then(|handlers| handlers.get(&event))
                    .map(|handler| (route.seq, route.path.clone(), handler.clone()))
            })
    }
}
