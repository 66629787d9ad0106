//! Registration, lifecycle and event routing core for scoped controllers
//! and models.
//!
//! Units are declared by name inside a scope. Controllers declare view and
//! model event interests; the core routes view notifications by scope and
//! model notifications by `(model_key, event_type)` across all scopes.

pub mod config;
pub mod debug;
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod logging;
pub mod registry;
pub mod router;
pub mod runtime;
pub mod unit;

pub use config::{ConfigError, CoreConfig, LogConfig};
pub use debug::{Diagnostics, ModelHandle, ModelNotifier};
pub use error::{InvalidRegistration, RegistrationError, UnitError, UnitResult};
pub use lifecycle::controller_manager::{
    Constructor, ControllerManager, ControllerParams, INIT_METHOD,
};
pub use lifecycle::model_manager::{ModelManager, ModelParams};
pub use lifecycle::Registration;
pub use loader::{LoadError, ModuleLoader};
pub use logging::{default_log_level, init_logging, logging_status};
pub use runtime::{Core, CoreBuilder};
pub use unit::context::{AppHandle, NotifyHandle, Orm, PageHandle};
pub use unit::declaration::{Declaration, Events, ModelHandler, Method, ViewHandler};
pub use unit::event::{parse_model_event, supported_model_events, ModelEvent, ModelEventError};
pub use unit::shell::Me;
pub use unit::{unit_path, UnitId};

/// Minimal health-check API for integration smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
