//! Process-scoped core handle.
//!
//! # Responsibility
//! - Own the controller/model registries, the router and the live shells.
//! - Hand out the controller, model and diagnostics entry points.
//!
//! # Invariants
//! - A fresh core is empty; units only leave through explicit `destroy`.
//! - State lives behind separate `RefCell`s and no borrow outlives a single
//!   bookkeeping step, so unit code can re-enter any entry point.

use crate::config::{ConfigError, CoreConfig};
use crate::debug::Diagnostics;
use crate::error::UnitResult;
use crate::lifecycle::controller_manager::ControllerManager;
use crate::lifecycle::model_manager::ModelManager;
use crate::loader::ModuleLoader;
use crate::logging::init_logging;
use crate::registry::scope_registry::ScopeRegistry;
use crate::router::event_router::EventRouter;
use crate::unit::context::Orm;
use crate::unit::event::ModelEvent;
use crate::unit::shell::Me;
use crate::unit::UnitId;
use log::info;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub(crate) struct CoreInner {
    pub(crate) controllers: RefCell<ScopeRegistry>,
    pub(crate) models: RefCell<ScopeRegistry>,
    pub(crate) router: RefCell<EventRouter>,
    pub(crate) shells: RefCell<BTreeMap<UnitId, Me>>,
    pub(crate) orm: Orm,
    pub(crate) loader: Option<Rc<dyn ModuleLoader>>,
    pub(crate) debug: Cell<bool>,
}

/// Cloneable handle to one registration/routing core.
#[derive(Clone)]
pub struct Core {
    inner: Rc<CoreInner>,
}

impl Core {
    /// Empty core with default settings and a detached `Orm`.
    pub fn new() -> Self {
        CoreBuilder::new().build()
    }

    pub fn builder() -> CoreBuilder {
        CoreBuilder::new()
    }

    /// Builds a core from `config`, starting file logging when configured.
    pub fn start(config: CoreConfig) -> Result<Self, ConfigError> {
        CoreBuilder::new().config(config).start()
    }

    pub(crate) fn from_inner(inner: Rc<CoreInner>) -> Self {
        Self { inner }
    }

    pub fn controller(&self) -> ControllerManager {
        ControllerManager::new(self.inner.clone())
    }

    pub fn model(&self) -> ModelManager {
        ModelManager::new(self.inner.clone())
    }

    /// View notification to every controller in `scope`.
    pub fn notify(&self, event: &str, data: &Value, scope: &str) -> UnitResult<()> {
        self.controller().notify(event, data, scope)
    }

    /// Model notification to every controller, regardless of scope.
    pub fn model_notify(&self, model_key: &str, event: ModelEvent, args: &[Value]) -> UnitResult<()> {
        self.controller().model_notify(model_key, event, args)
    }

    /// Introspection surface; `None` unless debug mode is on.
    pub fn debug(&self) -> Option<Diagnostics> {
        if self.inner.debug.get() {
            Some(Diagnostics::new(self.inner.clone()))
        } else {
            None
        }
    }

    pub fn enable_debug(&self) {
        self.inner.debug.set(true);
    }

    pub fn disable_debug(&self) {
        self.inner.debug.set(false);
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.inner.debug.get()
    }

    /// The data-access callable handed to every constructor.
    pub fn orm(&self) -> Orm {
        self.inner.orm.clone()
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles a `Core` from config and collaborators.
#[derive(Default)]
pub struct CoreBuilder {
    config: CoreConfig,
    orm: Option<Orm>,
    loader: Option<Rc<dyn ModuleLoader>>,
}

impl CoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    pub fn orm(mut self, orm: Orm) -> Self {
        self.orm = Some(orm);
        self
    }

    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Rc::new(loader));
        self
    }

    /// Builds without touching process-wide logging.
    pub fn build(self) -> Core {
        Core {
            inner: Rc::new(CoreInner {
                controllers: RefCell::new(ScopeRegistry::new()),
                models: RefCell::new(ScopeRegistry::new()),
                router: RefCell::new(EventRouter::new()),
                shells: RefCell::new(BTreeMap::new()),
                orm: self.orm.unwrap_or_default(),
                loader: self.loader,
                debug: Cell::new(self.config.debug),
            }),
        }
    }

    /// Initialises logging from the config, then builds.
    pub fn start(self) -> Result<Core, ConfigError> {
        if let Some(log) = &self.config.log {
            init_logging(&log.level, &log.dir).map_err(ConfigError::Logging)?;
        }
        let debug = self.config.debug;
        let core = self.build();
        info!("event=core_start module=core status=ok debug={}", debug);
        Ok(core)
    }
}
