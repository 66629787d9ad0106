//! Controller registration, construction and teardown.
//!
//! Construction is two-phase: an empty `Me` shell is allocated and handed to
//! the constructor, then the returned declaration is copied onto that same
//! shell. Closures that captured `Me` during construction therefore see the
//! populated unit when they later run.

use crate::error::{InvalidRegistration, RegistrationError, UnitError, UnitResult};
use crate::lifecycle::{request_missing, Registration};
use crate::registry::dependency_gate::missing_dependencies;
use crate::registry::scope_registry::UnitEntry;
use crate::router::dispatch::{notify_model, notify_view};
use crate::runtime::CoreInner;
use crate::unit::context::{AppHandle, NotifyHandle, Orm, PageHandle};
use crate::unit::declaration::Declaration;
use crate::unit::event::ModelEvent;
use crate::unit::shell::Me;
use crate::unit::{unit_path, validate_name, validate_scope, UnitId};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::rc::Rc;

/// Method run once, with no arguments, right after registration.
pub const INIT_METHOD: &str = "init";

/// Controller constructor: `(me, app, page, orm) -> declaration`.
pub type Constructor = Box<dyn FnOnce(Me, AppHandle, PageHandle, Orm) -> UnitResult<Declaration>>;

/// Registration input for one controller.
#[derive(Default)]
pub struct ControllerParams {
    scope: Option<String>,
    uses: Vec<String>,
    constr: Option<Constructor>,
}

impl ControllerParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Models that must be registered before this controller is built.
    pub fn uses<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uses = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn constr<F>(mut self, constructor: F) -> Self
    where
        F: FnOnce(Me, AppHandle, PageHandle, Orm) -> UnitResult<Declaration> + 'static,
    {
        self.constr = Some(Box::new(constructor));
        self
    }

    fn is_empty(&self) -> bool {
        self.scope.is_none() && self.uses.is_empty() && self.constr.is_none()
    }
}

/// Entry point for controller units.
pub struct ControllerManager {
    core: Rc<CoreInner>,
}

impl ControllerManager {
    pub(crate) fn new(core: Rc<CoreInner>) -> Self {
        Self { core }
    }

    /// Registers `name` under `params.scope`.
    ///
    /// # Errors
    /// - `Invalid` for a missing/malformed name, empty params, missing scope
    ///   or missing constructor.
    /// - `Duplicate` when `(scope, name)` is taken, checked before and after
    ///   construction.
    /// - `Constructor` when the constructor or `init` fails; every entry added
    ///   for the unit is rolled back first.
    /// - `ModuleLoad` when a missing dependency was fetched but failed to
    ///   load. Unavailable dependencies still yield `Registration::Skipped`.
    pub fn register(
        &self,
        name: &str,
        params: ControllerParams,
    ) -> Result<Registration, RegistrationError> {
        validate_name(name)?;
        if params.is_empty() {
            return Err(InvalidRegistration::MissingParams.into());
        }
        let ControllerParams {
            scope,
            uses,
            constr,
        } = params;
        let scope = validate_scope(scope.as_deref())?;
        let Some(constr) = constr else {
            return Err(InvalidRegistration::MissingConstructor.into());
        };
        self.ensure_vacant(scope, name)?;

        let path = unit_path(scope, name);
        let missing = missing_dependencies(&self.core.models.borrow(), &uses);
        if !missing.is_empty() {
            info!(
                "event=controller_register module=lifecycle status=skipped path={} missing={:?}",
                path, missing
            );
            request_missing(&self.core, &path, &missing)?;
            return Ok(Registration::Skipped { path, missing });
        }

        let me = Me::new();
        let app = NotifyHandle::new(&self.core, scope);
        let page = NotifyHandle::new(&self.core, scope);
        let declaration = match constr(me.clone(), app, page, self.core.orm.clone()) {
            Ok(declaration) => declaration,
            Err(source) => {
                me.release();
                error!(
                    "event=controller_register module=lifecycle status=error path={} stage=constructor error={}",
                    path, source
                );
                return Err(RegistrationError::Constructor { path, source });
            }
        };
        // The constructor may have registered the same pair re-entrantly.
        if let Err(err) = self.ensure_vacant(scope, name) {
            me.release();
            return Err(err);
        }

        let events = me.populate(scope, declaration);
        let view_routes = events.view.len();
        let model_routes = events.model_keys().len();
        let entry = self.core.controllers.borrow_mut().insert(scope, name);
        me.assign_id(entry.id);
        self.core.router.borrow_mut().attach(&entry, events);
        self.core.shells.borrow_mut().insert(entry.id, me.clone());

        let has_init = me.has_method(INIT_METHOD);
        if has_init {
            if let Err(source) = me.call(INIT_METHOD, &[]) {
                self.rollback(&entry);
                error!(
                    "event=controller_register module=lifecycle status=error path={} stage=init error={}",
                    path, source
                );
                return Err(RegistrationError::Constructor { path, source });
            }
        }

        info!(
            "event=controller_register module=lifecycle status=ok path={} id={} uses={:?} view_routes={} model_routes={} init={}",
            path, entry.id, uses, view_routes, model_routes, has_init
        );
        Ok(Registration::Registered { id: entry.id, path })
    }

    /// Removes `(scope, name)` with its routes. Returns whether a unit was removed.
    pub fn destroy(&self, name: &str, scope: &str) -> bool {
        let removed = self.core.controllers.borrow_mut().remove(scope, name);
        match removed {
            Some(entry) => {
                self.teardown(entry.id);
                info!(
                    "event=controller_destroy module=lifecycle status=ok path={} id={}",
                    entry.path(),
                    entry.id
                );
                true
            }
            None => {
                debug!(
                    "event=controller_destroy module=lifecycle status=skipped path={}",
                    unit_path(scope, name)
                );
                false
            }
        }
    }

    /// Fans a view event out to every controller in `scope`.
    pub fn notify(&self, event: &str, data: &Value, scope: &str) -> UnitResult<()> {
        notify_view(&self.core.router, event, data, scope).map(|_| ())
    }

    /// Fans a model event out to every controller that declared
    /// `(model_key, event)`, whatever its scope.
    pub fn model_notify(&self, model_key: &str, event: ModelEvent, args: &[Value]) -> UnitResult<()> {
        notify_model(&self.core.router, model_key, event, args).map(|_| ())
    }

    /// Same as `model_notify` with a string event type.
    pub fn model_notify_str(&self, model_key: &str, event: &str, args: &[Value]) -> UnitResult<()> {
        let event = event
            .parse::<ModelEvent>()
            .map_err(|err| UnitError::raised(err.to_string()))?;
        self.model_notify(model_key, event, args)
    }

    pub fn contains(&self, name: &str, scope: &str) -> bool {
        self.core.controllers.borrow().contains(scope, name)
    }

    /// Live shell of a registered controller.
    pub fn shell(&self, name: &str, scope: &str) -> Option<Me> {
        let id = self.core.controllers.borrow().get(scope, name)?.id;
        self.core.shells.borrow().get(&id).cloned()
    }

    fn ensure_vacant(&self, scope: &str, name: &str) -> Result<(), RegistrationError> {
        if self.core.controllers.borrow().contains(scope, name) {
            warn!(
                "event=controller_register module=lifecycle status=error path={} reason=duplicate",
                unit_path(scope, name)
            );
            return Err(RegistrationError::Duplicate {
                scope: scope.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn rollback(&self, entry: &UnitEntry) {
        self.core.controllers.borrow_mut().remove_id(entry.id);
        self.teardown(entry.id);
        warn!(
            "event=controller_rollback module=lifecycle status=ok path={} id={}",
            entry.path(),
            entry.id
        );
    }

    fn teardown(&self, id: UnitId) {
        let routes = self.core.router.borrow_mut().detach(id);
        let shell = self.core.shells.borrow_mut().remove(&id);
        drop(routes);
        if let Some(shell) = shell {
            shell.release();
        }
    }
}
