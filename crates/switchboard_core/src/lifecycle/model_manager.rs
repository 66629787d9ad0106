//! Model registration and teardown.
//!
//! A model is an existence marker: it satisfies controller dependencies and
//! anchors model-event dispatch by name. Nothing is constructed.

use crate::error::{InvalidRegistration, RegistrationError};
use crate::lifecycle::{request_missing, Registration};
use crate::registry::dependency_gate::missing_dependencies;
use crate::runtime::CoreInner;
use crate::unit::{unit_path, validate_name, validate_scope};
use log::{debug, info, warn};
use std::rc::Rc;

/// Registration input for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelParams {
    scope: Option<String>,
    uses: Vec<String>,
}

impl ModelParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `ModelParams::new().scope(scope)`.
    pub fn in_scope(scope: impl Into<String>) -> Self {
        Self::new().scope(scope)
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn uses<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uses = models.into_iter().map(Into::into).collect();
        self
    }

    fn is_empty(&self) -> bool {
        self.scope.is_none() && self.uses.is_empty()
    }
}

/// Entry point for model units.
pub struct ModelManager {
    core: Rc<CoreInner>,
}

impl ModelManager {
    pub(crate) fn new(core: Rc<CoreInner>) -> Self {
        Self { core }
    }

    /// Registers `name` under `params.scope`, gated on `params.uses`.
    pub fn register(
        &self,
        name: &str,
        params: ModelParams,
    ) -> Result<Registration, RegistrationError> {
        validate_name(name)?;
        if params.is_empty() {
            return Err(InvalidRegistration::MissingParams.into());
        }
        let scope = validate_scope(params.scope.as_deref())?;
        if self.core.models.borrow().contains(scope, name) {
            warn!(
                "event=model_register module=lifecycle status=error path={} reason=duplicate",
                unit_path(scope, name)
            );
            return Err(RegistrationError::Duplicate {
                scope: scope.to_string(),
                name: name.to_string(),
            });
        }

        let path = unit_path(scope, name);
        let missing = missing_dependencies(&self.core.models.borrow(), &params.uses);
        if !missing.is_empty() {
            info!(
                "event=model_register module=lifecycle status=skipped path={} missing={:?}",
                path, missing
            );
            request_missing(&self.core, &path, &missing)?;
            return Ok(Registration::Skipped { path, missing });
        }

        let entry = self.core.models.borrow_mut().insert(scope, name);
        info!(
            "event=model_register module=lifecycle status=ok path={} id={}",
            path, entry.id
        );
        Ok(Registration::Registered { id: entry.id, path })
    }

    /// Removes `(scope, name)`. Controllers that use the model stay registered.
    pub fn destroy(&self, name: &str, scope: &str) -> bool {
        let removed = self.core.models.borrow_mut().remove(scope, name);
        match removed {
            Some(entry) => {
                info!(
                    "event=model_destroy module=lifecycle status=ok path={} id={}",
                    entry.path(),
                    entry.id
                );
                true
            }
            None => {
                debug!(
                    "event=model_destroy module=lifecycle status=skipped path={}",
                    unit_path(scope, name)
                );
                false
            }
        }
    }

    pub fn contains(&self, name: &str, scope: &str) -> bool {
        self.core.models.borrow().contains(scope, name)
    }
}
