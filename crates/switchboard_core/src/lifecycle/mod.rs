//! Unit lifecycle: validation, construction, registration and teardown.
//!
//! # Responsibility
//! - Turn registration params into registered units, or reject them.
//! - Keep registry, router and shells consistent across failures.
//!
//! # Invariants
//! - Registration is atomic: on any error nothing stays observable.
//! - Unmet dependencies skip registration without an error, unless the loader
//!   reports that a requested module failed after being fetched.
//! - `destroy` of an absent unit is a no-op.

pub mod controller_manager;
pub mod model_manager;

use crate::error::RegistrationError;
use crate::runtime::CoreInner;
use crate::unit::UnitId;
use log::{error, warn};

/// Successful outcome of a `register` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered { id: UnitId, path: String },
    /// Declared models are not registered yet; nothing was constructed.
    Skipped { path: String, missing: Vec<String> },
}

impl Registration {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }

    pub fn id(&self) -> Option<UnitId> {
        match self {
            Self::Registered { id, .. } => Some(*id),
            Self::Skipped { .. } => None,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Registered { path, .. } | Self::Skipped { path, .. } => path,
        }
    }
}

/// Asks the configured loader for missing modules.
///
/// Unavailable modules only warn. Any other loader failure is returned.
pub(crate) fn request_missing(
    core: &CoreInner,
    path: &str,
    missing: &[String],
) -> Result<(), RegistrationError> {
    let Some(loader) = core.loader.clone() else {
        return Ok(());
    };
    match loader.request(missing) {
        Ok(()) => Ok(()),
        Err(err) if err.is_unavailable() => {
            warn!(
                "event=module_request module=lifecycle status=skipped path={} modules={:?} error={}",
                path, missing, err
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=module_request module=lifecycle status=error path={} modules={:?} error={}",
                path, missing, err
            );
            Err(RegistrationError::ModuleLoad {
                path: path.to_string(),
                source: err,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Registration;
    use uuid::Uuid;

    #[test]
    fn exposes_outcome_details() {
        let id = Uuid::new_v4();
        let registered = Registration::Registered {
            id,
            path: "myScope/myController".to_string(),
        };
        assert!(registered.is_registered());
        assert_eq!(registered.id(), Some(id));
        assert_eq!(registered.path(), "myScope/myController");

        let skipped = Registration::Skipped {
            path: "myScope/myController".to_string(),
            missing: vec!["myModel".to_string()],
        };
        assert!(!skipped.is_registered());
        assert_eq!(skipped.id(), None);
    }
}
