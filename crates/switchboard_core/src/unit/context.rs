//! Context handles passed to controller constructors.

use crate::error::UnitResult;
use crate::runtime::{Core, CoreInner};
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

/// Scope-bound view notifier.
///
/// Holds the core weakly; once the core is dropped, `notify` does nothing.
#[derive(Clone)]
pub struct NotifyHandle {
    core: Weak<CoreInner>,
    scope: String,
}

/// Handle given to constructors as `app`.
pub type AppHandle = NotifyHandle;
/// Handle given to constructors as `page`; same routing as `app`.
pub type PageHandle = NotifyHandle;

impl NotifyHandle {
    pub(crate) fn new(core: &Rc<CoreInner>, scope: &str) -> Self {
        Self {
            core: Rc::downgrade(core),
            scope: scope.to_string(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Sends `event` with a `null` payload to the bound scope.
    pub fn notify(&self, event: &str) -> UnitResult<()> {
        self.notify_with(event, Value::Null)
    }

    /// Sends `event` with `data` to the bound scope.
    pub fn notify_with(&self, event: &str, data: Value) -> UnitResult<()> {
        match self.core.upgrade() {
            Some(inner) => Core::from_inner(inner).notify(event, &data, &self.scope),
            None => Ok(()),
        }
    }
}

impl Debug for NotifyHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyHandle")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Opaque data-access callable handed through to every constructor.
#[derive(Clone)]
pub struct Orm {
    inner: Rc<dyn Fn(&[Value]) -> UnitResult<Value>>,
}

impl Orm {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[Value]) -> UnitResult<Value> + 'static,
    {
        Self {
            inner: Rc::new(handler),
        }
    }

    /// Callable with no backing store; always answers `null`.
    pub fn detached() -> Self {
        Self::new(|_| Ok(Value::Null))
    }

    pub fn call(&self, args: &[Value]) -> UnitResult<Value> {
        (self.inner)(args)
    }

    /// Returns true when both handles wrap the same callable.
    pub fn same_as(&self, other: &Orm) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Orm {
    fn default() -> Self {
        Self::detached()
    }
}

impl Debug for Orm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Orm")
    }
}

#[cfg(test)]
mod tests {
    use super::Orm;
    use serde_json::{json, Value};

    #[test]
    fn detached_orm_answers_null() {
        let orm = Orm::detached();
        assert_eq!(orm.call(&[json!("users")]).expect("orm call"), Value::Null);
    }

    #[test]
    fn clones_share_identity() {
        let orm = Orm::new(|args| Ok(json!(args.len())));
        let copy = orm.clone();
        assert!(orm.same_as(&copy));
        assert!(!orm.same_as(&Orm::detached()));
        assert_eq!(copy.call(&[json!(1), json!(2)]).expect("orm call"), json!(2));
    }
}
