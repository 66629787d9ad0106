//! Synchronous fan-out over the routing tables.
//!
//! # Invariants
//! - The router is re-read before every handler; no borrow is held while a
//!   handler runs, so handlers may register, destroy or notify.
//! - Routes are visited in registration order. A route removed before it is
//!   reached is skipped; a route added during dispatch is visited.
//! - The first handler error stops the walk and is returned as-is.

use crate::error::UnitResult;
use crate::router::event_router::EventRouter;
use crate::unit::event::ModelEvent;
use log::{debug, warn};
use serde_json::Value;
use std::cell::RefCell;

/// Runs every view handler for `event` declared in `scope`. Returns the
/// number of handlers invoked.
pub fn notify_view(
    router: &RefCell<EventRouter>,
    event: &str,
    data: &Value,
    scope: &str,
) -> UnitResult<usize> {
    let mut cursor = None;
    let mut invoked = 0;
    loop {
        let next = router.borrow().next_view_handler(scope, event, cursor);
        let Some((seq, path, handler)) = next else {
            break;
        };
        cursor = Some(seq);
        invoked += 1;
        if let Err(err) = handler(data) {
            warn!(
                "event=view_dispatch module=router status=error scope={} view_event={} unit={} error={}",
                scope, event, path, err
            );
            return Err(err);
        }
    }
    debug!(
        "event=view_dispatch module=router status=ok scope={} view_event={} handlers={}",
        scope, event, invoked
    );
    Ok(invoked)
}

/// Runs every model handler for `(model_key, event)` across all scopes.
/// Returns the number of handlers invoked.
pub fn notify_model(
    router: &RefCell<EventRouter>,
    model_key: &str,
    event: ModelEvent,
    args: &[Value],
) -> UnitResult<usize> {
    let mut cursor = None;
    let mut invoked = 0;
    loop {
        let next = router.borrow().next_model_handler(model_key, event, cursor);
        let Some((seq, path, handler)) = next else {
            break;
        };
        cursor = Some(seq);
        invoked += 1;
        if let Err(err) = handler(args) {
            warn!(
                "event=model_dispatch module=router status=error model_key={} model_event={} unit={} error={}",
                model_key, event, path, err
            );
            return Err(err);
        }
    }
    debug!(
        "event=model_dispatch module=router status=ok model_key={} model_event={} handlers={}",
        model_key, event, invoked
    );
    Ok(invoked)
}
