//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::session::Session;
use super::view_model::generate_ui_state;

/// A helper function that locks the `Session`, performs a mutation,
/// and then automatically sends a `StateUpdate` event to the front end.
///
/// This significantly reduces boilerplate in the command handlers.
pub fn with_session_and_notify<F, P: EventProxy>(
    session: &Arc<Mutex<Session>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut Session),
{
    let mut session_guard = session
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    update_fn(&mut session_guard);

    let ui_state = generate_ui_state(&session_guard);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}
