//! Contains the command handlers a front end calls in response to user
//! actions.
//!
//! Each handler is responsible for interacting with the `Session` and the
//! `core` logic, and for sending `UserEvent`s back to the renderer.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::clipboard::ClipboardSink;
use super::events::UserEvent;
use super::file_dialog::DialogService;
use super::helpers::with_session_and_notify;
use super::proxy::EventProxy;
use super::session::Session;
use super::view_model::generate_ui_state;
use crate::config;
use crate::core::{collect_files, compose_output, walk_directory, ContentReader};

/// Opens a dialog for the user to select a directory to scan.
///
/// Cancelling the dialog is a no-op, not an error: nothing is mutated
/// and no error is surfaced. The front end still gets a `StateUpdate`
/// of the unchanged state, sent manually since no mutation happens that
/// would trigger the notify helper.
pub fn select_directory<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    session: Arc<Mutex<Session>>,
) {
    match dialog.pick_directory() {
        Some(path) => scan_path(path, proxy, session),
        None => {
            tracing::info!("User cancelled directory selection.");
            let session_guard = session
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            let ui_state = generate_ui_state(&session_guard);
            proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
        }
    }
}

/// Scans `path` and installs the result as the new session registry.
///
/// The registry is built off the lock and only swapped in on success, so
/// a failed scan surfaces one `ShowError` and leaves the previously
/// loaded directory intact.
pub fn scan_path<P: EventProxy>(path: PathBuf, proxy: P, session: Arc<Mutex<Session>>) {
    tokio::spawn(async move {
        let config = {
            let session_guard = session
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            session_guard.config.clone()
        };

        let walk_root = path.clone();
        let walk_config = config.clone();
        let scan_result = tokio::task::spawn_blocking(move || {
            walk_directory(&walk_root, &walk_config)
                .map(|pairs| collect_files(pairs, &walk_config))
        })
        .await;

        let registry = match scan_result {
            Ok(Ok(registry)) => registry,
            Ok(Err(e)) => {
                tracing::error!("Scan of {:?} failed: {}", path, e);
                proxy.send_event(UserEvent::ShowError(format!(
                    "Error accessing directory: {e}"
                )));
                return;
            }
            Err(e) => {
                tracing::error!("Scan task for {:?} panicked: {}", path, e);
                proxy.send_event(UserEvent::ShowError(
                    "Directory scan failed unexpectedly.".to_string(),
                ));
                return;
            }
        };

        let mut session_guard = session
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        session_guard.install_scan(path.clone(), registry);
        session_guard.config.last_directory = Some(path);
        if let Err(e) = config::settings::save_config(&session_guard.config) {
            tracing::warn!("Failed to save config after scan: {}", e);
        }

        let ui_state = generate_ui_state(&session_guard);
        proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
    });
}

/// Clears the currently loaded directory and resets the session.
pub fn clear_directory<P: EventProxy>(proxy: P, session: Arc<Mutex<Session>>) {
    with_session_and_notify(&session, &proxy, |s| {
        s.reset_directory_state();
    });
}

/// Sets the inclusion decision for a single file.
pub fn toggle_file<P: EventProxy>(
    path: String,
    included: bool,
    proxy: P,
    session: Arc<Mutex<Session>>,
) {
    with_session_and_notify(&session, &proxy, |s| {
        s.selection.set_file(&path, included);
    });
}

/// Sets the inclusion decision for every file under a folder.
pub fn toggle_folder<P: EventProxy>(
    path: String,
    included: bool,
    proxy: P,
    session: Arc<Mutex<Session>>,
) {
    with_session_and_notify(&session, &proxy, |s| {
        s.selection.set_folder(&s.tree, &path, included);
    });
}

/// Re-includes every known file.
pub fn select_all<P: EventProxy>(proxy: P, session: Arc<Mutex<Session>>) {
    with_session_and_notify(&session, &proxy, |s| {
        s.selection.select_all(s.files.keys().map(String::as_str));
    });
}

/// Excludes every known file.
pub fn deselect_all<P: EventProxy>(proxy: P, session: Arc<Mutex<Session>>) {
    with_session_and_notify(&session, &proxy, |s| {
        s.selection.deselect_all();
    });
}

/// Concatenates the current selection into one document.
///
/// The selection is snapshotted under the lock, reads run off the lock,
/// and the result is discarded if a new directory was installed in the
/// meantime (the generation counter moved on). Stale output is never
/// displayed.
pub fn generate_output<P: EventProxy>(
    proxy: P,
    session: Arc<Mutex<Session>>,
    reader: Arc<dyn ContentReader>,
) {
    let (entries, generation) = {
        let mut session_guard = session
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        session_guard.is_generating = true;
        let entries: Vec<_> = session_guard
            .selection
            .current_selection(&session_guard.files)
            .into_iter()
            .cloned()
            .collect();
        (entries, session_guard.generation)
    };

    tokio::spawn(async move {
        let result = compose_output(entries, reader).await;

        let mut session_guard = session
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if session_guard.generation != generation {
            tracing::info!(
                "Discarding stale output from generation {} (current is {})",
                generation,
                session_guard.generation
            );
            return;
        }
        session_guard.is_generating = false;
        drop(session_guard);

        match result {
            Ok(output) => proxy.send_event(UserEvent::OutputReady {
                text: output.text,
                has_content: output.has_content,
                file_count: output.file_count,
            }),
            Err(e) => {
                tracing::error!("Output generation failed: {}", e);
                proxy.send_event(UserEvent::ShowError(format!(
                    "Could not generate output: {e}"
                )));
            }
        }
    });
}

/// Writes the generated document to the system clipboard.
///
/// Failure is logged and reported as `CopyComplete(false)`; the front
/// end simply leaves its button label unchanged.
pub fn copy_to_clipboard<P: EventProxy, C: ClipboardSink + ?Sized>(
    clipboard: &C,
    text: &str,
    proxy: P,
) {
    match clipboard.write_text(text) {
        Ok(()) => proxy.send_event(UserEvent::CopyComplete(true)),
        Err(e) => {
            tracing::warn!("Failed to copy to clipboard: {}", e);
            proxy.send_event(UserEvent::CopyComplete(false));
        }
    }
}
