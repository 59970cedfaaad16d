use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use ctxcat::app::clipboard::SystemClipboard;
use ctxcat::app::commands;
use ctxcat::app::events::UserEvent;
use ctxcat::app::file_dialog::NativeDialogService;
use ctxcat::app::session::Session;
use ctxcat::core::FsReader;

/// Headless driver: resolve a root directory (first argument, or the
/// native picker), scan it, concatenate everything selected, print the
/// document to stdout and copy it to the clipboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (proxy, mut events) = mpsc::unbounded_channel::<UserEvent>();
    let session = Arc::new(Mutex::new(Session::default()));

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(root) => commands::scan_path(root, proxy.clone(), session.clone()),
        None => commands::select_directory(&NativeDialogService, proxy.clone(), session.clone()),
    }

    loop {
        match events.recv().await {
            Some(UserEvent::StateUpdate(ui)) => {
                // An empty root means the picker was cancelled.
                if ui.root.is_empty() {
                    tracing::info!("No directory chosen, nothing to do.");
                    return Ok(());
                }
                tracing::info!(
                    "Loaded {} ({} of {} files selected)",
                    ui.root,
                    ui.selected_files,
                    ui.total_files
                );
                break;
            }
            Some(UserEvent::ShowError(msg)) => anyhow::bail!(msg),
            Some(_) => {}
            None => anyhow::bail!("Event channel closed before the scan finished"),
        }
    }

    commands::generate_output(proxy.clone(), session.clone(), Arc::new(FsReader));

    let output = loop {
        match events.recv().await {
            Some(UserEvent::OutputReady {
                text, file_count, ..
            }) => {
                tracing::info!("Concatenated {} files", file_count);
                break text;
            }
            Some(UserEvent::ShowError(msg)) => anyhow::bail!(msg),
            Some(_) => {}
            None => anyhow::bail!("Event channel closed before output was ready"),
        }
    };

    println!("{output}");

    commands::copy_to_clipboard(&SystemClipboard, &output, proxy);
    if let Some(UserEvent::CopyComplete(copied)) = events.recv().await {
        if copied {
            tracing::info!("Output copied to clipboard.");
        } else {
            tracing::warn!("Clipboard unavailable; output was printed above.");
        }
    }

    Ok(())
}
