//! An abstraction over the system clipboard.

use anyhow::Result;

/// Accepts a string and writes it to the system clipboard. Failure is
/// logged by the caller, never surfaced as a blocking error.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The production sink backed by `arboard`.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| anyhow::anyhow!("Clipboard unavailable: {e}"))?;
        clipboard
            .set_text(text)
            .map_err(|e| anyhow::anyhow!("Clipboard error: {e}"))?;
        Ok(())
    }
}
