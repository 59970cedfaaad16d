//! Concatenates the selected files into one clipboard-ready document.

use std::sync::Arc;

use async_trait::async_trait;

use super::{CoreError, FileEntry};

/// Rendered instead of an empty document when nothing is selected.
pub const EMPTY_SELECTION_MESSAGE: &str =
    "No files selected. Please check some files or folders.";

/// Separates file blocks so boundaries stay unambiguous when re-split.
const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Reads a file's full text content given its registry entry.
///
/// Abstracted so the composer can be exercised without touching the
/// file system.
#[async_trait]
pub trait ContentReader: Send + Sync + 'static {
    async fn read_text(&self, entry: &FileEntry) -> Result<String, CoreError>;
}

/// Production reader backed by `tokio::fs`.
pub struct FsReader;

#[async_trait]
impl ContentReader for FsReader {
    async fn read_text(&self, entry: &FileEntry) -> Result<String, CoreError> {
        tokio::fs::read_to_string(&entry.handle)
            .await
            .map_err(|e| CoreError::Io(e, entry.handle.clone()))
    }
}

/// The concatenated document plus the flag front ends use to decide
/// whether to show the result panel.
#[derive(Debug, Clone)]
pub struct ComposedOutput {
    pub text: String,
    /// `false` when the text is the placeholder message.
    pub has_content: bool,
    pub file_count: usize,
}

/// Reads every entry and renders one fenced block per file:
///
/// ```` text
/// ```<extension>
/// <path>
///
/// <content>
/// ```
/// ````
///
/// Reads are issued concurrently but awaited in the order the entries
/// were given, so block order is deterministic regardless of which read
/// finishes first. A failed read degrades to empty content for that
/// file only; the batch always completes.
pub async fn compose_output(
    entries: Vec<FileEntry>,
    reader: Arc<dyn ContentReader>,
) -> Result<ComposedOutput, CoreError> {
    if entries.is_empty() {
        return Ok(ComposedOutput {
            text: EMPTY_SELECTION_MESSAGE.to_string(),
            has_content: false,
            file_count: 0,
        });
    }

    let handles: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            let reader = Arc::clone(&reader);
            tokio::spawn(async move {
                let content = match reader.read_text(&entry).await {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!(
                            "Reading {} failed, rendering empty content: {}",
                            entry.path,
                            e
                        );
                        String::new()
                    }
                };
                (entry, content)
            })
        })
        .collect();

    let mut blocks = Vec::with_capacity(handles.len());
    for handle in handles {
        let (entry, content) = handle.await?;
        blocks.push(render_block(&entry, &content));
    }

    Ok(ComposedOutput {
        file_count: blocks.len(),
        text: blocks.join(BLOCK_SEPARATOR),
        has_content: true,
    })
}

fn render_block(entry: &FileEntry, content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    format!(
        "```{}\n{}\n\n{}\n```",
        entry.extension, entry.path, normalized
    )
}
