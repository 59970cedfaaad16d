//! Defines the event structures sent from the command layer to the
//! attached front end.

use super::view_model::UiState;

/// Events emitted towards the renderer.
///
/// The core never touches pixels or DOM nodes; whatever consumes these
/// decides how to draw them.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the tree view.
    StateUpdate(Box<UiState>),
    /// The concatenated document produced by a generate pass.
    OutputReady {
        text: String,
        /// `false` when `text` is the empty-selection placeholder, so
        /// the front end can hide the surrounding result panels.
        has_content: bool,
        file_count: usize,
    },
    /// An error message to be displayed to the user.
    ShowError(String),
    /// Whether the clipboard write succeeded. Front ends typically flip
    /// a button label to "Copied!" on success and do nothing on failure.
    CopyComplete(bool),
}
