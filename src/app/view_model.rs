//! Transforms the `Session` into a serializable `UiState` view model.
//!
//! This is the presentation seam: an external tree renderer consumes the
//! structure produced here and feeds toggle events back through the
//! command layer.

use serde::Serialize;

use crate::core::{FolderSelection, SelectionState, TreeNode};

use super::session::Session;

/// A serializable snapshot of the session for the renderer.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub root: String,
    pub tree: Vec<TreeNodeView>,
    pub total_files: usize,
    pub selected_files: usize,
    pub is_generating: bool,
}

/// One node of the rendered tree, with its checkbox state resolved.
#[derive(Serialize, Clone, Debug)]
pub struct TreeNodeView {
    pub name: String,
    pub path: String,
    pub is_folder: bool,
    /// `Full`/`Partial`/`None`. Files are never `Partial`.
    pub selection: FolderSelection,
    pub children: Vec<TreeNodeView>,
}

/// Creates the complete `UiState` from the current `Session`.
pub fn generate_ui_state(session: &Session) -> UiState {
    UiState {
        root: session
            .root
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        tree: session
            .tree
            .iter()
            .map(|node| render_node(node, &session.selection))
            .collect(),
        total_files: session.files.len(),
        selected_files: session.selection.included_count(),
        is_generating: session.is_generating,
    }
}

fn render_node(node: &TreeNode, selection: &SelectionState) -> TreeNodeView {
    match node {
        TreeNode::Folder {
            name,
            path,
            children,
        } => TreeNodeView {
            name: name.clone(),
            path: path.clone(),
            is_folder: true,
            selection: selection.folder_state(node),
            children: children
                .iter()
                .map(|child| render_node(child, selection))
                .collect(),
        },
        TreeNode::File { name, path } => TreeNodeView {
            name: name.clone(),
            path: path.clone(),
            is_folder: false,
            selection: if selection.is_included(path) {
                FolderSelection::Full
            } else {
                FolderSelection::None
            },
            children: Vec::new(),
        },
    }
}
