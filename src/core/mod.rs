pub mod collector;
pub mod compose;
pub mod error;
pub mod selection;
pub mod tree;

use std::path::PathBuf;

/// One text file discovered under the chosen root directory.
///
/// Entries are immutable once discovered and live in the session's
/// registry, keyed by `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Slash-separated path relative to the chosen root. Unique key.
    pub path: String,
    /// Absolute location on disk, sufficient to later read the content.
    pub handle: PathBuf,
    /// Lowercased extension, derived from the file name. Used for the
    /// allow-set filter and for fencing the output block.
    pub extension: String,
}

pub use collector::{collect_files, walk_directory, FileRegistry};
pub use compose::{
    compose_output, ComposedOutput, ContentReader, FsReader, EMPTY_SELECTION_MESSAGE,
};
pub use error::CoreError;
pub use selection::{FolderSelection, SelectionState};
pub use tree::{build_tree, TreeNode};
