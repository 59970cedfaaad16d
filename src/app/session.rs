//! Defines the central, mutable state of one directory-selection lifecycle.

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::core::{build_tree, FileRegistry, SelectionState, TreeNode};

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` so command handlers and
/// async tasks can share it. The registry is the single source of truth
/// for which files exist; the tree and the selection are derived from it
/// and rebuilt on every new directory selection.
pub struct Session {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// The currently loaded root directory, if any.
    pub root: Option<PathBuf>,
    /// The authoritative path → entry registry for the loaded root.
    pub files: FileRegistry,
    /// The folder/file forest derived from `files`.
    pub tree: Vec<TreeNode>,
    /// Inclusion decisions, seeded to "all included" per rebuild.
    pub selection: SelectionState,
    /// Bumped on every registry install. A compose pass snapshots this
    /// and discards its result if the value moved on, so output from a
    /// superseded directory selection is never displayed.
    pub generation: u64,
    /// `true` while a compose pass is running.
    pub is_generating: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            config: AppConfig::load().unwrap_or_default(),
            root: None,
            files: FileRegistry::new(),
            tree: Vec::new(),
            selection: SelectionState::default(),
            generation: 0,
            is_generating: false,
        }
    }
}

impl Session {
    /// Installs a freshly scanned registry, replacing all prior state in
    /// one step. Callers build the registry first and only hand it over
    /// on success, so a failed scan never leaves a partial tree behind.
    pub fn install_scan(&mut self, root: PathBuf, registry: FileRegistry) {
        self.generation += 1;
        self.root = Some(root);
        self.files = registry;
        self.tree = build_tree(&self.files);
        self.selection.reset();
        self.selection.select_all(self.files.keys().map(String::as_str));
        self.is_generating = false;

        tracing::info!(
            "Installed scan generation {} with {} files",
            self.generation,
            self.files.len()
        );
    }

    /// Clears the loaded directory and everything derived from it.
    pub fn reset_directory_state(&mut self) {
        self.generation += 1;
        self.root = None;
        self.files.clear();
        self.tree.clear();
        self.selection.reset();
        self.is_generating = false;
    }
}
