//! Tracks which discovered files are included in the output.

use std::collections::HashMap;

use serde::Serialize;

use super::{FileEntry, FileRegistry, TreeNode};

/// Aggregate checkbox state of a folder, derived on demand from the
/// decisions of the files in its subtree. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderSelection {
    Full,
    Partial,
    None,
}

/// The path → inclusion mapping for the current session.
///
/// Reset and re-seeded to "all included" on every registry rebuild;
/// mutated thereafter only by explicit toggle operations. After the
/// initial [`SelectionState::select_all`], every registry path carries
/// an explicit decision.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    decisions: HashMap<String, bool>,
}

impl SelectionState {
    /// Discards all decisions. Called at the start of a new directory
    /// selection, before the fresh registry is seeded.
    pub fn reset(&mut self) {
        self.decisions.clear();
    }

    /// Seeds every discovered path to "included".
    pub fn select_all<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) {
        for path in paths {
            self.decisions.insert(path.to_string(), true);
        }
    }

    /// Sets every known path to "excluded".
    pub fn deselect_all(&mut self) {
        for decision in self.decisions.values_mut() {
            *decision = false;
        }
    }

    /// Sets exactly one file's decision.
    pub fn set_file(&mut self, path: &str, included: bool) {
        self.decisions.insert(path.to_string(), included);
    }

    /// Rewrites the decision of every file in the folder's subtree.
    ///
    /// The descendant set comes from tree membership, not string-prefix
    /// matching, so `foo2` never counts as a descendant of `foo`.
    /// Cascades through nested folders transparently and is idempotent.
    pub fn set_folder(&mut self, tree: &[TreeNode], folder_path: &str, included: bool) {
        let Some(node) = tree.iter().find_map(|n| n.find(folder_path)) else {
            tracing::warn!("Toggle for unknown folder {:?} ignored", folder_path);
            return;
        };
        for path in node.file_paths() {
            self.decisions.insert(path.to_string(), included);
        }
    }

    pub fn is_included(&self, path: &str) -> bool {
        self.decisions.get(path).copied().unwrap_or(false)
    }

    pub fn included_count(&self) -> usize {
        self.decisions.values().filter(|d| **d).count()
    }

    /// Included entries in registry (path-lexicographic) order. The
    /// composer relies on this order for deterministic output.
    pub fn current_selection<'a>(&self, registry: &'a FileRegistry) -> Vec<&'a FileEntry> {
        registry
            .values()
            .filter(|entry| self.is_included(&entry.path))
            .collect()
    }

    /// Derived `Full`/`Partial`/`None` view for a folder checkbox.
    pub fn folder_state(&self, folder: &TreeNode) -> FolderSelection {
        let files = folder.file_paths();
        if files.is_empty() {
            return FolderSelection::None;
        }
        let included = files.iter().filter(|p| self.is_included(p)).count();
        if included == 0 {
            FolderSelection::None
        } else if included == files.len() {
            FolderSelection::Full
        } else {
            FolderSelection::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{build_tree, collect_files};
    use crate::config::AppConfig;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn fixture(paths: &[&str]) -> (FileRegistry, Vec<TreeNode>, SelectionState) {
        let config = AppConfig::default();
        let registry = collect_files(
            paths
                .iter()
                .map(|p| (p.to_string(), PathBuf::from("/r").join(p))),
            &config,
        );
        let tree = build_tree(&registry);
        let mut selection = SelectionState::default();
        selection.select_all(registry.keys().map(String::as_str));
        (registry, tree, selection)
    }

    #[test]
    fn select_all_includes_the_full_registry() {
        let (registry, _, selection) = fixture(&["a.txt", "sub/b.py", "sub/deep/c.md"]);

        let selected = selection.current_selection(&registry);
        assert_eq!(selected.len(), registry.len());
    }

    #[test]
    fn folder_toggle_excludes_exactly_its_subtree() {
        let (registry, tree, mut selection) =
            fixture(&["keep.txt", "sub/a.py", "sub/deep/b.md", "sub2/c.txt"]);

        selection.set_folder(&tree, "sub", false);

        assert!(selection.is_included("keep.txt"));
        assert!(selection.is_included("sub2/c.txt"));
        assert!(!selection.is_included("sub/a.py"));
        assert!(!selection.is_included("sub/deep/b.md"));
    }

    #[test]
    fn prefix_collisions_do_not_cascade() {
        let (_, tree, mut selection) = fixture(&["foo/a.txt", "foo2/b.txt"]);

        selection.set_folder(&tree, "foo", false);

        assert!(!selection.is_included("foo/a.txt"));
        assert!(selection.is_included("foo2/b.txt"));
    }

    #[test]
    fn folder_toggle_is_idempotent() {
        let (registry, tree, mut selection) = fixture(&["sub/a.py", "sub/b.py", "c.txt"]);

        selection.set_folder(&tree, "sub", true);
        let once = selection.current_selection(&registry).len();
        selection.set_folder(&tree, "sub", true);
        let twice = selection.current_selection(&registry).len();

        assert_eq!(once, twice);
    }

    #[test]
    fn reincluding_a_folder_restores_its_files() {
        let (registry, tree, mut selection) = fixture(&["sub/a.py", "sub/b.py"]);

        selection.set_folder(&tree, "sub", false);
        assert_eq!(selection.current_selection(&registry).len(), 0);

        selection.set_folder(&tree, "sub", true);
        assert_eq!(selection.current_selection(&registry).len(), 2);
    }

    #[test]
    fn folder_state_is_a_derived_view() {
        let (_, tree, mut selection) = fixture(&["sub/a.py", "sub/b.py"]);
        let sub = tree.iter().find_map(|n| n.find("sub")).unwrap();

        assert_eq!(selection.folder_state(sub), FolderSelection::Full);

        selection.set_file("sub/a.py", false);
        assert_eq!(selection.folder_state(sub), FolderSelection::Partial);

        selection.set_file("sub/b.py", false);
        assert_eq!(selection.folder_state(sub), FolderSelection::None);
    }

    #[test]
    fn every_path_has_a_decision_after_any_toggle() {
        let (registry, tree, mut selection) = fixture(&["a.txt", "sub/b.py"]);

        selection.set_file("a.txt", false);
        selection.set_folder(&tree, "sub", false);
        selection.set_folder(&tree, "sub", true);

        for path in registry.keys() {
            // Explicit decision either way, never absent.
            assert!(selection.decisions.contains_key(path));
        }
    }

    fn collect_folder_paths(forest: &[TreeNode], out: &mut Vec<String>) {
        for node in forest {
            if let TreeNode::Folder { path, children, .. } = node {
                out.push(path.clone());
                collect_folder_paths(children, out);
            }
        }
    }

    proptest! {
        /// Whatever sequence of file/folder toggles runs, every registry
        /// path keeps an explicit decision and repeating a folder toggle
        /// changes nothing.
        #[test]
        fn arbitrary_toggle_sequences_stay_decided_and_idempotent(
            paths in proptest::collection::btree_set("[a-z]{1,3}(/[a-z]{1,3}){0,3}\\.txt", 1..15),
            ops in proptest::collection::vec((any::<usize>(), any::<bool>(), any::<bool>()), 0..12),
        ) {
            let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
            let (registry, tree, mut selection) = fixture(&paths);

            let mut folders = Vec::new();
            collect_folder_paths(&tree, &mut folders);
            let files: Vec<&String> = registry.keys().collect();

            for (pick, on_folder, included) in ops {
                if on_folder && !folders.is_empty() {
                    let target = &folders[pick % folders.len()];
                    selection.set_folder(&tree, target, included);
                    let once: Vec<bool> =
                        files.iter().map(|p| selection.is_included(p.as_str())).collect();
                    selection.set_folder(&tree, target, included);
                    let twice: Vec<bool> =
                        files.iter().map(|p| selection.is_included(p.as_str())).collect();
                    prop_assert_eq!(once, twice);
                } else {
                    selection.set_file(files[pick % files.len()], included);
                }

                for path in registry.keys() {
                    prop_assert!(selection.decisions.contains_key(path));
                }
            }
        }
    }

    #[test]
    fn current_selection_is_in_path_order() {
        let (registry, _, selection) = fixture(&["z.txt", "a.txt", "sub/m.py"]);

        let order: Vec<_> = selection
            .current_selection(&registry)
            .iter()
            .map(|e| e.path.clone())
            .collect();
        assert_eq!(order, ["a.txt", "sub/m.py", "z.txt"]);
    }
}
