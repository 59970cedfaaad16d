//! Builds the hierarchical folder/file tree from the flat registry.

use std::collections::BTreeMap;

use serde::Serialize;

use super::FileRegistry;

/// A node in the derived file tree.
///
/// The tree is rebuilt from the registry on every directory selection
/// and never mutated in place; collapse/expand state belongs to the
/// renderer, not to this model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Folder {
        name: String,
        /// The folder's own relative path, e.g. `src/core`.
        path: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        /// Key into the file registry.
        path: String,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder { path, .. } | TreeNode::File { path, .. } => path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// Paths of every file in this subtree. For a `File` node that is
    /// the node itself.
    pub fn file_paths(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_file_paths(self, &mut out);
        out
    }

    /// Depth-first search for the node with the given path.
    pub fn find(&self, target: &str) -> Option<&TreeNode> {
        if self.path() == target {
            return Some(self);
        }
        match self {
            TreeNode::Folder { children, .. } => {
                children.iter().find_map(|child| child.find(target))
            }
            TreeNode::File { .. } => None,
        }
    }
}

fn collect_file_paths<'a>(node: &'a TreeNode, out: &mut Vec<&'a str>) {
    match node {
        TreeNode::File { path, .. } => out.push(path),
        TreeNode::Folder { children, .. } => {
            for child in children {
                collect_file_paths(child, out);
            }
        }
    }
}

/// Interim level keyed by segment name; two files sharing a parent
/// directory merge into one folder slot here.
#[derive(Default)]
struct Level {
    folders: BTreeMap<String, Level>,
    files: BTreeMap<String, String>, // name -> full path
}

/// Pure function from the registry to an ordered forest of [`TreeNode`].
///
/// Every registry entry appears exactly once as a `File` leaf. In every
/// folder's children, folders precede files and each group is sorted
/// lexicographically by name.
pub fn build_tree(registry: &FileRegistry) -> Vec<TreeNode> {
    let mut root = Level::default();

    for path in registry.keys() {
        let mut level = &mut root;
        let segments: Vec<&str> = path.split('/').collect();
        for (i, segment) in segments.iter().enumerate() {
            if i == segments.len() - 1 {
                level.files.insert(segment.to_string(), path.clone());
            } else {
                level = level.folders.entry(segment.to_string()).or_default();
            }
        }
    }

    into_nodes(root, "")
}

fn into_nodes(level: Level, prefix: &str) -> Vec<TreeNode> {
    let mut nodes = Vec::with_capacity(level.folders.len() + level.files.len());

    // BTreeMap iteration already yields names in lexicographic order,
    // and emitting folders first satisfies the sorting contract.
    for (name, child_level) in level.folders {
        let path = join_path(prefix, &name);
        let children = into_nodes(child_level, &path);
        nodes.push(TreeNode::Folder {
            name,
            path,
            children,
        });
    }
    for (name, path) in level.files {
        nodes.push(TreeNode::File { name, path });
    }

    nodes
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileEntry;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn registry_of(paths: &[&str]) -> FileRegistry {
        paths
            .iter()
            .map(|p| {
                (
                    p.to_string(),
                    FileEntry {
                        path: p.to_string(),
                        handle: PathBuf::from("/r").join(p),
                        extension: p.rsplit('.').next().unwrap_or("").to_lowercase(),
                    },
                )
            })
            .collect()
    }

    fn leaf_paths(forest: &[TreeNode]) -> Vec<String> {
        let mut out = Vec::new();
        for node in forest {
            out.extend(node.file_paths().into_iter().map(str::to_string));
        }
        out
    }

    fn assert_sorted(forest: &[TreeNode]) {
        let split = forest.iter().position(|n| !n.is_folder()).unwrap_or(forest.len());
        let (folders, files) = forest.split_at(split);
        assert!(files.iter().all(|n| !n.is_folder()), "folders must precede files");
        for group in [folders, files] {
            let names: Vec<_> = group.iter().map(TreeNode::name).collect();
            let mut sorted = names.clone();
            sorted.sort();
            assert_eq!(names, sorted);
        }
        for node in forest {
            if let TreeNode::Folder { children, .. } = node {
                assert_sorted(children);
            }
        }
    }

    #[test]
    fn shared_parents_merge_into_one_folder() {
        let registry = registry_of(&["src/a.rs", "src/b.rs", "src/sub/c.rs"]);
        let forest = build_tree(&registry);

        assert_eq!(forest.len(), 1);
        let TreeNode::Folder { name, path, children } = &forest[0] else {
            panic!("expected a folder at the root");
        };
        assert_eq!(name, "src");
        assert_eq!(path, "src");
        // sub/, a.rs, b.rs
        assert_eq!(children.len(), 3);
        assert!(children[0].is_folder());
    }

    #[test]
    fn folders_precede_files_at_every_level() {
        let registry = registry_of(&["zz.txt", "aa/x.txt", "mm.txt", "bb/y.txt"]);
        let forest = build_tree(&registry);

        let names: Vec<_> = forest.iter().map(TreeNode::name).collect();
        assert_eq!(names, ["aa", "bb", "mm.txt", "zz.txt"]);
    }

    #[test]
    fn every_entry_appears_exactly_once_as_a_leaf() {
        let registry = registry_of(&["a.txt", "sub/b.py", "sub/deep/c.md"]);
        let forest = build_tree(&registry);

        let mut leaves = leaf_paths(&forest);
        leaves.sort();
        let mut expected: Vec<_> = registry.keys().cloned().collect();
        expected.sort();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn find_matches_by_tree_membership_not_prefix() {
        let registry = registry_of(&["foo/a.txt", "foo2/b.txt"]);
        let forest = build_tree(&registry);

        let foo = forest.iter().find_map(|n| n.find("foo")).unwrap();
        assert_eq!(foo.file_paths(), ["foo/a.txt"]);
    }

    proptest! {
        #[test]
        fn tree_invariants_hold_for_arbitrary_paths(
            paths in proptest::collection::btree_set("[a-z]{1,3}(/[a-z]{1,3}){0,3}\\.txt", 1..20)
        ) {
            let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
            let registry = registry_of(&paths);
            let forest = build_tree(&registry);

            let mut leaves = leaf_paths(&forest);
            leaves.sort();
            let mut expected: Vec<_> = registry.keys().cloned().collect();
            expected.sort();
            prop_assert_eq!(leaves, expected);

            assert_sorted(&forest);
        }
    }
}
