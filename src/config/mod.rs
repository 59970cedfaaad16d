pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Extensions (lowercased, without the dot) treated as readable text.
    pub text_extensions: HashSet<String>,
    /// Directory names whose entire subtree is skipped during traversal.
    pub skip_directories: HashSet<String>,
    pub last_directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let text_extensions = [
            "txt", "cs", "css", "js", "py", "html", "json", "md", "xml", "csv", "ini", "yml",
            "yaml", "sh", "bat", "php", "java", "c", "cpp", "h", "hpp", "ts", "rs", "go", "kt",
            "sql", "jsx", "tsx",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let skip_directories = [
            "node_modules",
            ".git",
            ".svn",
            ".hg",
            ".idea",
            "__pycache__",
            "build",
            "dist",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            text_extensions,
            skip_directories,
            last_directory: None,
        }
    }
}
