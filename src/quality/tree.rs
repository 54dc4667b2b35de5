//! Read-only snapshot of a skill directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Names treated as build or OS leftovers.
const GARBAGE_SUFFIXES: &[&str] = &[".pyc"];
const GARBAGE_NAMES: &[&str] = &[".DS_Store"];

/// Every entry below a skill root, collected in a single walk.
#[derive(Debug, Clone)]
pub struct SkillTree {
    root: PathBuf,
    entries: Vec<PathBuf>,
}

impl SkillTree {
    /// Walk `root` recursively. Symlinks are listed but not followed, and the
    /// root itself is excluded. Any I/O error during the walk is returned.
    pub fn scan(root: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            entries.push(entry?.into_path());
        }
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of files and directories below the root.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether `name` exists directly under the root.
    pub fn has_top_level(&self, name: &str) -> Result<bool> {
        Ok(self.root.join(name).try_exists()?)
    }

    /// Entries whose file name marks them as compiled bytecode or OS metadata.
    pub fn garbage_entries(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| path.file_name().and_then(|n| n.to_str()).is_some_and(is_garbage_name))
    }
}

fn is_garbage_name(name: &str) -> bool {
    GARBAGE_NAMES.contains(&name) || GARBAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
