//! Tree-fetch collaborator
//!
//! The sandbox API is reached through [`TreeFetcher`]. [`LocalTreeFetcher`]
//! walks a directory on the local machine and is what the CLI uses.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use super::FileTreeNode;

/// Source of project file trees
#[async_trait]
pub trait TreeFetcher: Send + Sync {
    /// Fetch the tree rooted at `directory`, descending at most `max_depth` levels
    async fn fetch_tree(&self, directory: &str, max_depth: usize) -> anyhow::Result<FileTreeNode>;
}

/// Reads trees from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalTreeFetcher {
    /// Entry names skipped while walking (e.g. ".git")
    ignored: Vec<String>,
}

impl LocalTreeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignored(mut self, ignored: Vec<String>) -> Self {
        self.ignored = ignored;
        self
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|ignored| ignored == name)
    }

    fn walk(&self, root: &Path, max_depth: usize) -> anyhow::Result<FileTreeNode> {
        let metadata = fs::metadata(root)
            .with_context(|| format!("Failed to stat {}", root.display()))?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());

        if !metadata.is_dir() {
            let path = format!("/{}", name);
            return Ok(FileTreeNode::file(name, path));
        }

        let children = self.read_children(root, "", max_depth)?;
        Ok(FileTreeNode::directory(name, "/", children))
    }

    fn read_children(
        &self,
        dir: &Path,
        rel: &str,
        remaining: usize,
    ) -> anyhow::Result<Vec<FileTreeNode>> {
        if remaining == 0 {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        let mut dirs: Vec<(String, PathBuf)> = Vec::new();
        let mut files: Vec<String> = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_ignored(&name) {
                continue;
            }
            // Symlinks are not followed
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => dirs.push((name, entry.path())),
                Ok(ft) if ft.is_file() => files.push(name),
                _ => {}
            }
        }

        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        files.sort();

        let mut children = Vec::with_capacity(dirs.len() + files.len());
        for (name, path) in dirs {
            let child_rel = format!("{}/{}", rel, name);
            let grandchildren = match self.read_children(&path, &child_rel, remaining - 1) {
                Ok(children) => children,
                Err(e) => {
                    tracing::debug!(
                        dir = %path.display(),
                        error = %e,
                        "Skipping unreadable directory"
                    );
                    Vec::new()
                }
            };
            children.push(FileTreeNode::directory(name, child_rel, grandchildren));
        }
        for name in files {
            let path = format!("{}/{}", rel, name);
            children.push(FileTreeNode::file(name, path));
        }

        Ok(children)
    }
}

#[async_trait]
impl TreeFetcher for LocalTreeFetcher {
    async fn fetch_tree(&self, directory: &str, max_depth: usize) -> anyhow::Result<FileTreeNode> {
        let fetcher = self.clone();
        let root = PathBuf::from(directory);
        tokio::task::spawn_blocking(move || fetcher.walk(&root, max_depth))
            .await
            .context("Tree walk task failed")?
    }
}
