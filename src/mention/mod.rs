//! @-mention file index
//!
//! Flattens every cached project tree into one list of [`MentionFile`]s and
//! filters it by a case-insensitive substring query.

mod list;

use serde::{Deserialize, Serialize};

use crate::tree::flatten::join_path;
use crate::tree::{flatten_with, FileTreeCache, FlattenOptions, NodeType, Project};
use crate::util::sorted::sorted_lookup;

pub use list::MentionListState;

/// A file that can be referenced with `@`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionFile {
    /// `<project id>:<root-relative path>`
    pub id: String,
    pub name: String,
    /// Project directory joined with the root-relative path
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl MentionFile {
    pub fn new(project: &Project, relative_path: &str, name: impl Into<String>) -> Self {
        Self {
            id: format!("{}:{}", project.id, relative_path),
            name: name.into(),
            path: join_path(&project.directory, relative_path),
            node_type: NodeType::File,
        }
    }

    /// Case-insensitive substring match on name or path.
    ///
    /// `query_lower` must already be lowercased.
    fn matches(&self, query_lower: &str) -> bool {
        query_lower.is_empty()
            || self.name.to_lowercase().contains(query_lower)
            || self.path.to_lowercase().contains(query_lower)
    }
}

/// Searchable list of files across all cached projects
#[derive(Debug, Clone, Default)]
pub struct MentionIndex {
    /// Files in project order, then tree discovery order
    files: Vec<MentionFile>,
    /// (path, index into `files`) sorted by path
    by_path: Vec<(String, usize)>,
}

impl MentionIndex {
    /// Build the index from whatever trees are currently cached.
    ///
    /// Projects without a cached tree contribute nothing.
    pub fn build(projects: &[Project], cache: &FileTreeCache, options: FlattenOptions) -> Self {
        let mut files = Vec::new();
        for project in projects {
            let Some(tree) = cache.get_tree(&project.id) else {
                continue;
            };
            files.extend(
                flatten_with(&tree, "", options)
                    .into_iter()
                    .map(|entry| MentionFile::new(project, &entry.path, entry.name)),
            );
        }

        tracing::debug!(
            projects = projects.len(),
            files = files.len(),
            "Built mention index"
        );
        Self::from_files(files)
    }

    pub fn from_files(files: Vec<MentionFile>) -> Self {
        let mut by_path: Vec<(String, usize)> = files
            .iter()
            .enumerate()
            .map(|(i, file)| (file.path.clone(), i))
            .collect();
        by_path.sort_by(|a, b| a.0.cmp(&b.0));
        Self { files, by_path }
    }

    pub fn files(&self) -> &[MentionFile] {
        &self.files
    }

    pub fn get(&self, index: usize) -> Option<&MentionFile> {
        self.files.get(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files whose name or path contains `query`, ignoring case, in index order.
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&MentionFile> {
        self.filter_indices(query)
            .into_iter()
            .map(|i| &self.files[i])
            .collect()
    }

    /// Same as [`filter`](Self::filter) but returns positions in [`files`](Self::files)
    pub fn filter_indices(&self, query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        self.files
            .iter()
            .enumerate()
            .filter(|(_, file)| file.matches(&query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Exact lookup by fully qualified path
    pub fn find_by_path(&self, path: &str) -> Option<&MentionFile> {
        let lookup = sorted_lookup(&self.by_path, |entry| entry.0.as_str(), path);
        if lookup.found {
            self.files.get(self.by_path[lookup.index].1)
        } else {
            None
        }
    }
}
