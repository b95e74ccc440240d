//! Project file trees
//!
//! Trees arrive from the sandbox as nested [`FileTreeNode`]s, are cached per
//! project by [`FileTreeCache`] and flattened into file lists by [`flatten`].

pub mod cache;
pub mod fetch;
pub mod flatten;

use serde::{Deserialize, Serialize};

pub use cache::FileTreeCache;
pub use fetch::{LocalTreeFetcher, TreeFetcher};
pub use flatten::{count_files, flatten, flatten_with, FlatEntry, FlattenOptions};

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

/// A node of a project's file tree.
///
/// `path` is root-relative and '/'-separated. Children are only meaningful on
/// directories; a file node's children are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileTreeNode>,
}

impl FileTreeNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            node_type: NodeType::File,
            children: Vec::new(),
        }
    }

    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileTreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            node_type: NodeType::Directory,
            children,
        }
    }

    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    pub fn is_directory(&self) -> bool {
        self.node_type == NodeType::Directory
    }
}

/// A project root whose tree is cached independently
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier used as the cache key
    pub id: String,
    /// Root directory in the sandbox
    pub directory: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            directory: directory.into(),
            name: None,
        }
    }
}
