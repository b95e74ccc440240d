//! Flatten file trees into ordered file lists

use std::collections::HashSet;

use super::{FileTreeNode, NodeType};

/// Default depth limit for flattening
pub const DEFAULT_MAX_FLATTEN_DEPTH: usize = 128;

/// A file discovered while flattening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Node path joined onto the base path
    pub path: String,
    pub name: String,
}

/// Bounds applied while walking untrusted trees
#[derive(Debug, Clone, Copy)]
pub struct FlattenOptions {
    /// Directories at this depth or deeper are not descended into
    pub max_depth: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_FLATTEN_DEPTH,
        }
    }
}

/// Flatten `node` into its files, depth-first and in child order.
///
/// Directories produce no entry of their own.
pub fn flatten(node: &FileTreeNode, base_path: &str) -> Vec<FlatEntry> {
    flatten_with(node, base_path, FlattenOptions::default())
}

/// Same as [`flatten`] with explicit bounds.
///
/// A file path seen twice is only emitted the first time.
pub fn flatten_with(
    node: &FileTreeNode,
    base_path: &str,
    options: FlattenOptions,
) -> Vec<FlatEntry> {
    let mut result = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut skipped_dirs = 0usize;

    // Children are pushed in reverse so they pop in their given order
    let mut stack: Vec<(&FileTreeNode, usize)> = vec![(node, 0)];
    while let Some((current, depth)) = stack.pop() {
        match current.node_type {
            NodeType::File => {
                if seen.insert(current.path.as_str()) {
                    result.push(FlatEntry {
                        path: join_path(base_path, &current.path),
                        name: current.name.clone(),
                    });
                }
            }
            NodeType::Directory => {
                if depth >= options.max_depth {
                    skipped_dirs += 1;
                    continue;
                }
                stack.extend(current.children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
    }

    if skipped_dirs > 0 {
        tracing::warn!(
            root = %node.path,
            max_depth = options.max_depth,
            skipped_dirs,
            "File tree exceeds depth limit, deeper entries omitted"
        );
    }

    result
}

/// Count file nodes in a tree
pub fn count_files(node: &FileTreeNode) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        match current.node_type {
            NodeType::File => count += 1,
            NodeType::Directory => stack.extend(current.children.iter()),
        }
    }
    count
}

/// Join a root-relative node path onto a base directory.
///
/// An empty base leaves the path untouched.
pub fn join_path(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        };
    }
    format!("{}/{}", base, path)
}
