//! Error types for workspace operations.
//!
//! None of these are fatal. Cache entries and sessions are left in their
//! pre-failure state (absent or pending) and the caller decides whether to retry.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// The tree-fetch collaborator failed for a project.
    #[error("Failed to fetch file tree for project {project_id}: {message}")]
    FetchTreeFailed { project_id: String, message: String },

    /// The file-read collaborator failed for a path.
    #[error("Failed to read file {path}: {message}")]
    ReadFileFailed { path: String, message: String },

    /// No open session with this id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The project is not in the workspace's project list.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
}

impl WorkspaceError {
    pub fn fetch_tree(project_id: impl Into<String>, err: &anyhow::Error) -> Self {
        WorkspaceError::FetchTreeFailed {
            project_id: project_id.into(),
            message: format!("{:#}", err),
        }
    }

    pub fn read_file(path: impl Into<String>, err: &anyhow::Error) -> Self {
        WorkspaceError::ReadFileFailed {
            path: path.into(),
            message: format!("{:#}", err),
        }
    }
}
