//! File-read collaborator

use anyhow::Context;
use async_trait::async_trait;

/// Source of file contents for file tabs
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_file(&self, path: &str) -> anyhow::Result<String>;
}

/// Reads files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileReader;

#[async_trait]
impl FileReader for LocalFileReader {
    async fn read_file(&self, path: &str) -> anyhow::Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path))
    }
}
