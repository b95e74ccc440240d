//! Tree fetchers for driving the file tree cache

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use workspace::{FileTreeNode, TreeFetcher};

pub type TreeReply = Result<FileTreeNode, String>;

/// Fetcher whose answers are released by the test.
///
/// Each fetch takes the next scripted reply channel in call order, so the
/// test decides when, and in which order, outstanding fetches resolve.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: Mutex<VecDeque<oneshot::Receiver<TreeReply>>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply slot for the next fetch
    pub fn script(&self) -> oneshot::Sender<TreeReply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().push_back(rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TreeFetcher for ScriptedFetcher {
    async fn fetch_tree(&self, directory: &str, _max_depth: usize) -> anyhow::Result<FileTreeNode> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().pop_front();
        let Some(reply) = reply else {
            anyhow::bail!("unscripted fetch for {}", directory);
        };
        match reply.await {
            Ok(Ok(tree)) => Ok(tree),
            Ok(Err(message)) => Err(anyhow::anyhow!(message)),
            Err(_) => anyhow::bail!("reply dropped for {}", directory),
        }
    }
}

/// Fetcher answering immediately with a fixed tree, counting calls
pub struct StaticFetcher {
    tree: FileTreeNode,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(tree: FileTreeNode) -> Self {
        Self {
            tree,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TreeFetcher for StaticFetcher {
    async fn fetch_tree(&self, _directory: &str, _max_depth: usize) -> anyhow::Result<FileTreeNode> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(self.tree.clone())
    }
}
