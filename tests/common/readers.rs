//! File readers for driving file tab loads

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use workspace::FileReader;

/// Reader whose reads block until the test releases them.
///
/// Reads of a path take that path's gates in call order. A read with no
/// gate, or whose gate is dropped, fails.
#[derive(Default)]
pub struct GatedReader {
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<String>>>>,
}

impl GatedReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a gate for the next read of `path`
    pub fn gate(&self, path: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(rx);
        tx
    }
}

#[async_trait]
impl FileReader for GatedReader {
    async fn read_file(&self, path: &str) -> anyhow::Result<String> {
        let gate = self
            .gates
            .lock()
            .get_mut(path)
            .and_then(|queue| queue.pop_front());
        let Some(gate) = gate else {
            anyhow::bail!("no such file: {}", path);
        };
        gate.await
            .map_err(|_| anyhow::anyhow!("read cancelled: {}", path))
    }
}
