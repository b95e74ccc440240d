//! Per-project file tree cache
//!
//! Holds the most recently loaded tree for each project and makes sure a
//! project never has two loads racing to write its entry:
//!
//! - concurrent `ensure_loaded` calls for an uncached project share one
//!   in-flight fetch;
//! - every load takes a fresh per-project generation, and only the load whose
//!   generation is still live may write the entry. `refresh` and `evict` bump
//!   the generation, so superseded loads are dropped when they resolve.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::error::WorkspaceError;

use super::{FileTreeNode, Project, TreeFetcher};

type LoadResult = Result<Arc<FileTreeNode>, WorkspaceError>;
type LoadFuture = Shared<BoxFuture<'static, LoadResult>>;

struct InFlight {
    generation: u64,
    future: LoadFuture,
}

#[derive(Default)]
struct CacheState {
    trees: HashMap<String, Arc<FileTreeNode>>,
    in_flight: HashMap<String, InFlight>,
    /// Latest generation handed out per project
    generations: HashMap<String, u64>,
}

impl CacheState {
    fn next_generation(&mut self, project_id: &str) -> u64 {
        let generation = self.generations.entry(project_id.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }

    fn is_live(&self, project_id: &str, generation: u64) -> bool {
        self.generations.get(project_id).copied() == Some(generation)
    }
}

/// Cache of project file trees, shared by reference (cloning is cheap)
#[derive(Clone)]
pub struct FileTreeCache {
    fetcher: Arc<dyn TreeFetcher>,
    max_depth: usize,
    state: Arc<Mutex<CacheState>>,
}

impl FileTreeCache {
    pub fn new(fetcher: Arc<dyn TreeFetcher>, max_depth: usize) -> Self {
        Self {
            fetcher,
            max_depth,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Cached tree for a project, if one has been loaded
    pub fn get_tree(&self, project_id: &str) -> Option<Arc<FileTreeNode>> {
        self.state.lock().trees.get(project_id).cloned()
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.state.lock().trees.contains_key(project_id)
    }

    /// Whether a load is currently outstanding for a project
    pub fn is_loading(&self, project_id: &str) -> bool {
        self.state.lock().in_flight.contains_key(project_id)
    }

    /// Ids of all projects with a cached tree, sorted
    pub fn cached_project_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().trees.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Load the tree for `project` unless it is already cached.
    ///
    /// Joins an outstanding load for the same project instead of starting a
    /// second fetch. On failure nothing is cached and a later call retries.
    pub async fn ensure_loaded(&self, project: &Project) -> LoadResult {
        let future = {
            let mut state = self.state.lock();
            if let Some(tree) = state.trees.get(&project.id) {
                tracing::debug!(project_id = %project.id, "File tree cache hit");
                return Ok(tree.clone());
            }
            match state.in_flight.get(&project.id) {
                Some(in_flight) => {
                    tracing::debug!(
                        project_id = %project.id,
                        generation = in_flight.generation,
                        "Joining in-flight file tree load"
                    );
                    in_flight.future.clone()
                }
                None => self.start_load(&mut state, project),
            }
        };
        future.await
    }

    /// Fetch the tree again even if cached.
    ///
    /// Any load already outstanding for the project becomes stale.
    pub async fn refresh(&self, project: &Project) -> LoadResult {
        let future = {
            let mut state = self.state.lock();
            self.start_load(&mut state, project)
        };
        future.await
    }

    /// Drop the cached tree for a project and disown its outstanding load.
    ///
    /// Returns true if a tree was cached.
    pub fn evict(&self, project_id: &str) -> bool {
        let mut state = self.state.lock();
        state.in_flight.remove(project_id);
        if state.generations.contains_key(project_id) {
            state.next_generation(project_id);
        }
        let removed = state.trees.remove(project_id).is_some();
        if removed {
            tracing::debug!(project_id = %project_id, "Evicted file tree");
        }
        removed
    }

    fn start_load(&self, state: &mut CacheState, project: &Project) -> LoadFuture {
        let generation = state.next_generation(&project.id);
        let fetcher = Arc::clone(&self.fetcher);
        let weak_state: Weak<Mutex<CacheState>> = Arc::downgrade(&self.state);
        let project_id = project.id.clone();
        let directory = project.directory.clone();
        let max_depth = self.max_depth;

        tracing::debug!(
            project_id = %project_id,
            directory = %directory,
            generation,
            "Starting file tree load"
        );

        let future = async move {
            let result = fetcher.fetch_tree(&directory, max_depth).await;

            let Some(shared) = weak_state.upgrade() else {
                return result
                    .map(Arc::new)
                    .map_err(|e| WorkspaceError::fetch_tree(&project_id, &e));
            };
            let mut state = shared.lock();
            let live = state.is_live(&project_id, generation);
            if live {
                state.in_flight.remove(&project_id);
            }

            match result {
                Ok(tree) => {
                    let tree = Arc::new(tree);
                    if live {
                        state.trees.insert(project_id.clone(), Arc::clone(&tree));
                        tracing::debug!(
                            project_id = %project_id,
                            generation,
                            "Cached file tree"
                        );
                    } else {
                        tracing::debug!(
                            project_id = %project_id,
                            generation,
                            "Discarding stale file tree"
                        );
                    }
                    Ok(tree)
                }
                Err(e) => {
                    tracing::warn!(
                        project_id = %project_id,
                        directory = %directory,
                        error = %e,
                        "Failed to load file tree"
                    );
                    Err(WorkspaceError::fetch_tree(&project_id, &e))
                }
            }
        }
        .boxed()
        .shared();

        state.in_flight.insert(
            project.id.clone(),
            InFlight {
                generation,
                future: future.clone(),
            },
        );
        future
    }
}

impl std::fmt::Debug for FileTreeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FileTreeCache")
            .field("max_depth", &self.max_depth)
            .field("cached", &state.trees.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}
