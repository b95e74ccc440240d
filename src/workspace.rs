//! Workspace context
//!
//! Owns the project list, the file tree cache and the open sessions for one
//! client. Nothing here is global: construct as many independent workspaces
//! as needed.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::WorkspaceError;
use crate::mention::MentionIndex;
use crate::session::{FileLoad, FileReader, LocalFileReader, Session, SessionRegistry};
use crate::tree::{FileTreeCache, LocalTreeFetcher, Project, TreeFetcher};

pub struct Workspace {
    config: Config,
    cache: FileTreeCache,
    reader: Arc<dyn FileReader>,
    projects: Mutex<Vec<Project>>,
    sessions: Mutex<SessionRegistry>,
}

impl Workspace {
    pub fn new(config: Config, fetcher: Arc<dyn TreeFetcher>, reader: Arc<dyn FileReader>) -> Self {
        let cache = FileTreeCache::new(fetcher, config.tree.max_depth);
        Self {
            config,
            cache,
            reader,
            projects: Mutex::new(Vec::new()),
            sessions: Mutex::new(SessionRegistry::new()),
        }
    }

    /// A workspace backed by the local filesystem
    pub fn local(config: Config) -> Self {
        let fetcher = LocalTreeFetcher::new().with_ignored(config.tree.ignored.clone());
        Self::new(config, Arc::new(fetcher), Arc::new(LocalFileReader))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &FileTreeCache {
        &self.cache
    }

    /// Snapshot of the current project list
    pub fn projects(&self) -> Vec<Project> {
        self.projects.lock().clone()
    }

    /// Replace the project list.
    ///
    /// Trees of projects no longer listed are evicted and newly listed
    /// projects are loaded concurrently. Load failures are returned, not
    /// raised; those projects simply have no tree until a later sync.
    pub async fn sync_projects(&self, projects: Vec<Project>) -> Vec<WorkspaceError> {
        let removed: Vec<String> = {
            let mut current = self.projects.lock();
            let keep: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();
            let removed = current
                .iter()
                .filter(|p| !keep.contains(p.id.as_str()))
                .map(|p| p.id.clone())
                .collect();
            *current = projects.clone();
            removed
        };

        for project_id in &removed {
            self.cache.evict(project_id);
        }

        let loads = projects
            .iter()
            .filter(|p| !self.cache.contains(&p.id))
            .map(|p| self.cache.ensure_loaded(p));
        let errors: Vec<WorkspaceError> = join_all(loads)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();

        tracing::debug!(
            projects = projects.len(),
            removed = removed.len(),
            failed = errors.len(),
            "Synced projects"
        );
        errors
    }

    /// Force a refetch of one project's tree
    pub async fn refresh_project(&self, project_id: &str) -> Result<(), WorkspaceError> {
        let project = self
            .projects
            .lock()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| WorkspaceError::ProjectNotFound(project_id.to_string()))?;
        self.cache.refresh(&project).await.map(|_| ())
    }

    /// Mention index over every cached project tree
    pub fn mentions(&self) -> MentionIndex {
        let projects = self.projects();
        MentionIndex::build(
            &projects,
            &self.cache,
            self.config.mentions.flatten_options(),
        )
    }

    /// Open a chat session, or activate it if already open
    pub fn open_chat(&self, session: Session) {
        self.sessions.lock().open(session);
    }

    /// Open a file tab and load its content.
    ///
    /// Re-opening an open tab only activates it. If the tab is closed or
    /// re-requested before the read resolves, the content is dropped.
    pub async fn open_file(&self, path: &str) -> Result<(), WorkspaceError> {
        let opened = self.sessions.lock().open_file(path);
        match opened.load {
            Some(load) => self.perform_load(load).await,
            None => Ok(()),
        }
    }

    /// Retry the read for a file tab still waiting on its content
    pub async fn reload_file(&self, id: &str) -> Result<(), WorkspaceError> {
        let load = self.sessions.lock().request_reload(id);
        match load {
            Some(load) => self.perform_load(load).await,
            None => Ok(()),
        }
    }

    pub fn select(&self, id: &str) -> Result<(), WorkspaceError> {
        self.sessions.lock().select(id)
    }

    pub fn close(&self, id: &str) -> bool {
        self.sessions.lock().close(id)
    }

    /// Snapshot of open sessions in tab order
    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.lock().sessions().to_vec()
    }

    pub fn session(&self, id: &str) -> Option<Session> {
        self.sessions.lock().session(id).cloned()
    }

    pub fn active_id(&self) -> Option<String> {
        self.sessions.lock().active_id().map(str::to_string)
    }

    /// Run `f` against the session registry
    pub fn with_sessions<R>(&self, f: impl FnOnce(&mut SessionRegistry) -> R) -> R {
        f(&mut self.sessions.lock())
    }

    async fn perform_load(&self, load: FileLoad) -> Result<(), WorkspaceError> {
        match self.reader.read_file(&load.id).await {
            Ok(content) => {
                let applied = self.sessions.lock().complete_file_load(&load, content);
                tracing::debug!(id = %load.id, applied, "File read resolved");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %load.id, error = %e, "Failed to read file");
                Err(WorkspaceError::read_file(&load.id, &e))
            }
        }
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("projects", &self.projects.lock().len())
            .field("sessions", &self.sessions.lock().len())
            .finish()
    }
}
