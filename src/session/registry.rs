use crate::error::WorkspaceError;

use super::{FileContent, FileLoad, LoadToken, Session, SessionKind};

/// Result of opening a file tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    /// Session id (the file path)
    pub id: String,
    /// Read to perform, only set when a new tab was created
    pub load: Option<FileLoad>,
}

/// Ordered open sessions (tabs) and the active one
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Open sessions in tab order, ids are unique
    sessions: Vec<Session>,
    /// Index of the active tab, `None` only when there are no tabs
    active: Option<usize>,
    /// Last issued load token
    last_token: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session, or activate the existing one with the same id.
    ///
    /// Returns the tab index.
    pub fn open(&mut self, session: Session) -> usize {
        if let Some(index) = self.position(&session.id) {
            self.active = Some(index);
            return index;
        }

        tracing::debug!(id = %session.id, "Opening session");
        self.sessions.push(session);
        let new_index = self.sessions.len() - 1;
        self.active = Some(new_index);
        new_index
    }

    /// Open a file tab with pending content.
    ///
    /// For a new tab the returned [`FileLoad`] must be performed by the caller
    /// and reported through [`complete_file_load`](Self::complete_file_load).
    /// An already open tab is only activated, no new read is requested.
    pub fn open_file(&mut self, path: impl Into<String>) -> OpenedFile {
        let path = path.into();
        if let Some(index) = self.position(&path) {
            self.active = Some(index);
            return OpenedFile {
                id: path,
                load: None,
            };
        }

        let token = self.issue_token();
        let mut session = Session::file(path.clone());
        if let SessionKind::File(tab) = &mut session.kind {
            tab.load = Some(token);
        }
        self.open(session);

        OpenedFile {
            id: path.clone(),
            load: Some(FileLoad { id: path, token }),
        }
    }

    /// Make an open session active
    pub fn select(&mut self, id: &str) -> Result<(), WorkspaceError> {
        let index = self
            .position(id)
            .ok_or_else(|| WorkspaceError::SessionNotFound(id.to_string()))?;
        self.active = Some(index);
        Ok(())
    }

    /// Close a session by id.
    ///
    /// If it was active, the tab that slides into its place (the right
    /// neighbor) becomes active, else the new last tab, else none.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.sessions.remove(index);
        tracing::debug!(id = %id, "Closed session");

        self.active = match self.active {
            _ if self.sessions.is_empty() => None,
            Some(active) if active == index => Some(index.min(self.sessions.len() - 1)),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };

        true
    }

    /// Apply resolved file content.
    ///
    /// Only applies if the tab is still open, still pending and still waiting
    /// on this exact load. Returns whether the content was applied.
    pub fn complete_file_load(&mut self, load: &FileLoad, content: String) -> bool {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == load.id) else {
            tracing::debug!(id = %load.id, "Discarding file content for closed tab");
            return false;
        };
        let SessionKind::File(tab) = &mut session.kind else {
            return false;
        };
        if !tab.content.is_pending() || tab.load != Some(load.token) {
            tracing::debug!(
                id = %load.id,
                token = load.token.0,
                "Discarding stale file content"
            );
            return false;
        }

        tab.content = FileContent::Loaded(content);
        tab.load = None;
        true
    }

    /// Request a fresh read for a file tab still waiting on its content.
    ///
    /// Earlier reads for the tab become stale.
    pub fn request_reload(&mut self, id: &str) -> Option<FileLoad> {
        let index = self.position(id)?;
        let token = LoadToken(self.last_token + 1);
        let SessionKind::File(tab) = &mut self.sessions[index].kind else {
            return None;
        };
        if !tab.content.is_pending() {
            return None;
        }
        tab.load = Some(token);
        self.last_token = token.0;
        Some(FileLoad {
            id: id.to_string(),
            token,
        })
    }

    /// Switch to the next tab
    pub fn next_tab(&mut self) {
        if let Some(active) = self.active {
            self.active = Some((active + 1) % self.sessions.len());
        }
    }

    /// Switch to the previous tab
    pub fn prev_tab(&mut self) {
        if let Some(active) = self.active {
            self.active = Some(if active == 0 {
                self.sessions.len() - 1
            } else {
                active - 1
            });
        }
    }

    /// Get the current active tab index
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_session().map(|s| s.id.as_str())
    }

    /// Get a reference to the active session
    pub fn active_session(&self) -> Option<&Session> {
        self.active.and_then(|index| self.sessions.get(index))
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Tab index of a session
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == id)
    }

    /// Get all sessions in tab order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Get tab names for display
    pub fn tab_names(&self) -> Vec<String> {
        self.sessions.iter().map(|s| s.tab_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn issue_token(&mut self) -> LoadToken {
        self.last_token += 1;
        LoadToken(self.last_token)
    }
}
