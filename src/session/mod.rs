//! Open sessions (tabs)
//!
//! A session is either a chat thread or an opened file. File sessions start
//! with pending content and are filled in once the read for them resolves.

pub mod reader;
mod registry;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use reader::{FileReader, LocalFileReader};
pub use registry::{OpenedFile, SessionRegistry};

/// Token identifying one file read request.
///
/// A resolved read is only applied if the session still holds the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadToken(pub u64);

/// A file read the caller is expected to perform and report back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoad {
    /// Session id (the file path)
    pub id: String,
    pub token: LoadToken,
}

/// Content of a file tab
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "lowercase")]
pub enum FileContent {
    /// Still waiting for the read to resolve
    #[default]
    Pending,
    Loaded(String),
}

impl FileContent {
    pub fn is_pending(&self) -> bool {
        matches!(self, FileContent::Pending)
    }

    pub fn as_loaded(&self) -> Option<&str> {
        match self {
            FileContent::Loaded(text) => Some(text),
            FileContent::Pending => None,
        }
    }
}

/// File-specific session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTab {
    pub path: String,
    pub content: FileContent,
    /// Read currently awaited for this tab
    pub load: Option<LoadToken>,
}

/// What a session shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    Chat,
    File(FileTab),
}

/// A single open tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Chat: opaque session id. File: the file path.
    pub id: String,
    pub title: String,
    pub kind: SessionKind,
}

impl Session {
    /// A chat session with the given id
    pub fn chat(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: SessionKind::Chat,
        }
    }

    /// A chat session with a freshly generated id
    pub fn new_chat(title: impl Into<String>) -> Self {
        Self::chat(Uuid::new_v4().to_string(), title)
    }

    /// A file session with pending content, titled after the file name
    pub fn file(path: impl Into<String>) -> Self {
        let path = path.into();
        let title = file_title(&path);
        Self {
            id: path.clone(),
            title,
            kind: SessionKind::File(FileTab {
                path,
                content: FileContent::Pending,
                load: None,
            }),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, SessionKind::File(_))
    }

    pub fn file_tab(&self) -> Option<&FileTab> {
        match &self.kind {
            SessionKind::File(tab) => Some(tab),
            SessionKind::Chat => None,
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_tab().map(|tab| tab.path.as_str())
    }

    pub fn file_content(&self) -> Option<&FileContent> {
        self.file_tab().map(|tab| &tab.content)
    }

    /// Tab label for display
    pub fn tab_name(&self) -> String {
        match &self.kind {
            SessionKind::File(tab) if tab.content.is_pending() => format!("{} …", self.title),
            _ => self.title.clone(),
        }
    }
}

fn file_title(path: &str) -> String {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
        .to_string()
}
