pub mod config;
pub mod error;
pub mod mention;
pub mod session;
pub mod tree;
pub mod util;
pub mod workspace;

pub use config::Config;
pub use error::WorkspaceError;
pub use mention::{MentionFile, MentionIndex, MentionListState};
pub use session::{
    FileContent, FileLoad, FileReader, FileTab, LoadToken, LocalFileReader, OpenedFile, Session,
    SessionKind, SessionRegistry,
};
pub use tree::{
    count_files, flatten, flatten_with, FileTreeCache, FileTreeNode, FlatEntry, FlattenOptions,
    LocalTreeFetcher, NodeType, Project, TreeFetcher,
};
pub use util::{insert_sorted, sorted_lookup, Lookup};
pub use workspace::Workspace;
