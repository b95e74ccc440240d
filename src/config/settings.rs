use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::tree::flatten::DEFAULT_MAX_FLATTEN_DEPTH;
use crate::tree::FlattenOptions;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File tree fetching
    pub tree: TreeConfig,
    /// Mention list and flattening
    pub mentions: MentionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Depth passed to the tree-fetch collaborator
    pub max_depth: usize,
    /// Entry names skipped by the local tree walker
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionConfig {
    /// Rows visible in the mention list
    pub max_visible: usize,
    /// Depth limit applied when flattening trees
    pub max_flatten_depth: usize,
}

impl MentionConfig {
    pub fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            max_depth: self.max_flatten_depth,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tree: TreeConfig {
                max_depth: 10,
                ignored: vec![".git".into(), "node_modules".into(), "target".into()],
            },
            mentions: MentionConfig {
                max_visible: 10,
                max_flatten_depth: DEFAULT_MAX_FLATTEN_DEPTH,
            },
        }
    }
}

/// TOML representation of tree configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlTreeConfig {
    pub max_depth: Option<usize>,
    pub ignored: Option<Vec<String>>,
}

/// TOML representation of mention configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlMentionConfig {
    pub max_visible: Option<usize>,
    pub max_flatten_depth: Option<usize>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub tree: Option<TomlTreeConfig>,
    pub mentions: Option<TomlMentionConfig>,
}

impl Config {
    /// Load configuration from the data directory, merging with defaults.
    ///
    /// The example config is written on first run.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from a specific file, merging with defaults.
    ///
    /// A missing or invalid file leaves the defaults in place.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No config file loaded");
                return config;
            }
        };

        match toml::from_str::<TomlConfig>(&contents) {
            Ok(toml_config) => config.merge(toml_config),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Invalid config file, using defaults"
                );
            }
        }

        config
    }

    /// Overlay values present in a parsed config file
    pub fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(tree) = toml_config.tree {
            if let Some(max_depth) = tree.max_depth {
                self.tree.max_depth = max_depth;
            }
            if let Some(ignored) = tree.ignored {
                self.tree.ignored = ignored;
            }
        }

        if let Some(mentions) = toml_config.mentions {
            if let Some(max_visible) = mentions.max_visible {
                self.mentions.max_visible = max_visible.max(1);
            }
            if let Some(max_flatten_depth) = mentions.max_flatten_depth {
                self.mentions.max_flatten_depth = max_flatten_depth;
            }
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(
                        path = %parent.display(),
                        error = %e,
                        "Failed to create config directory"
                    );
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to write default config"
            );
        }
    }
}
