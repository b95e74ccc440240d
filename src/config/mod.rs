mod settings;

pub use settings::{
    Config, MentionConfig, TomlConfig, TomlMentionConfig, TomlTreeConfig, TreeConfig,
    EXAMPLE_CONFIG,
};
