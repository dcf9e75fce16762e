// file: src/error.rs
// version: 3.0.0
// guid: 3f1c9a27-6b0e-4d52-9a8e-c41d07b6e2f5

use thiserror::Error;

/// Result type alias for the converter
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error types for the configuration converter
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read source configuration: {0}")]
    Read(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("os_id must be specified for {0}")]
    OsIdNotDefined(String),

    #[error("cpus must be specified for {0}")]
    CpusNotDefined(String),

    #[error("memory must be specified for {0}")]
    MemoryNotDefined(String),

    #[error("finding suitable image id failed for {tag} (looked for \"{mangled}\")")]
    UnresolvedOsName { tag: String, mangled: String },

    #[error("invalid resource name \"{name}\": {rule}")]
    InvalidName { name: String, rule: &'static str },

    #[error("invalid {field} format \"{value}\" for {entity}")]
    NumericFormat {
        field: &'static str,
        value: String,
        entity: String,
    },

    #[error("there is no configuration file for conversion in {0}")]
    NoSourceFile(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image catalog error: {0}")]
    Catalog(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConvertError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new image catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a new prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    /// Build a numeric format error for an entity attribute
    pub fn numeric(field: &'static str, value: &str, entity: &str) -> Self {
        Self::NumericFormat {
            field,
            value: value.to_string(),
            entity: entity.to_string(),
        }
    }
}
