//! Service Layer Error Types
//!
//! Expected conditions are not errors here: a node whose content type cannot
//! be resolved is skipped, and a malformed content-type GUID is treated as
//! absent. What remains are host faults and structurally broken input.

use crate::config::ConfigError;
use thiserror::Error;
use uuid::Uuid;

/// Inner-content operation errors
#[derive(Error, Debug)]
pub enum InnerContentError {
    /// The host platform failed to answer a lookup
    #[error("Host lookup failed: {0}")]
    HostLookup(String),

    /// A batch element is not a JSON object
    #[error("Item {index} must be a JSON object, found {found}")]
    InvalidItem { index: usize, found: &'static str },

    /// The children field of a node is not a JSON array
    #[error("Children of node {node_key} must be a JSON array, found {found}")]
    InvalidChildren { node_key: Uuid, found: &'static str },

    /// The node key is present but is not a GUID
    #[error("Invalid node key '{value}': {reason}")]
    InvalidKey { value: String, reason: String },

    /// A child generation would exceed the maximum level
    #[error("Children of node {node_key} would exceed the maximum level {level}")]
    LevelOverflow { node_key: Uuid, level: i32 },

    /// Input text is not valid JSON
    #[error("Invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl InnerContentError {
    /// Create a host lookup error
    pub fn host_lookup(msg: impl Into<String>) -> Self {
        Self::HostLookup(msg.into())
    }

    /// Create an invalid item error
    pub fn invalid_item(index: usize, found: &'static str) -> Self {
        Self::InvalidItem { index, found }
    }

    /// Create an invalid children error
    pub fn invalid_children(node_key: Uuid, found: &'static str) -> Self {
        Self::InvalidChildren { node_key, found }
    }

    /// Create an invalid key error
    pub fn invalid_key(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InnerContentError>;

/// Name of a JSON value's kind, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
