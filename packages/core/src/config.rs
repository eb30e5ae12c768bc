/// Configuration for inner-content materialization
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    EmptyFieldKey(&'static str),

    #[error("Reserved field key '{0}' is used more than once")]
    DuplicateFieldKey(String),

    #[error("schema_cache_capacity must be greater than 0")]
    ZeroCacheCapacity,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reserved JSON field names and schema cache sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnerContentConfig {
    /// Field carrying the content type alias
    pub content_type_alias_key: String,

    /// Field carrying the content type key (GUID), checked before the alias
    pub content_type_guid_key: String,

    /// Field carrying the display name
    pub name_key: String,

    /// Field carrying the node key (GUID)
    pub key_key: String,

    /// Field carrying nested items
    pub children_key: String,

    /// Maximum cached schemas; `None` keeps every schema for the process lifetime
    pub schema_cache_capacity: Option<usize>,
}

impl Default for InnerContentConfig {
    fn default() -> Self {
        Self {
            content_type_alias_key: "contentTypeAlias".to_string(),
            content_type_guid_key: "contentTypeGuid".to_string(),
            name_key: "name".to_string(),
            key_key: "key".to_string(),
            children_key: "children".to_string(),
            schema_cache_capacity: None,
        }
    }
}

impl InnerContentConfig {
    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [
            ("content_type_alias_key", &self.content_type_alias_key),
            ("content_type_guid_key", &self.content_type_guid_key),
            ("name_key", &self.name_key),
            ("key_key", &self.key_key),
            ("children_key", &self.children_key),
        ];

        for (field, value) in &keys {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyFieldKey(*field));
            }
        }

        for (i, (_, value)) in keys.iter().enumerate() {
            if keys[i + 1..].iter().any(|(_, other)| other == value) {
                return Err(ConfigError::DuplicateFieldKey(value.to_string()));
            }
        }

        if self.schema_cache_capacity == Some(0) {
            return Err(ConfigError::ZeroCacheCapacity);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = InnerContentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.content_type_alias_key, "contentTypeAlias");
        assert_eq!(config.children_key, "children");
        assert!(config.schema_cache_capacity.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let config = InnerContentConfig {
            name_key: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyFieldKey("name_key"))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let config = InnerContentConfig {
            key_key: "name".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = InnerContentConfig {
            schema_cache_capacity: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCacheCapacity)
        ));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "content_type_alias_key": "icContentTypeAlias", "schema_cache_capacity": 64 }}"#
        )
        .unwrap();

        let config = InnerContentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.content_type_alias_key, "icContentTypeAlias");
        assert_eq!(config.content_type_guid_key, "contentTypeGuid");
        assert_eq!(config.schema_cache_capacity, Some(64));
    }

    #[test]
    fn test_from_file_validates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "children_key": "" }}"#).unwrap();

        assert!(InnerContentConfig::from_file(file.path()).is_err());
    }
}
