//! Content Type Definitions
//!
//! This module contains the two shapes a content type takes inside the core:
//!
//! - [`ContentType`] - the descriptor returned by the host's type service
//!   (key, alias, declared property types)
//! - [`PublishedContentType`] - the rendering-ready schema derived from a
//!   descriptor, with case-insensitive property lookup
//!
//! ## Example Descriptor
//!
//! ```json
//! {
//!   "key": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
//!   "alias": "banner",
//!   "name": "Banner",
//!   "propertyTypes": [
//!     { "alias": "title", "propertyEditorAlias": "textbox", "dataTypeId": 12 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Declared property on a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    /// Property alias (matched against JSON field names)
    pub alias: String,

    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Editor that produced the raw value (e.g. "textbox", "richtext")
    #[serde(default)]
    pub property_editor_alias: String,

    /// Data type whose pre-values configure the editor
    #[serde(default)]
    pub data_type_id: i64,
}

impl PropertyType {
    pub fn new(alias: impl Into<String>, property_editor_alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            name: None,
            property_editor_alias: property_editor_alias.into(),
            data_type_id: 0,
        }
    }

    pub fn with_data_type_id(mut self, data_type_id: i64) -> Self {
        self.data_type_id = data_type_id;
        self
    }
}

/// Content type descriptor as provided by the host platform
///
/// Descriptors are looked up by key (GUID) or by alias. They are not used for
/// rendering directly; the resolver turns them into [`PublishedContentType`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// Stable identifier of the content type
    pub key: Uuid,

    /// Human-readable identifier, unique per platform
    pub alias: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Declared properties, in declaration order
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
}

impl ContentType {
    pub fn new(key: Uuid, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            key,
            name: alias.clone(),
            alias,
            property_types: Vec::new(),
        }
    }

    pub fn with_property(mut self, property_type: PropertyType) -> Self {
        self.property_types.push(property_type);
        self
    }
}

/// Build the schema cache key for an alias
///
/// Keys are case-insensitive on the alias: `Banner` and `banner` share an entry.
pub fn published_content_type_cache_key(alias: &str) -> String {
    format!("PublishedContentType_content_{}", alias.to_lowercase())
}

/// Rendering-ready schema for content nodes
///
/// Built once per alias and shared through the schema cache, so two nodes of
/// the same type hold the same `Arc<PublishedContentType>`.
#[derive(Debug, Clone)]
pub struct PublishedContentType {
    key: Uuid,
    alias: String,
    property_types: Vec<Arc<PropertyType>>,
    /// lowercase alias -> index into `property_types`
    index: HashMap<String, usize>,
}

impl PublishedContentType {
    /// Derive the published schema from a host descriptor
    ///
    /// When two property types differ only by case the first declaration wins.
    pub fn from_content_type(content_type: &ContentType) -> Self {
        let property_types: Vec<Arc<PropertyType>> = content_type
            .property_types
            .iter()
            .cloned()
            .map(Arc::new)
            .collect();

        let mut index = HashMap::with_capacity(property_types.len());
        for (position, property_type) in property_types.iter().enumerate() {
            index
                .entry(property_type.alias.to_lowercase())
                .or_insert(position);
        }

        Self {
            key: content_type.key,
            alias: content_type.alias.clone(),
            property_types,
            index,
        }
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Property types in declaration order
    pub fn property_types(&self) -> &[Arc<PropertyType>] {
        &self.property_types
    }

    /// Look up a property type by alias (case-insensitive)
    pub fn property_type(&self, alias: &str) -> Option<&Arc<PropertyType>> {
        self.index
            .get(&alias.to_lowercase())
            .map(|&position| &self.property_types[position])
    }

    /// Key under which this schema is stored in the schema cache
    pub fn cache_key(&self) -> String {
        published_content_type_cache_key(&self.alias)
    }
}
