//! In-Memory Host Services
//!
//! Stand-ins for the host's content type and data type services. They keep
//! descriptors in maps, count lookups, and can be loaded from JSON. Used by
//! tests, benchmarks and the dev tools.

use crate::models::{ContentType, PreValueCollection};
use crate::services::error::Result;
use crate::services::host::{ContentTypeService, DataTypeService};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Content type service backed by in-memory maps
///
/// Alias lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct InMemoryContentTypeService {
    by_key: HashMap<Uuid, Arc<ContentType>>,
    by_alias: HashMap<String, Arc<ContentType>>,
    key_lookups: AtomicUsize,
    alias_lookups: AtomicUsize,
}

impl InMemoryContentTypeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_types(content_types: impl IntoIterator<Item = ContentType>) -> Self {
        let mut service = Self::new();
        for content_type in content_types {
            service.insert(content_type);
        }
        service
    }

    /// Load descriptors from a JSON array of content types
    pub fn from_json_str(json: &str) -> Result<Self> {
        let content_types: Vec<ContentType> = serde_json::from_str(json)?;
        Ok(Self::with_content_types(content_types))
    }

    /// Register a content type, replacing any type with the same key or alias
    pub fn insert(&mut self, content_type: ContentType) {
        let content_type = Arc::new(content_type);
        self.by_key.insert(content_type.key, Arc::clone(&content_type));
        self.by_alias
            .insert(content_type.alias.to_lowercase(), content_type);
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }

    /// Number of `get_content_type_by_key` calls so far
    pub fn key_lookup_count(&self) -> usize {
        self.key_lookups.load(Ordering::SeqCst)
    }

    /// Number of `get_content_type` (by alias) calls so far
    pub fn alias_lookup_count(&self) -> usize {
        self.alias_lookups.load(Ordering::SeqCst)
    }
}

impl ContentTypeService for InMemoryContentTypeService {
    fn get_content_type_by_key(&self, key: Uuid) -> Result<Option<Arc<ContentType>>> {
        self.key_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.by_key.get(&key).cloned())
    }

    fn get_content_type(&self, alias: &str) -> Result<Option<Arc<ContentType>>> {
        self.alias_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.by_alias.get(&alias.to_lowercase()).cloned())
    }
}

/// Data type service backed by an in-memory map
#[derive(Debug, Default)]
pub struct InMemoryDataTypeService {
    pre_values: HashMap<i64, PreValueCollection>,
    lookups: AtomicUsize,
}

impl InMemoryDataTypeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: PreValueCollection) {
        self.pre_values.insert(collection.data_type_id, collection);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl DataTypeService for InMemoryDataTypeService {
    fn get_pre_values_by_data_type_id(
        &self,
        data_type_id: i64,
    ) -> Result<Option<PreValueCollection>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.pre_values.get(&data_type_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyType;

    #[test]
    fn test_alias_lookup_is_case_insensitive_and_counted() {
        let key = Uuid::new_v4();
        let service = InMemoryContentTypeService::with_content_types([ContentType::new(
            key, "Banner",
        )
        .with_property(PropertyType::new("title", "textbox"))]);

        assert_eq!(service.get_content_type("banner").unwrap().unwrap().key, key);
        assert!(service.get_content_type("hero").unwrap().is_none());
        assert_eq!(service.get_content_type_by_key(key).unwrap().unwrap().alias, "Banner");

        assert_eq!(service.alias_lookup_count(), 2);
        assert_eq!(service.key_lookup_count(), 1);
    }

    #[test]
    fn test_from_json_str() {
        let service = InMemoryContentTypeService::from_json_str(
            r#"[
                { "key": "11111111-1111-1111-1111-111111111111", "alias": "banner" },
                { "key": "22222222-2222-2222-2222-222222222222", "alias": "quote" }
            ]"#,
        )
        .unwrap();

        assert_eq!(service.len(), 2);
        assert!(service.get_content_type("quote").unwrap().is_some());
    }

    #[test]
    fn test_from_json_str_rejects_bad_document() {
        assert!(InMemoryContentTypeService::from_json_str("{}").is_err());
    }
}
