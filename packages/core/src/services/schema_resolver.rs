//! Schema Resolver
//!
//! Determines the published content type ("schema") of one inner-content JSON
//! object. Resolution order, first match wins:
//!
//! 1. **Content type GUID** - looked up through the host type service. On a hit
//!    the published schema is built from the descriptor and pushed into the
//!    alias-keyed schema cache, then resolution continues with its alias.
//! 2. **Content type alias** - taken from the item when non-empty.
//! 3. **Schema cache** - the alias is resolved through the cache; a miss costs
//!    one host lookup by alias.
//!
//! Pre-populating the cache in step 1 means a batch that addresses the same
//! type by GUID and later by alias performs a single expensive lookup.
//!
//! An unresolvable item yields `Ok(None)`; the caller skips it. A malformed
//! GUID is treated as absent. Host faults propagate as errors.

use crate::config::InnerContentConfig;
use crate::models::{
    published_content_type_cache_key, ContentType, PublishedContentType,
};
use crate::services::cache::{CacheStats, CacheStore, InMemoryCacheStore, LruCacheStore};
use crate::services::error::Result;
use crate::services::host::ContentTypeService;
use serde_json::{Map, Value};
use std::num::NonZeroUsize;
use std::sync::Arc;
use uuid::Uuid;

/// Cache of published schemas, keyed by [`published_content_type_cache_key`]
pub type SchemaCache = dyn CacheStore<Arc<PublishedContentType>>;

/// Resolves content types for inner-content items
pub struct SchemaResolver {
    content_types: Arc<dyn ContentTypeService>,
    cache: Arc<SchemaCache>,
    alias_key: String,
    guid_key: String,
}

impl SchemaResolver {
    /// Create a resolver over an explicit cache store
    ///
    /// Pass the same cache to every resolver that should share schemas.
    pub fn new(
        content_types: Arc<dyn ContentTypeService>,
        cache: Arc<SchemaCache>,
        config: &InnerContentConfig,
    ) -> Self {
        Self {
            content_types,
            cache,
            alias_key: config.content_type_alias_key.clone(),
            guid_key: config.content_type_guid_key.clone(),
        }
    }

    /// Create a resolver with the cache store the configuration asks for
    ///
    /// `schema_cache_capacity = None` selects an unbounded in-memory store,
    /// `Some(n)` an LRU store holding `n` schemas.
    pub fn from_config(
        content_types: Arc<dyn ContentTypeService>,
        config: &InnerContentConfig,
    ) -> Result<Self> {
        config.validate()?;

        let cache: Arc<SchemaCache> = match config.schema_cache_capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Arc::new(LruCacheStore::<Arc<PublishedContentType>>::new(capacity)),
            None => Arc::new(InMemoryCacheStore::<Arc<PublishedContentType>>::new()),
        };

        Ok(Self::new(content_types, cache, config))
    }

    /// Resolve the published schema for an item
    pub fn resolve(&self, item: &Map<String, Value>) -> Result<Option<Arc<PublishedContentType>>> {
        let mut alias = None;

        if let Some(key) = self.content_type_key_from_item(item) {
            if let Some(content_type) = self.content_types.get_content_type_by_key(key)? {
                tracing::debug!(
                    "Resolved content type '{}' from key {}",
                    content_type.alias,
                    key
                );
                self.prime_cache(&content_type);
                alias = Some(content_type.alias.clone());
            } else {
                tracing::debug!("No content type with key {}, falling back to alias", key);
            }
        }

        let alias = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => alias,
            None => match self.content_type_alias_from_item(item) {
                Some(alias) if !alias.is_empty() => alias.to_string(),
                _ => return Ok(None),
            },
        };

        self.published_content_type(&alias)
    }

    /// Cache-backed schema lookup by alias
    ///
    /// Repeated calls for the same alias return the same `Arc` without
    /// touching the host until the entry is invalidated.
    pub fn published_content_type(&self, alias: &str) -> Result<Option<Arc<PublishedContentType>>> {
        let cache_key = published_content_type_cache_key(alias);

        self.cache.get_or_compute(&cache_key, &mut || {
            tracing::debug!("Schema cache miss for '{}', querying host", alias);
            let content_type = self.content_types.get_content_type(alias)?;
            if content_type.is_none() {
                tracing::debug!("Host has no content type with alias '{}'", alias);
            }
            Ok(content_type.map(|ct| {
                Arc::new(PublishedContentType::from_content_type(&ct))
            }))
        })
    }

    /// Content type descriptor for an item, by its alias field only
    ///
    /// Bypasses the schema cache and the GUID field. Blank aliases yield `None`.
    pub fn content_type_from_item(&self, item: &Map<String, Value>) -> Result<Option<Arc<ContentType>>> {
        match self.content_type_alias_from_item(item) {
            Some(alias) if !alias.trim().is_empty() => self.content_types.get_content_type(alias),
            _ => Ok(None),
        }
    }

    /// Alias field of an item, when it is a string
    pub fn content_type_alias_from_item<'a>(&self, item: &'a Map<String, Value>) -> Option<&'a str> {
        item.get(&self.alias_key).and_then(Value::as_str)
    }

    /// GUID field of an item, when it parses to a non-nil GUID
    pub fn content_type_key_from_item(&self, item: &Map<String, Value>) -> Option<Uuid> {
        let raw = item.get(&self.guid_key)?.as_str()?;
        match Uuid::parse_str(raw) {
            Ok(key) if !key.is_nil() => Some(key),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Ignoring malformed content type key '{}': {}", raw, e);
                None
            }
        }
    }

    /// Drop the cached schema for one alias
    pub fn invalidate(&self, alias: &str) -> bool {
        self.cache
            .remove(&published_content_type_cache_key(alias))
    }

    /// Drop every cached schema
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Store the schema for a descriptor already fetched by key
    ///
    /// An existing entry is kept so previously handed-out `Arc`s stay current.
    /// Descriptors without an alias are not cached.
    fn prime_cache(&self, content_type: &ContentType) {
        if content_type.alias.is_empty() {
            return;
        }

        let primed = self.cache.insert_if_absent(
            &published_content_type_cache_key(&content_type.alias),
            Arc::new(PublishedContentType::from_content_type(content_type)),
        );
        if primed {
            tracing::debug!("Primed schema cache for '{}'", content_type.alias);
        }
    }
}

#[cfg(test)]
#[path = "schema_resolver_test.rs"]
mod schema_resolver_test;
