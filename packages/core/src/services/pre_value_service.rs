//! Cached access to data type pre-values
//!
//! Property editors read their configuration on every render, so collections
//! are memoized per data type id in a [`CacheStore`].

use crate::models::PreValueCollection;
use crate::services::cache::{CacheStats, CacheStore, InMemoryCacheStore};
use crate::services::error::Result;
use crate::services::host::DataTypeService;
use std::sync::Arc;

/// Cache of pre-value collections, keyed by [`pre_values_cache_key`]
pub type PreValueCache = dyn CacheStore<Arc<PreValueCollection>>;

pub fn pre_values_cache_key(data_type_id: i64) -> String {
    format!("InnerContent_GetPreValuesByDataTypeId_{}", data_type_id)
}

pub struct PreValueService {
    data_types: Arc<dyn DataTypeService>,
    cache: Arc<PreValueCache>,
}

impl PreValueService {
    pub fn new(data_types: Arc<dyn DataTypeService>, cache: Arc<PreValueCache>) -> Self {
        Self { data_types, cache }
    }

    /// Service with its own unbounded in-memory cache
    pub fn with_in_memory_cache(data_types: Arc<dyn DataTypeService>) -> Self {
        Self::new(
            data_types,
            Arc::new(InMemoryCacheStore::<Arc<PreValueCollection>>::new()),
        )
    }

    pub fn pre_values_by_data_type_id(
        &self,
        data_type_id: i64,
    ) -> Result<Option<Arc<PreValueCollection>>> {
        self.cache
            .get_or_compute(&pre_values_cache_key(data_type_id), &mut || {
                tracing::debug!("Loading pre-values for data type {}", data_type_id);
                Ok(self
                    .data_types
                    .get_pre_values_by_data_type_id(data_type_id)?
                    .map(Arc::new))
            })
    }

    pub fn invalidate(&self, data_type_id: i64) -> bool {
        self.cache.remove(&pre_values_cache_key(data_type_id))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
