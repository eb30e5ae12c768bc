//! Business Services
//!
//! This module contains the inner-content services:
//!
//! - `SchemaResolver` - content type resolution through an injectable cache
//! - `TreeMaterializer` - recursive JSON-to-node-tree materialization
//! - `PreValueService` - cached data type configuration
//! - `host` - traits the host platform implements
//! - `cache` - cache store abstraction and implementations
//! - `memory` - in-memory host services for tests and tooling

pub mod cache;
pub mod error;
pub mod host;
pub mod memory;
pub mod pre_value_service;
pub mod schema_resolver;
pub mod tree_materializer;

pub use cache::{CacheStats, CacheStore, InMemoryCacheStore, LruCacheStore};
pub use error::{InnerContentError, Result};
pub use host::{ContentTypeService, DataTypeService, RequestContext};
pub use memory::{InMemoryContentTypeService, InMemoryDataTypeService};
pub use pre_value_service::{pre_values_cache_key, PreValueCache, PreValueService};
pub use schema_resolver::{SchemaCache, SchemaResolver};
pub use tree_materializer::TreeMaterializer;
