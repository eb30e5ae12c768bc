//! Host Platform Interfaces
//!
//! The core never talks to the content platform directly. The host implements
//! these traits and hands them in:
//!
//! - `ContentTypeService` - content type descriptors by key or alias
//! - `DataTypeService` - data type configuration (pre-values)
//! - `RequestContext` - the page currently being rendered, passed explicitly
//!
//! Implementations must be usable from several threads at once.

use crate::models::{ContentType, PreValueCollection, PublishedContent};
use crate::services::error::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Content type lookups provided by the host
///
/// Lookups may be expensive (database round-trips); callers cache results.
/// `Ok(None)` means "no such type". `Err` is reserved for host faults.
pub trait ContentTypeService: Send + Sync {
    fn get_content_type_by_key(&self, key: Uuid) -> Result<Option<Arc<ContentType>>>;

    fn get_content_type(&self, alias: &str) -> Result<Option<Arc<ContentType>>>;
}

/// Data type configuration lookups provided by the host
pub trait DataTypeService: Send + Sync {
    fn get_pre_values_by_data_type_id(&self, data_type_id: i64)
        -> Result<Option<PreValueCollection>>;
}

/// Rendering context the content tree is embedded in
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    published_content: Option<Arc<dyn PublishedContent>>,
}

impl RequestContext {
    /// Context with no published content (e.g. background rendering)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_published_content(published_content: Arc<dyn PublishedContent>) -> Self {
        Self {
            published_content: Some(published_content),
        }
    }

    pub fn has_published_content(&self) -> bool {
        self.published_content.is_some()
    }

    pub fn published_content(&self) -> Option<&Arc<dyn PublishedContent>> {
        self.published_content.as_ref()
    }
}
