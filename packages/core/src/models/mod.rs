//! Data Models
//!
//! This module contains the core data structures used by the materializer:
//!
//! - `ContentType` / `PublishedContentType` - host descriptor and rendering schema
//! - `ContentNode` / `PropertyBinding` - the materialized content tree
//! - `PreValueCollection` - data type configuration
//!
//! Models carry no host dependencies; services wire them to the platform.

pub mod content_node;
pub mod content_type;
pub mod pre_values;

pub use content_node::{ContentNode, ContentNodeParams, PropertyBinding, PublishedContent};
pub use content_type::{
    published_content_type_cache_key, ContentType, PropertyType, PublishedContentType,
};
pub use pre_values::{PreValue, PreValueCollection};
