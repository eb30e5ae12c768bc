//! Tree Materializer
//!
//! Turns inner-content JSON into a tree of [`ContentNode`]s:
//!
//! - one schema resolution per JSON object; unresolvable objects are dropped
//! - fields matching a property type become [`PropertyBinding`]s, in input
//!   field order; other fields are ignored
//! - `name` and `key` are read once; a missing key becomes the nil GUID
//! - the container is taken from the explicit [`RequestContext`]
//! - `children` is materialized recursively at `level + 1` and attached once
//!
//! Sort order is the zero-based index in the input array, so siblings after a
//! dropped item keep their original positions.
//!
//! # Example
//!
//! ```rust
//! use innercontent_core::config::InnerContentConfig;
//! use innercontent_core::models::{ContentType, PropertyType};
//! use innercontent_core::services::{
//!     InMemoryContentTypeService, RequestContext, SchemaResolver, TreeMaterializer,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let content_types = InMemoryContentTypeService::with_content_types([
//!     ContentType::new(Uuid::new_v4(), "banner")
//!         .with_property(PropertyType::new("title", "textbox")),
//! ]);
//! let config = InnerContentConfig::default();
//! let resolver = Arc::new(SchemaResolver::from_config(Arc::new(content_types), &config)?);
//! let materializer = TreeMaterializer::new(resolver, &config);
//!
//! let items = json!([{ "contentTypeAlias": "banner", "title": "Hi" }]);
//! let nodes = materializer.materialize(&RequestContext::new(), &items, 0, false)?;
//! assert_eq!(nodes[0].value("title"), Some(&json!("Hi")));
//! # Ok(())
//! # }
//! ```

use crate::config::InnerContentConfig;
use crate::models::{ContentNode, ContentNodeParams, PropertyBinding, PublishedContentType};
use crate::services::error::{json_kind, InnerContentError, Result};
use crate::services::host::RequestContext;
use crate::services::schema_resolver::SchemaResolver;
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Builds content node trees from inner-content JSON
pub struct TreeMaterializer {
    resolver: Arc<SchemaResolver>,
    name_key: String,
    key_key: String,
    children_key: String,
}

impl TreeMaterializer {
    pub fn new(resolver: Arc<SchemaResolver>, config: &InnerContentConfig) -> Self {
        Self {
            resolver,
            name_key: config.name_key.clone(),
            key_key: config.key_key.clone(),
            children_key: config.children_key.clone(),
        }
    }

    pub fn resolver(&self) -> &Arc<SchemaResolver> {
        &self.resolver
    }

    /// Materialize a root document: an array of items or a single item
    ///
    /// `null` yields an empty tree.
    pub fn materialize(
        &self,
        request: &RequestContext,
        document: &Value,
        level: i32,
        preview: bool,
    ) -> Result<Vec<Arc<ContentNode>>> {
        match document {
            Value::Array(items) => self.materialize_items(request, items, None, level, preview),
            Value::Object(item) => Ok(self
                .materialize_item(request, item, None, 0, level, preview)?
                .into_iter()
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(InnerContentError::invalid_item(0, json_kind(other))),
        }
    }

    /// Parse and materialize a JSON document
    pub fn materialize_str(
        &self,
        request: &RequestContext,
        json: &str,
        level: i32,
        preview: bool,
    ) -> Result<Vec<Arc<ContentNode>>> {
        let document: Value = serde_json::from_str(json)?;
        self.materialize(request, &document, level, preview)
    }

    /// Materialize every item of an array, using its index as sort order
    ///
    /// Items without a resolvable content type are omitted.
    pub fn materialize_items(
        &self,
        request: &RequestContext,
        items: &[Value],
        parent: Option<&Arc<ContentNode>>,
        level: i32,
        preview: bool,
    ) -> Result<Vec<Arc<ContentNode>>> {
        let mut nodes = Vec::with_capacity(items.len());

        for (index, value) in items.iter().enumerate() {
            let item = value
                .as_object()
                .ok_or_else(|| InnerContentError::invalid_item(index, json_kind(value)))?;

            if let Some(node) = self.materialize_item(request, item, parent, index, level, preview)? {
                nodes.push(node);
            }
        }

        Ok(nodes)
    }

    /// Materialize one item and its subtree
    ///
    /// Returns `Ok(None)` when the item's content type cannot be resolved.
    pub fn materialize_item(
        &self,
        request: &RequestContext,
        item: &Map<String, Value>,
        parent: Option<&Arc<ContentNode>>,
        sort_order: usize,
        level: i32,
        preview: bool,
    ) -> Result<Option<Arc<ContentNode>>> {
        let Some(content_type) = self.resolver.resolve(item)? else {
            tracing::warn!(
                "Skipping inner-content item at position {} (level {}): content type not found",
                sort_order,
                level
            );
            return Ok(None);
        };

        let properties = bind_properties(&content_type, item, preview);
        let key = self.key_from_item(item)?;

        let node = ContentNode::new(ContentNodeParams {
            key,
            name: self.name_from_item(item),
            content_type,
            properties,
            container: request.published_content().cloned(),
            parent: parent.map(Arc::downgrade),
            sort_order,
            level,
            preview,
        });

        if let Some(children) = item.get(&self.children_key) {
            let children = match children {
                Value::Array(items) => {
                    let child_level = level
                        .checked_add(1)
                        .ok_or(InnerContentError::LevelOverflow {
                            node_key: key,
                            level,
                        })?;
                    self.materialize_items(request, items, Some(&node), child_level, preview)?
                }
                Value::Null => Vec::new(),
                other => return Err(InnerContentError::invalid_children(key, json_kind(other))),
            };

            tracing::trace!("Attaching {} children to node {}", children.len(), key);
            let attached = node.attach_children(children);
            debug_assert!(attached.is_ok(), "children attached twice to a new node");
        }

        Ok(Some(node))
    }

    fn name_from_item(&self, item: &Map<String, Value>) -> Option<String> {
        match item.get(&self.name_key)? {
            Value::Null => None,
            Value::String(name) => Some(name.clone()),
            other => Some(other.to_string()),
        }
    }

    fn key_from_item(&self, item: &Map<String, Value>) -> Result<Uuid> {
        match item.get(&self.key_key) {
            None | Some(Value::Null) => Ok(Uuid::nil()),
            Some(Value::String(raw)) => {
                Uuid::parse_str(raw).map_err(|e| InnerContentError::invalid_key(raw, e.to_string()))
            }
            Some(other) => Err(InnerContentError::invalid_key(
                other.to_string(),
                format!("expected a string, found {}", json_kind(other)),
            )),
        }
    }
}

/// Bind every field that names a property type on the schema
fn bind_properties(
    content_type: &PublishedContentType,
    item: &Map<String, Value>,
    preview: bool,
) -> Vec<PropertyBinding> {
    item.iter()
        .filter_map(|(field, value)| {
            let property_type = content_type.property_type(field)?;
            tracing::trace!("Binding field '{}' to property '{}'", field, property_type.alias);
            Some(PropertyBinding::new(
                Arc::clone(property_type),
                value.clone(),
                preview,
            ))
        })
        .collect()
}

#[cfg(test)]
#[path = "tree_materializer_test.rs"]
mod tree_materializer_test;
