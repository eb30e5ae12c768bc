//! Materialized Content Nodes
//!
//! A [`ContentNode`] is the in-memory, rendering-ready form of one inner-content
//! JSON object. Nodes form a tree:
//!
//! - children are owned (`Arc<ContentNode>`) and attached exactly once
//! - the parent is a non-owning back-reference (`Weak<ContentNode>`)
//! - the container is the host page the tree is embedded in
//!
//! Nodes are immutable once their children are attached.
//!
//! # Examples
//!
//! ```rust
//! use innercontent_core::models::{
//!     ContentNode, ContentNodeParams, ContentType, PropertyType, PublishedContentType,
//! };
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! let content_type = ContentType::new(Uuid::new_v4(), "banner")
//!     .with_property(PropertyType::new("title", "textbox"));
//! let schema = Arc::new(PublishedContentType::from_content_type(&content_type));
//!
//! let node = ContentNode::new(ContentNodeParams::new(Uuid::nil(), schema));
//! assert!(node.children().is_empty());
//! assert!(node.parent().is_none());
//! ```

use crate::models::content_type::{PropertyType, PublishedContentType};
use serde_json::{json, Map, Value};
use std::fmt::Debug;
use std::sync::{Arc, OnceLock, Weak};
use uuid::Uuid;

/// Minimal view of a piece of published content
///
/// Implemented by host pages (to act as containers) and by [`ContentNode`]
/// itself, so a materialized node can contain a nested materialization.
pub trait PublishedContent: Send + Sync + Debug {
    fn key(&self) -> Uuid;
    fn name(&self) -> Option<&str>;
    fn content_type_alias(&self) -> &str;
}

/// A property definition paired with the raw value read from JSON
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBinding {
    property_type: Arc<PropertyType>,
    source_value: Value,
    preview: bool,
}

impl PropertyBinding {
    pub fn new(property_type: Arc<PropertyType>, source_value: Value, preview: bool) -> Self {
        Self {
            property_type,
            source_value,
            preview,
        }
    }

    pub fn alias(&self) -> &str {
        &self.property_type.alias
    }

    pub fn property_type(&self) -> &Arc<PropertyType> {
        &self.property_type
    }

    /// Raw JSON value, unconverted
    pub fn source_value(&self) -> &Value {
        &self.source_value
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// False for `null`, empty strings and whitespace-only strings
    pub fn has_value(&self) -> bool {
        match &self.source_value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    }
}

/// Everything needed to construct a [`ContentNode`]
///
/// Children are not part of the parameters: they reference the node as their
/// parent and are attached after construction.
#[derive(Debug, Clone)]
pub struct ContentNodeParams {
    pub key: Uuid,
    pub name: Option<String>,
    pub content_type: Arc<PublishedContentType>,
    pub properties: Vec<PropertyBinding>,
    pub container: Option<Arc<dyn PublishedContent>>,
    pub parent: Option<Weak<ContentNode>>,
    pub sort_order: usize,
    pub level: i32,
    pub preview: bool,
}

impl ContentNodeParams {
    pub fn new(key: Uuid, content_type: Arc<PublishedContentType>) -> Self {
        Self {
            key,
            name: None,
            content_type,
            properties: Vec::new(),
            container: None,
            parent: None,
            sort_order: 0,
            level: 0,
            preview: false,
        }
    }
}

/// Detached content node built from inner-content JSON
#[derive(Debug)]
pub struct ContentNode {
    key: Uuid,
    name: Option<String>,
    content_type: Arc<PublishedContentType>,
    properties: Vec<PropertyBinding>,
    container: Option<Arc<dyn PublishedContent>>,
    parent: Option<Weak<ContentNode>>,
    sort_order: usize,
    level: i32,
    preview: bool,
    children: OnceLock<Vec<Arc<ContentNode>>>,
}

impl ContentNode {
    pub fn new(params: ContentNodeParams) -> Arc<Self> {
        Arc::new(Self {
            key: params.key,
            name: params.name,
            content_type: params.content_type,
            properties: params.properties,
            container: params.container,
            parent: params.parent,
            sort_order: params.sort_order,
            level: params.level,
            preview: params.preview,
            children: OnceLock::new(),
        })
    }

    /// Attach the child list
    ///
    /// Succeeds once. Later calls hand the rejected children back unchanged.
    pub fn attach_children(
        &self,
        children: Vec<Arc<ContentNode>>,
    ) -> Result<(), Vec<Arc<ContentNode>>> {
        self.children.set(children)
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn content_type(&self) -> &Arc<PublishedContentType> {
        &self.content_type
    }

    /// Bound properties, in the field order of the source JSON
    pub fn properties(&self) -> &[PropertyBinding] {
        &self.properties
    }

    /// Bound property by alias (case-insensitive)
    pub fn property(&self, alias: &str) -> Option<&PropertyBinding> {
        self.properties
            .iter()
            .find(|p| p.alias().eq_ignore_ascii_case(alias))
    }

    pub fn value(&self, alias: &str) -> Option<&Value> {
        self.property(alias).map(PropertyBinding::source_value)
    }

    pub fn has_value(&self, alias: &str) -> bool {
        self.property(alias).is_some_and(PropertyBinding::has_value)
    }

    pub fn container(&self) -> Option<&Arc<dyn PublishedContent>> {
        self.container.as_ref()
    }

    /// Parent node, if this is not a root and the parent is still alive
    pub fn parent(&self) -> Option<Arc<ContentNode>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn sort_order(&self) -> usize {
        self.sort_order
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn children(&self) -> &[Arc<ContentNode>] {
        self.children.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// JSON summary of this node and its subtree
    pub fn to_json(&self) -> Value {
        let mut properties = Map::with_capacity(self.properties.len());
        for binding in &self.properties {
            properties.insert(binding.alias().to_string(), binding.source_value.clone());
        }

        json!({
            "key": self.key,
            "name": self.name,
            "contentTypeAlias": self.content_type.alias(),
            "sortOrder": self.sort_order,
            "level": self.level,
            "preview": self.preview,
            "container": self.container.as_ref().map(|c| c.key()),
            "properties": properties,
            "children": self.children().iter().map(|c| c.to_json()).collect::<Vec<_>>(),
        })
    }
}

impl PublishedContent for ContentNode {
    fn key(&self) -> Uuid {
        self.key
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn content_type_alias(&self) -> &str {
        self.content_type.alias()
    }
}

#[cfg(test)]
#[path = "content_node_test.rs"]
mod content_node_test;
