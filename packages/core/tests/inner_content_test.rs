//! Integration tests for inner-content materialization
//!
//! Tests cover:
//! - Content types loaded from JSON descriptors
//! - Tree-wide level and sort order invariants
//! - Schema cache behaviour across a batch
//! - Nested materialization using a node as container
//! - Concurrent materialization over a shared resolver
//! - Pre-value lookup for bound properties

use anyhow::Result;
use innercontent_core::{
    ContentNode, InMemoryContentTypeService, InMemoryDataTypeService, InnerContentConfig,
    PreValue, PreValueCollection, PreValueService, PublishedContent, RequestContext,
    SchemaResolver, TreeMaterializer,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

const CONTENT_TYPES: &str = r#"[
    {
        "key": "c0000000-0000-0000-0000-000000000001",
        "alias": "banner",
        "name": "Banner",
        "propertyTypes": [
            { "alias": "title", "propertyEditorAlias": "textbox", "dataTypeId": 10 },
            { "alias": "image", "propertyEditorAlias": "mediaPicker", "dataTypeId": 11 }
        ]
    },
    {
        "key": "c0000000-0000-0000-0000-000000000002",
        "alias": "section",
        "name": "Section",
        "propertyTypes": [
            { "alias": "heading", "propertyEditorAlias": "textbox", "dataTypeId": 10 }
        ]
    }
]"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Test helper: Create a test environment
fn create_test_env() -> Result<(TreeMaterializer, Arc<InMemoryContentTypeService>)> {
    init_tracing();
    let service = Arc::new(InMemoryContentTypeService::from_json_str(CONTENT_TYPES)?);
    let config = InnerContentConfig::default();
    let resolver = Arc::new(SchemaResolver::from_config(service.clone(), &config)?);
    Ok((TreeMaterializer::new(resolver, &config), service))
}

/// Walk a tree, checking level and parent links against the expected depth
fn assert_tree_invariants(nodes: &[Arc<ContentNode>], parent: Option<&Arc<ContentNode>>, level: i32) {
    let mut previous_sort_order = None;
    for node in nodes {
        assert_eq!(node.level(), level);
        match parent {
            Some(parent) => assert!(Arc::ptr_eq(&node.parent().unwrap(), parent)),
            None => assert!(node.parent().is_none()),
        }
        if let Some(previous) = previous_sort_order {
            assert!(node.sort_order() > previous, "siblings keep input order");
        }
        previous_sort_order = Some(node.sort_order());
        assert_tree_invariants(node.children(), Some(node), level + 1);
    }
}

fn generate_tree(depth: usize, width: usize) -> Value {
    let items: Vec<Value> = (0..width)
        .map(|i| {
            let alias = match i % 3 {
                0 => "section",
                1 => "banner",
                _ => "retired",
            };
            let mut item = json!({
                "contentTypeAlias": alias,
                "name": format!("node-{depth}-{i}"),
                "heading": "Heading",
                "title": "Title"
            });
            if depth > 0 {
                item["children"] = generate_tree(depth - 1, width);
            }
            item
        })
        .collect();
    Value::Array(items)
}

// =========================================================================
// Tree Invariant Tests
// =========================================================================

#[test]
fn test_generated_tree_invariants() -> Result<()> {
    let (materializer, service) = create_test_env()?;
    let document = generate_tree(3, 5);

    let nodes = materializer.materialize(&RequestContext::new(), &document, 2, false)?;

    // the "retired" item at position 2 is dropped along with its subtree
    assert_eq!(nodes.len(), 4);
    assert_eq!(
        nodes.iter().map(|n| n.sort_order()).collect::<Vec<_>>(),
        vec![0, 1, 3, 4]
    );
    assert_tree_invariants(&nodes, None, 2);

    // banner and section resolved once each; retired misses are never cached
    let stats = materializer.resolver().cache_stats();
    assert_eq!(stats.entries, 2);
    assert!(service.alias_lookup_count() > 2);
    Ok(())
}

#[test]
fn test_only_declared_properties_are_bound() -> Result<()> {
    let (materializer, _service) = create_test_env()?;
    let document = json!([
        { "contentTypeAlias": "section", "heading": "H", "title": "not on section" },
        { "contentTypeAlias": "banner", "heading": "not on banner", "title": "T" }
    ]);

    let nodes = materializer.materialize(&RequestContext::new(), &document, 0, false)?;

    assert_eq!(nodes[0].properties().len(), 1);
    assert!(nodes[0].has_value("heading"));
    assert!(!nodes[0].has_value("title"));
    assert_eq!(nodes[1].properties().len(), 1);
    assert!(nodes[1].has_value("title"));
    Ok(())
}

// =========================================================================
// Schema Cache Tests
// =========================================================================

#[test]
fn test_guid_then_alias_uses_single_lookup() -> Result<()> {
    let (materializer, service) = create_test_env()?;
    let document = json!([
        { "contentTypeGuid": "c0000000-0000-0000-0000-000000000001", "contentTypeAlias": "section" },
        { "contentTypeAlias": "banner" }
    ]);

    let nodes = materializer.materialize(&RequestContext::new(), &document, 0, false)?;

    assert_eq!(nodes[0].content_type().alias(), "banner");
    assert!(Arc::ptr_eq(nodes[0].content_type(), nodes[1].content_type()));
    assert_eq!(service.key_lookup_count(), 1);
    assert_eq!(service.alias_lookup_count(), 0);
    Ok(())
}

#[test]
fn test_repeated_materialization_reuses_schemas() -> Result<()> {
    let (materializer, service) = create_test_env()?;
    let document = json!([{ "contentTypeAlias": "banner", "title": "Hi" }]);

    let first = materializer.materialize(&RequestContext::new(), &document, 0, false)?;
    let second = materializer.materialize(&RequestContext::new(), &document, 0, true)?;

    assert!(Arc::ptr_eq(first[0].content_type(), second[0].content_type()));
    assert_eq!(service.alias_lookup_count(), 1);
    assert!(!first[0].is_preview());
    assert!(second[0].is_preview());
    Ok(())
}

// =========================================================================
// Container Tests
// =========================================================================

#[test]
fn test_materialized_node_as_container() -> Result<()> {
    let (materializer, _service) = create_test_env()?;
    let pages = materializer.materialize(
        &RequestContext::new(),
        &json!({ "contentTypeAlias": "section", "name": "Landing" }),
        0,
        false,
    )?;
    let page: Arc<dyn PublishedContent> = pages[0].clone();

    let embedded = materializer.materialize(
        &RequestContext::with_published_content(page),
        &json!([{ "contentTypeAlias": "banner" }]),
        0,
        false,
    )?;

    let container = embedded[0].container().unwrap();
    assert_eq!(container.name(), Some("Landing"));
    assert_eq!(container.content_type_alias(), "section");
    Ok(())
}

// =========================================================================
// Concurrency Tests
// =========================================================================

#[test]
fn test_concurrent_materialization_shares_cache() -> Result<()> {
    let (materializer, service) = create_test_env()?;
    let materializer = Arc::new(materializer);

    // warm the cache so every thread takes the read path
    materializer.resolver().published_content_type("banner")?;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let materializer = Arc::clone(&materializer);
            thread::spawn(move || {
                let document = json!([{ "contentTypeAlias": "banner", "title": format!("t{i}") }]);
                materializer.materialize(&RequestContext::new(), &document, 0, false)
            })
        })
        .collect();

    let mut schemas = Vec::new();
    for handle in handles {
        let nodes = handle.join().expect("materialization thread panicked")?;
        schemas.push(Arc::clone(nodes[0].content_type()));
    }

    assert!(schemas.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(service.alias_lookup_count(), 1);
    Ok(())
}

// =========================================================================
// Pre-value Tests
// =========================================================================

#[test]
fn test_pre_values_for_bound_property() -> Result<()> {
    let (materializer, _service) = create_test_env()?;
    let mut data_types = InMemoryDataTypeService::new();
    data_types.insert(PreValueCollection::new(
        11,
        vec![PreValue {
            id: 1,
            alias: "onlyImages".to_string(),
            value: "1".to_string(),
            sort_order: 0,
        }],
    ));
    let pre_values = PreValueService::with_in_memory_cache(Arc::new(data_types));

    let nodes = materializer.materialize(
        &RequestContext::new(),
        &json!([{ "contentTypeAlias": "banner", "image": "media-1" }]),
        0,
        false,
    )?;

    let binding = nodes[0].property("image").unwrap();
    let collection = pre_values
        .pre_values_by_data_type_id(binding.property_type().data_type_id)?
        .unwrap();
    assert_eq!(collection.get("onlyImages"), Some("1"));
    Ok(())
}
