//! Inner Content Core
//!
//! This crate turns inner-content JSON (nested content items embedded in a
//! page property) into a tree of rendering-ready content nodes for a
//! content-management platform.
//!
//! # Architecture
//!
//! - **Schema resolution**: each item's content type is found by GUID first,
//!   then by alias, through an injectable schema cache
//! - **Tree materialization**: items become `ContentNode`s with bound
//!   properties, ordered children and parent back-references
//! - **Host seams**: content types, data types and the current page come from
//!   traits the host implements; nothing is read from global state
//!
//! # Modules
//!
//! - [`models`] - Content types, content nodes, pre-values
//! - [`services`] - Resolver, materializer, caches, host traits
//! - [`config`] - Reserved field names and cache sizing

pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{ConfigError, InnerContentConfig};
pub use models::*;
pub use services::*;
