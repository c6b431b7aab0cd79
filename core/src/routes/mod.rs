#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for route extraction. Orchestrates
//! Merge Engine -> Validator -> frozen definition/handler mapping.

pub mod definition;
pub(crate) mod merge;
pub(crate) mod validator;

use crate::error::AppResult;
use crate::meta::registry::MetadataRegistry;
use crate::routes::definition::{HandlerRef, RouteDefinition};
use indexmap::IndexMap;

/// The frozen result of one extraction call: insertion-ordered mapping
/// from route definition to the handler that serves it. Map identity
/// follows `RouteDefinition` identity, i.e. the `(method, path)` pair.
pub type RouteMapping = IndexMap<RouteDefinition, HandlerRef>;

/// Extracts all route definitions for `class_name` and its inheritance
/// graph from the registry.
///
/// The sole public operation of the core. Pure and reentrant: no I/O,
/// no shared state, safe to call concurrently for different classes.
/// Fails all-or-nothing; a single malformed operation aborts the whole
/// class (see the error kinds on [`crate::error::AppError`]).
pub fn extract_routes(registry: &MetadataRegistry, class_name: &str) -> AppResult<RouteMapping> {
    let mut memo = merge::MergeMemo::new();
    let candidates = merge::collect(registry, class_name, &mut memo)?;
    validator::validate(class_name, candidates)
}
