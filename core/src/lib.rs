#![deny(missing_docs)]

//! # Restmap Core
//!
//! Core library for extracting normalized route definitions from
//! declaratively described REST resource classes.
//!
//! The heart of the crate is the definition resolution and merge
//! engine: it walks a class's inheritance graph (superclass and
//! interfaces), collects the partial route metadata declared at each
//! level, merges it with "more specific wins, missing stays inherited"
//! semantics, and validates parameter-binding consistency before
//! handing back a frozen `RouteDefinition -> HandlerRef` mapping.
//!
//! The host runtime's reflection never appears here: class metadata is
//! consumed as a plain fact table (see [`meta`]), built in code or
//! parsed from a YAML/JSON document.

/// Shared error types.
pub mod error;

/// Class/method/parameter metadata fact tables and registry.
pub mod meta;

/// Route definitions, merge engine and validation.
pub mod routes;

pub use error::{AppError, AppResult};
pub use meta::{
    ClassKind, ClassMeta, MetadataRegistry, MethodMeta, Modifiers, ParamAnnotation, ParamMeta,
    RouteAnnotation,
};
pub use routes::definition::{
    HandlerParam, HandlerRef, HttpMethod, MethodParameter, ParameterKind, RouteDefinition,
};
pub use routes::{extract_routes, RouteMapping};
