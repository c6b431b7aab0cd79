#![deny(missing_docs)]

//! # Metadata Module
//!
//! - **model**: declarative class/method/parameter fact tables and the
//!   annotation enums they carry.
//! - **registry**: named lookup plus YAML/JSON document intake.

pub mod model;
pub mod registry;

// Re-export the public surface of the fact table.
pub use model::{
    ClassKind, ClassMeta, MethodMeta, Modifiers, ParamAnnotation, ParamMeta, RouteAnnotation,
};
pub use registry::MetadataRegistry;
