#![deny(missing_docs)]

//! # Metadata Registry
//!
//! Named lookup over a set of `ClassMeta` fact tables. This is the
//! "reflective metadata source" boundary of the extraction core: the
//! merge engine resolves superclass and interface names against it and
//! nothing else.
//!
//! Registries are built programmatically or parsed from a YAML/JSON
//! document of the shape:
//!
//! ```yaml
//! classes:
//!   - name: com.example.TestRest
//!     annotations:
//!       - kind: path
//!         value: /test
//!     methods: [...]
//! ```

use crate::error::{AppError, AppResult};
use crate::meta::model::ClassMeta;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk document wrapper.
#[derive(Debug, Serialize, Deserialize)]
struct RegistryDocument {
    /// All described classes, in document order.
    classes: Vec<ClassMeta>,
}

/// Insertion-ordered map of fully qualified class name to its fact
/// table.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    classes: IndexMap<String, ClassMeta>,
}

impl MetadataRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one class description. Fails on a duplicate class name;
    /// two fact tables for the same class is a configuration mistake.
    pub fn add_class(&mut self, class: ClassMeta) -> AppResult<()> {
        let name = class.name.clone();
        if self.classes.insert(name.clone(), class).is_some() {
            return Err(AppError::General(format!(
                "Duplicate class metadata for '{}'",
                name
            )));
        }
        Ok(())
    }

    /// Looks up a class by fully qualified name.
    pub fn class(&self, name: &str) -> Option<&ClassMeta> {
        self.classes.get(name)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the registry holds no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class names in insertion order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    fn from_document(doc: RegistryDocument) -> AppResult<Self> {
        let mut registry = Self::new();
        for class in doc.classes {
            registry.add_class(class)?;
        }
        Ok(registry)
    }

    /// Parses a registry from a YAML document.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let doc: RegistryDocument = serde_yaml::from_str(content).map_err(|e| {
            AppError::General(format!("Failed to parse metadata YAML: {}", e))
        })?;
        Self::from_document(doc)
    }

    /// Parses a registry from a JSON document.
    pub fn from_json(content: &str) -> AppResult<Self> {
        let doc: RegistryDocument = serde_json::from_str(content).map_err(|e| {
            AppError::General(format!("Failed to parse metadata JSON: {}", e))
        })?;
        Self::from_document(doc)
    }

    /// Loads a registry from a file, picking the parser by extension
    /// (`.json` is JSON, anything else is treated as YAML).
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::model::{ClassKind, RouteAnnotation};

    const SAMPLE: &str = r#"
classes:
  - name: com.example.TestRest
    annotations:
      - kind: path
        value: /test
      - kind: produces
        media: [application/json]
    methods:
      - name: echo
        annotations:
          - kind: get
          - kind: path
            value: /echo
  - name: com.example.EchoApi
    kind: interface
"#;

    #[test]
    fn test_parse_yaml_registry() {
        let registry = MetadataRegistry::from_yaml(SAMPLE).unwrap();
        assert_eq!(registry.len(), 2);

        let rest = registry.class("com.example.TestRest").unwrap();
        assert_eq!(rest.kind, ClassKind::Class);
        assert_eq!(
            rest.annotations[0],
            RouteAnnotation::Path {
                value: "/test".into()
            }
        );
        assert_eq!(rest.methods.len(), 1);

        let api = registry.class("com.example.EchoApi").unwrap();
        assert_eq!(api.kind, ClassKind::Interface);
        assert!(api.methods.is_empty());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let yaml = r#"
classes:
  - name: com.example.Twice
  - name: com.example.Twice
"#;
        let err = MetadataRegistry::from_yaml(yaml).unwrap_err();
        assert!(format!("{}", err).contains("Duplicate class metadata"));
    }

    #[test]
    fn test_json_round_through() {
        let registry = MetadataRegistry::from_yaml(SAMPLE).unwrap();
        let json = r#"{"classes":[{"name":"com.example.OnlyOne"}]}"#;
        let from_json = MetadataRegistry::from_json(json).unwrap();
        assert_eq!(from_json.len(), 1);
        assert!(from_json.class("com.example.OnlyOne").is_some());
        // Unrelated registries stay independent
        assert!(registry.class("com.example.OnlyOne").is_none());
    }

    #[test]
    fn test_unknown_class_lookup() {
        let registry = MetadataRegistry::from_yaml(SAMPLE).unwrap();
        assert!(registry.class("com.example.Nope").is_none());
    }
}
