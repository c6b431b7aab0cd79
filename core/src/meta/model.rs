#![deny(missing_docs)]

//! # Metadata Fact Table
//!
//! Declarative descriptions of resource classes, methods and
//! parameters. These structs stand in for live reflection: an adapter
//! for a host runtime reads its class metadata once into this table,
//! and the merge/validation core operates only on the table. That keeps
//! the core fully unit-testable without a real class hierarchy.
//!
//! The structs double as the on-disk document format (YAML or JSON),
//! parsed through serde like every other document in this workspace.

use serde::{Deserialize, Serialize};

/// The kind of a declared type, as far as route extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// A concrete class.
    #[default]
    Class,
    /// An abstract class; its methods are route candidates even when
    /// not marked public.
    Abstract,
    /// An interface; all of its methods are route candidates.
    Interface,
}

/// A route-level declarative annotation, attached to a class or to a
/// method.
///
/// HTTP verb annotations carry no payload; the rest mirror their JAX-RS
/// counterparts (`@Path`, `@Produces`, `@Consumes`) plus the custom
/// reader/writer overrides, which are threaded through by type identity
/// only and never instantiated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RouteAnnotation {
    /// `GET` verb marker.
    Get,
    /// `POST` verb marker.
    Post,
    /// `PUT` verb marker.
    Put,
    /// `DELETE` verb marker.
    Delete,
    /// `PATCH` verb marker.
    Patch,
    /// `HEAD` verb marker.
    Head,
    /// `OPTIONS` verb marker.
    Options,
    /// Route path or sub-path.
    Path {
        /// The path value, e.g. `/test` or `/echo/{name}`.
        value: String,
    },
    /// Produced media types, in declaration order.
    Produces {
        /// Media type strings, e.g. `application/json`.
        media: Vec<String>,
    },
    /// Consumed media types, in declaration order.
    Consumes {
        /// Media type strings.
        media: Vec<String>,
    },
    /// Custom request body reader, referenced by type name.
    RequestReader {
        /// Marker type name of the reader.
        reader: String,
    },
    /// Custom response writer, referenced by type name.
    ResponseWriter {
        /// Marker type name of the writer.
        writer: String,
    },
}

/// A parameter-level binding annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParamAnnotation {
    /// Bind to a path template variable.
    PathParam {
        /// Template variable name.
        value: String,
    },
    /// Bind to a query string entry.
    QueryParam {
        /// Query key.
        value: String,
    },
    /// Bind to a form field.
    FormParam {
        /// Form field name.
        value: String,
    },
    /// Bind to a request header.
    HeaderParam {
        /// Header name, e.g. `X-Test`.
        value: String,
    },
    /// Bind to a cookie.
    CookieParam {
        /// Cookie name.
        value: String,
    },
    /// Injected host context object (request, session, ...).
    Context,
    /// Declared default value, applied by readers elsewhere.
    DefaultValue {
        /// The default, always carried as a string.
        value: String,
    },
}

/// Method modifiers relevant to REST candidate eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Public visibility. Defaults to `true`; most handler metadata
    /// never spells it out.
    #[serde(default = "default_public")]
    pub public: bool,
    /// Final methods cannot be overridden and are never candidates.
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// Native methods are never candidates.
    #[serde(default, rename = "native")]
    pub is_native: bool,
    /// Abstract methods are candidates regardless of visibility.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

fn default_public() -> bool {
    true
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers {
            public: true,
            is_final: false,
            is_native: false,
            is_abstract: false,
        }
    }
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamMeta {
    /// Parameter name as declared in the signature.
    pub name: String,
    /// Declared data type, by (ideally fully qualified) name.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Binding annotations attached to this parameter.
    #[serde(default)]
    pub annotations: Vec<ParamAnnotation>,
}

/// One declared method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMeta {
    /// Method name.
    pub name: String,
    /// Modifier set; defaults to a plain public instance method.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Route annotations attached to the method.
    #[serde(default)]
    pub annotations: Vec<RouteAnnotation>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParamMeta>,
}

/// One declared class or interface, with its direct inheritance edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMeta {
    /// Fully qualified class name; registry key.
    pub name: String,
    /// Class, abstract class or interface.
    #[serde(default)]
    pub kind: ClassKind,
    /// Class-level route annotations (base path, default media types).
    #[serde(default)]
    pub annotations: Vec<RouteAnnotation>,
    /// Direct superclass, if any. The universal root object type is
    /// simply never listed.
    #[serde(default)]
    pub extends: Option<String>,
    /// Directly implemented interfaces, in declaration order.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Declared methods, in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodMeta>,
}

/// Method names belonging to the universal object identity surface;
/// these never become route candidates even when redeclared.
const OBJECT_IDENTITY_METHODS: &[&str] = &[
    "equals",
    "hashCode",
    "toString",
    "getClass",
    "clone",
    "finalize",
    "wait",
    "notify",
    "notifyAll",
];

/// Well-known names of the universal root object type. A superclass
/// edge to one of these terminates the inheritance walk; reflection
/// adapters routinely report it verbatim.
const ROOT_OBJECT_TYPES: &[&str] = &["java.lang.Object", "Object"];

impl ClassMeta {
    /// Direct superclass to walk during extraction. An edge to the
    /// universal root object type is treated as absent.
    pub fn superclass(&self) -> Option<&str> {
        self.extends
            .as_deref()
            .filter(|name| !ROOT_OBJECT_TYPES.contains(name))
    }
}

impl MethodMeta {
    /// Whether this method participates in route extraction.
    ///
    /// Must be effectively overridable/visible: a public instance
    /// method, or any method on an interface or marked abstract. Native
    /// and final methods never qualify, nor do the universal
    /// object-identity methods.
    pub fn is_rest_candidate(&self, class_kind: ClassKind) -> bool {
        if self.modifiers.is_native || self.modifiers.is_final {
            return false;
        }
        if OBJECT_IDENTITY_METHODS.contains(&self.name.as_str()) {
            return false;
        }
        self.modifiers.public
            || self.modifiers.is_abstract
            || class_kind == ClassKind::Interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_yaml_shape() {
        let yaml = r#"
- kind: get
- kind: path
  value: /echo
- kind: produces
  media: [application/json]
- kind: responseWriter
  writer: com.example.TestCustomWriter
"#;
        let parsed: Vec<RouteAnnotation> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed[0], RouteAnnotation::Get);
        assert_eq!(
            parsed[1],
            RouteAnnotation::Path {
                value: "/echo".into()
            }
        );
        assert_eq!(
            parsed[2],
            RouteAnnotation::Produces {
                media: vec!["application/json".into()]
            }
        );
        assert!(matches!(parsed[3], RouteAnnotation::ResponseWriter { .. }));
    }

    #[test]
    fn test_param_annotation_yaml_shape() {
        let yaml = r#"
- kind: headerParam
  value: X-Test
- kind: context
- kind: defaultValue
  value: "42"
"#;
        let parsed: Vec<ParamAnnotation> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed[0],
            ParamAnnotation::HeaderParam {
                value: "X-Test".into()
            }
        );
        assert_eq!(parsed[1], ParamAnnotation::Context);
        assert_eq!(
            parsed[2],
            ParamAnnotation::DefaultValue { value: "42".into() }
        );
    }

    #[test]
    fn test_modifiers_default_public() {
        let m: Modifiers = serde_yaml::from_str("{}").unwrap();
        assert!(m.public);
        assert!(!m.is_final);
    }

    #[test]
    fn test_rest_candidate_eligibility() {
        let mut method = MethodMeta {
            name: "echo".into(),
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            params: Vec::new(),
        };
        assert!(method.is_rest_candidate(ClassKind::Class));

        method.modifiers.is_final = true;
        assert!(!method.is_rest_candidate(ClassKind::Class));

        method.modifiers.is_final = false;
        method.modifiers.public = false;
        assert!(!method.is_rest_candidate(ClassKind::Class));
        // Interface methods qualify regardless of spelled-out visibility
        assert!(method.is_rest_candidate(ClassKind::Interface));
        // As do abstract methods on abstract classes
        method.modifiers.is_abstract = true;
        assert!(method.is_rest_candidate(ClassKind::Abstract));
    }

    #[test]
    fn test_root_object_superclass_treated_as_absent() {
        let mut class = ClassMeta {
            name: "com.example.Plain".into(),
            kind: ClassKind::Class,
            annotations: Vec::new(),
            extends: Some("java.lang.Object".into()),
            implements: Vec::new(),
            methods: Vec::new(),
        };
        assert_eq!(class.superclass(), None);

        class.extends = Some("Object".into());
        assert_eq!(class.superclass(), None);

        class.extends = Some("com.example.Base".into());
        assert_eq!(class.superclass(), Some("com.example.Base"));

        class.extends = None;
        assert_eq!(class.superclass(), None);
    }

    #[test]
    fn test_object_identity_methods_excluded() {
        let method = MethodMeta {
            name: "toString".into(),
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            params: Vec::new(),
        };
        assert!(!method.is_rest_candidate(ClassKind::Class));
    }
}
