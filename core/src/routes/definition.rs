#![deny(missing_docs)]

//! # Route Definition
//!
//! Intermediate representation of one logical REST operation: HTTP
//! verb, resolved path, media types, ordered parameters and optional
//! reader/writer overrides.
//!
//! Definitions are built in two steps: a **root** definition captures
//! class-level defaults (no verb, no handler), and a **method-level**
//! definition resolves a handler against that root. `join` then layers
//! same-operation definitions discovered elsewhere in the inheritance
//! graph; it is a pure fill-in fold and never overwrites a field that
//! is already present.

use crate::error::{AppError, AppResult};
use crate::meta::model::{ClassMeta, MethodMeta, ParamAnnotation, ParamMeta, RouteAnnotation};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// HTTP verbs supported by route declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// True for verbs that conventionally carry a request entity.
    ///
    /// Only operations on these verbs may classify an un-annotated
    /// parameter as the implicit body parameter.
    pub fn request_has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    /// Canonical upper-case verb name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The binding source of a handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Path template variable.
    Path,
    /// Query string entry.
    Query,
    /// Form field.
    Form,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Injected host context object.
    Context,
    /// Request body entity.
    Body,
    /// Transient pre-resolution state; resolved to `Body` (or rejected)
    /// by the validator and never surfaced through the public API.
    Unknown,
}

/// One handler parameter with its resolved binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodParameter {
    /// Bound name (template variable, query key, header name, ...), or
    /// the declared data type name while the parameter is an unresolved
    /// body candidate.
    pub name: String,
    /// Binding source.
    pub kind: ParameterKind,
    /// Declared data type, used for deserialization elsewhere.
    pub data_type: String,
    /// Explicitly declared default value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl MethodParameter {
    /// Resolves one declared parameter against its binding annotations.
    ///
    /// The first binding annotation determines the kind; with no
    /// recognized binding annotation the parameter stays `Unknown` and
    /// is named after its data type, marking it as a body candidate.
    pub fn from_meta(param: &ParamMeta) -> Self {
        let mut kind = ParameterKind::Unknown;
        let mut name = param.data_type.clone();
        let mut default_value = None;

        for annotation in &param.annotations {
            match annotation {
                ParamAnnotation::DefaultValue { value } => {
                    default_value = Some(value.clone());
                }
                _ if kind != ParameterKind::Unknown => {} // first binding wins
                ParamAnnotation::PathParam { value } => {
                    kind = ParameterKind::Path;
                    name = value.clone();
                }
                ParamAnnotation::QueryParam { value } => {
                    kind = ParameterKind::Query;
                    name = value.clone();
                }
                ParamAnnotation::FormParam { value } => {
                    kind = ParameterKind::Form;
                    name = value.clone();
                }
                ParamAnnotation::HeaderParam { value } => {
                    kind = ParameterKind::Header;
                    name = value.clone();
                }
                ParamAnnotation::CookieParam { value } => {
                    kind = ParameterKind::Cookie;
                    name = value.clone();
                }
                ParamAnnotation::Context => {
                    kind = ParameterKind::Context;
                    name = param.name.clone();
                }
            }
        }

        MethodParameter {
            name,
            kind,
            data_type: param.data_type.clone(),
            default_value,
        }
    }

    /// Fill-in merge with the same-position parameter of an ancestor
    /// declaration: an unresolved local parameter adopts the ancestor's
    /// binding, and a missing default is inherited.
    fn join(&self, other: &MethodParameter) -> MethodParameter {
        let mut merged = self.clone();
        if merged.kind == ParameterKind::Unknown && other.kind != ParameterKind::Unknown {
            merged.kind = other.kind;
            merged.name = other.name.clone();
        }
        if merged.default_value.is_none() {
            merged.default_value = other.default_value.clone();
        }
        merged
    }
}

/// Reference to the reflected handler a definition wraps: class name,
/// method name and the ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerRef {
    /// Fully qualified name of the declaring class.
    pub class: String,
    /// Method name.
    pub method: String,
    /// Parameters in declaration order.
    pub params: Vec<HandlerParam>,
}

/// One parameter of a handler signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerParam {
    /// Declared data type name.
    pub data_type: String,
    /// Declared parameter name.
    pub name: String,
}

impl HandlerRef {
    /// Builds a reference for a method declared on `class_name`.
    pub fn new(class_name: &str, method: &MethodMeta) -> Self {
        HandlerRef {
            class: class_name.to_string(),
            method: method.name.clone(),
            params: method
                .params
                .iter()
                .map(|p| HandlerParam {
                    data_type: p.data_type.clone(),
                    name: p.name.clone(),
                })
                .collect(),
        }
    }

    /// Signature match: same name and same ordered parameter types.
    /// Return types, parameter names and annotations are irrelevant.
    pub fn matches(&self, other: &HandlerRef) -> bool {
        self.method == other.method
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.data_type == b.data_type)
    }

    /// Renders `method(Type name, Type name)` for diagnostics.
    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.data_type, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.method, params)
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.signature())
    }
}

/// The merged description of one logical REST operation.
///
/// Definition identity is the `(method, path)` pair after the full
/// merge: two definitions are equal when they address the same
/// operation, whatever their media types or parameters.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDefinition {
    /// HTTP verb; `None` marks a root (class-level) definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) method: Option<HttpMethod>,
    /// Resolved route path; root base path plus method sub-path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) path: Option<String>,
    /// Produced media types; `None` means "inherit".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) produces: Option<Vec<String>>,
    /// Consumed media types; `None` means "inherit".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) consumes: Option<Vec<String>>,
    /// Parameters in handler declaration order.
    pub(crate) parameters: Vec<MethodParameter>,
    /// Custom request reader, referenced by type name only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reader_override: Option<String>,
    /// Custom response writer, referenced by type name only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) writer_override: Option<String>,
}

impl PartialEq for RouteDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.path == other.path
    }
}

impl Eq for RouteDefinition {}

impl Hash for RouteDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.method.hash(state);
        self.path.hash(state);
    }
}

impl fmt::Display for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = self.method.map(|m| m.as_str()).unwrap_or("*");
        write!(f, "{} {}", verb, self.path.as_deref().unwrap_or(""))
    }
}

impl RouteDefinition {
    fn empty() -> Self {
        RouteDefinition {
            method: None,
            path: None,
            produces: None,
            consumes: None,
            parameters: Vec::new(),
            reader_override: None,
            writer_override: None,
        }
    }

    /// Builds the root definition from class-level annotations: base
    /// path, default media types and reader/writer overrides. Root
    /// definitions have no verb and never become routes themselves.
    pub fn root(class: &ClassMeta) -> AppResult<Self> {
        let mut root = Self::empty();
        root.apply_annotations(&class.annotations)
            .map_err(|msg| AppError::General(format!("{} - {}", class.name, msg)))?;
        Ok(root)
    }

    /// Builds a method-level definition: method annotations resolved
    /// first, then the root layer filled in underneath (path
    /// concatenation, media type inheritance).
    ///
    /// Fails fast when the method claims more than one HTTP verb
    /// annotation; a verb-less definition is legal here and may gain
    /// its verb from an ancestor during the merge.
    pub fn for_method(root: &RouteDefinition, method: &MethodMeta, handler: &HandlerRef) -> AppResult<Self> {
        let mut def = Self::empty();
        def.apply_annotations(&method.annotations)
            .map_err(|msg| AppError::General(format!("{} - {}", handler, msg)))?;

        def.path = join_paths(root.path.as_deref(), def.path.as_deref());
        if def.produces.is_none() {
            def.produces = root.produces.clone();
        }
        if def.consumes.is_none() {
            def.consumes = root.consumes.clone();
        }
        if def.reader_override.is_none() {
            def.reader_override = root.reader_override.clone();
        }
        if def.writer_override.is_none() {
            def.writer_override = root.writer_override.clone();
        }

        def.parameters = method.params.iter().map(MethodParameter::from_meta).collect();
        Ok(def)
    }

    /// Applies one annotation list onto this definition. Returns a bare
    /// message; callers prefix the class/handler context.
    fn apply_annotations(&mut self, annotations: &[RouteAnnotation]) -> Result<(), String> {
        for annotation in annotations {
            let verb = match annotation {
                RouteAnnotation::Get => Some(HttpMethod::Get),
                RouteAnnotation::Post => Some(HttpMethod::Post),
                RouteAnnotation::Put => Some(HttpMethod::Put),
                RouteAnnotation::Delete => Some(HttpMethod::Delete),
                RouteAnnotation::Patch => Some(HttpMethod::Patch),
                RouteAnnotation::Head => Some(HttpMethod::Head),
                RouteAnnotation::Options => Some(HttpMethod::Options),
                RouteAnnotation::Path { value } => {
                    self.path = Some(normalize_path(value));
                    None
                }
                RouteAnnotation::Produces { media } => {
                    self.produces = Some(media.clone());
                    None
                }
                RouteAnnotation::Consumes { media } => {
                    self.consumes = Some(media.clone());
                    None
                }
                RouteAnnotation::RequestReader { reader } => {
                    self.reader_override = Some(reader.clone());
                    None
                }
                RouteAnnotation::ResponseWriter { writer } => {
                    self.writer_override = Some(writer.clone());
                    None
                }
            };

            if let Some(verb) = verb {
                if let Some(existing) = self.method {
                    return Err(format!(
                        "declares more than one HTTP method annotation ({} and {})",
                        existing, verb
                    ));
                }
                self.method = Some(verb);
            }
        }
        Ok(())
    }

    /// Fill-in merge with a same-operation definition from elsewhere in
    /// the inheritance graph. Pure: returns a new definition, fields
    /// present on `self` always win, absent fields are taken from
    /// `other`.
    pub fn join(&self, other: &RouteDefinition) -> RouteDefinition {
        let parameters = if self.parameters.len() == other.parameters.len() {
            self.parameters
                .iter()
                .zip(&other.parameters)
                .map(|(local, ancestor)| local.join(ancestor))
                .collect()
        } else {
            self.parameters.clone()
        };

        RouteDefinition {
            method: self.method.or(other.method),
            path: self.path.clone().or_else(|| other.path.clone()),
            produces: self.produces.clone().or_else(|| other.produces.clone()),
            consumes: self.consumes.clone().or_else(|| other.consumes.clone()),
            parameters,
            reader_override: self
                .reader_override
                .clone()
                .or_else(|| other.reader_override.clone()),
            writer_override: self
                .writer_override
                .clone()
                .or_else(|| other.writer_override.clone()),
        }
    }

    /// Resolved HTTP verb, `None` for root definitions.
    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    /// True when this operation's verb conventionally carries a request
    /// entity.
    pub fn request_has_body(&self) -> bool {
        self.method.map(|m| m.request_has_body()).unwrap_or(false)
    }

    /// Resolved route path, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Produced media types; empty when nothing was declared anywhere.
    pub fn produces(&self) -> &[String] {
        self.produces.as_deref().unwrap_or(&[])
    }

    /// Consumed media types; empty when nothing was declared anywhere.
    pub fn consumes(&self) -> &[String] {
        self.consumes.as_deref().unwrap_or(&[])
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[MethodParameter] {
        &self.parameters
    }

    /// Custom request reader type name, if declared.
    pub fn reader_override(&self) -> Option<&str> {
        self.reader_override.as_deref()
    }

    /// Custom response writer type name, if declared.
    pub fn writer_override(&self) -> Option<&str> {
        self.writer_override.as_deref()
    }
}

/// Normalizes a declared path: leading slash guaranteed, trailing
/// slashes stripped, lone `/` collapses to the empty base.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Concatenates the class-level base path with a method sub-path.
fn join_paths(root: Option<&str>, sub: Option<&str>) -> Option<String> {
    match (root, sub) {
        (None, None) => None,
        (Some(root), None) => Some(root.to_string()),
        (None, Some(sub)) => Some(sub.to_string()),
        (Some(root), Some(sub)) => Some(format!("{}{}", root, sub)),
    }
}
