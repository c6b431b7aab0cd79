#![deny(missing_docs)]

//! # Post-Merge Validation
//!
//! Runs once per extracted class after all merges complete. Enforces
//! the binding-consistency invariants: every method-bearing definition
//! resolves to a path, every path template variable is unique and has a
//! path-bound parameter, and at most one parameter binds to the request
//! body. Parameters still
//! `Unknown` at this point become the implicit body parameter, but only
//! on verbs that carry a request entity.
//!
//! Every rejection names the offending `Class.method(Type name, ...)`
//! so a metadata mistake is diagnosable without a debugger.

use crate::error::{AppError, AppResult};
use crate::routes::definition::{HandlerRef, MethodParameter, ParameterKind, RouteDefinition};
use crate::routes::merge::Candidate;
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;

/// Validates merged candidates and freezes them into the final
/// definition-to-handler mapping. Root-only definitions (no verb) never
/// become routes and are skipped.
pub(crate) fn validate(
    class_name: &str,
    candidates: Vec<Candidate>,
) -> AppResult<IndexMap<RouteDefinition, HandlerRef>> {
    let mut out = IndexMap::new();

    for candidate in candidates {
        let Candidate {
            mut definition,
            handler,
        } = candidate;

        if definition.method.is_none() {
            continue; // not a REST operation
        }

        let location = format!("{}.{}", class_name, handler.signature());

        let path = definition
            .path
            .as_deref()
            .ok_or_else(|| AppError::MissingPath(format!("{} - missing route path", location)))?;
        check_path_template(path, &definition.parameters, &location)?;

        definition.parameters = resolve_body_bindings(&definition, &location)?;

        if let Some(previous) = out.insert(definition, handler) {
            return Err(AppError::General(format!(
                "{} - route already defined by {}",
                location, previous
            )));
        }
    }

    Ok(out)
}

/// Rejects a path template that binds the same variable twice or
/// references a variable no parameter is bound to.
fn check_path_template(
    path: &str,
    parameters: &[MethodParameter],
    location: &str,
) -> AppResult<()> {
    let re = Regex::new(r"\{([^}]+)}").map_err(|e| AppError::General(e.to_string()))?;
    let mut seen = HashSet::new();
    for cap in re.captures_iter(path) {
        let name = cap[1].to_string();
        if !seen.insert(name.clone()) {
            return Err(AppError::General(format!(
                "{} - path template '{}' contains duplicate path parameter '{}'",
                location, path, name
            )));
        }
        if !parameters
            .iter()
            .any(|p| p.kind == ParameterKind::Path && p.name == name)
        {
            return Err(AppError::General(format!(
                "{} - path template '{}' is missing a path parameter binding for '{}'",
                location, path, name
            )));
        }
    }
    Ok(())
}

/// Walks parameters in declaration order, reclassifying `Unknown` ones
/// to `Body` where the verb allows it and counting body bindings.
fn resolve_body_bindings(
    definition: &RouteDefinition,
    location: &str,
) -> AppResult<Vec<MethodParameter>> {
    let mut resolved = Vec::with_capacity(definition.parameters.len());
    let mut body_count = 0;

    for param in &definition.parameters {
        let mut param = param.clone();

        if body_count > 0
            && matches!(param.kind, ParameterKind::Body | ParameterKind::Unknown)
        {
            return Err(AppError::AmbiguousBodyParameter(format!(
                "{} - too many body parameters given. \
                 Missing parameter annotation (pathParam, queryParam, formParam, \
                 headerParam, cookieParam or context) for: {} {}",
                location, param.data_type, param.name
            )));
        }

        if param.kind == ParameterKind::Unknown {
            if !definition.request_has_body() {
                return Err(AppError::UnboundParameter(format!(
                    "{} - missing parameter annotation (pathParam, queryParam, \
                     formParam, headerParam, cookieParam or context) for: {}",
                    location, param.name
                )));
            }
            param.kind = ParameterKind::Body;
        }

        if param.kind == ParameterKind::Body {
            body_count += 1;
        }

        resolved.push(param);
    }

    Ok(resolved)
}
