#![deny(missing_docs)]

//! # Definition Merge Engine
//!
//! Walks a resource class's inheritance graph and folds partial route
//! metadata from every level into one candidate definition per local
//! handler.
//!
//! Traversal order: directly implemented interfaces in declaration
//! order (depth-first into their own interfaces), then the superclass.
//! Ancestor candidates are correlated to local ones by handler
//! signature (name + ordered parameter types) and layered in with the
//! pure `RouteDefinition::join`; the first layer to fill a field wins
//! because joining an already-filled field is a no-op.
//!
//! Per-class results are memoized within one extraction call so diamond
//! inheritance resolves each shared ancestor exactly once.

use crate::error::{AppError, AppResult};
use crate::meta::model::ClassMeta;
use crate::meta::registry::MetadataRegistry;
use crate::routes::definition::{HandlerRef, RouteDefinition};
use std::collections::HashMap;

/// A route definition still under construction, paired with the handler
/// it was extracted from.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// The (partially merged) definition.
    pub definition: RouteDefinition,
    /// The local handler serving it.
    pub handler: HandlerRef,
}

/// Memoized per-class candidate sets for a single extraction call.
pub(crate) type MergeMemo = HashMap<String, Vec<Candidate>>;

/// Collects the fully merged candidate set for `class_name`.
pub(crate) fn collect(
    registry: &MetadataRegistry,
    class_name: &str,
    memo: &mut MergeMemo,
) -> AppResult<Vec<Candidate>> {
    if let Some(cached) = memo.get(class_name) {
        return Ok(cached.clone());
    }

    let class = registry
        .class(class_name)
        .ok_or_else(|| AppError::MissingClass(class_name.to_string()))?;

    let mut candidates = local_candidates(class)?;

    for interface in &class.implements {
        let ancestors = collect(registry, interface, memo)?;
        candidates = join_sets(candidates, &ancestors);
    }

    if let Some(superclass) = class.superclass() {
        let ancestors = collect(registry, superclass, memo)?;
        candidates = join_sets(candidates, &ancestors);
    }

    memo.insert(class_name.to_string(), candidates.clone());
    Ok(candidates)
}

/// Extracts the definitions declared directly on one class: the root
/// definition from class-level annotations, then one candidate per
/// REST-eligible method.
fn local_candidates(class: &ClassMeta) -> AppResult<Vec<Candidate>> {
    let root = RouteDefinition::root(class)?;

    let mut candidates = Vec::new();
    for method in &class.methods {
        if !method.is_rest_candidate(class.kind) {
            continue;
        }
        let handler = HandlerRef::new(&class.name, method);
        let definition = RouteDefinition::for_method(&root, method, &handler)?;
        candidates.push(Candidate {
            definition,
            handler,
        });
    }
    Ok(candidates)
}

/// Joins one ancestor candidate set into the base set. Each base
/// candidate merges with the ancestor whose handler matches its
/// signature; no match is a no-op. Unmatched ancestor candidates do not
/// create operations on the derived class.
fn join_sets(base: Vec<Candidate>, ancestors: &[Candidate]) -> Vec<Candidate> {
    base.into_iter()
        .map(|candidate| {
            match ancestors
                .iter()
                .find(|a| a.handler.matches(&candidate.handler))
            {
                Some(ancestor) => Candidate {
                    definition: candidate.definition.join(&ancestor.definition),
                    handler: candidate.handler,
                },
                None => candidate,
            }
        })
        .collect()
}
