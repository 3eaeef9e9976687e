//! Reference resolution: classify every supertype/interface reference as
//! declared among the scanned inputs or external to them.

use crate::types::TypeRegistry;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Extends,
    Implements,
}

impl RelationKind {
    /// PlantUML arrow: generalization or realization.
    pub fn arrow(self) -> &'static str {
        match self {
            RelationKind::Extends => "--|>",
            RelationKind::Implements => "..|>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Target is a key of the registry.
    Internal,
    /// Target was never declared in the inputs; rendered as a stub node.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
    pub resolution: Resolution,
}

/// Every extends/implements edge, ordered by source type name, extends
/// before implements, then declaration order.
pub fn resolve_references(registry: &TypeRegistry) -> Vec<Relation> {
    let mut relations = Vec::new();
    for record in registry.sorted() {
        let edges = record
            .extends
            .iter()
            .map(|t| (t, RelationKind::Extends))
            .chain(record.implements.iter().map(|t| (t, RelationKind::Implements)));
        for (target, kind) in edges {
            let resolution =
                if registry.contains(target) { Resolution::Internal } else { Resolution::External };
            relations.push(Relation {
                source: record.name.clone(),
                target: target.clone(),
                kind,
                resolution,
            });
        }
    }
    relations
}

/// Names referenced as a supertype or interface but never declared,
/// deduplicated and sorted.
pub fn external_types(registry: &TypeRegistry) -> BTreeSet<String> {
    resolve_references(registry)
        .into_iter()
        .filter(|r| r.resolution == Resolution::External)
        .map(|r| r.target)
        .collect()
}
