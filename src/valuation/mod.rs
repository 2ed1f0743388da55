//! Edge valuation.
//!
//! A link whose source quals are all matched on the target is valued
//! locally: `-1000 × overlap`, so an index covering one node covers the
//! other. Any other link stays unresolved and yields a suggestion request
//! for its target node.

use serde::{Deserialize, Serialize};

use crate::model::{Link, QualGraph};
use crate::suggest::SuggestionRequest;

/// Cost per overlapping attribute of a complete link.
pub const OVERLAP_VALUE: i64 = -1000;

/// Cost assumed for unresolved links under the default policy.
pub const DEFAULT_UNRESOLVED_COST: i64 = 1000;

/// How solvers cost a link whose value was never resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Treat the link as costing `cost`.
    Penalize { cost: i64 },
    /// Treat the link as free.
    Zero,
}

impl Default for UnresolvedPolicy {
    fn default() -> Self {
        UnresolvedPolicy::Penalize { cost: DEFAULT_UNRESOLVED_COST }
    }
}

impl UnresolvedPolicy {
    pub fn fallback(&self) -> i64 {
        match self {
            UnresolvedPolicy::Penalize { cost } => *cost,
            UnresolvedPolicy::Zero => 0,
        }
    }

    /// The link's value, or the fallback when unresolved.
    pub fn effective_value(&self, link: &Link) -> i64 {
        link.value.unwrap_or_else(|| self.fallback())
    }
}

/// Outcome of valuing one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Valuation {
    Resolved(i64),
    /// Needs an index suggestion for the link's target first.
    Deferred,
}

/// Value a single link in place.
pub fn value_link(link: &mut Link) -> Valuation {
    if link.is_complete() {
        let value = OVERLAP_VALUE * link.overlap.len() as i64;
        link.value = Some(value);
        Valuation::Resolved(value)
    } else {
        link.value = None;
        Valuation::Deferred
    }
}

/// Value every stored link of `graph`.
///
/// Returns one suggestion request per deferred link, carrying the link's
/// target stripped of its links. Requests are not merged: a node that is the
/// target of `k` deferred links is requested `k` times per pass.
pub fn value_links(graph: &mut QualGraph, database: &str) -> Vec<SuggestionRequest> {
    let mut deferred = Vec::new();
    let mut resolved = 0usize;
    for node in graph.nodes_mut() {
        for link in node.links.values_mut() {
            match value_link(link) {
                Valuation::Resolved(_) => resolved += 1,
                Valuation::Deferred => deferred.push(link.target),
            }
        }
    }

    tracing::debug!(resolved, deferred = deferred.len(), "links valued");

    deferred
        .into_iter()
        .filter_map(|target| graph.node(target))
        .map(|target| SuggestionRequest::new(database, target.shallow()))
        .collect()
}
