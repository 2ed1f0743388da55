//! # Path Solver
//!
//! Orders the predicate nodes into a tour starting at the start node.
//! Two interchangeable heuristics, neither exact:
//!
//! | Solver | Module | Deterministic | Cost |
//! |--------|--------|---------------|------|
//! | `GreedySolver` | `greedy` | yes | O(n²) |
//! | `InsertionSolver` | `insertion` | no (shuffle), unless seeded | O(n³) |

pub mod greedy;
pub mod insertion;

use serde::{Deserialize, Serialize};

use crate::model::{Link, NodeId, QualGraph, Tour};
use crate::valuation::UnresolvedPolicy;
use crate::Result;

pub use greedy::GreedySolver;
pub use insertion::InsertionSolver;

/// Added to every hop between two different relations.
pub const CROSS_RELATION_PENALTY: i64 = 5;

// ============================================================================
// Cost model
// ============================================================================

/// How a link is priced when walking a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostModel {
    pub unresolved: UnresolvedPolicy,
}

impl CostModel {
    pub fn new(unresolved: UnresolvedPolicy) -> Self {
        Self { unresolved }
    }

    /// The link's own value, falling back per the unresolved policy.
    pub fn value(&self, link: &Link) -> i64 {
        if !link.is_resolved() {
            tracing::trace!(source = %link.source, target = %link.target, "unresolved link priced by policy");
        }
        self.unresolved.effective_value(link)
    }

    /// Cost of one hop: value plus the cross-relation penalty.
    ///
    /// Saturates at the `i64` bounds, as do path totals.
    pub fn hop_cost(&self, link: &Link) -> i64 {
        let base = if link.samerel { 0 } else { CROSS_RELATION_PENALTY };
        self.value(link).saturating_add(base)
    }
}

/// Total cost of visiting `path` in order.
///
/// Fails with [`crate::Error::UncomputablePath`] when two consecutive nodes
/// have no stored link.
pub fn compute_distance(graph: &QualGraph, path: &[NodeId], cost: &CostModel) -> Result<i64> {
    let mut total: i64 = 0;
    for hop in path.windows(2) {
        total = total.saturating_add(cost.hop_cost(graph.link(hop[0], hop[1])?));
    }
    Ok(total)
}

/// Turn a node order into the matching sequence of links.
pub fn tour_from_nodes(graph: &QualGraph, order: &[NodeId]) -> Result<Tour> {
    let mut tour = Tour::new();
    for hop in order.windows(2) {
        tour.push(graph.link(hop[0], hop[1])?.clone());
    }
    Ok(tour)
}

// ============================================================================
// Solver trait
// ============================================================================

/// A visiting-order heuristic.
pub trait PathSolver: Send + Sync {
    /// Produce a tour visiting every predicate node exactly once.
    fn solve(&self, graph: &QualGraph, cost: &CostModel) -> Result<Tour>;

    fn name(&self) -> &'static str;
}

/// Which solver the wizard runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverKind {
    #[default]
    Greedy,
    Insertion {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl SolverKind {
    pub fn build(&self) -> Box<dyn PathSolver> {
        match *self {
            SolverKind::Greedy => Box::new(GreedySolver),
            SolverKind::Insertion { seed } => Box::new(InsertionSolver { seed }),
        }
    }
}
