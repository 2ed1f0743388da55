//! Greedy nearest-neighbour tour.
//!
//! From the current node, go to the cheapest unvisited node on the same
//! relation. With none left, jump to the unvisited node carrying the most
//! quals: once its index exists the remaining same-relation hops are cheap.

use hashbrown::HashSet;

use super::{CostModel, PathSolver};
use crate::model::{Link, NodeId, QualGraph, Tour};
use crate::{Error, Result};

/// Deterministic default solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl PathSolver for GreedySolver {
    fn solve(&self, graph: &QualGraph, cost: &CostModel) -> Result<Tour> {
        let mut unvisited: HashSet<NodeId> = graph.predicate_nodes().map(|n| n.id).collect();
        let mut current = graph.start();
        let mut tour = Tour::new();

        while !unvisited.is_empty() {
            let candidates: Vec<&Link> = current
                .links
                .values()
                .filter(|l| unvisited.contains(&l.target))
                .collect();

            let next = cheapest_same_relation(&candidates, cost)
                .or_else(|| richest_target(graph, &candidates))
                .ok_or(Error::MissingLink { from: current.id })?;

            tracing::trace!(from = %next.source, to = %next.target, samerel = next.samerel, "greedy hop");
            unvisited.remove(&next.target);
            current = graph
                .node(next.target)
                .ok_or(Error::UncomputablePath { from: current.id, to: next.target })?;
            tour.push(next.clone());
        }

        Ok(tour)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Lowest-valued same-relation link; the first one wins ties.
fn cheapest_same_relation<'a>(candidates: &[&'a Link], cost: &CostModel) -> Option<&'a Link> {
    candidates
        .iter()
        .copied()
        .filter(|l| l.samerel)
        .min_by_key(|l| cost.value(l))
}

/// Link whose target has the most quals; the first one wins ties.
fn richest_target<'a>(graph: &QualGraph, candidates: &[&'a Link]) -> Option<&'a Link> {
    // max_by_key keeps the last maximum, so scan by hand
    let mut best: Option<(&'a Link, usize)> = None;
    for &link in candidates {
        let size = graph.node(link.target).map_or(0, |n| n.quals.len());
        if best.is_none_or(|(_, top)| size > top) {
            best = Some((link, size));
        }
    }
    best.map(|(link, _)| link)
}
