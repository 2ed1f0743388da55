//! Randomized cheapest-insertion tour.
//!
//! Shuffle the predicate nodes, seed the path with `[start, first]`, then
//! insert each remaining node at the position that keeps the total path
//! distance lowest. Slower than the greedy walk but often cheaper.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{compute_distance, tour_from_nodes, CostModel, PathSolver};
use crate::model::{NodeId, QualGraph, Tour};
use crate::Result;

/// Insertion solver. A fixed `seed` makes runs reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSolver {
    pub seed: Option<u64>,
}

impl InsertionSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl PathSolver for InsertionSolver {
    fn solve(&self, graph: &QualGraph, cost: &CostModel) -> Result<Tour> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let order = insertion_order(graph, cost, &mut rng)?;
        tour_from_nodes(graph, &order)
    }

    fn name(&self) -> &'static str {
        "insertion"
    }
}

/// Node order built by cheapest insertion over a shuffled node list.
///
/// The start node is always first. Ties between insertion positions go to
/// the earliest position.
pub fn insertion_order<R: Rng + ?Sized>(
    graph: &QualGraph,
    cost: &CostModel,
    rng: &mut R,
) -> Result<Vec<NodeId>> {
    let mut pending: Vec<NodeId> = graph.predicate_nodes().map(|n| n.id).collect();
    pending.shuffle(rng);

    let mut path = Vec::with_capacity(pending.len() + 1);
    path.push(NodeId::Start);
    let mut pending = pending.into_iter();
    match pending.next() {
        Some(first) => path.push(first),
        None => return Ok(path),
    }

    for node in pending {
        insert_cheapest(graph, cost, &mut path, node)?;
    }

    Ok(path)
}

/// Insert `node` into `path` where the total distance is lowest and return
/// the chosen position.
///
/// Every position after the start node is tried; the earliest one wins ties.
pub fn insert_cheapest(
    graph: &QualGraph,
    cost: &CostModel,
    path: &mut Vec<NodeId>,
    node: NodeId,
) -> Result<usize> {
    let mut best: Option<(usize, i64)> = None;
    for pos in 1..=path.len() {
        path.insert(pos, node);
        let distance = compute_distance(graph, path, cost);
        path.remove(pos);
        let distance = distance?;
        if best.is_none_or(|(_, top)| distance < top) {
            best = Some((pos, distance));
        }
    }

    let pos = best.map_or(path.len(), |(pos, _)| pos);
    tracing::trace!(node = %node, pos, "inserted");
    path.insert(pos, node);
    Ok(pos)
}
