//! End-to-end tests for the worked link/valuation/tour scenarios.

use pretty_assertions::assert_eq;
use qualgraph::linker::{link_graph, make_links};
use qualgraph::solver::compute_distance;
use qualgraph::valuation::{value_link, value_links, Valuation};
use qualgraph::{CostModel, GreedySolver, Node, NodeId, PathSolver, Qual, QualBatch, QualGraph};

const BTREE: u32 = 403;
const HASH: u32 = 405;

fn graph(batches: Vec<QualBatch>) -> QualGraph {
    let mut graph = QualGraph::new();
    for batch in batches {
        graph.append(batch).unwrap();
    }
    link_graph(&mut graph).unwrap();
    value_links(&mut graph, "bench");
    graph
}

// ============================================================================
// 1. Same relation, same attribute, common btree
// ============================================================================

#[test]
fn test_full_overlap_pair() {
    let a = Node::predicate(1, "r1.c3 = ?", vec![Qual::new(1, 3, 96, 100).with_indexams([BTREE])]);
    let b = Node::predicate(2, "r1.c3 < ?", vec![Qual::new(1, 3, 97, 200).with_indexams([BTREE, HASH])]);

    let pair = make_links(&a, &b).unwrap();
    for mut link in pair.into_array() {
        assert_eq!(link.overlap.len(), 1);
        assert!(link.missing.is_empty());
        assert!(link.samerel);
        assert_eq!(value_link(&mut link), Valuation::Resolved(-1000));
    }
}

// ============================================================================
// 2. Different relations, nothing in common
// ============================================================================

#[test]
fn test_disjoint_pair_defers_to_suggestion() {
    let a = Node::predicate(1, "r1.c1 = ?", vec![Qual::new(1, 1, 96, 100).with_indexams([BTREE])]);
    let b = Node::predicate(2, "r2.c5 = ?", vec![Qual::new(2, 5, 96, 200).with_indexams([BTREE])]);

    let pair = make_links(&a, &b).unwrap();
    assert!(pair.to_second.overlap.is_empty());
    assert_eq!(pair.to_second.missing[0].qual, a.quals.as_slice()[0]);
    assert_eq!(pair.to_first.missing[0].qual, b.quals.as_slice()[0]);

    let mut link = pair.to_second;
    assert_eq!(value_link(&mut link), Valuation::Deferred);
    assert_eq!(link.value, None);
}

// ============================================================================
// 3. Greedy never leaves a relation while it still has work there
// ============================================================================

#[test]
fn test_greedy_follows_same_relation_edge() {
    let g = graph(vec![
        QualBatch::new(1, 1, "a").with_qual(Qual::new(1, 1, 96, 1).with_indexams([BTREE])),
        QualBatch::new(2, 2, "b").with_qual(Qual::new(1, 1, 96, 2).with_indexams([BTREE])),
    ]);
    let cost = CostModel::default();
    let tour = GreedySolver.solve(&g, &cost).unwrap();

    assert_eq!(tour.len(), 2);
    assert_eq!(tour.links()[0].source, NodeId::Start);
    assert!(tour.links()[1].samerel);
    assert_eq!(tour.links()[1].value, Some(-1000));
    assert_eq!(compute_distance(&g, &tour.node_ids(), &cost).unwrap(), 5 - 1000);
}

#[test]
fn test_greedy_stays_on_relation_before_jumping() {
    // 3 is richer but on another relation: once on relation 1, finish it first
    let g = graph(vec![
        QualBatch::new(1, 1, "a")
            .with_qual(Qual::new(1, 1, 96, 1).with_indexams([BTREE]))
            .with_qual(Qual::new(1, 2, 96, 1).with_indexams([BTREE])),
        QualBatch::new(2, 2, "b").with_qual(Qual::new(1, 1, 96, 2).with_indexams([BTREE])),
        QualBatch::new(3, 3, "c")
            .with_qual(Qual::new(2, 1, 96, 3).with_indexams([BTREE]))
            .with_qual(Qual::new(2, 2, 96, 3).with_indexams([BTREE])),
    ]);
    let tour = GreedySolver.solve(&g, &CostModel::default()).unwrap();
    assert_eq!(
        tour.node_ids(),
        vec![NodeId::Start, NodeId::Qual(1), NodeId::Qual(2), NodeId::Qual(3)]
    );
}
