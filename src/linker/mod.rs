//! # Link Builder
//!
//! Pairwise merge-join between the sorted qual lists of two nodes.
//! Pure functions: no I/O, no valuation, no knowledge of the solver.
//!
//! Two kinds of links come out of here:
//!  - almost-free links, where both nodes can share one index (`overlap`)
//!  - expensive links, where some quals of one side have no partner on the
//!    other (`missing`) and a new index would be needed

use std::cmp::Ordering;

use crate::model::{Link, MissingQual, Node, NodeId, Oid, OverlapEntry, Qual, QualGraph};
use crate::{Error, Result};

/// Both directions of a link between `first` and `second`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPair {
    /// `second -> first`; `missing` holds the quals of `second`.
    pub to_first: Link,
    /// `first -> second`; `missing` holds the quals of `first`.
    pub to_second: Link,
}

impl LinkPair {
    pub fn into_array(self) -> [Link; 2] {
        [self.to_first, self.to_second]
    }
}

/// The relation a node's quals resolve to, checked as the walk goes.
struct RelationTracker {
    node: NodeId,
    relid: Option<Oid>,
}

impl RelationTracker {
    fn new(node: NodeId) -> Self {
        Self { node, relid: None }
    }

    fn observe(&mut self, qual: &Qual) -> Result<()> {
        match self.relid {
            Some(relid) if relid != qual.relid => Err(Error::ConflictingRelation {
                node: self.node,
                expected: relid,
                found: qual.relid,
            }),
            _ => {
                self.relid = Some(qual.relid);
                Ok(())
            }
        }
    }
}

/// Build the two links between `first` and `second`.
///
/// Both qual lists must be sorted by `(relid, attnum, opno)`, which
/// [`crate::model::QualList`] guarantees. Quals matching on
/// `(relid, attnum)` are consumed together and produce an overlap entry when
/// they share an index access method. Any other qual lands in the `missing`
/// list of the link leaving its own node.
pub fn make_links(first: &Node, second: &Node) -> Result<LinkPair> {
    let left = first.quals.as_slice();
    let right = second.quals.as_slice();
    let mut rel_left = RelationTracker::new(first.id);
    let mut rel_right = RelationTracker::new(second.id);

    let mut overlap = Vec::new();
    let mut missing_left = Vec::new();
    let mut missing_right = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let (q1, q2) = (&left[i], &right[j]);
        rel_left.observe(q1)?;
        rel_right.observe(q2)?;

        if q1.same_attribute(q2) {
            let indexams = q1.common_indexams(q2);
            if !indexams.is_empty() {
                overlap.push(OverlapEntry {
                    relid: q1.relid,
                    queryids: [q1.queryid, q2.queryid],
                    attnum: q1.attnum,
                    relname: q1.relname.clone(),
                    attname: q1.attname.clone(),
                    indexams,
                });
            }
            i += 1;
            j += 1;
        } else if q1.canonical_cmp(q2) == Ordering::Greater {
            tracing::trace!(node = %second.id, relid = q2.relid, attnum = q2.attnum, "unmatched qual");
            missing_right.push(MissingQual { origin: second.id, qual: q2.clone() });
            j += 1;
        } else {
            tracing::trace!(node = %first.id, relid = q1.relid, attnum = q1.attnum, "unmatched qual");
            missing_left.push(MissingQual { origin: first.id, qual: q1.clone() });
            i += 1;
        }
    }

    for qual in &left[i..] {
        rel_left.observe(qual)?;
        missing_left.push(MissingQual { origin: first.id, qual: qual.clone() });
    }
    for qual in &right[j..] {
        rel_right.observe(qual)?;
        missing_right.push(MissingQual { origin: second.id, qual: qual.clone() });
    }

    let samerel = matches!(
        (rel_left.relid, rel_right.relid),
        (Some(a), Some(b)) if a == b
    );

    let mut to_first = Link::new(second.id, first.id, samerel);
    to_first.overlap = overlap.clone();
    to_first.missing = missing_right;

    let mut to_second = Link::new(first.id, second.id, samerel);
    to_second.overlap = overlap;
    to_second.missing = missing_left;

    Ok(LinkPair { to_first, to_second })
}

/// Rebuild every link of `nodes`.
///
/// Existing links are dropped first. Each unordered pair is merged once and
/// both directions are stored on their source node, except links whose
/// target is the start node: those are neither stored nor returned.
pub fn compute_links(nodes: &mut [Node]) -> Result<Vec<Link>> {
    for node in nodes.iter_mut() {
        node.links.clear();
    }

    let mut links = Vec::with_capacity(nodes.len() * nodes.len().saturating_sub(1));
    for i in 0..nodes.len() {
        for j in 0..i {
            let pair = make_links(&nodes[i], &nodes[j])?;
            for link in pair.into_array() {
                if link.target.is_start() {
                    continue;
                }
                let source = if link.source == nodes[i].id { i } else { j };
                nodes[source].links.insert(link.target, link.clone());
                links.push(link);
            }
        }
    }

    tracing::debug!(nodes = nodes.len(), links = links.len(), "links computed");
    Ok(links)
}

/// [`compute_links`] over every node of `graph`.
pub fn link_graph(graph: &mut QualGraph) -> Result<Vec<Link>> {
    compute_links(graph.nodes_mut())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QualList;

    const BTREE: Oid = 403;
    const HASH: Oid = 405;
    const GIST: Oid = 783;

    fn node(id: u64, quals: Vec<Qual>) -> Node {
        Node::predicate(id, format!("qual {id}"), quals)
    }

    fn qual(relid: Oid, attnum: i16, ams: &[Oid]) -> Qual {
        Qual::new(relid, attnum, 96, relid as i64 * 100 + attnum as i64)
            .with_indexams(ams.iter().copied())
            .with_names(format!("rel{relid}"), format!("att{attnum}"))
    }

    #[test]
    fn test_full_overlap_same_relation() {
        let a = node(1, vec![qual(10, 3, &[BTREE])]);
        let b = node(2, vec![qual(10, 3, &[BTREE, HASH])]);

        let pair = make_links(&a, &b).unwrap();
        assert_eq!(pair.to_second.source, NodeId::Qual(1));
        assert_eq!(pair.to_second.target, NodeId::Qual(2));
        assert!(pair.to_second.samerel);
        assert!(pair.to_first.samerel);
        assert_eq!(pair.to_second.overlap.len(), 1);
        assert_eq!(pair.to_second.overlap, pair.to_first.overlap);
        assert_eq!(pair.to_second.overlap[0].indexams.as_slice(), &[BTREE]);
        assert_eq!(pair.to_second.overlap[0].queryids, [1003, 1003]);
        assert!(pair.to_second.missing.is_empty());
        assert!(pair.to_first.missing.is_empty());
    }

    #[test]
    fn test_same_attribute_without_common_am_is_not_missing() {
        let a = node(1, vec![qual(10, 3, &[BTREE])]);
        let b = node(2, vec![qual(10, 3, &[GIST])]);

        let pair = make_links(&a, &b).unwrap();
        assert!(pair.to_second.overlap.is_empty());
        assert!(pair.to_second.missing.is_empty());
        assert!(pair.to_first.missing.is_empty());
    }

    #[test]
    fn test_disjoint_relations_fill_missing() {
        let a = node(1, vec![qual(10, 1, &[BTREE])]);
        let b = node(2, vec![qual(20, 5, &[BTREE])]);

        let pair = make_links(&a, &b).unwrap();
        assert!(!pair.to_second.samerel);
        assert!(pair.to_second.overlap.is_empty());
        assert_eq!(pair.to_second.missing.len(), 1);
        assert_eq!(pair.to_second.missing[0].origin, NodeId::Qual(1));
        assert_eq!(pair.to_second.missing[0].qual.relid, 10);
        assert_eq!(pair.to_first.missing.len(), 1);
        assert_eq!(pair.to_first.missing[0].origin, NodeId::Qual(2));
        assert_eq!(pair.to_first.missing[0].qual.relid, 20);
    }

    #[test]
    fn test_interleaved_walk_partitions_every_qual() {
        let a = node(1, vec![qual(10, 1, &[BTREE]), qual(10, 3, &[BTREE]), qual(10, 7, &[BTREE])]);
        let b = node(2, vec![qual(10, 2, &[BTREE]), qual(10, 3, &[BTREE]), qual(10, 9, &[BTREE])]);

        let pair = make_links(&a, &b).unwrap();
        let left: Vec<_> = pair.to_second.missing.iter().map(|m| m.qual.attnum).collect();
        let right: Vec<_> = pair.to_first.missing.iter().map(|m| m.qual.attnum).collect();
        assert_eq!(left, vec![1, 7]);
        assert_eq!(right, vec![2, 9]);
        assert_eq!(pair.to_second.overlap.len(), 1);
        assert_eq!(pair.to_second.overlap[0].attnum, 3);
        assert!(pair.to_second.samerel);
    }

    #[test]
    fn test_conflicting_relation_is_fatal() {
        let a = node(1, vec![qual(10, 1, &[BTREE]), qual(11, 1, &[BTREE])]);
        let b = node(2, vec![qual(10, 1, &[BTREE]), qual(10, 2, &[BTREE])]);

        let err = make_links(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            Error::ConflictingRelation { node: NodeId::Qual(1), expected: 10, found: 11 }
        ));
    }

    #[test]
    fn test_conflict_in_tail_is_fatal() {
        let a = node(1, vec![qual(10, 1, &[BTREE]), qual(12, 1, &[BTREE])]);
        let b = node(2, Vec::new());
        assert!(make_links(&a, &b).is_err());
    }

    #[test]
    fn test_start_node_never_samerel() {
        let start = Node::start();
        let a = node(1, vec![qual(10, 1, &[BTREE])]);

        let pair = make_links(&a, &start).unwrap();
        assert!(!pair.to_first.samerel);
        assert_eq!(pair.to_first.source, NodeId::Start);
        assert_eq!(pair.to_second.target, NodeId::Start);
        assert_eq!(pair.to_second.missing.len(), 1);
        assert!(pair.to_first.missing.is_empty());
    }

    #[test]
    fn test_compute_links_skips_links_into_start() {
        let mut nodes = vec![
            Node::start(),
            node(1, vec![qual(10, 1, &[BTREE])]),
            node(2, vec![qual(10, 1, &[BTREE])]),
            node(3, vec![qual(20, 1, &[BTREE])]),
        ];

        let links = compute_links(&mut nodes).unwrap();
        // 3 predicate nodes: 6 links among them + 3 from start
        assert_eq!(links.len(), 9);
        assert!(links.iter().all(|l| !l.target.is_start()));
        assert!(nodes.iter().all(|n| !n.links.contains_key(&NodeId::Start)));
        assert_eq!(nodes[0].links.len(), 3);
        for n in &nodes[1..] {
            assert_eq!(n.links.len(), 2);
            for (target, link) in &n.links {
                let back = nodes.iter().find(|m| m.id == *target).unwrap().links.get(&n.id).unwrap();
                assert_eq!(back.source, link.target);
                assert_eq!(back.samerel, link.samerel);
            }
        }
    }

    #[test]
    fn test_compute_links_replaces_previous_links() {
        let mut nodes = vec![Node::start(), node(1, vec![qual(10, 1, &[BTREE])])];
        compute_links(&mut nodes).unwrap();
        let first = nodes[0].links.clone();
        compute_links(&mut nodes).unwrap();
        assert_eq!(nodes[0].links, first);
        assert_eq!(nodes[0].links.len(), 1);
    }

    #[test]
    fn test_empty_lists_link_with_nothing_missing() {
        let a = Node::predicate(1, "empty", QualList::new());
        let b = Node::predicate(2, "empty", QualList::new());
        let pair = make_links(&a, &b).unwrap();
        assert!(!pair.to_second.samerel);
        assert!(pair.to_second.missing.is_empty());
        assert!(pair.to_second.overlap.is_empty());
    }
}
