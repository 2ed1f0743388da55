//! The node set owned by the wizard, plus its serializable snapshot.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Link, Node, NodeId, QualBatch, Tour};
use crate::{Error, Result};

/// Start node plus every predicate node, in arrival order.
///
/// Nodes are append-only: a predicate node is never removed or edited once
/// appended, only its `links` are rebuilt.
#[derive(Debug, Clone)]
pub struct QualGraph {
    nodes: Vec<Node>,
    /// node id → position in `nodes`
    index: HashMap<NodeId, usize>,
}

impl QualGraph {
    pub fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(NodeId::Start, 0);
        Self {
            nodes: vec![Node::start()],
            index,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn predicate_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.is_start())
    }

    pub fn predicate_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Total node count, start node included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicate_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Append a batch as a new predicate node.
    pub fn append(&mut self, batch: QualBatch) -> Result<NodeId> {
        let node = batch.into_node();
        let id = node.id;
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// The stored link `from -> to`.
    pub fn link(&self, from: NodeId, to: NodeId) -> Result<&Link> {
        self.node(from)
            .and_then(|n| n.link_to(to))
            .ok_or(Error::UncomputablePath { from, to })
    }

    /// Every stored link, grouped by source node in node order.
    pub fn links(&self) -> Vec<Link> {
        self.nodes
            .iter()
            .flat_map(|n| n.links.values().cloned())
            .collect()
    }

    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(|n| n.links.len()).sum()
    }

    pub fn snapshot(&self, shortest_path: &Tour) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            links: self.links(),
            shortest_path: shortest_path.clone(),
        }
    }
}

impl Default for QualGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// What the rendering side receives after every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub shortest_path: Tour,
}
