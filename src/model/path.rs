//! Tour: the visiting order over predicate nodes, starting at `Start`.

use serde::{Deserialize, Serialize};

use super::{Link, NodeId};

/// An ordered sequence of links: `start -[l0]-> n1 -[l1]-> n2 ...`.
///
/// Each link's `source` is the previous link's `target`; the first link
/// leaves the start node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour {
    links: Vec<Link>,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Extend the tour with the next hop.
    pub fn push(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Visited node ids, start node included.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.links.len() + 1);
        ids.push(self.links.first().map_or(NodeId::Start, |l| l.source));
        ids.extend(self.links.iter().map(|l| l.target));
        ids
    }
}

impl From<Vec<Link>> for Tour {
    fn from(links: Vec<Link>) -> Self {
        Self { links }
    }
}
