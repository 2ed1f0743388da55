//! Node in the qual graph: the synthetic start node or one predicate group.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Link, Qual, QualList};

/// Node identifier.
///
/// `Start` orders before every predicate node, so a `BTreeMap<NodeId, _>`
/// enumerates the start node first, then predicate ids ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    Start,
    Qual(u64),
}

impl NodeId {
    pub fn is_start(&self) -> bool {
        matches!(self, NodeId::Start)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Start => f.write_str("start"),
            NodeId::Qual(id) => write!(f, "{id}"),
        }
    }
}

// Wire form: the string "start" or the numeric qualid.
impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeId::Start => serializer.serialize_str("start"),
            NodeId::Qual(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(id) => Ok(NodeId::Qual(id)),
            Raw::Str(s) if s == "start" => Ok(NodeId::Start),
            Raw::Str(s) => s
                .parse()
                .map(NodeId::Qual)
                .map_err(|_| serde::de::Error::custom(format!("invalid node id '{s}'"))),
        }
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "startNode")]
    Start,
    #[serde(rename = "qual")]
    Predicate,
}

/// A node of the qual graph.
///
/// `links` maps a neighbour id to the link leaving this node towards it.
/// Links are rebuilt by [`crate::linker::compute_links`] and never point
/// at the start node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub quals: QualList,
    #[serde(skip)]
    pub links: BTreeMap<NodeId, Link>,
}

impl Node {
    /// The unique origin of every tour. It carries no quals.
    pub fn start() -> Self {
        Self {
            id: NodeId::Start,
            label: "Start".into(),
            kind: NodeKind::Start,
            quals: QualList::new(),
            links: BTreeMap::new(),
        }
    }

    pub fn predicate(qualid: u64, label: impl Into<String>, quals: impl Into<QualList>) -> Self {
        Self {
            id: NodeId::Qual(qualid),
            label: label.into(),
            kind: NodeKind::Predicate,
            quals: quals.into(),
            links: BTreeMap::new(),
        }
    }

    pub fn is_start(&self) -> bool {
        self.kind == NodeKind::Start
    }

    pub fn link_to(&self, target: NodeId) -> Option<&Link> {
        self.links.get(&target)
    }

    /// Copy of this node without its links, as sent to the suggestion service.
    pub fn shallow(&self) -> ShallowNode {
        ShallowNode {
            id: self.id,
            label: self.label.clone(),
            kind: self.kind,
            quals: self.quals.iter().cloned().collect(),
        }
    }
}

/// A node flattened to plain attribute data, links omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShallowNode {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub quals: Vec<Qual>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_wire_form() {
        assert_eq!(serde_json::to_string(&NodeId::Start).unwrap(), "\"start\"");
        assert_eq!(serde_json::to_string(&NodeId::Qual(42)).unwrap(), "42");
        assert_eq!(serde_json::from_str::<NodeId>("\"start\"").unwrap(), NodeId::Start);
        assert_eq!(serde_json::from_str::<NodeId>("17").unwrap(), NodeId::Qual(17));
        assert_eq!(serde_json::from_str::<NodeId>("\"17\"").unwrap(), NodeId::Qual(17));
        assert!(serde_json::from_str::<NodeId>("\"nope\"").is_err());
    }

    #[test]
    fn test_start_sorts_first() {
        let mut ids = vec![NodeId::Qual(3), NodeId::Start, NodeId::Qual(1)];
        ids.sort();
        assert_eq!(ids, vec![NodeId::Start, NodeId::Qual(1), NodeId::Qual(3)]);
    }

    #[test]
    fn test_shallow_drops_links() {
        let node = Node::predicate(9, "a = $1", vec![Qual::new(1, 1, 96, 5)]);
        let json = serde_json::to_value(node.shallow()).unwrap();
        assert_eq!(json["type"], "qual");
        assert_eq!(json["id"], 9);
        assert!(json.get("links").is_none());
        assert_eq!(json["quals"][0]["relid"], 1);
    }
}
