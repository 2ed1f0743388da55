//! Link (directed edge) between two nodes of the qual graph.

use serde::{Deserialize, Serialize};

use super::{IndexAms, NodeId, Oid, Qual};

/// One attribute both ends of a link can have indexed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapEntry {
    pub relid: Oid,
    /// `[left queryid, right queryid]` in merge-join order.
    pub queryids: [i64; 2],
    pub attnum: i16,
    pub relname: String,
    pub attname: String,
    /// Access methods common to both quals.
    pub indexams: IndexAms,
}

/// A qual of `origin` that found no counterpart on the other side of a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingQual {
    pub origin: NodeId,
    #[serde(flatten)]
    pub qual: Qual,
}

/// A directed link `source -> target`.
///
/// Links are always built in pairs sharing `samerel` and `overlap`.
/// `missing` holds the quals of `source` not matched on `target`.
/// `value` stays `None` until the valuator resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub samerel: bool,
    pub overlap: Vec<OverlapEntry>,
    pub missing: Vec<MissingQual>,
    pub value: Option<i64>,
}

impl Link {
    pub fn new(source: NodeId, target: NodeId, samerel: bool) -> Self {
        Self {
            source,
            target,
            samerel,
            overlap: Vec::new(),
            missing: Vec::new(),
            value: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// True when every qual on the source side found a partner on the target.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
