//! Input batches handed over by the qual collector.

use serde::{Deserialize, Serialize};

use super::{Node, Qual};

/// One predicate group of a normalized query: becomes one predicate node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualBatch {
    pub qualid: u64,
    pub queryid: i64,
    pub where_clause: String,
    pub quals: Vec<Qual>,
}

impl QualBatch {
    pub fn new(qualid: u64, queryid: i64, where_clause: impl Into<String>) -> Self {
        Self {
            qualid,
            queryid,
            where_clause: where_clause.into(),
            quals: Vec::new(),
        }
    }

    pub fn with_qual(mut self, qual: Qual) -> Self {
        self.quals.push(qual);
        self
    }

    /// Predicate node labelled with the where clause; quals get sorted here.
    pub fn into_node(self) -> Node {
        Node::predicate(self.qualid, self.where_clause, self.quals)
    }
}
