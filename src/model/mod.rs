//! # Qual Graph Model
//!
//! Plain data shared by the linker, the valuator, the solvers and the
//! rendering side: predicates, nodes, links and tours.
//!
//! Design rule: no I/O, no async, no transport types here.

pub mod qual;
pub mod node;
pub mod link;
pub mod path;
pub mod batch;
pub mod graph;

pub use qual::{Qual, QualList, Oid, IndexAms};
pub use node::{Node, NodeId, NodeKind, ShallowNode};
pub use link::{Link, OverlapEntry, MissingQual};
pub use path::Tour;
pub use batch::QualBatch;
pub use graph::{QualGraph, GraphSnapshot};
