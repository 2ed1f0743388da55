//! Snapshot export: hand a computed graph to a renderer.
//!
//! ```text
//! Wizard::snapshot() → export_json() → dashboard widget
//!                    → export_dot()  → `dot -Tsvg`
//! ```

use std::io::Write;

use crate::model::{GraphSnapshot, NodeId, NodeKind};
use crate::Result;

/// Write the snapshot as one JSON document.
pub fn export_json(snapshot: &GraphSnapshot, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer(&mut *writer, snapshot)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the snapshot as a Graphviz digraph. Tour links are drawn bold.
pub fn export_dot(snapshot: &GraphSnapshot, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "digraph qualgraph {{")?;
    writeln!(writer, "  // nodes: {}, links: {}", snapshot.nodes.len(), snapshot.links.len())?;

    for node in &snapshot.nodes {
        let shape = match node.kind {
            NodeKind::Start => "doublecircle",
            NodeKind::Predicate => "box",
        };
        writeln!(
            writer,
            "  {} [label=\"{}\", shape={}];",
            dot_id(node.id),
            escape(&node.label),
            shape,
        )?;
    }

    let on_tour = |source: NodeId, target: NodeId| {
        snapshot
            .shortest_path
            .links()
            .iter()
            .any(|l| l.source == source && l.target == target)
    };

    for link in &snapshot.links {
        let value = link.value.map_or_else(|| "?".to_string(), |v| v.to_string());
        let style = if on_tour(link.source, link.target) { ", style=bold" } else { "" };
        writeln!(
            writer,
            "  {} -> {} [label=\"{}\"{}];",
            dot_id(link.source),
            dot_id(link.target),
            value,
            style,
        )?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn dot_id(id: NodeId) -> String {
    match id {
        NodeId::Start => "start".to_string(),
        NodeId::Qual(n) => format!("q{n}"),
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
