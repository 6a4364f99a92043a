//! Human-readable rendering of a partially wired constructor node, used by
//! Validation to show which slots are covered and which are not.

use super::{Graph, MappingNode, NodeId};

/// Renders a `ConstructorAssignment` as a ✓/✗ tree:
///
/// ```text
/// ConstructorAssignment(FlatTicket):
///   ticket_id <- ticket.ticket_id ✓
///   venue     <- ???              ✗  (no source mapping)
///
/// Suggestion: add a matching source mapping for: venue
/// ```
pub fn render_constructor(graph: &Graph, ctor: NodeId) -> String {
    let MappingNode::ConstructorAssignment { target_ty, descriptor } = graph.node(ctor) else {
        return String::new();
    };

    let incoming = graph.incoming(ctor);
    let slot_source = |slot: &str| -> Option<NodeId> {
        incoming
            .iter()
            .map(|&e| graph.edge(e))
            .find(|e| e.flow.slot.as_deref() == Some(slot))
            .map(|e| e.from)
    };

    let name_width = descriptor
        .param_names()
        .map(str::len)
        .max()
        .unwrap_or(0);
    let sources: Vec<Option<String>> = descriptor
        .param_names()
        .map(|slot| slot_source(slot).map(|from| describe_source(graph, from)))
        .collect();
    let source_width = sources
        .iter()
        .map(|s| s.as_deref().unwrap_or("???").len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let target = target_ty.simple_name().unwrap_or("?");
    out.push_str(&format!("ConstructorAssignment({target}):\n"));

    let mut missing = Vec::new();
    for (param, source) in descriptor.params.iter().zip(&sources) {
        match source {
            Some(path) => out.push_str(&format!(
                "  {:<name_width$} <- {:<source_width$} \u{2713}\n",
                param.name, path
            )),
            None => {
                out.push_str(&format!(
                    "  {:<name_width$} <- {:<source_width$} \u{2717}  (no source mapping)\n",
                    param.name, "???"
                ));
                missing.push(param.name.as_str());
            }
        }
    }

    if !missing.is_empty() {
        out.push_str(&format!(
            "\nSuggestion: add a matching source mapping for: {}\n",
            missing.join(", ")
        ));
    }

    out
}

/// Dotted description of where a value comes from: the source parameter
/// followed by the property names along the access chain. Conversion nodes
/// are transparent here.
pub fn describe_source(graph: &Graph, node: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        match graph.node(id) {
            MappingNode::Source { param, .. } => {
                parts.push(param.clone());
                break;
            }
            MappingNode::PropertyAccess { name, .. } => parts.push(name.clone()),
            _ => {}
        }
        current = graph.incoming(id).first().map(|&e| graph.edge(e).from);
    }

    parts.reverse();
    parts.join(".")
}
