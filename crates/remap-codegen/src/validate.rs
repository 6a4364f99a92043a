//! Stage 4: validate wired graphs before any code is emitted.
//!
//! Validation never mutates a graph. It checks three things per mapper:
//! methods do not call each other in a cycle, every constructor slot is
//! covered exactly once, and every remaining edge either already agrees on
//! both ends or can still be bridged within the conversion depth bound.
//! Findings go to the reporter; fatal kinds stop emission for the mapper.

use crate::catalog::TypeCatalog;
use crate::convert::{ConversionCx, ConversionProvider, LazyConversions};
use crate::registry::MethodRegistry;
use indexmap::IndexMap;
use remap_core::diag::{Diagnostic, DiagnosticKind, Reporter};
use remap_core::graph::{render::render_constructor, Graph, MappingNode, NodeId};
use remap_core::ir::{MapperDef, MethodDef};
use remap_core::ty::{TypeModel, TypeRef};

pub struct Validator<'a> {
    catalog: &'a TypeCatalog,
    providers: &'a [Box<dyn ConversionProvider>],
    max_depth: usize,
}

impl<'a> Validator<'a> {
    pub fn new(
        catalog: &'a TypeCatalog,
        providers: &'a [Box<dyn ConversionProvider>],
        max_depth: usize,
    ) -> Self {
        Self {
            catalog,
            providers,
            max_depth,
        }
    }

    pub fn validate_mapper(
        &self,
        mapper: &MapperDef,
        registry: &MethodRegistry,
        reporter: &mut dyn Reporter,
    ) {
        self.check_call_cycles(mapper, registry, reporter);

        let converters: Vec<MethodDef> = registry.converters().cloned().collect();

        for entry in registry.entries() {
            let Some(graph) = entry.graph.as_ref() else {
                continue;
            };
            // Mirror of Wiring: a method is not a converter for itself.
            let usable: Vec<MethodDef> = converters
                .iter()
                .filter(|m| m.name != entry.method.name)
                .cloned()
                .collect();
            let cx = ConversionCx {
                catalog: self.catalog,
                converters: &usable,
            };
            let origin = format!("{}::{}", mapper.qualified_name(), entry.method.name);
            self.check_acyclic(&origin, graph, reporter);
            self.check_coverage(&origin, graph, reporter);
            self.check_edges(&origin, graph, &cx, reporter);
            self.check_return(&origin, &entry.method, graph, reporter);
        }
    }

    /// Methods cyclically calling each other would generate infinite
    /// recursion; detected over the whole mapper, self-calls included.
    fn check_call_cycles(
        &self,
        mapper: &MapperDef,
        registry: &MethodRegistry,
        reporter: &mut dyn Reporter,
    ) {
        let mut calls: IndexMap<&str, Vec<String>> = IndexMap::new();
        for entry in registry.entries() {
            let callees = entry
                .graph
                .as_ref()
                .map(|graph| {
                    graph
                        .node_ids()
                        .filter_map(|id| match graph.node(id) {
                            MappingNode::MethodCall { method, .. } => Some(method.clone()),
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default();
            calls.insert(entry.method.name.as_str(), callees);
        }

        for start in calls.keys().copied().collect::<Vec<_>>() {
            if let Some(cycle) = find_cycle(&calls, start) {
                reporter.report(
                    Diagnostic::error(
                        DiagnosticKind::CycleDetected,
                        format!("mapper methods call each other in a cycle: {}", cycle.join(" -> ")),
                    )
                    .with_origin(mapper.qualified_name()),
                );
                return;
            }
        }
    }

    fn check_acyclic(&self, origin: &str, graph: &Graph, reporter: &mut dyn Reporter) {
        if let Err(stuck) = graph.topo_order() {
            let labels: Vec<String> = stuck.iter().map(|&id| graph.node(id).label()).collect();
            reporter.report(
                Diagnostic::error(
                    DiagnosticKind::CycleDetected,
                    format!("dataflow graph has a cycle through: {}", labels.join(", ")),
                )
                .with_origin(origin),
            );
        }
    }

    /// Every constructor parameter needs exactly one slot edge.
    fn check_coverage(&self, origin: &str, graph: &Graph, reporter: &mut dyn Reporter) {
        for ctor in graph.node_ids() {
            let MappingNode::ConstructorAssignment { descriptor, .. } = graph.node(ctor) else {
                continue;
            };
            let incoming = graph.incoming(ctor);
            let mut missing = false;
            for param in descriptor.param_names() {
                let edges = incoming
                    .iter()
                    .filter(|&&e| graph.edge(e).flow.slot.as_deref() == Some(param))
                    .count();
                match edges {
                    0 => missing = true,
                    1 => {}
                    n => reporter.report(
                        Diagnostic::error(
                            DiagnosticKind::SlotUncovered,
                            format!("slot `{param}` is fed by {n} mappings; expected one"),
                        )
                        .with_origin(origin),
                    ),
                }
            }
            if missing {
                reporter.report(
                    Diagnostic::error(
                        DiagnosticKind::SlotUncovered,
                        render_constructor(graph, ctor),
                    )
                    .with_origin(origin),
                );
            }
        }
    }

    /// Edges Wiring could not bridge are fatal unless a chain still exists
    /// within the depth bound (enum pairs are re-expressed at emission and
    /// land here on purpose).
    fn check_edges(
        &self,
        origin: &str,
        graph: &Graph,
        cx: &ConversionCx,
        reporter: &mut dyn Reporter,
    ) {
        let lazy = LazyConversions::new(self.providers, self.max_depth);
        for edge_id in graph.edge_ids() {
            let edge = graph.edge(edge_id);
            let src = &edge.flow.source_ty;
            let tgt = &edge.flow.target_ty;
            if self.catalog.is_assignable(src, tgt) || lazy.reachable(src, tgt, cx) {
                continue;
            }
            reporter.report(
                Diagnostic::error(
                    DiagnosticKind::TypeIncompatible,
                    incompatibility_message(self.catalog, src, tgt),
                )
                .with_origin(origin),
            );
        }
    }

    /// A method with no constructor must still produce its return value
    /// from the parameter chain.
    fn check_return(
        &self,
        origin: &str,
        method: &MethodDef,
        graph: &Graph,
        reporter: &mut dyn Reporter,
    ) {
        if graph.find_node(MappingNode::is_constructor).is_some() {
            return;
        }
        if method.params.len() == 1 {
            let Some(sink) = chain_sink(graph) else {
                return;
            };
            let Some(out_ty) = graph.node(sink).out_ty() else {
                return;
            };
            let ok = self.catalog.is_assignable(&out_ty, &method.return_ty)
                || both_enums_convertible(self.catalog, &out_ty, &method.return_ty);
            if !ok {
                reporter.report(
                    Diagnostic::error(
                        DiagnosticKind::TypeIncompatible,
                        incompatibility_message(self.catalog, &out_ty, &method.return_ty),
                    )
                    .with_origin(origin),
                );
            }
        } else {
            reporter.report(
                Diagnostic::error(
                    DiagnosticKind::SlotUncovered,
                    format!("no mapping produces the `{}` return value", method.return_ty),
                )
                .with_origin(origin),
            );
        }
    }
}

/// The unique node with no outgoing edges, following the source's chain.
pub(crate) fn chain_sink(graph: &Graph) -> Option<NodeId> {
    let mut cur = graph.find_node(|n| matches!(n, MappingNode::Source { .. }))?;
    loop {
        let out = graph.outgoing(cur);
        match out.first() {
            Some(&edge) => cur = graph.edge(edge).to,
            None => return Some(cur),
        }
    }
}

fn both_enums_convertible(catalog: &TypeCatalog, src: &TypeRef, tgt: &TypeRef) -> bool {
    match (catalog.enum_variants(src), catalog.enum_variants(tgt)) {
        (Some(from), Some(to)) => from.iter().all(|v| to.contains(v)),
        _ => false,
    }
}

/// Names the offending variants when an enum pair fails containment;
/// otherwise a plain type-gap message.
fn incompatibility_message(catalog: &TypeCatalog, src: &TypeRef, tgt: &TypeRef) -> String {
    if let (Some(from), Some(to)) = (catalog.enum_variants(src), catalog.enum_variants(tgt)) {
        let missing: Vec<&str> = from
            .iter()
            .filter(|v| !to.contains(v))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return format!(
                "cannot convert `{src}` to `{tgt}`: no counterpart for variant(s) {}",
                missing.join(", ")
            );
        }
    }
    format!("cannot convert `{src}` to `{tgt}`")
}

/// Depth-first search for a call cycle starting at `start`; returns the
/// cycle path for the message.
fn find_cycle(calls: &IndexMap<&str, Vec<String>>, start: &str) -> Option<Vec<String>> {
    fn visit<'a>(
        calls: &'a IndexMap<&str, Vec<String>>,
        node: &'a str,
        start: &str,
        path: &mut Vec<String>,
    ) -> bool {
        let Some(callees) = calls.get(node) else {
            return false;
        };
        for callee in callees {
            if callee == start {
                path.push(callee.clone());
                return true;
            }
            if path.iter().any(|p| p == callee) {
                continue;
            }
            path.push(callee.clone());
            if visit(calls, callee, start, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = vec![start.to_string()];
    visit(calls, start, start, &mut path).then_some(path)
}
