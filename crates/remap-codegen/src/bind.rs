//! Stage 2: bind each abstract method into a dataflow graph.
//!
//! Binding expands wildcard and implicit mappings into concrete
//! directives, then materializes each directive as a chain of
//! `Source -> PropertyAccess* -> TargetSlot` nodes. Unresolvable paths are
//! reported and dropped; the method keeps its graph and the hole surfaces
//! later as an uncovered slot.

mod expand;
pub use expand::expand_directives;

use crate::catalog::TypeCatalog;
use crate::discover::{merged_properties, PropertyDiscovery};
use crate::registry::MethodRegistry;
use remap_core::diag::{Diagnostic, DiagnosticKind, Reporter};
use remap_core::graph::{FlowEdge, Graph, MappingNode};
use remap_core::ir::{MapperDef, MethodDef, ParameterDef, Property};
use remap_core::ty::TypeRef;

pub struct Binder<'a> {
    catalog: &'a TypeCatalog,
    discovery: &'a [Box<dyn PropertyDiscovery>],
}

impl<'a> Binder<'a> {
    pub fn new(catalog: &'a TypeCatalog, discovery: &'a [Box<dyn PropertyDiscovery>]) -> Self {
        Self { catalog, discovery }
    }

    /// Binds every abstract entry of the mapper's registry in place.
    pub fn bind_mapper(
        &self,
        mapper: &MapperDef,
        registry: &mut MethodRegistry,
        reporter: &mut dyn Reporter,
    ) {
        let mut graphs = Vec::new();
        for entry in registry.entries() {
            if entry.opaque {
                continue;
            }
            let origin = format!("{}::{}", mapper.qualified_name(), entry.method.name);
            let graph = self.bind_method(&origin, &entry.method, reporter);
            tracing::debug!(
                method = %origin,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "bound method"
            );
            graphs.push((entry.method.name.clone(), graph));
        }
        for (name, graph) in graphs {
            if let Some(entry) = registry.entries_mut().find(|e| e.method.name == name) {
                entry.graph = Some(graph);
            }
        }
    }

    fn bind_method(
        &self,
        origin: &str,
        method: &MethodDef,
        reporter: &mut dyn Reporter,
    ) -> Graph {
        let method = method.with_directives(expand_directives(
            method,
            self.catalog,
            self.discovery,
            reporter,
            origin,
        ));

        let mut graph = Graph::new();
        let mut sources = Vec::new();
        for param in &method.params {
            let id = graph.add_node(MappingNode::Source {
                param: param.name.clone(),
                ty: param.ty.clone(),
            });
            sources.push((param.name.clone(), id));
        }

        for directive in &method.directives {
            let segments = directive.source_segments();
            let Some((param, rest)) = resolve_entry(&method, &segments) else {
                reporter.report(
                    Diagnostic::warning(
                        DiagnosticKind::PathUnresolved,
                        format!("source path `{}` names no parameter", directive.source),
                    )
                    .with_origin(origin),
                );
                continue;
            };
            let chain = match walk_properties(self.catalog, self.discovery, &param.ty, &rest) {
                Ok(chain) => chain,
                Err(message) => {
                    reporter.report(
                        Diagnostic::warning(DiagnosticKind::PathUnresolved, message)
                            .with_origin(origin),
                    );
                    continue;
                }
            };

            let mut cur = sources
                .iter()
                .find(|(name, _)| *name == param.name)
                .map(|(_, id)| *id)
                .expect("every parameter has a source node");
            let mut cur_ty = param.ty.clone();
            for prop in chain {
                let node = graph.add_node(MappingNode::PropertyAccess {
                    name: prop.name.clone(),
                    in_ty: cur_ty.clone(),
                    out_ty: prop.ty.clone(),
                    accessor: prop.accessor,
                });
                graph.add_edge(cur, node, FlowEdge::new(cur_ty.clone(), cur_ty.clone()));
                cur = node;
                cur_ty = prop.ty;
            }

            let slot = graph.add_node(MappingNode::TargetSlot {
                target_ty: method.return_ty.clone(),
                slot: directive.target.clone(),
            });
            graph.add_edge(
                cur,
                slot,
                FlowEdge::slotted(cur_ty.clone(), cur_ty.clone(), &directive.target),
            );
        }

        graph
    }
}

/// Resolves the head of a dotted source path: an explicit parameter name
/// consumes the first segment; otherwise a single parameter is the implicit
/// root of the whole path.
pub(crate) fn resolve_entry<'m>(
    method: &'m MethodDef,
    segments: &[&str],
) -> Option<(&'m ParameterDef, Vec<String>)> {
    if let Some(first) = segments.first() {
        if let Some(param) = method.param(first) {
            return Some((
                param,
                segments[1..].iter().map(|s| s.to_string()).collect(),
            ));
        }
    }
    match method.params.as_slice() {
        [only] => Some((only, segments.iter().map(|s| s.to_string()).collect())),
        _ => None,
    }
}

/// Walks property segments from `start`, returning the accessed properties
/// in order. Errs with a report-ready message at the first segment that
/// does not exist.
pub(crate) fn walk_properties(
    catalog: &TypeCatalog,
    discovery: &[Box<dyn PropertyDiscovery>],
    start: &TypeRef,
    segments: &[String],
) -> Result<Vec<Property>, String> {
    let mut chain = Vec::new();
    let mut cur = start.clone();
    for segment in segments {
        let props = merged_properties(discovery, &cur, catalog);
        let Some(prop) = props.into_iter().find(|p| p.name == *segment) else {
            return Err(format!("no property `{segment}` on `{cur}`"));
        };
        cur = prop.ty.clone();
        chain.push(prop);
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::builtin_strategies;
    use crate::parse::{parse_sources, SourceFile};
    use pretty_assertions::assert_eq;
    use remap_core::diag::BufferReporter;

    fn bind(text: &str) -> (MethodRegistry, BufferReporter) {
        let mut reporter = BufferReporter::default();
        let sources = [SourceFile::new(["demo"], text)];
        let out = parse_sources(&sources, &mut reporter);
        let mapper = &out.mappers[0];
        let mut registry = MethodRegistry::seeded(mapper);
        let discovery = builtin_strategies();
        Binder::new(&out.catalog, &discovery).bind_mapper(mapper, &mut registry, &mut reporter);
        (registry, reporter)
    }

    #[test]
    fn explicit_directive_becomes_an_access_chain() {
        let (registry, reporter) = bind(
            r#"
            pub struct Venue { pub name: String }
            pub struct Ticket { pub venue: Venue }
            pub struct Flat { pub venue_name: String }

            #[mapper]
            pub trait M {
                #[map(target = "venue_name", source = "ticket.venue.name")]
                fn flatten(&self, ticket: Ticket) -> Flat;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        let graph = registry.lookup("Ticket", "Flat").unwrap().graph.as_ref().unwrap();

        // Source, two accesses, one slot.
        assert_eq!(graph.node_count(), 4);
        let slot = graph
            .find_node(|n| n.is_target_slot())
            .expect("slot node present");
        let incoming = graph.incoming(slot);
        assert_eq!(incoming.len(), 1);
        assert_eq!(
            graph.edge(incoming[0]).flow.slot.as_deref(),
            Some("venue_name")
        );
    }

    #[test]
    fn unresolved_path_is_dropped_with_a_warning() {
        let (registry, reporter) = bind(
            r#"
            pub struct Ticket { pub id: i64 }
            pub struct Flat { pub id: i64 }

            #[mapper]
            pub trait M {
                #[map(target = "id", source = "ticket.missing")]
                fn flatten(&self, ticket: Ticket) -> Flat;
            }
            "#,
        );
        assert_eq!(reporter.of_kind(DiagnosticKind::PathUnresolved).count(), 1);
        let graph = registry.lookup("Ticket", "Flat").unwrap().graph.as_ref().unwrap();
        assert!(graph.find_node(|n| n.is_target_slot()).is_none());
    }

    #[test]
    fn implicit_name_matching_covers_single_param_methods() {
        let (registry, _) = bind(
            r#"
            pub struct Venue { pub name: String, pub capacity: u32 }
            pub struct TicketVenue { pub name: String, pub capacity: u32 }

            #[mapper]
            pub trait M {
                fn map_venue(&self, venue: Venue) -> TicketVenue;
            }
            "#,
        );
        let graph = registry
            .lookup("Venue", "TicketVenue")
            .unwrap()
            .graph
            .as_ref()
            .unwrap();
        let slots: Vec<_> = graph
            .node_ids()
            .filter_map(|id| match graph.node(id) {
                MappingNode::TargetSlot { slot, .. } => Some(slot.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec!["name".to_string(), "capacity".to_string()]);
    }

    #[test]
    fn multi_param_paths_resolve_through_parameter_names() {
        let (registry, reporter) = bind(
            r#"
            pub struct Ticket { pub ticket_id: i64 }
            pub struct Order { pub zip_code: String }
            pub struct Flat { pub ticket_id: i64, pub zip_code: String }

            #[mapper]
            pub trait M {
                #[map(target = "ticket_id", source = "ticket.ticket_id")]
                #[map(target = "zip_code", source = "order.zip_code")]
                fn flatten(&self, ticket: Ticket, order: Order) -> Flat;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        let graph = registry
            .lookup("(Ticket,Order)", "Flat")
            .unwrap()
            .graph
            .as_ref()
            .unwrap();
        assert_eq!(
            graph
                .node_ids()
                .filter(|&id| graph.node(id).is_target_slot())
                .count(),
            2
        );
    }
}
