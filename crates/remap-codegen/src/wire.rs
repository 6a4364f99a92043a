//! Stage 3: wire object creation and type conversions into bound graphs.
//!
//! Phase one replaces every `TargetSlot` placeholder with one shared
//! `ConstructorAssignment` whose slot edges are retyped to the
//! constructor's formal parameters. Phase two walks every edge whose two
//! ends disagree and splices in the shortest conversion chain the
//! providers can offer; the slot name always stays on the last edge.
//! Gaps no provider can bridge are left in place for Validation.

use crate::catalog::TypeCatalog;
use crate::convert::{direct_fragment, ConversionCx, ConversionProvider, Fragment, LazyConversions};
use crate::create::{select_descriptor, CreationStrategy};
use crate::registry::MethodRegistry;
use remap_core::diag::{Diagnostic, DiagnosticKind, Reporter};
use remap_core::graph::{FlowEdge, Graph, MappingNode, NodeId};
use remap_core::ir::{MapperDef, MethodDef};

pub struct Wirer<'a> {
    catalog: &'a TypeCatalog,
    creation: &'a [Box<dyn CreationStrategy>],
    providers: &'a [Box<dyn ConversionProvider>],
    max_depth: usize,
}

impl<'a> Wirer<'a> {
    pub fn new(
        catalog: &'a TypeCatalog,
        creation: &'a [Box<dyn CreationStrategy>],
        providers: &'a [Box<dyn ConversionProvider>],
        max_depth: usize,
    ) -> Self {
        Self {
            catalog,
            creation,
            providers,
            max_depth,
        }
    }

    /// Wires every bound graph of the mapper's registry in place.
    pub fn wire_mapper(
        &self,
        mapper: &MapperDef,
        registry: &mut MethodRegistry,
        reporter: &mut dyn Reporter,
    ) {
        let converters: Vec<MethodDef> = registry.converters().cloned().collect();

        for entry in registry.entries_mut() {
            let Some(graph) = entry.graph.as_mut() else {
                continue;
            };
            // A method never converts through itself; that would generate
            // infinite recursion instead of the structural conversion.
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
            self.wire_method(&origin, &entry.method, graph, &cx, reporter);
            tracing::debug!(
                method = %origin,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "wired method"
            );
        }
    }

    fn wire_method(
        &self,
        origin: &str,
        method: &MethodDef,
        graph: &mut Graph,
        cx: &ConversionCx,
        reporter: &mut dyn Reporter,
    ) {
        let slots: Vec<NodeId> = graph
            .node_ids()
            .filter(|&id| graph.node(id).is_target_slot())
            .collect();

        if !slots.is_empty() {
            self.install_constructor(origin, method, graph, slots, reporter);
        } else if let Some(descriptor) =
            select_descriptor(self.creation, &method.return_ty, self.catalog)
        {
            // A constructible return type with nothing bound still gets its
            // constructor, so coverage can name every missing slot.
            graph.add_node(MappingNode::ConstructorAssignment {
                target_ty: method.return_ty.clone(),
                descriptor,
            });
        } else if method.params.len() == 1 {
            // A method without slot mappings is a plain conversion from its
            // parameter to its return type.
            self.wire_passthrough(method, graph, cx);
        }

        self.splice_conversions(graph, cx);
    }

    fn install_constructor(
        &self,
        origin: &str,
        method: &MethodDef,
        graph: &mut Graph,
        slots: Vec<NodeId>,
        reporter: &mut dyn Reporter,
    ) {
        let Some(descriptor) = select_descriptor(self.creation, &method.return_ty, self.catalog)
        else {
            reporter.report(
                Diagnostic::error(
                    DiagnosticKind::TypeIncompatible,
                    format!(
                        "cannot construct `{}`: no usable creation strategy",
                        method.return_ty
                    ),
                )
                .with_origin(origin),
            );
            for slot_id in slots {
                graph.remove_node(slot_id);
            }
            return;
        };

        let ctor = graph.add_node(MappingNode::ConstructorAssignment {
            target_ty: method.return_ty.clone(),
            descriptor: descriptor.clone(),
        });

        for slot_id in slots {
            for edge_id in graph.incoming(slot_id) {
                let edge = graph.edge(edge_id).clone();
                let Some(slot) = edge.flow.slot.clone() else {
                    continue;
                };
                match descriptor.param(&slot) {
                    Some(param) => {
                        graph.add_edge(
                            edge.from,
                            ctor,
                            FlowEdge::slotted(edge.flow.source_ty.clone(), param.ty.clone(), slot),
                        );
                    }
                    None => reporter.report(
                        Diagnostic::warning(
                            DiagnosticKind::PathUnresolved,
                            format!(
                                "target `{slot}` is not a slot of `{}`",
                                method.return_ty
                            ),
                        )
                        .with_origin(origin),
                    ),
                }
            }
            graph.remove_node(slot_id);
        }
    }

    /// Splices the conversion from the single parameter to the return type
    /// directly after the source node.
    fn wire_passthrough(&self, method: &MethodDef, graph: &mut Graph, cx: &ConversionCx) {
        let param_ty = &method.params[0].ty;
        if cx.same_erasure(param_ty, &method.return_ty) {
            return;
        }
        let Some(chain) = self.chain(param_ty, &method.return_ty, cx) else {
            return;
        };
        let Some(source) = graph.find_node(|n| matches!(n, MappingNode::Source { .. })) else {
            return;
        };

        let mut cur = source;
        let mut cur_ty = param_ty.clone();
        for fragment in &chain {
            for node in &fragment.nodes {
                let Some(out_ty) = node.out_ty() else { continue };
                let id = graph.add_node(node.clone());
                graph.add_edge(cur, id, FlowEdge::new(cur_ty.clone(), cur_ty));
                cur = id;
                cur_ty = out_ty;
            }
        }
    }

    /// Phase two: bridge every remaining type gap the providers can.
    fn splice_conversions(&self, graph: &mut Graph, cx: &ConversionCx) {
        let lazy = LazyConversions::new(self.providers, self.max_depth);
        let edges: Vec<_> = graph.edge_ids().collect();

        for edge_id in edges {
            let edge = graph.edge(edge_id).clone();
            if cx.same_erasure(&edge.flow.source_ty, &edge.flow.target_ty) {
                continue;
            }
            let chain = direct_fragment(
                self.providers,
                &edge.flow.source_ty,
                &edge.flow.target_ty,
                cx,
            )
            .map(|f| vec![f])
            .or_else(|| lazy.find_chain(&edge.flow.source_ty, &edge.flow.target_ty, cx));
            let Some(chain) = chain else {
                // Unbridgeable; Validation reports it.
                continue;
            };
            if chain.iter().all(Fragment::is_empty) {
                // Representation already fits (enum pairs); emission
                // re-expresses the value in place.
                continue;
            }

            graph.remove_edge(edge_id);
            let mut cur = edge.from;
            let mut cur_ty = edge.flow.source_ty.clone();
            for fragment in &chain {
                for node in &fragment.nodes {
                    let Some(out_ty) = node.out_ty() else { continue };
                    let id = graph.add_node(node.clone());
                    graph.add_edge(cur, id, FlowEdge::new(cur_ty.clone(), cur_ty));
                    cur = id;
                    cur_ty = out_ty;
                }
            }
            let mut last = FlowEdge::new(cur_ty, edge.flow.target_ty.clone());
            last.slot = edge.flow.slot.clone();
            graph.add_edge(cur, edge.to, last);
        }
    }

    fn chain(
        &self,
        src: &remap_core::ty::TypeRef,
        tgt: &remap_core::ty::TypeRef,
        cx: &ConversionCx,
    ) -> Option<Vec<Fragment>> {
        direct_fragment(self.providers, src, tgt, cx)
            .map(|f| vec![f])
            .or_else(|| {
                LazyConversions::new(self.providers, self.max_depth).find_chain(src, tgt, cx)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Binder;
    use crate::convert::builtin_providers;
    use crate::create;
    use crate::discover;
    use crate::parse::{parse_sources, SourceFile};
    use pretty_assertions::assert_eq;
    use remap_core::diag::BufferReporter;
    use remap_core::ir::CreationKind;

    fn wire(text: &str) -> (MethodRegistry, BufferReporter) {
        let mut reporter = BufferReporter::default();
        let sources = [SourceFile::new(["demo"], text)];
        let out = parse_sources(&sources, &mut reporter);
        let mapper = &out.mappers[0];
        let mut registry = MethodRegistry::seeded(mapper);

        let discovery = discover::builtin_strategies();
        Binder::new(&out.catalog, &discovery).bind_mapper(mapper, &mut registry, &mut reporter);

        let creation = create::builtin_strategies();
        let providers = builtin_providers();
        Wirer::new(&out.catalog, &creation, &providers, 5).wire_mapper(
            mapper,
            &mut registry,
            &mut reporter,
        );
        (registry, reporter)
    }

    fn graph<'r>(registry: &'r MethodRegistry, in_key: &str, out_key: &str) -> &'r Graph {
        registry
            .lookup(in_key, out_key)
            .unwrap()
            .graph
            .as_ref()
            .unwrap()
    }

    #[test]
    fn target_slots_are_replaced_by_one_constructor() {
        let (registry, reporter) = wire(
            r#"
            pub struct Venue { pub name: String, pub capacity: u32 }
            pub struct TicketVenue { pub name: String, pub capacity: u32 }

            #[mapper]
            pub trait M {
                fn map_venue(&self, venue: Venue) -> TicketVenue;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        let graph = graph(&registry, "Venue", "TicketVenue");

        assert!(graph.find_node(MappingNode::is_target_slot).is_none());
        let ctor = graph.find_node(MappingNode::is_constructor).unwrap();
        assert_eq!(graph.incoming(ctor).len(), 2);

        let MappingNode::ConstructorAssignment { descriptor, .. } = graph.node(ctor) else {
            unreachable!()
        };
        assert_eq!(descriptor.kind, CreationKind::StructLiteral);
    }

    #[test]
    fn widening_is_spliced_and_the_slot_stays_on_the_last_edge() {
        let (registry, reporter) = wire(
            r#"
            pub struct Ticket { pub id: i32 }
            pub struct Flat { pub id: i64 }

            #[mapper]
            pub trait M {
                #[map(target = "id", source = "ticket.id")]
                fn flatten(&self, ticket: Ticket) -> Flat;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        let graph = graph(&registry, "Ticket", "Flat");

        let widen = graph
            .find_node(|n| matches!(n, MappingNode::NumericWiden { .. }))
            .expect("widening node spliced");
        let out = graph.outgoing(widen);
        assert_eq!(out.len(), 1);
        let last = graph.edge(out[0]);
        assert_eq!(last.flow.slot.as_deref(), Some("id"));
        assert!(graph.node(last.to).is_constructor());
    }

    #[test]
    fn slotless_single_param_method_becomes_a_passthrough_conversion() {
        let (registry, reporter) = wire(
            r#"
            pub struct Venue { pub name: String }
            pub struct TicketVenue { pub name: String }

            #[mapper]
            pub trait M {
                fn map_venue(&self, venue: Venue) -> TicketVenue;
                fn map_venues(&self, venues: Vec<Venue>) -> Vec<TicketVenue>;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        let graph = graph(&registry, "Vec<Venue>", "Vec<TicketVenue>");

        // Source -> CollectionIteration -> MethodCall -> CollectionCollect.
        assert_eq!(graph.node_count(), 4);
        assert!(graph
            .find_node(|n| matches!(n, MappingNode::MethodCall { method, .. } if method == "map_venue"))
            .is_some());
    }

    #[test]
    fn spliced_graphs_are_acyclic_and_type_contiguous() {
        let (registry, reporter) = wire(
            r#"
            pub struct Venue { pub name: String }
            pub struct TicketVenue { pub name: String }
            pub struct Ticket { pub id: i32, pub venue: Venue, pub tags: Vec<String> }
            pub struct Flat { pub id: i64, pub venue: Option<TicketVenue>, pub tags: Vec<String> }

            #[mapper]
            pub trait M {
                fn map_venue(&self, venue: Venue) -> TicketVenue;
                fn flatten(&self, ticket: Ticket) -> Flat;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        for (in_key, out_key) in [("Venue", "TicketVenue"), ("Ticket", "Flat")] {
            let graph = graph(&registry, in_key, out_key);
            assert!(graph.topo_order().is_ok());
            for edge_id in graph.edge_ids() {
                let flow = &graph.edge(edge_id).flow;
                assert_eq!(flow.source_ty, flow.target_ty, "edge left unbridged");
            }
        }
    }

    #[test]
    fn missing_creation_strategy_is_fatal() {
        let (_, reporter) = wire(
            r#"
            pub struct Ticket { pub id: i64 }

            #[mapper]
            pub trait M {
                #[map(target = "id", source = "ticket.id")]
                fn flatten(&self, ticket: Ticket) -> Mystery;
            }
            "#,
        );
        assert_eq!(
            reporter
                .of_kind(DiagnosticKind::TypeIncompatible)
                .count(),
            1
        );
    }

    #[test]
    fn enum_pairs_keep_their_edge_for_emission() {
        let (registry, reporter) = wire(
            r#"
            pub enum Tier { Standard, Premium }
            pub enum TicketTier { Standard, Premium, Vip }
            pub struct Ticket { pub tier: Tier }
            pub struct Flat { pub tier: TicketTier }

            #[mapper]
            pub trait M {
                fn flatten(&self, ticket: Ticket) -> Flat;
            }
            "#,
        );
        assert!(!reporter.has_errors());
        let graph = graph(&registry, "Ticket", "Flat");
        let ctor = graph.find_node(MappingNode::is_constructor).unwrap();
        let incoming = graph.incoming(ctor);
        assert_eq!(incoming.len(), 1);
        let edge = graph.edge(incoming[0]);
        assert_eq!(edge.flow.source_ty.key(), "Tier");
        assert_eq!(edge.flow.target_ty.key(), "TicketTier");
    }
}
