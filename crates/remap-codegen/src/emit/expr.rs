//! Expression rendering: walks an access chain backwards to its source
//! parameter, then folds the nodes into Rust text using one template per
//! conversion shape.

use crate::catalog::TypeCatalog;
use remap_core::graph::{Graph, MappingNode, NodeId};
use remap_core::ty::{TypeModel, TypeRef};

/// The expression producing the value that flows out of `node`.
pub fn expression_for(graph: &Graph, node: NodeId) -> String {
    let mut chain = Vec::new();
    let mut cur = Some(node);
    while let Some(id) = cur {
        chain.push(graph.node(id));
        cur = graph.incoming(id).first().map(|&e| graph.edge(e).from);
    }
    chain.reverse();
    fold(&chain)
}

fn fold(chain: &[&MappingNode]) -> String {
    let mut expr = String::new();
    let mut i = 0;
    while i < chain.len() {
        match chain[i] {
            MappingNode::Source { param, .. } => expr = param.clone(),
            MappingNode::PropertyAccess { name, accessor, .. } => {
                expr = match accessor {
                    remap_core::ir::Accessor::Field => format!("{expr}.{name}"),
                    remap_core::ir::Accessor::Getter => format!("{expr}.{name}()"),
                };
            }
            MappingNode::CollectionIteration { .. } => {
                // Iteration is always followed by the element call and the
                // collect that Wiring spliced with it.
                if let Some(MappingNode::MethodCall { method, .. }) = chain.get(i + 1).copied() {
                    expr = format!(
                        "{expr}.into_iter().map(|value| self.{method}(value)).collect()"
                    );
                    i += 2;
                }
            }
            MappingNode::OptionalUnwrap { .. } => {
                if let Some(MappingNode::MethodCall { method, .. }) = chain.get(i + 1).copied() {
                    expr = format!("{expr}.map(|value| self.{method}(value))");
                    i += 2;
                }
            }
            MappingNode::MethodCall { method, .. } => expr = format!("self.{method}({expr})"),
            MappingNode::OptionalWrap { .. } => expr = format!("Some({expr})"),
            MappingNode::NumericWiden { out_ty, .. } => expr = format!("{out_ty}::from({expr})"),
            MappingNode::IntoCall { .. } => expr = format!("{expr}.into()"),
            MappingNode::CollectionCollect { .. }
            | MappingNode::TargetSlot { .. }
            | MappingNode::ConstructorAssignment { .. } => {}
        }
        i += 1;
    }
    expr
}

/// Re-expresses `expr` as the target enum when the chain ends on a
/// compatible enum pair; otherwise returns it unchanged.
pub fn adapt_enum(
    catalog: &TypeCatalog,
    expr: String,
    src: &TypeRef,
    tgt: &TypeRef,
) -> String {
    if catalog.same_erasure(src, tgt) {
        return expr;
    }
    let (Some(variants), Some(src_name), Some(tgt_name)) = (
        catalog.enum_variants(src),
        src.simple_name(),
        tgt.simple_name(),
    ) else {
        return expr;
    };
    if catalog.enum_variants(tgt).is_none() {
        return expr;
    }
    let arms: Vec<String> = variants
        .iter()
        .map(|v| format!("{src_name}::{v} => {tgt_name}::{v}"))
        .collect();
    format!("match {expr} {{ {} }}", arms.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use remap_core::graph::FlowEdge;
    use remap_core::ir::Accessor;
    use remap_core::ty::ScalarKind;

    fn link(graph: &mut Graph, from: NodeId, to: NodeId) {
        // Types on interior edges do not affect rendering.
        let ty = TypeRef::named(["T"]);
        graph.add_edge(from, to, FlowEdge::new(ty.clone(), ty));
    }

    #[test]
    fn access_chain_with_getter_and_widen() {
        let mut g = Graph::new();
        let src = g.add_node(MappingNode::Source {
            param: "ticket".into(),
            ty: TypeRef::named(["Ticket"]),
        });
        let venue = g.add_node(MappingNode::PropertyAccess {
            name: "venue".into(),
            in_ty: TypeRef::named(["Ticket"]),
            out_ty: TypeRef::named(["Venue"]),
            accessor: Accessor::Field,
        });
        let cap = g.add_node(MappingNode::PropertyAccess {
            name: "capacity".into(),
            in_ty: TypeRef::named(["Venue"]),
            out_ty: TypeRef::Scalar(ScalarKind::U32),
            accessor: Accessor::Getter,
        });
        let widen = g.add_node(MappingNode::NumericWiden {
            in_ty: TypeRef::Scalar(ScalarKind::U32),
            out_ty: TypeRef::Scalar(ScalarKind::U64),
        });
        link(&mut g, src, venue);
        link(&mut g, venue, cap);
        link(&mut g, cap, widen);

        assert_eq!(
            expression_for(&g, widen),
            "u64::from(ticket.venue.capacity())"
        );
    }

    #[test]
    fn optional_triple_renders_as_map() {
        let mut g = Graph::new();
        let src = g.add_node(MappingNode::Source {
            param: "venue".into(),
            ty: TypeRef::option(TypeRef::named(["Venue"])),
        });
        let unwrap = g.add_node(MappingNode::OptionalUnwrap {
            elem: TypeRef::named(["Venue"]),
        });
        let call = g.add_node(MappingNode::MethodCall {
            method: "map_venue".into(),
            in_ty: TypeRef::named(["Venue"]),
            out_ty: TypeRef::named(["TicketVenue"]),
        });
        let wrap = g.add_node(MappingNode::OptionalWrap {
            elem: TypeRef::named(["TicketVenue"]),
        });
        link(&mut g, src, unwrap);
        link(&mut g, unwrap, call);
        link(&mut g, call, wrap);

        assert_eq!(
            expression_for(&g, wrap),
            "venue.map(|value| self.map_venue(value))"
        );
    }

    #[test]
    fn collection_triple_renders_as_map_collect() {
        let mut g = Graph::new();
        let src = g.add_node(MappingNode::Source {
            param: "venues".into(),
            ty: TypeRef::vec(TypeRef::named(["Venue"])),
        });
        let iter = g.add_node(MappingNode::CollectionIteration {
            coll: TypeRef::vec(TypeRef::named(["Venue"])),
            elem: TypeRef::named(["Venue"]),
        });
        let call = g.add_node(MappingNode::MethodCall {
            method: "map_venue".into(),
            in_ty: TypeRef::named(["Venue"]),
            out_ty: TypeRef::named(["TicketVenue"]),
        });
        let collect = g.add_node(MappingNode::CollectionCollect {
            coll: TypeRef::vec(TypeRef::named(["TicketVenue"])),
            elem: TypeRef::named(["TicketVenue"]),
        });
        link(&mut g, src, iter);
        link(&mut g, iter, call);
        link(&mut g, call, collect);

        assert_eq!(
            expression_for(&g, collect),
            "venues.into_iter().map(|value| self.map_venue(value)).collect()"
        );
    }

    #[test]
    fn standalone_method_call_and_into() {
        let mut g = Graph::new();
        let src = g.add_node(MappingNode::Source {
            param: "venue".into(),
            ty: TypeRef::named(["Venue"]),
        });
        let call = g.add_node(MappingNode::MethodCall {
            method: "map_venue".into(),
            in_ty: TypeRef::named(["Venue"]),
            out_ty: TypeRef::named(["TicketVenue"]),
        });
        let into = g.add_node(MappingNode::IntoCall {
            in_ty: TypeRef::named(["TicketVenue"]),
            out_ty: TypeRef::named(["VenueSummary"]),
        });
        link(&mut g, src, call);
        link(&mut g, call, into);

        assert_eq!(expression_for(&g, into), "self.map_venue(venue).into()");
    }
}
