use crate::ir::{Accessor, CreationDescriptor};
use crate::ty::TypeRef;

/// Tagged union of graph vertices.
///
/// Binding produces `Source`, `PropertyAccess` and `TargetSlot`; Wiring
/// replaces every `TargetSlot` with one shared `ConstructorAssignment` and
/// splices the conversion variants into mismatched edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingNode {
    /// A method parameter; a root of the dataflow.
    Source { param: String, ty: TypeRef },

    /// Reads one property off the incoming value.
    PropertyAccess {
        name: String,
        in_ty: TypeRef,
        out_ty: TypeRef,
        accessor: Accessor,
    },

    /// Placeholder terminal produced by Binding; none survive Wiring.
    TargetSlot { target_ty: TypeRef, slot: String },

    /// Aggregates all slot edges and produces the target object.
    ConstructorAssignment {
        target_ty: TypeRef,
        descriptor: CreationDescriptor,
    },

    /// Calls a user-declared single-parameter mapper method.
    MethodCall {
        method: String,
        in_ty: TypeRef,
        out_ty: TypeRef,
    },

    OptionalWrap { elem: TypeRef },
    OptionalUnwrap { elem: TypeRef },

    CollectionIteration { coll: TypeRef, elem: TypeRef },
    CollectionCollect { coll: TypeRef, elem: TypeRef },

    /// Lossless numeric widening, emitted as `<out>::from(expr)`.
    NumericWiden { in_ty: TypeRef, out_ty: TypeRef },

    /// A registered `From` impl, emitted as `expr.into()`.
    IntoCall { in_ty: TypeRef, out_ty: TypeRef },
}

impl MappingNode {
    /// The type a value has after flowing through this node, when the node
    /// carries one (`ConstructorAssignment` produces the target itself).
    pub fn out_ty(&self) -> Option<TypeRef> {
        match self {
            MappingNode::Source { ty, .. } => Some(ty.clone()),
            MappingNode::PropertyAccess { out_ty, .. } => Some(out_ty.clone()),
            MappingNode::TargetSlot { .. } => None,
            MappingNode::ConstructorAssignment { target_ty, .. } => Some(target_ty.clone()),
            MappingNode::MethodCall { out_ty, .. } => Some(out_ty.clone()),
            MappingNode::OptionalWrap { elem } => Some(TypeRef::option(elem.clone())),
            MappingNode::OptionalUnwrap { elem } => Some(elem.clone()),
            MappingNode::CollectionIteration { elem, .. } => Some(elem.clone()),
            MappingNode::CollectionCollect { coll, .. } => Some(coll.clone()),
            MappingNode::NumericWiden { out_ty, .. } => Some(out_ty.clone()),
            MappingNode::IntoCall { out_ty, .. } => Some(out_ty.clone()),
        }
    }

    pub fn is_target_slot(&self) -> bool {
        matches!(self, MappingNode::TargetSlot { .. })
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, MappingNode::ConstructorAssignment { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            MappingNode::MethodCall { .. }
                | MappingNode::OptionalWrap { .. }
                | MappingNode::OptionalUnwrap { .. }
                | MappingNode::CollectionIteration { .. }
                | MappingNode::CollectionCollect { .. }
                | MappingNode::NumericWiden { .. }
                | MappingNode::IntoCall { .. }
        )
    }

    /// Short human-readable tag for cycle listings and renderings.
    pub fn label(&self) -> String {
        match self {
            MappingNode::Source { param, .. } => format!("Source({param})"),
            MappingNode::PropertyAccess { name, .. } => format!("PropertyAccess({name})"),
            MappingNode::TargetSlot { slot, .. } => format!("TargetSlot({slot})"),
            MappingNode::ConstructorAssignment { target_ty, .. } => {
                let name = target_ty.simple_name().unwrap_or("?");
                format!("ConstructorAssignment({name})")
            }
            MappingNode::MethodCall { method, .. } => format!("MethodCall({method})"),
            MappingNode::OptionalWrap { .. } => "OptionalWrap".into(),
            MappingNode::OptionalUnwrap { .. } => "OptionalUnwrap".into(),
            MappingNode::CollectionIteration { .. } => "CollectionIteration".into(),
            MappingNode::CollectionCollect { .. } => "CollectionCollect".into(),
            MappingNode::NumericWiden { in_ty, out_ty } => {
                format!("NumericWiden({in_ty} -> {out_ty})")
            }
            MappingNode::IntoCall { in_ty, out_ty } => format!("IntoCall({in_ty} -> {out_ty})"),
        }
    }
}
