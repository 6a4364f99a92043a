use super::NodeId;
use crate::ty::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// The typed payload of an edge.
///
/// `source_ty` is what the producing node emits; `target_ty` is what the
/// consuming node requires. The two differ only where a conversion is still
/// owed, which is exactly what Wiring splices and Validation checks.
///
/// `slot` is set only on edges that terminate at a `TargetSlot` or
/// `ConstructorAssignment`, naming the formal parameter the value feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub source_ty: TypeRef,
    pub target_ty: TypeRef,
    pub slot: Option<String>,
}

impl FlowEdge {
    pub fn new(source_ty: TypeRef, target_ty: TypeRef) -> Self {
        Self {
            source_ty,
            target_ty,
            slot: None,
        }
    }

    pub fn slotted(source_ty: TypeRef, target_ty: TypeRef, slot: impl Into<String>) -> Self {
        Self {
            source_ty,
            target_ty,
            slot: Some(slot.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: FlowEdge,
}
