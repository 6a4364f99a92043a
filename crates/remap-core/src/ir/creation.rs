use super::Property;
use crate::ty::TypeRef;

/// How Wiring decided to construct a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationKind {
    /// An inherent `fn new(...) -> Self`; emitted as `Ty::new(a, b)`.
    NewFn,
    /// A struct literal over named fields; emitted as `Ty { f: a, g: b }`.
    StructLiteral,
}

/// An opaque reference to a constructor plus its ordered formal
/// parameters. Each parameter name is a slot to be covered by exactly one
/// incoming edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationDescriptor {
    pub target: TypeRef,
    pub kind: CreationKind,
    pub params: Vec<Property>,
}

impl CreationDescriptor {
    pub fn param(&self, name: &str) -> Option<&Property> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}
