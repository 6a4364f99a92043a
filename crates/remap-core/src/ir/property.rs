use crate::ty::TypeRef;

/// How a property is read from its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// A named field: `owner.name`.
    Field,
    /// A no-argument inherent method: `owner.name()`.
    Getter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,
    pub accessor: Accessor,
}

impl Property {
    pub fn field(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            accessor: Accessor::Field,
        }
    }

    pub fn getter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            accessor: Accessor::Getter,
        }
    }
}
