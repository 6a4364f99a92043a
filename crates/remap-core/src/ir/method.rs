use super::Directive;
use crate::ty::{params_key, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDef {
    pub name: String,
    pub ty: TypeRef,
}

impl ParameterDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub return_ty: TypeRef,
    pub params: Vec<ParameterDef>,

    /// True for trait methods without a default body; only abstract
    /// methods are bound and generated.
    pub is_abstract: bool,

    /// Declared directives in textual order.
    pub directives: Vec<Directive>,
}

impl MethodDef {
    /// Returns a copy with the directive list replaced. Used by directive
    /// expansion, which never mutates the parsed definition in place.
    pub fn with_directives(&self, directives: Vec<Directive>) -> MethodDef {
        MethodDef {
            directives,
            ..self.clone()
        }
    }

    /// Registry key for the input side.
    pub fn in_key(&self) -> String {
        let tys: Vec<TypeRef> = self.params.iter().map(|p| p.ty.clone()).collect();
        params_key(&tys)
    }

    /// Registry key for the output side.
    pub fn out_key(&self) -> String {
        self.return_ty.key()
    }

    pub fn param(&self, name: &str) -> Option<&ParameterDef> {
        self.params.iter().find(|p| p.name == name)
    }
}
