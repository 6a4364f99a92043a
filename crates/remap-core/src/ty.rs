//! The semantic type model.
//!
//! The pipeline never talks to a compiler front-end directly; every type
//! question goes through [`TypeModel`], and types themselves are the
//! neutral [`TypeRef`] tree. The concrete binding (a syn-backed catalog in
//! `remap-codegen`) is supplied by the caller.

mod model;
pub use model::{ElementKind, TypeModel};

mod scalar;
pub use scalar::ScalarKind;

mod type_ref;
pub use type_ref::TypeRef;

/// Renders the registry key for a method's input side: the single
/// parameter's type key, or a `"(T1,T2,...)"` tuple for multi-parameter
/// methods.
pub fn params_key(params: &[TypeRef]) -> String {
    if let [only] = params {
        return only.key();
    }
    let joined = params.iter().map(TypeRef::key).collect::<Vec<_>>().join(",");
    format!("({joined})")
}
