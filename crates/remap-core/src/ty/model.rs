use super::TypeRef;

/// What kind of declaration a named type resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Struct,
    Enum,
    /// Scalars, `String`, `Option`, `Vec`, unit.
    Builtin,
    /// Named but not declared in any registered source.
    Unknown,
}

/// Semantic predicates over [`TypeRef`]s.
///
/// The resolution pipeline takes the model by parameter and never consults
/// a compiler API directly. Structural questions have default answers;
/// everything that needs declaration knowledge (enums, `From` impls,
/// variant lists) is left to the implementation.
pub trait TypeModel {
    /// Nominal equality under erasure. Rust generics are not erased, so
    /// the default is full structural equality.
    fn same_erasure(&self, a: &TypeRef, b: &TypeRef) -> bool {
        a == b
    }

    /// Whether a value of `src` can feed a slot of `tgt` without any
    /// conversion fragment.
    fn is_assignable(&self, src: &TypeRef, tgt: &TypeRef) -> bool {
        self.same_erasure(src, tgt)
    }

    /// The subtype relation of the source environment, rendered in Rust as
    /// a registered `impl From<src> for tgt`.
    fn is_subtype(&self, src: &TypeRef, tgt: &TypeRef) -> bool;

    fn is_enum(&self, ty: &TypeRef) -> bool;

    /// Declared variant names of a fieldless enum, in declaration order.
    fn enum_variants(&self, ty: &TypeRef) -> Option<Vec<String>>;

    fn element_kind(&self, ty: &TypeRef) -> ElementKind;

    fn is_optional(&self, ty: &TypeRef) -> bool {
        ty.is_option()
    }

    fn is_list(&self, ty: &TypeRef) -> bool {
        ty.is_vec()
    }

    fn first_type_argument<'t>(&self, ty: &'t TypeRef) -> Option<&'t TypeRef> {
        ty.first_type_argument()
    }

    /// Lossless numeric widening between scalar types.
    fn widens_to(&self, src: &TypeRef, tgt: &TypeRef) -> bool {
        match (src.as_scalar(), tgt.as_scalar()) {
            (Some(a), Some(b)) => a.widens_to(b),
            _ => false,
        }
    }
}
