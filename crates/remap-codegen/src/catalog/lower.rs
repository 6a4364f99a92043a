//! Lowering from `syn` types to the neutral [`TypeRef`].
//!
//! Nominal identity is the unqualified type name: `flat::TicketVenue` and
//! `TicketVenue` lower to the same reference. Registered sources are
//! expected to keep simple names unique, which mirrors how the generated
//! code refers to them (through `use super::*;` in the impl file).

use remap_core::ty::{ScalarKind, TypeRef};

/// Lowers a type as written in source. Returns `None` for shapes the
/// pipeline does not model (references, trait objects, tuples, generics
/// other than `Option` and `Vec`).
pub fn lower_type(ty: &syn::Type) -> Option<TypeRef> {
    match ty {
        syn::Type::Tuple(tuple) if tuple.elems.is_empty() => Some(TypeRef::Unit),
        syn::Type::Paren(paren) => lower_type(&paren.elem),
        syn::Type::Group(group) => lower_type(&group.elem),
        syn::Type::Path(path) if path.qself.is_none() => lower_path(&path.path),
        _ => None,
    }
}

/// Lowers a return position; a missing arrow is `()`, and `Self` resolves
/// to `self_ty`.
pub fn lower_return_type(output: &syn::ReturnType, self_ty: &TypeRef) -> Option<TypeRef> {
    match output {
        syn::ReturnType::Default => Some(TypeRef::Unit),
        syn::ReturnType::Type(_, ty) => {
            if let syn::Type::Path(path) = &**ty {
                if path.qself.is_none() && path.path.is_ident("Self") {
                    return Some(self_ty.clone());
                }
            }
            lower_type(ty)
        }
    }
}

fn lower_path(path: &syn::Path) -> Option<TypeRef> {
    let seg = path.segments.last()?;
    let ident = seg.ident.to_string();
    match &seg.arguments {
        syn::PathArguments::None => Some(lower_leaf(&ident)),
        syn::PathArguments::AngleBracketed(args)
            if matches!(ident.as_str(), "Option" | "Vec") =>
        {
            let inner = args.args.iter().find_map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })?;
            let inner = lower_type(inner)?;
            Some(match ident.as_str() {
                "Option" => TypeRef::option(inner),
                _ => TypeRef::vec(inner),
            })
        }
        _ => None,
    }
}

fn lower_leaf(ident: &str) -> TypeRef {
    if ident == "String" {
        TypeRef::String
    } else if let Some(kind) = ScalarKind::parse(ident) {
        TypeRef::Scalar(kind)
    } else {
        TypeRef::named([ident])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lower(source: &str) -> Option<TypeRef> {
        lower_type(&syn::parse_str(source).unwrap())
    }

    #[test]
    fn builtins_and_wrappers() {
        assert_eq!(lower("String"), Some(TypeRef::String));
        assert_eq!(lower("i64"), Some(TypeRef::Scalar(ScalarKind::I64)));
        assert_eq!(lower("()"), Some(TypeRef::Unit));
        assert_eq!(
            lower("Option<Vec<Actor>>"),
            Some(TypeRef::option(TypeRef::vec(TypeRef::named(["Actor"]))))
        );
    }

    #[test]
    fn qualified_paths_lower_to_the_simple_name() {
        assert_eq!(lower("flat::TicketVenue"), Some(TypeRef::named(["TicketVenue"])));
        assert_eq!(lower("std::string::String"), Some(TypeRef::String));
    }

    #[test]
    fn unmodeled_shapes_are_rejected() {
        assert_eq!(lower("&str"), None);
        assert_eq!(lower("(i32, i32)"), None);
        assert_eq!(lower("HashMap<String, i32>"), None);
    }
}
