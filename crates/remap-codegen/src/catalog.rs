//! Declaration knowledge extracted from the registered sources.
//!
//! The catalog is the pipeline's [`TypeModel`]: it records every struct,
//! enum, inherent impl and `From` impl seen during parsing and answers the
//! semantic questions the later stages ask (fields, getters, constructors,
//! variants, the subtype relation).

mod def;
pub use def::{EnumDef, NewFn, StructDef};

mod lower;
pub use lower::{lower_return_type, lower_type};

use indexmap::IndexMap;
use remap_core::ir::Property;
use remap_core::ty::{ElementKind, TypeModel, TypeRef};

#[derive(Debug, Default)]
pub struct TypeCatalog {
    structs: IndexMap<String, StructDef>,
    enums: IndexMap<String, EnumDef>,
    /// Registered `impl From<src> for tgt` pairs, in declaration order.
    from_impls: Vec<(TypeRef, TypeRef)>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whatever declaration knowledge the item carries. Items that
    /// are not type declarations are ignored.
    pub fn absorb_item(&mut self, item: &syn::Item) {
        match item {
            syn::Item::Struct(item) => self.absorb_struct(item),
            syn::Item::Enum(item) => self.absorb_enum(item),
            syn::Item::Impl(item) => self.absorb_impl(item),
            _ => {}
        }
    }

    fn absorb_struct(&mut self, item: &syn::ItemStruct) {
        let name = item.ident.to_string();
        let mut fields = Vec::new();
        if let syn::Fields::Named(named) = &item.fields {
            for field in &named.named {
                let Some(ident) = &field.ident else { continue };
                let Some(ty) = lower_type(&field.ty) else { continue };
                fields.push(Property::field(ident.to_string(), ty));
            }
        }
        let def = self.structs.entry(name.clone()).or_insert(StructDef {
            name,
            fields: Vec::new(),
            getters: Vec::new(),
            new_fn: None,
        });
        def.fields = fields;
    }

    fn absorb_enum(&mut self, item: &syn::ItemEnum) {
        let fieldless = item
            .variants
            .iter()
            .all(|v| matches!(v.fields, syn::Fields::Unit));
        let variants = item.variants.iter().map(|v| v.ident.to_string()).collect();
        self.enums.insert(
            item.ident.to_string(),
            EnumDef {
                name: item.ident.to_string(),
                variants,
                fieldless,
            },
        );
    }

    fn absorb_impl(&mut self, item: &syn::ItemImpl) {
        let Some(self_ty) = lower_type(&item.self_ty) else {
            return;
        };

        if let Some((_, path, _)) = &item.trait_ {
            if let Some(src) = from_impl_source(path) {
                if !self.from_impls.iter().any(|(s, t)| *s == src && *t == self_ty) {
                    self.from_impls.push((src, self_ty));
                }
            }
            return;
        }

        let Some(name) = self_ty.simple_name().map(str::to_owned) else {
            return;
        };
        let def = self.structs.entry(name.clone()).or_insert(StructDef {
            name,
            fields: Vec::new(),
            getters: Vec::new(),
            new_fn: None,
        });

        for impl_item in &item.items {
            let syn::ImplItem::Fn(method) = impl_item else {
                continue;
            };
            absorb_method(def, &self_ty, method);
        }
    }

    pub fn struct_def(&self, ty: &TypeRef) -> Option<&StructDef> {
        self.structs.get(ty.simple_name()?)
    }

    pub fn enum_def(&self, ty: &TypeRef) -> Option<&EnumDef> {
        self.enums.get(ty.simple_name()?)
    }

    /// References to every registered fieldless enum, in declaration order.
    pub fn enum_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.enums
            .values()
            .filter(|def| def.fieldless)
            .map(|def| TypeRef::named([def.name.as_str()]))
    }

    /// Conversion targets of `src` under the registered `From` impls.
    pub fn into_targets<'a>(&'a self, src: &'a TypeRef) -> impl Iterator<Item = &'a TypeRef> + 'a {
        self.from_impls
            .iter()
            .filter(move |(s, _)| s == src)
            .map(|(_, t)| t)
    }
}

/// Classifies an inherent method as a constructor or a getter and records
/// it on the struct definition. The widest `new` wins when several impl
/// blocks compete.
fn absorb_method(def: &mut StructDef, self_ty: &TypeRef, method: &syn::ImplItemFn) {
    let name = method.sig.ident.to_string();
    let has_receiver = method.sig.receiver().is_some();
    let Some(return_ty) = lower_return_type(&method.sig.output, self_ty) else {
        return;
    };

    if name == "new" && !has_receiver && return_ty == *self_ty {
        let mut params = Vec::new();
        for input in &method.sig.inputs {
            let syn::FnArg::Typed(pat_ty) = input else {
                return;
            };
            let syn::Pat::Ident(pat) = &*pat_ty.pat else {
                return;
            };
            let Some(ty) = lower_type(&pat_ty.ty) else {
                return;
            };
            params.push(Property::field(pat.ident.to_string(), ty));
        }
        let wider = def
            .new_fn
            .as_ref()
            .map_or(true, |existing| params.len() > existing.params.len());
        if wider {
            def.new_fn = Some(NewFn { params });
        }
        return;
    }

    // A getter is a no-argument `&self` method with a non-unit return.
    if has_receiver && method.sig.inputs.len() == 1 && !return_ty.is_unit() {
        if !def.getters.iter().any(|g| g.name == name) {
            def.getters.push(Property::getter(name, return_ty));
        }
    }
}

/// The source type of a `From<Src>` trait path, if that is what `path` is.
fn from_impl_source(path: &syn::Path) -> Option<TypeRef> {
    let seg = path.segments.last()?;
    if seg.ident != "From" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    let ty = args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })?;
    lower_type(ty)
}

impl TypeModel for TypeCatalog {
    fn is_subtype(&self, src: &TypeRef, tgt: &TypeRef) -> bool {
        self.from_impls.iter().any(|(s, t)| s == src && t == tgt)
    }

    fn is_enum(&self, ty: &TypeRef) -> bool {
        self.enum_def(ty).is_some_and(|def| def.fieldless)
    }

    fn enum_variants(&self, ty: &TypeRef) -> Option<Vec<String>> {
        let def = self.enum_def(ty)?;
        def.fieldless.then(|| def.variants.clone())
    }

    fn element_kind(&self, ty: &TypeRef) -> ElementKind {
        match ty {
            TypeRef::Named(_) => {
                if self.struct_def(ty).is_some() {
                    ElementKind::Struct
                } else if self.enum_def(ty).is_some() {
                    ElementKind::Enum
                } else {
                    ElementKind::Unknown
                }
            }
            _ => ElementKind::Builtin,
        }
    }
}
