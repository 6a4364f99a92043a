//! Stage 1: parse registered sources into the neutral IR.
//!
//! Sources are plain Rust text. Traits carrying `#[mapper]` become
//! [`MapperDef`]s; every other top-level item feeds the [`TypeCatalog`].
//! Nothing here raises on bad input; malformed pieces are reported and
//! dropped, and the rest of the file is still used.

mod map_attr;
pub use map_attr::parse_map_attr;

mod reprint;
pub use reprint::reprint;

use crate::catalog::{lower_type, TypeCatalog};
use remap_core::diag::{Diagnostic, DiagnosticKind, Reporter};
use remap_core::ir::{MapperDef, MethodDef, ParameterDef};
use remap_core::ty::TypeRef;

/// One registered compilation input: a module path and its source text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub module: Vec<String>,
    pub text: String,
}

impl SourceFile {
    pub fn new<I, S>(module: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Mapper definitions in registration order.
    pub mappers: Vec<MapperDef>,
    pub catalog: TypeCatalog,
}

pub fn parse_sources(sources: &[SourceFile], reporter: &mut dyn Reporter) -> ParseOutput {
    let mut out = ParseOutput::default();

    for source in sources {
        let file = match syn::parse_file(&source.text) {
            Ok(file) => file,
            Err(err) => {
                reporter.report(
                    Diagnostic::error(
                        DiagnosticKind::ParseError,
                        format!("source is not parseable Rust: {err}"),
                    )
                    .with_origin(source.module.join("::")),
                );
                continue;
            }
        };

        for item in &file.items {
            if let syn::Item::Trait(item) = item {
                if has_mapper_attr(&item.attrs) {
                    out.mappers
                        .push(parse_mapper(&source.module, item, reporter));
                    continue;
                }
            } else if let Some(ident) = non_trait_mapper_target(item) {
                reporter.report(
                    Diagnostic::error(
                        DiagnosticKind::ShapeError,
                        format!("`#[mapper]` can only be applied to traits, found `{ident}`"),
                    )
                    .with_origin(source.module.join("::")),
                );
            }
            out.catalog.absorb_item(item);
        }
    }

    out
}

fn has_mapper_attr(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("mapper"))
}

/// Describes a non-trait item carrying `#[mapper]`, for the shape error.
fn non_trait_mapper_target(item: &syn::Item) -> Option<String> {
    let attrs = match item {
        syn::Item::Const(i) => &i.attrs,
        syn::Item::Enum(i) => &i.attrs,
        syn::Item::Fn(i) => &i.attrs,
        syn::Item::Impl(i) => &i.attrs,
        syn::Item::Macro(i) => &i.attrs,
        syn::Item::Mod(i) => &i.attrs,
        syn::Item::Static(i) => &i.attrs,
        syn::Item::Struct(i) => &i.attrs,
        syn::Item::TraitAlias(i) => &i.attrs,
        syn::Item::Type(i) => &i.attrs,
        syn::Item::Union(i) => &i.attrs,
        syn::Item::Use(i) => &i.attrs,
        _ => return None,
    };
    if !has_mapper_attr(attrs) {
        return None;
    }
    Some(match item {
        syn::Item::Struct(s) => s.ident.to_string(),
        syn::Item::Enum(e) => e.ident.to_string(),
        syn::Item::Fn(f) => f.sig.ident.to_string(),
        syn::Item::Union(u) => u.ident.to_string(),
        syn::Item::Mod(m) => format!("mod {}", m.ident),
        syn::Item::Impl(_) => "impl block".to_string(),
        _ => "non-trait item".to_string(),
    })
}

fn parse_mapper(
    module: &[String],
    item: &syn::ItemTrait,
    reporter: &mut dyn Reporter,
) -> MapperDef {
    let mut mapper = MapperDef {
        module: module.to_vec(),
        name: item.ident.to_string(),
        methods: Vec::new(),
    };

    for trait_item in &item.items {
        let syn::TraitItem::Fn(method) = trait_item else {
            continue;
        };
        let origin = format!("{}::{}", mapper.qualified_name(), method.sig.ident);
        match parse_method(method) {
            Ok(parsed) => mapper.methods.push(parsed),
            Err(message) => reporter.report(
                Diagnostic::error(DiagnosticKind::ParseError, message).with_origin(origin),
            ),
        }
    }

    mapper
}

/// Lowers one trait method. `Err` drops the whole method: a signature the
/// pipeline cannot model can never be generated against.
fn parse_method(method: &syn::TraitItemFn) -> Result<MethodDef, String> {
    let name = method.sig.ident.to_string();

    let Some(receiver) = method.sig.receiver() else {
        return Err(format!("method `{name}` must take `&self`"));
    };
    if receiver.reference.is_none() || receiver.mutability.is_some() {
        return Err(format!("method `{name}` must take `&self`"));
    }

    let mut params = Vec::new();
    for input in &method.sig.inputs {
        let syn::FnArg::Typed(pat_ty) = input else {
            continue;
        };
        let syn::Pat::Ident(pat) = &*pat_ty.pat else {
            return Err(format!("method `{name}` has a non-identifier parameter"));
        };
        let Some(ty) = lower_type(&pat_ty.ty) else {
            return Err(format!(
                "parameter `{}` of `{name}` has an unsupported type",
                pat.ident
            ));
        };
        params.push(ParameterDef::new(pat.ident.to_string(), ty));
    }

    let return_ty = match &method.sig.output {
        syn::ReturnType::Default => TypeRef::Unit,
        syn::ReturnType::Type(_, ty) => lower_type(ty)
            .ok_or_else(|| format!("return type of `{name}` is unsupported"))?,
    };

    let mut directives = Vec::new();
    for attr in &method.attrs {
        if !attr.path().is_ident("map") {
            continue;
        }
        let directive = parse_map_attr(attr).map_err(|err| format!("bad `#[map]`: {err}"))?;
        if directive.is_root_target() && !directive.has_wildcard_source() {
            return Err(format!(
                "target `.` requires a wildcard source, got `{}`",
                directive.source
            ));
        }
        directives.push(directive);
    }

    Ok(MethodDef {
        name,
        return_ty,
        params,
        is_abstract: method.default.is_none(),
        directives,
    })
}
