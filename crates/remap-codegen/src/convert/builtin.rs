//! The built-in provider set.

use super::{ConversionCx, ConversionProvider, Fragment};
use remap_core::graph::MappingNode;
use remap_core::ty::{ScalarKind, TypeModel, TypeRef};

/// Calls a user-declared single-parameter mapper method.
pub struct MapperMethodProvider;

impl ConversionProvider for MapperMethodProvider {
    fn name(&self) -> &'static str {
        "mapper-method"
    }

    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        cx.find_converter(src, tgt).is_some()
    }

    fn provide(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> Fragment {
        match cx.find_converter(src, tgt) {
            Some(method) => Fragment::single(MappingNode::MethodCall {
                method: method.name.clone(),
                in_ty: src.clone(),
                out_ty: tgt.clone(),
            }),
            None => Fragment::empty(),
        }
    }

    fn possible_conversions(&self, src: &TypeRef, cx: &ConversionCx) -> Vec<(TypeRef, Fragment)> {
        cx.converters
            .iter()
            .filter(|m| m.params.len() == 1 && m.params[0].ty == *src)
            .map(|m| {
                (
                    m.return_ty.clone(),
                    Fragment::single(MappingNode::MethodCall {
                        method: m.name.clone(),
                        in_ty: src.clone(),
                        out_ty: m.return_ty.clone(),
                    }),
                )
            })
            .collect()
    }
}

/// Maps `Vec<A>` to `Vec<B>` element-wise through a declared method.
pub struct ListProvider;

impl ListProvider {
    fn element_pair<'t>(src: &'t TypeRef, tgt: &'t TypeRef) -> Option<(&'t TypeRef, &'t TypeRef)> {
        match (src, tgt) {
            (TypeRef::Vec(a), TypeRef::Vec(b)) => Some((a, b)),
            _ => None,
        }
    }

    fn fragment(src: &TypeRef, tgt: &TypeRef, a: &TypeRef, b: &TypeRef, method: &str) -> Fragment {
        Fragment::of(vec![
            MappingNode::CollectionIteration {
                coll: src.clone(),
                elem: a.clone(),
            },
            MappingNode::MethodCall {
                method: method.into(),
                in_ty: a.clone(),
                out_ty: b.clone(),
            },
            MappingNode::CollectionCollect {
                coll: tgt.clone(),
                elem: b.clone(),
            },
        ])
    }
}

impl ConversionProvider for ListProvider {
    fn name(&self) -> &'static str {
        "list"
    }

    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        Self::element_pair(src, tgt)
            .is_some_and(|(a, b)| cx.find_converter(a, b).is_some())
    }

    fn provide(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> Fragment {
        let Some((a, b)) = Self::element_pair(src, tgt) else {
            return Fragment::empty();
        };
        match cx.find_converter(a, b) {
            Some(method) => Self::fragment(src, tgt, a, b, &method.name),
            None => Fragment::empty(),
        }
    }

    fn possible_conversions(&self, src: &TypeRef, cx: &ConversionCx) -> Vec<(TypeRef, Fragment)> {
        let TypeRef::Vec(a) = src else {
            return Vec::new();
        };
        cx.converters
            .iter()
            .filter(|m| m.params.len() == 1 && m.params[0].ty == **a)
            .map(|m| {
                let tgt = TypeRef::vec(m.return_ty.clone());
                let fragment = Self::fragment(src, &tgt, a, &m.return_ty, &m.name);
                (tgt, fragment)
            })
            .collect()
    }
}

/// `Option` handling: maps `Option<A>` to `Option<B>` element-wise, and
/// wraps a bare value into `Some`. Implicit unwrapping is never offered.
pub struct OptionalProvider;

impl OptionalProvider {
    fn mapped(a: &TypeRef, b: &TypeRef, method: &str) -> Fragment {
        Fragment::of(vec![
            MappingNode::OptionalUnwrap { elem: a.clone() },
            MappingNode::MethodCall {
                method: method.into(),
                in_ty: a.clone(),
                out_ty: b.clone(),
            },
            MappingNode::OptionalWrap { elem: b.clone() },
        ])
    }
}

impl ConversionProvider for OptionalProvider {
    fn name(&self) -> &'static str {
        "optional"
    }

    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        match (src, tgt) {
            (TypeRef::Option(a), TypeRef::Option(b)) => cx.find_converter(a, b).is_some(),
            (_, TypeRef::Option(elem)) => cx.same_erasure(src, elem),
            _ => false,
        }
    }

    fn provide(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> Fragment {
        match (src, tgt) {
            (TypeRef::Option(a), TypeRef::Option(b)) => match cx.find_converter(a, b) {
                Some(method) => Self::mapped(a, b, &method.name),
                None => Fragment::empty(),
            },
            (_, TypeRef::Option(elem)) if cx.same_erasure(src, elem) => {
                Fragment::single(MappingNode::OptionalWrap { elem: src.clone() })
            }
            _ => Fragment::empty(),
        }
    }

    fn possible_conversions(&self, src: &TypeRef, cx: &ConversionCx) -> Vec<(TypeRef, Fragment)> {
        let mut out = vec![(
            TypeRef::option(src.clone()),
            Fragment::single(MappingNode::OptionalWrap { elem: src.clone() }),
        )];
        if let TypeRef::Option(a) = src {
            for m in cx.converters {
                if m.params.len() == 1 && m.params[0].ty == **a {
                    out.push((
                        TypeRef::option(m.return_ty.clone()),
                        Self::mapped(a, &m.return_ty, &m.name),
                    ));
                }
            }
        }
        out
    }
}

/// Lossless numeric widening, mirroring the standard library's `From`
/// impls between scalars.
pub struct WideningProvider;

const ALL_SCALARS: [ScalarKind; 14] = [
    ScalarKind::Bool,
    ScalarKind::Char,
    ScalarKind::I8,
    ScalarKind::I16,
    ScalarKind::I32,
    ScalarKind::I64,
    ScalarKind::I128,
    ScalarKind::U8,
    ScalarKind::U16,
    ScalarKind::U32,
    ScalarKind::U64,
    ScalarKind::U128,
    ScalarKind::F32,
    ScalarKind::F64,
];

impl ConversionProvider for WideningProvider {
    fn name(&self) -> &'static str {
        "widening"
    }

    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        cx.catalog.widens_to(src, tgt)
    }

    fn provide(&self, src: &TypeRef, tgt: &TypeRef, _cx: &ConversionCx) -> Fragment {
        Fragment::single(MappingNode::NumericWiden {
            in_ty: src.clone(),
            out_ty: tgt.clone(),
        })
    }

    fn possible_conversions(&self, src: &TypeRef, _cx: &ConversionCx) -> Vec<(TypeRef, Fragment)> {
        let Some(kind) = src.as_scalar() else {
            return Vec::new();
        };
        ALL_SCALARS
            .iter()
            .filter(|&&wider| kind.widens_to(wider))
            .map(|&wider| {
                let tgt = TypeRef::Scalar(wider);
                let fragment = Fragment::single(MappingNode::NumericWiden {
                    in_ty: src.clone(),
                    out_ty: tgt.clone(),
                });
                (tgt, fragment)
            })
            .collect()
    }
}

/// Variant-wise conversion between fieldless enums. The target must
/// declare every source variant. No runtime node is needed: emission
/// re-expresses the value as a `match`.
pub struct EnumProvider;

impl EnumProvider {
    fn variant_subset(src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        let (Some(from), Some(to)) = (
            cx.catalog.enum_variants(src),
            cx.catalog.enum_variants(tgt),
        ) else {
            return false;
        };
        from.iter().all(|v| to.contains(v))
    }
}

impl ConversionProvider for EnumProvider {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        src != tgt && Self::variant_subset(src, tgt, cx)
    }

    fn provide(&self, _src: &TypeRef, _tgt: &TypeRef, _cx: &ConversionCx) -> Fragment {
        Fragment::empty()
    }

    fn possible_conversions(&self, src: &TypeRef, cx: &ConversionCx) -> Vec<(TypeRef, Fragment)> {
        if !cx.catalog.is_enum(src) {
            return Vec::new();
        }
        cx.catalog
            .enum_types()
            .filter(|tgt| *tgt != *src && Self::variant_subset(src, tgt, cx))
            .map(|tgt| (tgt, Fragment::empty()))
            .collect()
    }
}

/// A registered `impl From<src> for tgt`, emitted as `.into()`.
pub struct IntoProvider;

impl ConversionProvider for IntoProvider {
    fn name(&self) -> &'static str {
        "into"
    }

    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        cx.catalog.is_subtype(src, tgt)
    }

    fn provide(&self, src: &TypeRef, tgt: &TypeRef, _cx: &ConversionCx) -> Fragment {
        Fragment::single(MappingNode::IntoCall {
            in_ty: src.clone(),
            out_ty: tgt.clone(),
        })
    }

    fn possible_conversions(&self, src: &TypeRef, cx: &ConversionCx) -> Vec<(TypeRef, Fragment)> {
        cx.catalog
            .into_targets(src)
            .map(|tgt| {
                (
                    tgt.clone(),
                    Fragment::single(MappingNode::IntoCall {
                        in_ty: src.clone(),
                        out_ty: tgt.clone(),
                    }),
                )
            })
            .collect()
    }
}

/// Priority order: declared methods beat structure, structure beats
/// built-in coercions.
pub fn builtin_providers() -> Vec<Box<dyn ConversionProvider>> {
    vec![
        Box::new(MapperMethodProvider),
        Box::new(ListProvider),
        Box::new(OptionalProvider),
        Box::new(WideningProvider),
        Box::new(EnumProvider),
        Box::new(IntoProvider),
    ]
}
