//! Object creation strategies.
//!
//! Wiring asks the configured strategies, in order, how to construct the
//! target type; the first answer wins. The resulting
//! [`CreationDescriptor`] fixes the slot names every target value must
//! cover.

use crate::catalog::TypeCatalog;
use remap_core::ir::{CreationDescriptor, CreationKind};
use remap_core::ty::TypeRef;

pub trait CreationStrategy {
    fn name(&self) -> &'static str;

    /// A constructor for `ty`, if this strategy can build one.
    fn describe(&self, ty: &TypeRef, catalog: &TypeCatalog) -> Option<CreationDescriptor>;
}

/// An inherent `fn new(...) -> Self`. Preferred over a struct literal
/// because it works for types with private fields.
pub struct NewFnCreation;

impl CreationStrategy for NewFnCreation {
    fn name(&self) -> &'static str {
        "new-fn"
    }

    fn describe(&self, ty: &TypeRef, catalog: &TypeCatalog) -> Option<CreationDescriptor> {
        let def = catalog.struct_def(ty)?;
        let new_fn = def.new_fn.as_ref()?;
        Some(CreationDescriptor {
            target: ty.clone(),
            kind: CreationKind::NewFn,
            params: new_fn.params.clone(),
        })
    }
}

/// A literal over the struct's named fields, in declaration order.
pub struct StructLiteralCreation;

impl CreationStrategy for StructLiteralCreation {
    fn name(&self) -> &'static str {
        "struct-literal"
    }

    fn describe(&self, ty: &TypeRef, catalog: &TypeCatalog) -> Option<CreationDescriptor> {
        let def = catalog.struct_def(ty)?;
        if def.fields.is_empty() {
            return None;
        }
        Some(CreationDescriptor {
            target: ty.clone(),
            kind: CreationKind::StructLiteral,
            params: def.fields.clone(),
        })
    }
}

/// First strategy that can describe the target wins.
pub fn select_descriptor(
    strategies: &[Box<dyn CreationStrategy>],
    ty: &TypeRef,
    catalog: &TypeCatalog,
) -> Option<CreationDescriptor> {
    strategies.iter().find_map(|s| s.describe(ty, catalog))
}

/// The built-in strategy set: `new` before struct literal.
pub fn builtin_strategies() -> Vec<Box<dyn CreationStrategy>> {
    vec![Box::new(NewFnCreation), Box::new(StructLiteralCreation)]
}
