//! Conversion providers.
//!
//! A provider bridges one kind of type gap by producing a [`Fragment`],
//! a short chain of graph nodes Wiring splices into a mismatched edge.
//! Providers are consulted in priority order: user-declared mapper methods
//! first, structural wrappers next, built-in coercions last.

mod builtin;
pub use builtin::{
    builtin_providers, EnumProvider, IntoProvider, ListProvider, MapperMethodProvider,
    OptionalProvider, WideningProvider,
};

mod lazy;
pub use lazy::LazyConversions;

use crate::catalog::TypeCatalog;
use remap_core::graph::MappingNode;
use remap_core::ir::MethodDef;
use remap_core::ty::{TypeModel, TypeRef};

/// Everything a provider may consult: declaration knowledge plus the
/// current mapper's single-parameter methods.
pub struct ConversionCx<'a> {
    pub catalog: &'a TypeCatalog,
    pub converters: &'a [MethodDef],
}

impl ConversionCx<'_> {
    /// The declared method converting `src` to `tgt`, if any.
    pub fn find_converter(&self, src: &TypeRef, tgt: &TypeRef) -> Option<&MethodDef> {
        self.converters
            .iter()
            .find(|m| m.params.len() == 1 && m.params[0].ty == *src && m.return_ty == *tgt)
    }

    pub fn same_erasure(&self, a: &TypeRef, b: &TypeRef) -> bool {
        self.catalog.same_erasure(a, b)
    }
}

/// An ordered run of conversion nodes. May be empty when the conversion
/// needs no runtime step (enum pairs are re-expressed at emission).
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub nodes: Vec<MappingNode>,
}

impl Fragment {
    pub fn of(nodes: Vec<MappingNode>) -> Self {
        Self { nodes }
    }

    pub fn single(node: MappingNode) -> Self {
        Self { nodes: vec![node] }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub trait ConversionProvider {
    fn name(&self) -> &'static str;

    /// Whether this provider bridges `src` to `tgt` in one step.
    fn can_handle(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool;

    /// The fragment bridging `src` to `tgt`. Only meaningful when
    /// [`Self::can_handle`] holds.
    fn provide(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> Fragment;

    /// Every one-step conversion reachable from `src`, for bounded chain
    /// search. Finite by construction.
    fn possible_conversions(&self, src: &TypeRef, cx: &ConversionCx) -> Vec<(TypeRef, Fragment)>;
}

/// First provider that can bridge the gap, in priority order.
pub fn direct_fragment(
    providers: &[Box<dyn ConversionProvider>],
    src: &TypeRef,
    tgt: &TypeRef,
    cx: &ConversionCx,
) -> Option<Fragment> {
    providers
        .iter()
        .find(|p| p.can_handle(src, tgt, cx))
        .map(|p| p.provide(src, tgt, cx))
}
