//! Bounded lazy chain search over the provider set.
//!
//! Instead of precomputing a conversion closure, reachability is explored
//! breadth-first from the source type on demand, one provider step at a
//! time, and stops at `max_depth` fragments. Breadth-first order makes the
//! shortest chain win and keeps results independent of declaration noise.

use super::{ConversionCx, ConversionProvider, Fragment};
use remap_core::ty::TypeRef;
use std::collections::{HashSet, VecDeque};

pub struct LazyConversions<'a> {
    providers: &'a [Box<dyn ConversionProvider>],
    max_depth: usize,
}

impl<'a> LazyConversions<'a> {
    pub fn new(providers: &'a [Box<dyn ConversionProvider>], max_depth: usize) -> Self {
        Self {
            providers,
            max_depth,
        }
    }

    /// The shortest fragment chain from `src` to `tgt`, at most
    /// `max_depth` fragments long. Empty when the types already agree.
    pub fn find_chain(
        &self,
        src: &TypeRef,
        tgt: &TypeRef,
        cx: &ConversionCx,
    ) -> Option<Vec<Fragment>> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(TypeRef, Vec<Fragment>)> = VecDeque::new();
        visited.insert(src.key());
        queue.push_back((src.clone(), Vec::new()));

        while let Some((cur, path)) = queue.pop_front() {
            if cx.same_erasure(&cur, tgt) {
                return Some(path);
            }
            if path.len() == self.max_depth {
                continue;
            }
            for provider in self.providers {
                for (next, fragment) in provider.possible_conversions(&cur, cx) {
                    // Empty fragments (enum pairs) are re-expressed at
                    // emission and cannot sit inside a longer chain.
                    if fragment.is_empty() {
                        if path.is_empty() && cx.same_erasure(&next, tgt) {
                            return Some(vec![fragment]);
                        }
                        continue;
                    }
                    if visited.insert(next.key()) {
                        let mut next_path = path.clone();
                        next_path.push(fragment);
                        queue.push_back((next, next_path));
                    }
                }
            }
        }
        None
    }

    pub fn reachable(&self, src: &TypeRef, tgt: &TypeRef, cx: &ConversionCx) -> bool {
        self.find_chain(src, tgt, cx).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TypeCatalog;
    use crate::convert::builtin_providers;
    use remap_core::graph::MappingNode;
    use remap_core::ty::ScalarKind;

    fn cx(catalog: &TypeCatalog) -> ConversionCx<'_> {
        ConversionCx {
            catalog,
            converters: &[],
        }
    }

    #[test]
    fn identical_types_need_an_empty_chain() {
        let catalog = TypeCatalog::new();
        let providers = builtin_providers();
        let lazy = LazyConversions::new(&providers, 5);
        let chain = lazy
            .find_chain(&TypeRef::String, &TypeRef::String, &cx(&catalog))
            .unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn widen_then_wrap_is_found_as_a_two_fragment_chain() {
        let catalog = TypeCatalog::new();
        let providers = builtin_providers();
        let lazy = LazyConversions::new(&providers, 5);

        let src = TypeRef::Scalar(ScalarKind::I32);
        let tgt = TypeRef::option(TypeRef::Scalar(ScalarKind::I64));
        let chain = lazy.find_chain(&src, &tgt, &cx(&catalog)).unwrap();
        assert_eq!(chain.len(), 2);
        assert!(matches!(
            chain[0].nodes.as_slice(),
            [MappingNode::NumericWiden { .. }]
        ));
        assert!(matches!(
            chain[1].nodes.as_slice(),
            [MappingNode::OptionalWrap { .. }]
        ));
    }

    #[test]
    fn depth_bound_cuts_the_search_off() {
        let catalog = TypeCatalog::new();
        let providers = builtin_providers();

        let src = TypeRef::Scalar(ScalarKind::I32);
        let tgt = TypeRef::option(TypeRef::Scalar(ScalarKind::I64));
        let bounded = LazyConversions::new(&providers, 1);
        assert!(!bounded.reachable(&src, &tgt, &cx(&catalog)));
        let enough = LazyConversions::new(&providers, 2);
        assert!(enough.reachable(&src, &tgt, &cx(&catalog)));
    }

    #[test]
    fn unreachable_types_stay_unreachable() {
        let catalog = TypeCatalog::new();
        let providers = builtin_providers();
        let lazy = LazyConversions::new(&providers, 5);
        assert!(!lazy.reachable(
            &TypeRef::String,
            &TypeRef::Scalar(ScalarKind::I64),
            &cx(&catalog)
        ));
    }
}
