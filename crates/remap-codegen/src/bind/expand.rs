//! Directive expansion: wildcards and implicit name matching.
//!
//! The output is a flat list of concrete `(target, source)` pairs in a
//! deterministic order: declared directives first (wildcards replaced in
//! place by their expansion), then implicit matches. The first directive
//! for a target wins; later duplicates are silently dropped.

use super::{resolve_entry, walk_properties};
use crate::catalog::TypeCatalog;
use crate::discover::{merged_properties, PropertyDiscovery};
use indexmap::IndexMap;
use remap_core::diag::{Diagnostic, DiagnosticKind, Reporter};
use remap_core::ir::{Directive, MethodDef};

pub fn expand_directives(
    method: &MethodDef,
    catalog: &TypeCatalog,
    discovery: &[Box<dyn PropertyDiscovery>],
    reporter: &mut dyn Reporter,
    origin: &str,
) -> Vec<Directive> {
    let mut expanded: IndexMap<String, Directive> = IndexMap::new();
    let mut keep = |directive: Directive| {
        expanded.entry(directive.target.clone()).or_insert(directive);
    };

    // Explicitly enumerated targets always beat wildcard-generated ones,
    // regardless of declaration order.
    let explicit: Vec<&str> = method
        .directives
        .iter()
        .filter(|d| !d.has_wildcard_source())
        .map(|d| d.target.as_str())
        .collect();

    for directive in &method.directives {
        if !directive.has_wildcard_source() {
            keep(directive.clone());
            continue;
        }

        let prefix = directive.source_prefix();
        let segments: Vec<&str> = if prefix.is_empty() {
            Vec::new()
        } else {
            prefix.split('.').collect()
        };
        let Some((param, rest)) = resolve_entry(method, &segments) else {
            reporter.report(
                Diagnostic::warning(
                    DiagnosticKind::PathUnresolved,
                    format!("wildcard source `{}` names no parameter", directive.source),
                )
                .with_origin(origin),
            );
            continue;
        };
        let prefix_ty = match walk_properties(catalog, discovery, &param.ty, &rest) {
            Ok(chain) => chain.last().map_or(param.ty.clone(), |p| p.ty.clone()),
            Err(message) => {
                reporter.report(
                    Diagnostic::warning(DiagnosticKind::PathUnresolved, message)
                        .with_origin(origin),
                );
                continue;
            }
        };

        for prop in merged_properties(discovery, &prefix_ty, catalog) {
            let target = if directive.is_root_target() {
                prop.name.clone()
            } else {
                format!("{}.{}", directive.target, prop.name)
            };
            if explicit.contains(&target.as_str()) {
                continue;
            }
            let source = if prefix.is_empty() {
                prop.name.clone()
            } else {
                format!("{prefix}.{}", prop.name)
            };
            keep(Directive::new(target, source));
        }
    }

    // Implicit matching: a single parameter's properties flow to same-named
    // target properties nobody mapped explicitly.
    if let [param] = method.params.as_slice() {
        let target_props = merged_properties(discovery, &method.return_ty, catalog);
        let source_props = merged_properties(discovery, &param.ty, catalog);
        for prop in target_props {
            if source_props.iter().any(|p| p.name == prop.name) {
                keep(Directive::new(prop.name.clone(), prop.name));
            }
        }
    }

    expanded.into_values().collect()
}
