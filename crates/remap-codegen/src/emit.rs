//! Stage 5: emit one implementation file per mapper.
//!
//! Emission is a pure graph-to-text walk; all decisions were made by the
//! earlier stages. The generated file is meant to be included as a sibling
//! module of the mapper trait and pulls the trait and its types in through
//! `use super::*;`.

mod builder;
pub use builder::SourceBuilder;

mod expr;
pub use expr::{adapt_enum, expression_for};

use crate::catalog::TypeCatalog;
use crate::registry::MethodRegistry;
use crate::validate::chain_sink;
use remap_core::graph::{Graph, MappingNode};
use remap_core::ir::{CreationKind, MapperDef, MethodDef};
use remap_core::{Error, Result};

pub struct Emitter<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> Emitter<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Renders the complete implementation file for a validated mapper.
    pub fn emit_mapper(&self, mapper: &MapperDef, registry: &MethodRegistry) -> Result<String> {
        let mut b = SourceBuilder::new();
        b.push_line("// Generated by remap. Do not edit by hand.");
        b.blank();
        b.push_line("use super::*;");
        b.blank();
        b.push_line(&format!("pub struct {};", mapper.impl_name()));
        b.blank();
        b.push_line(&format!("impl {} for {} {{", mapper.name, mapper.impl_name()));
        b.indent();

        let mut first = true;
        for method in mapper.abstract_methods() {
            if !first {
                b.blank();
            }
            first = false;
            self.render_method(&mut b, mapper, registry, method)?;
        }

        b.dedent();
        b.push_line("}");
        Ok(b.build())
    }

    fn render_method(
        &self,
        b: &mut SourceBuilder,
        mapper: &MapperDef,
        registry: &MethodRegistry,
        method: &MethodDef,
    ) -> Result<()> {
        let params: String = method
            .params
            .iter()
            .map(|p| format!(", {}: {}", p.name, p.ty))
            .collect();

        if method.return_ty.is_unit() {
            b.push_line(&format!("fn {}(&self{params}) {{}}", method.name));
            return Ok(());
        }

        // Entries are keyed by signature pair, so two methods with the same
        // pair intentionally share one graph.
        let graph = registry
            .lookup(&method.in_key(), &method.out_key())
            .and_then(|entry| entry.graph.as_ref())
            .ok_or_else(|| {
                Error::internal(format!(
                    "no wired graph for {}::{}",
                    mapper.qualified_name(),
                    method.name
                ))
            })?;

        b.push_line(&format!(
            "fn {}(&self{params}) -> {} {{",
            method.name, method.return_ty
        ));
        b.indent();
        match graph.find_node(MappingNode::is_constructor) {
            Some(ctor) => self.render_constructor_body(b, graph, ctor)?,
            None => self.render_passthrough_body(b, method, graph)?,
        }
        b.dedent();
        b.push_line("}");
        Ok(())
    }

    fn render_constructor_body(
        &self,
        b: &mut SourceBuilder,
        graph: &Graph,
        ctor: remap_core::NodeId,
    ) -> Result<()> {
        let MappingNode::ConstructorAssignment { descriptor, .. } = graph.node(ctor) else {
            return Err(Error::internal("constructor handle is not a constructor"));
        };
        let incoming = graph.incoming(ctor);
        let name = descriptor
            .target
            .simple_name()
            .ok_or_else(|| Error::internal("constructor target is not a named type"))?;

        let mut exprs = Vec::new();
        for param in &descriptor.params {
            let edge = incoming
                .iter()
                .map(|&e| graph.edge(e))
                .find(|e| e.flow.slot.as_deref() == Some(param.name.as_str()))
                .ok_or_else(|| {
                    Error::internal(format!("slot `{}` uncovered after validation", param.name))
                })?;
            let expr = expression_for(graph, edge.from);
            let expr = adapt_enum(self.catalog, expr, &edge.flow.source_ty, &param.ty);
            exprs.push(expr);
        }

        match descriptor.kind {
            CreationKind::NewFn => {
                b.push_line(&format!("{name}::new({})", exprs.join(", ")));
            }
            CreationKind::StructLiteral => {
                b.push_line(&format!("{name} {{"));
                b.indent();
                for (param, expr) in descriptor.params.iter().zip(&exprs) {
                    b.push_line(&format!("{}: {},", param.name, expr));
                }
                b.dedent();
                b.push_line("}");
            }
        }
        Ok(())
    }

    fn render_passthrough_body(
        &self,
        b: &mut SourceBuilder,
        method: &MethodDef,
        graph: &Graph,
    ) -> Result<()> {
        let sink = chain_sink(graph)
            .ok_or_else(|| Error::internal("passthrough graph has no source chain"))?;
        let out_ty = graph
            .node(sink)
            .out_ty()
            .ok_or_else(|| Error::internal("passthrough sink carries no type"))?;
        let expr = expression_for(graph, sink);
        let expr = adapt_enum(self.catalog, expr, &out_ty, &method.return_ty);
        b.push_line(&expr);
        Ok(())
    }
}
