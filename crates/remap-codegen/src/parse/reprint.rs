use remap_core::ir::MapperDef;

/// Renders a parsed mapper back to trait source.
///
/// The output is itself registerable: parsing it yields the same
/// definition, which makes round-trips cheap to check in tests. Default
/// method bodies are not retained, so they are reprinted as
/// `unimplemented!()` stubs.
pub fn reprint(mapper: &MapperDef) -> String {
    let mut out = String::new();
    out.push_str("#[mapper]\n");
    out.push_str(&format!("pub trait {} {{\n", mapper.name));

    for method in &mapper.methods {
        for directive in &method.directives {
            out.push_str(&format!(
                "    #[map(target = \"{}\", source = \"{}\")]\n",
                directive.target, directive.source
            ));
        }
        let params: String = method
            .params
            .iter()
            .map(|p| format!(", {}: {}", p.name, p.ty))
            .collect();
        let ret = if method.return_ty.is_unit() {
            String::new()
        } else {
            format!(" -> {}", method.return_ty)
        };
        if method.is_abstract {
            out.push_str(&format!("    fn {}(&self{params}){ret};\n", method.name));
        } else {
            out.push_str(&format!(
                "    fn {}(&self{params}){ret} {{ unimplemented!() }}\n",
                method.name
            ));
        }
    }

    out.push_str("}\n");
    out
}
