use remap_core::ir::Directive;

/// Parses `#[map(target = "...", source = "...")]`. Both keys are required
/// and nothing else is accepted.
pub fn parse_map_attr(attr: &syn::Attribute) -> syn::Result<Directive> {
    let mut target = None;
    let mut source = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("target") {
            target = Some(string_value(&meta)?);
            Ok(())
        } else if meta.path.is_ident("source") {
            source = Some(string_value(&meta)?);
            Ok(())
        } else {
            Err(meta.error("expected `target` or `source`"))
        }
    })?;

    match (target, source) {
        (Some(target), Some(source)) => Ok(Directive::new(target, source)),
        _ => Err(syn::Error::new_spanned(
            attr,
            "`#[map]` requires both `target` and `source`",
        )),
    }
}

fn string_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    let lit: syn::LitStr = meta.value()?.parse()?;
    Ok(lit.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(text: &str) -> syn::Attribute {
        let item: syn::ItemFn = syn::parse_str(&format!("{text}\nfn f() {{}}")).unwrap();
        item.attrs.into_iter().next().unwrap()
    }

    #[test]
    fn parses_both_keys() {
        let directive = parse_map_attr(&attr(
            r#"#[map(target = "venue.name", source = "ticket.venue.name")]"#,
        ))
        .unwrap();
        assert_eq!(directive.target, "venue.name");
        assert_eq!(directive.source, "ticket.venue.name");
    }

    #[test]
    fn rejects_unknown_keys_and_missing_keys() {
        assert!(parse_map_attr(&attr(r#"#[map(dest = "a", source = "b")]"#)).is_err());
        assert!(parse_map_attr(&attr(r#"#[map(source = "b")]"#)).is_err());
        assert!(parse_map_attr(&attr(r#"#[map(target = 3, source = "b")]"#)).is_err());
    }
}
