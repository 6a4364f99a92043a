//! Property discovery strategies.
//!
//! Binding asks the configured strategies what readable properties a type
//! has; the answers drive wildcard expansion, implicit name matching and
//! directive path walks. Strategies run in registration order and their
//! results are merged per property name.

use crate::catalog::TypeCatalog;
use remap_core::ir::{Accessor, Property};
use remap_core::ty::TypeRef;

pub trait PropertyDiscovery {
    fn name(&self) -> &'static str;

    /// Readable properties of `ty`, in a stable order. Unknown types have
    /// none.
    fn discover(&self, ty: &TypeRef, catalog: &TypeCatalog) -> Vec<Property>;
}

/// Named struct fields, in declaration order.
pub struct FieldDiscovery;

impl PropertyDiscovery for FieldDiscovery {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn discover(&self, ty: &TypeRef, catalog: &TypeCatalog) -> Vec<Property> {
        catalog
            .struct_def(ty)
            .map(|def| def.fields.clone())
            .unwrap_or_default()
    }
}

/// No-argument `&self` methods, in declaration order.
pub struct GetterDiscovery;

impl PropertyDiscovery for GetterDiscovery {
    fn name(&self) -> &'static str {
        "getters"
    }

    fn discover(&self, ty: &TypeRef, catalog: &TypeCatalog) -> Vec<Property> {
        catalog
            .struct_def(ty)
            .map(|def| def.getters.clone())
            .unwrap_or_default()
    }
}

/// Runs every strategy and merges by property name. First sighting fixes
/// the position; a getter shadows a same-named field because it may wrap
/// the field with extra logic.
pub fn merged_properties(
    strategies: &[Box<dyn PropertyDiscovery>],
    ty: &TypeRef,
    catalog: &TypeCatalog,
) -> Vec<Property> {
    let mut merged: indexmap::IndexMap<String, Property> = indexmap::IndexMap::new();
    for strategy in strategies {
        for property in strategy.discover(ty, catalog) {
            match merged.get_mut(&property.name) {
                Some(existing) => {
                    if existing.accessor == Accessor::Field && property.accessor == Accessor::Getter
                    {
                        *existing = Property {
                            name: existing.name.clone(),
                            ..property
                        };
                    }
                }
                None => {
                    merged.insert(property.name.clone(), property);
                }
            }
        }
    }
    merged.into_values().collect()
}

/// The built-in strategy set, fields first.
pub fn builtin_strategies() -> Vec<Box<dyn PropertyDiscovery>> {
    vec![Box::new(FieldDiscovery), Box::new(GetterDiscovery)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog(source: &str) -> TypeCatalog {
        let file: syn::File = syn::parse_str(source).unwrap();
        let mut catalog = TypeCatalog::new();
        for item in &file.items {
            catalog.absorb_item(item);
        }
        catalog
    }

    #[test]
    fn getter_shadows_field_but_keeps_its_position() {
        let catalog = catalog(
            r#"
            pub struct Venue { name: String, capacity: u32 }
            impl Venue {
                pub fn name(&self) -> String { self.name.clone() }
                pub fn city(&self) -> String { String::new() }
            }
            "#,
        );
        let props = merged_properties(
            &builtin_strategies(),
            &TypeRef::named(["Venue"]),
            &catalog,
        );
        let view: Vec<_> = props
            .iter()
            .map(|p| (p.name.as_str(), p.accessor))
            .collect();
        assert_eq!(
            view,
            vec![
                ("name", Accessor::Getter),
                ("capacity", Accessor::Field),
                ("city", Accessor::Getter),
            ]
        );
    }

    #[test]
    fn unknown_types_have_no_properties() {
        let catalog = TypeCatalog::new();
        assert!(merged_properties(
            &builtin_strategies(),
            &TypeRef::named(["Ghost"]),
            &catalog
        )
        .is_empty());
    }
}
