//! Per-mapper method registry.
//!
//! Every non-unit-returning method of a mapper gets one entry, keyed by its
//! `(input, output)` type keys. Abstract methods start with no graph and are
//! filled in by Binding; default methods are opaque: their bodies are the
//! user's and only their signatures participate in conversion lookup.

use indexmap::IndexMap;
use remap_core::graph::Graph;
use remap_core::ir::{MapperDef, MethodDef};
use remap_core::ty::TypeRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePair {
    pub in_key: String,
    pub out_key: String,
}

impl TypePair {
    pub fn of(method: &MethodDef) -> Self {
        Self {
            in_key: method.in_key(),
            out_key: method.out_key(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub method: MethodDef,
    /// Bound (and later wired) dataflow; `None` until Binding runs and
    /// always `None` for opaque entries.
    pub graph: Option<Graph>,
    /// Default methods are opaque: callable, never regenerated.
    pub opaque: bool,
}

#[derive(Debug, Default)]
pub struct MethodRegistry {
    entries: IndexMap<TypePair, RegistryEntry>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a registry from a parsed mapper: one entry per method with a
    /// non-unit return, in declaration order. On a signature collision the
    /// later declaration wins, except an opaque entry never displaces one
    /// that gets bound and generated.
    pub fn seeded(mapper: &MapperDef) -> Self {
        let mut registry = Self::new();
        for method in &mapper.methods {
            if method.return_ty.is_unit() {
                continue;
            }
            registry.register(RegistryEntry {
                method: method.clone(),
                graph: None,
                opaque: !method.is_abstract,
            });
        }
        registry
    }

    pub fn register(&mut self, entry: RegistryEntry) {
        let key = TypePair::of(&entry.method);
        if entry.opaque && self.entries.get(&key).is_some_and(|e| !e.opaque) {
            return;
        }
        self.entries.insert(key, entry);
    }

    pub fn lookup(&self, in_key: &str, out_key: &str) -> Option<&RegistryEntry> {
        self.entries.get(&TypePair {
            in_key: in_key.into(),
            out_key: out_key.into(),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut RegistryEntry> {
        self.entries.values_mut()
    }

    /// The single-parameter method converting `src` to `tgt`, if declared.
    pub fn find_converter(&self, src: &TypeRef, tgt: &TypeRef) -> Option<&MethodDef> {
        self.entries
            .get(&TypePair {
                in_key: src.key(),
                out_key: tgt.key(),
            })
            .filter(|e| e.method.params.len() == 1)
            .map(|e| &e.method)
    }

    /// Signatures of all single-parameter methods, used by the conversion
    /// providers to enumerate one-step conversions.
    pub fn converters(&self) -> impl Iterator<Item = &MethodDef> {
        self.entries
            .values()
            .filter(|e| e.method.params.len() == 1)
            .map(|e| &e.method)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remap_core::ir::ParameterDef;

    fn method(name: &str, in_ty: TypeRef, out_ty: TypeRef, is_abstract: bool) -> MethodDef {
        MethodDef {
            name: name.into(),
            return_ty: out_ty,
            params: vec![ParameterDef::new("value", in_ty)],
            is_abstract,
            directives: vec![],
        }
    }

    #[test]
    fn seeding_skips_unit_returns_and_marks_defaults_opaque() {
        let mapper = MapperDef {
            module: vec!["demo".into()],
            name: "TicketMapper".into(),
            methods: vec![
                method(
                    "map_venue",
                    TypeRef::named(["Venue"]),
                    TypeRef::named(["TicketVenue"]),
                    true,
                ),
                method("reset", TypeRef::named(["Venue"]), TypeRef::Unit, true),
                method(
                    "format_id",
                    TypeRef::Scalar(remap_core::ty::ScalarKind::I64),
                    TypeRef::String,
                    false,
                ),
            ],
        };
        let registry = MethodRegistry::seeded(&mapper);
        assert_eq!(registry.len(), 2);

        let venue = registry.lookup("Venue", "TicketVenue").unwrap();
        assert!(!venue.opaque);
        assert!(venue.graph.is_none());

        let format = registry.lookup("i64", "String").unwrap();
        assert!(format.opaque);
    }

    #[test]
    fn opaque_entry_never_displaces_a_generated_one() {
        let mapper = MapperDef {
            module: vec!["demo".into()],
            name: "VenueMapper".into(),
            methods: vec![
                method(
                    "map_venue",
                    TypeRef::named(["Venue"]),
                    TypeRef::named(["TicketVenue"]),
                    true,
                ),
                method(
                    "map_venue_default",
                    TypeRef::named(["Venue"]),
                    TypeRef::named(["TicketVenue"]),
                    false,
                ),
            ],
        };
        let registry = MethodRegistry::seeded(&mapper);
        assert_eq!(registry.len(), 1);

        let entry = registry.lookup("Venue", "TicketVenue").unwrap();
        assert!(!entry.opaque);
        assert_eq!(entry.method.name, "map_venue");

        // Declared the other way round, the abstract method still wins.
        let mut flipped = mapper;
        flipped.methods.reverse();
        let registry = MethodRegistry::seeded(&flipped);
        assert!(!registry.lookup("Venue", "TicketVenue").unwrap().opaque);
    }

    #[test]
    fn find_converter_requires_single_parameter() {
        let mut registry = MethodRegistry::new();
        let mut multi = method(
            "merge",
            TypeRef::named(["Ticket"]),
            TypeRef::named(["FlatTicket"]),
            true,
        );
        multi
            .params
            .push(ParameterDef::new("order", TypeRef::named(["Order"])));
        registry.register(RegistryEntry {
            method: multi,
            graph: None,
            opaque: false,
        });

        assert!(registry
            .find_converter(&TypeRef::named(["Ticket"]), &TypeRef::named(["FlatTicket"]))
            .is_none());
        assert_eq!(registry.converters().count(), 0);
    }
}
