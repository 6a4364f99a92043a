use super::MethodDef;

/// A parsed mapper trait: qualified name plus ordered methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperDef {
    /// Module path the trait was declared in, e.g. `["demo", "tickets"]`.
    pub module: Vec<String>,
    pub name: String,
    pub methods: Vec<MethodDef>,
}

impl MapperDef {
    pub fn qualified_name(&self) -> String {
        let mut parts = self.module.clone();
        parts.push(self.name.clone());
        parts.join("::")
    }

    /// Name of the generated implementation type.
    pub fn impl_name(&self) -> String {
        format!("{}Impl", self.name)
    }

    pub fn abstract_methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter().filter(|m| m.is_abstract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ParameterDef;
    use crate::ty::TypeRef;

    #[test]
    fn names() {
        let mapper = MapperDef {
            module: vec!["demo".into(), "tickets".into()],
            name: "TicketMapper".into(),
            methods: vec![],
        };
        assert_eq!(mapper.qualified_name(), "demo::tickets::TicketMapper");
        assert_eq!(mapper.impl_name(), "TicketMapperImpl");
    }

    #[test]
    fn abstract_methods_filters_defaults() {
        let abstract_m = MethodDef {
            name: "map_venue".into(),
            return_ty: TypeRef::named(["TicketVenue"]),
            params: vec![ParameterDef::new("venue", TypeRef::named(["Venue"]))],
            is_abstract: true,
            directives: vec![],
        };
        let default_m = MethodDef {
            is_abstract: false,
            ..abstract_m.clone()
        };
        let mapper = MapperDef {
            module: vec![],
            name: "M".into(),
            methods: vec![abstract_m, default_m],
        };
        assert_eq!(mapper.abstract_methods().count(), 1);
    }
}
