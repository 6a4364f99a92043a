use remap_core::ir::Property;

/// A struct declaration merged with its inherent impls.
#[derive(Debug, Clone)]
pub struct StructDef {
    pub name: String,
    /// Named fields in declaration order.
    pub fields: Vec<Property>,
    /// No-argument `&self` methods in declaration order.
    pub getters: Vec<Property>,
    /// The widest inherent `fn new(...) -> Self`, when one exists.
    pub new_fn: Option<NewFn>,
}

#[derive(Debug, Clone)]
pub struct NewFn {
    /// Ordered formal parameters; the names are the constructor's slots.
    pub params: Vec<Property>,
}

#[derive(Debug, Clone)]
pub struct EnumDef {
    pub name: String,
    pub variants: Vec<String>,
    /// Only fieldless enums participate in variant-wise conversion.
    pub fieldless: bool,
}
