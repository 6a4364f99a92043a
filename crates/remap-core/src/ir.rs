//! Neutral IR produced by Parse. Immutable once constructed; the only
//! sanctioned derivation is [`MethodDef::with_directives`], used by
//! directive expansion.

mod creation;
pub use creation::{CreationDescriptor, CreationKind};

mod directive;
pub use directive::Directive;

mod mapper;
pub use mapper::MapperDef;

mod method;
pub use method::{MethodDef, ParameterDef};

mod property;
pub use property::{Accessor, Property};
