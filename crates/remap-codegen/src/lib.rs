//! The resolution pipeline: parse mapper traits into the neutral IR, bind
//! each abstract method into a dataflow graph, wire object creation and
//! type conversions into it, validate, and emit one implementation file
//! per mapper.

pub mod bind;

pub mod catalog;
pub use catalog::TypeCatalog;

mod config;
pub use config::Config;

pub mod convert;

pub mod create;

pub mod discover;

pub mod emit;

pub mod parse;
pub use parse::SourceFile;

mod pipeline;
pub use pipeline::{Pipeline, RunSummary, StrategySet};

mod registry;
pub use registry::{MethodRegistry, RegistryEntry, TypePair};

pub mod validate;

pub mod wire;
