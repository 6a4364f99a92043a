mod error;
pub use error::Error;

pub mod diag;
pub use diag::{BufferReporter, Diagnostic, DiagnosticKind, Reporter, Severity};

pub mod graph;
pub use graph::{FlowEdge, Graph, MappingNode, NodeId};

pub mod ir;

mod sink;
pub use sink::SourceWriter;

pub mod ty;
pub use ty::{TypeModel, TypeRef};

/// A Result type alias that uses remap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
