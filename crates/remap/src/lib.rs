//! remap generates mapper implementations at build time.
//!
//! Annotate a trait with `#[mapper]`, describe non-obvious slot flows with
//! `#[map(target = "...", source = "...")]`, register the sources with a
//! [`Generator`], and remap emits one `{Name}Impl` file per trait.

mod generator;
pub use generator::Generator;

mod report;
pub use report::StderrReporter;

mod write;
pub use write::{FsWriter, MemoryWriter};

pub use remap_codegen::{Config, Pipeline, RunSummary, SourceFile, StrategySet};
pub use remap_core::{
    BufferReporter, Diagnostic, DiagnosticKind, Error, Reporter, Result, Severity, SourceWriter,
};
