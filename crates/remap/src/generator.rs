use remap_codegen::{Config, Pipeline, RunSummary, SourceFile, StrategySet};
use remap_core::{Reporter, Result, SourceWriter};

/// The public entry point: collect sources, then run the pipeline.
///
/// ```no_run
/// use remap::{FsWriter, Generator, StderrReporter};
///
/// # fn main() -> remap::Result<()> {
/// let mut generator = Generator::new();
/// generator.add_source(["demo"], std::fs::read_to_string("src/demo.rs").unwrap());
///
/// let mut writer = FsWriter::new("target/generated");
/// let mut reporter = StderrReporter::default();
/// let summary = generator.run(&mut writer, &mut reporter)?;
/// println!("generated {} mapper(s)", summary.generated.len());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Generator {
    pipeline: Pipeline,
    sources: Vec<SourceFile>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            pipeline: Pipeline::new(config),
            sources: Vec::new(),
        }
    }

    /// Custom discovery, creation and conversion strategies.
    pub fn strategies_mut(&mut self) -> &mut StrategySet {
        self.pipeline.strategies_mut()
    }

    /// Registers one source file under a module path. Registration order is
    /// processing order.
    pub fn add_source<I, S>(&mut self, module: I, text: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.push(SourceFile::new(module, text));
        self
    }

    /// Runs the pipeline over every registered source. User-input problems
    /// come back through `reporter`; `Err` is reserved for broken internal
    /// invariants.
    pub fn run(
        &self,
        writer: &mut dyn SourceWriter,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary> {
        self.pipeline.run(&self.sources, writer, reporter)
    }
}
