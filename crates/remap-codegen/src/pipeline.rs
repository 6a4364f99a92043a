//! The resolution pipeline: Parse -> Binding -> Wiring -> Validation ->
//! CodeGen, run per mapper. Mappers are independent: a fatal diagnostic
//! stops emission for its mapper only.

use crate::bind::Binder;
use crate::catalog::TypeCatalog;
use crate::convert::{builtin_providers, ConversionProvider};
use crate::create::{self, CreationStrategy};
use crate::discover::{self, PropertyDiscovery};
use crate::emit::Emitter;
use crate::parse::{parse_sources, SourceFile};
use crate::registry::MethodRegistry;
use crate::validate::Validator;
use crate::wire::Wirer;
use crate::Config;
use remap_core::diag::{Diagnostic, DiagnosticKind, Reporter};
use remap_core::ir::MapperDef;
use remap_core::{Error, Result, SourceWriter};

/// The configurable strategy surface. Custom strategies are consulted
/// before the built-in ones.
pub struct StrategySet {
    pub discovery: Vec<Box<dyn PropertyDiscovery>>,
    pub creation: Vec<Box<dyn CreationStrategy>>,
    pub providers: Vec<Box<dyn ConversionProvider>>,
}

impl Default for StrategySet {
    fn default() -> Self {
        Self {
            discovery: discover::builtin_strategies(),
            creation: create::builtin_strategies(),
            providers: builtin_providers(),
        }
    }
}

impl StrategySet {
    pub fn register_discovery(&mut self, strategy: Box<dyn PropertyDiscovery>) {
        self.discovery.insert(0, strategy);
    }

    pub fn register_creation(&mut self, strategy: Box<dyn CreationStrategy>) {
        self.creation.insert(0, strategy);
    }

    pub fn register_provider(&mut self, provider: Box<dyn ConversionProvider>) {
        self.providers.insert(0, provider);
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Qualified names of mappers whose implementation was written.
    pub generated: Vec<String>,
    /// Qualified names of mappers stopped by a fatal diagnostic.
    pub failed: Vec<String>,
}

pub struct Pipeline {
    config: Config,
    strategies: StrategySet,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            strategies: StrategySet::default(),
        }
    }

    pub fn strategies_mut(&mut self) -> &mut StrategySet {
        &mut self.strategies
    }

    /// Runs the whole pipeline over the registered sources. `Err` means an
    /// internal invariant broke; user-input problems come back through the
    /// reporter and the summary.
    pub fn run(
        &self,
        sources: &[SourceFile],
        writer: &mut dyn SourceWriter,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary> {
        let parsed = parse_sources(sources, reporter);
        tracing::debug!(
            mappers = parsed.mappers.len(),
            sources = sources.len(),
            "parsed sources"
        );

        let mut summary = RunSummary::default();
        for mapper in &parsed.mappers {
            let mut tracker = FatalTracker::new(reporter);
            match self.run_mapper(mapper, &parsed.catalog, writer, &mut tracker)? {
                true => {
                    tracing::info!(mapper = %mapper.qualified_name(), "generated");
                    summary.generated.push(mapper.qualified_name());
                }
                false => {
                    tracing::warn!(mapper = %mapper.qualified_name(), "skipped");
                    summary.failed.push(mapper.qualified_name());
                }
            }
        }
        Ok(summary)
    }

    /// One mapper, end to end. Returns whether the implementation was
    /// written.
    fn run_mapper(
        &self,
        mapper: &MapperDef,
        catalog: &TypeCatalog,
        writer: &mut dyn SourceWriter,
        tracker: &mut FatalTracker,
    ) -> Result<bool> {
        let mut registry = MethodRegistry::seeded(mapper);

        Binder::new(catalog, &self.strategies.discovery).bind_mapper(mapper, &mut registry, tracker);
        Wirer::new(
            catalog,
            &self.strategies.creation,
            &self.strategies.providers,
            self.config.max_conversion_depth,
        )
        .wire_mapper(mapper, &mut registry, tracker);
        Validator::new(catalog, &self.strategies.providers, self.config.max_conversion_depth)
            .validate_mapper(mapper, &registry, tracker);

        if tracker.fatal {
            return Ok(false);
        }

        let contents = Emitter::new(catalog).emit_mapper(mapper, &registry)?;
        if let Err(err) = writer.write(&mapper.module, &mapper.impl_name(), &contents) {
            let err = Error::writer(mapper.qualified_name(), err.to_string());
            tracker.report(
                Diagnostic::error(DiagnosticKind::WriterFailed, err.to_string())
                    .with_origin(mapper.qualified_name()),
            );
            return Ok(false);
        }
        Ok(true)
    }
}

/// Forwards diagnostics and remembers whether a fatal kind went by.
struct FatalTracker<'r> {
    inner: &'r mut dyn Reporter,
    fatal: bool,
}

impl<'r> FatalTracker<'r> {
    fn new(inner: &'r mut dyn Reporter) -> Self {
        Self {
            inner,
            fatal: false,
        }
    }
}

impl Reporter for FatalTracker<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.fatal |= diagnostic.kind.is_fatal();
        self.inner.report(diagnostic);
    }
}
