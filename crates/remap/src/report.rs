use remap_core::{Diagnostic, Reporter};

/// Prints each diagnostic to stderr as it arrives. The default reporter
/// for build scripts.
#[derive(Debug, Default)]
pub struct StderrReporter {
    errors: usize,
}

impl StderrReporter {
    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == remap_core::Severity::Error {
            self.errors += 1;
        }
        eprintln!("{diagnostic}");
    }
}
