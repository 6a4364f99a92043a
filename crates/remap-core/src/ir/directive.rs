/// One `(targetPath, sourcePath)` mapping declaration.
///
/// Paths are dot-separated; either side may end in `*`. The target `"."`
/// means "write to the target's top-level slots" and is only meaningful
/// together with a wildcard source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub target: String,
    pub source: String,
}

impl Directive {
    pub fn new(target: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn source_segments(&self) -> Vec<&str> {
        self.source.split('.').collect()
    }

    pub fn is_root_target(&self) -> bool {
        self.target == "."
    }

    pub fn has_wildcard_source(&self) -> bool {
        self.source == "*" || self.source.ends_with(".*")
    }

    /// The source path with the trailing `.*` removed; empty for a bare `*`.
    pub fn source_prefix(&self) -> &str {
        self.source
            .strip_suffix(".*")
            .or_else(|| self.source.strip_suffix('*'))
            .unwrap_or(&self.source)
    }
}
