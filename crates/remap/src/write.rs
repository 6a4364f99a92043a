//! Output sinks for generated source files.
//!
//! File names are the snake_case of the generated type: module path
//! `["demo"]` plus `TicketMapperImpl` lands at `demo/ticket_mapper_impl.rs`
//! under the writer's root.

use heck::ToSnakeCase;
use indexmap::IndexMap;
use remap_core::SourceWriter;
use std::fs;
use std::path::{Path, PathBuf};

fn file_name(simple_name: &str) -> String {
    format!("{}.rs", simple_name.to_snake_case())
}

/// Writes generated files under a root directory, creating module
/// directories as needed.
#[derive(Debug)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceWriter for FsWriter {
    fn write(
        &mut self,
        module_path: &[String],
        simple_name: &str,
        contents: &str,
    ) -> std::io::Result<()> {
        let mut dir = self.root.clone();
        for segment in module_path {
            dir.push(segment);
        }
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(file_name(simple_name)), contents)
    }
}

/// Keeps generated files in memory, keyed by their relative path. Used in
/// tests and by callers that post-process the output themselves.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: IndexMap<String, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative path a file was stored under, e.g.
    /// `demo/ticket_mapper_impl.rs`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceWriter for MemoryWriter {
    fn write(
        &mut self,
        module_path: &[String],
        simple_name: &str,
        contents: &str,
    ) -> std::io::Result<()> {
        let mut path = module_path.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&file_name(simple_name));
        self.files.insert(path, contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_writer_paths_are_snake_case() {
        let mut writer = MemoryWriter::new();
        writer
            .write(
                &["demo".to_string(), "tickets".to_string()],
                "TicketMapperImpl",
                "// contents",
            )
            .unwrap();
        assert_eq!(
            writer.get("demo/tickets/ticket_mapper_impl.rs"),
            Some("// contents")
        );
    }

    #[test]
    fn empty_module_path_writes_at_the_root() {
        let mut writer = MemoryWriter::new();
        writer.write(&[], "VenueMapperImpl", "x").unwrap();
        assert_eq!(writer.get("venue_mapper_impl.rs"), Some("x"));
    }
}
