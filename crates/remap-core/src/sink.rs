/// Output sink for generated source files.
///
/// The pipeline hands over one file per mapper and does not retry: a
/// refusal is reported as *writer-failed* and aborts that mapper only.
pub trait SourceWriter {
    /// Writes one generated source file.
    ///
    /// `module_path` is the mapper's module path (`["p", "q"]`),
    /// `simple_name` the generated type name (`TicketMapperImpl`), and
    /// `contents` the full file text.
    fn write(
        &mut self,
        module_path: &[String],
        simple_name: &str,
        contents: &str,
    ) -> std::io::Result<()>;
}
