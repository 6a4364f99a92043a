use remap::{BufferReporter, Generator, MemoryWriter};

#[test]
fn default_methods_are_callable_converters_but_never_regenerated() {
    let mut generator = Generator::new();
    generator.add_source(
        ["demo"],
        r##"
        #[mapper]
        pub trait LabelMapper {
            fn label(&self, id: i64) -> String { format!("#{id}") }
            fn labels(&self, ids: Vec<i64>) -> Vec<String>;
        }
        "##,
    );

    let mut writer = MemoryWriter::new();
    let mut reporter = BufferReporter::default();
    let summary = generator.run(&mut writer, &mut reporter).unwrap();

    assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
    assert_eq!(summary.generated.len(), 1);

    let generated = writer.get("demo/label_mapper_impl.rs").unwrap();
    // The default method keeps its hand-written body.
    assert!(!generated.contains("fn label(&self, id: i64)"));
    assert!(generated.contains("ids.into_iter().map(|value| self.label(value)).collect()"));
}
