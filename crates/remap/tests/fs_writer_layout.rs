use anyhow::Result;
use remap::{BufferReporter, FsWriter, Generator};

#[test]
fn fs_writer_lays_files_out_by_module_path() -> Result<()> {
    let root = std::env::temp_dir().join(format!("remap-fs-writer-{}", std::process::id()));

    let mut generator = Generator::new();
    generator.add_source(
        ["demo", "venues"],
        r#"
        pub struct Venue { pub name: String }
        pub struct TicketVenue { pub name: String }

        #[mapper]
        pub trait VenueMapper {
            fn map_venue(&self, venue: Venue) -> TicketVenue;
        }
        "#,
    );

    let mut writer = FsWriter::new(&root);
    let mut reporter = BufferReporter::default();
    let summary = generator.run(&mut writer, &mut reporter)?;
    assert_eq!(summary.generated.len(), 1);

    let contents = std::fs::read_to_string(root.join("demo/venues/venue_mapper_impl.rs"))?;
    assert!(contents.contains("pub struct VenueMapperImpl;"));
    assert!(contents.contains("impl VenueMapper for VenueMapperImpl {"));

    std::fs::remove_dir_all(&root)?;
    Ok(())
}
