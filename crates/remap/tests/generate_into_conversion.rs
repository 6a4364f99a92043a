use remap::{BufferReporter, Generator, MemoryWriter};

#[test]
fn registered_from_impl_is_wired_as_into() {
    let mut generator = Generator::new();
    generator.add_source(
        ["demo"],
        r#"
        pub struct Venue { pub name: String }
        pub struct VenueSummary { pub name: String }
        impl From<Venue> for VenueSummary {
            fn from(venue: Venue) -> Self { Self { name: venue.name } }
        }
        pub struct Ticket { pub venue: Venue }
        pub struct FlatTicket { pub venue: VenueSummary }

        #[mapper]
        pub trait TicketMapper {
            fn flatten(&self, ticket: Ticket) -> FlatTicket;
        }
        "#,
    );

    let mut writer = MemoryWriter::new();
    let mut reporter = BufferReporter::default();
    let summary = generator.run(&mut writer, &mut reporter).unwrap();

    assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
    assert_eq!(summary.generated.len(), 1);

    let generated = writer.get("demo/ticket_mapper_impl.rs").unwrap();
    assert!(generated.contains("venue: ticket.venue.into(),"));
}
