mod common;

use std::path::Path;
use std::thread;

use common::{document, RecordingSink};
use pdf_facade::{Disposition, Error, FontStyle, MetadataField, Output, TextBlock, MIME_TYPE};

#[test]
fn metadata_setters_round_trip_without_touching_the_original() {
    let base = document();

    let author = base.with_author("Test author");
    assert_eq!(author.author(), "Test author");

    let creator = base.with_creator("Test creator");
    assert_eq!(creator.creator(), "Test creator");

    let subject = base.with_subject("Test subject");
    assert_eq!(subject.subject(), "Test subject");

    let title = base.with_title("Test title");
    assert_eq!(title.title(), "Test title");

    assert_eq!(base.author(), "");
    assert_eq!(base.subject(), "");
    assert_eq!(base.title(), "");
    assert_eq!(base.creator(), "text-renderer");
}

#[test]
fn default_creator_is_the_renderer_name() {
    assert_eq!(document().creator(), "text-renderer");
}

#[test]
fn keywords_are_joined_with_comma_space() {
    let base = document();
    let tagged = base.with_keywords(["a", "b", "c"]);

    assert_eq!(tagged.keywords(), "a, b, c");
    assert_eq!(base.keywords(), "");
    assert_eq!(base.with_keywords(["test keywords"]).keywords(), "test keywords");
}

#[test]
fn custom_properties_are_replaced_wholesale() {
    let first = document().with_custom_properties([
        ("Custom property 1", "Value 1"),
        ("Custom property 2", "Value 2"),
    ]);
    let second = first.with_custom_properties([("Custom property 3", "Value 3")]);

    assert_eq!(first.custom_properties().len(), 2);
    assert_eq!(
        second.custom_properties(),
        &[("Custom property 3".to_owned(), "Value 3".to_owned())]
    );
}

#[test]
fn name_and_path_have_no_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("not-yet-created");

    let named = document().with_name("Test name").with_path(&target);

    assert_eq!(named.name(), "Test name");
    assert_eq!(named.path(), target.as_path());
    assert!(!target.exists());
    assert_eq!(document().name(), "");
    assert_eq!(document().path(), Path::new(""));
}

#[test]
fn utf8_flag_only_changes_the_copy() {
    let base = document();
    let utf8 = base.with_utf8(true);

    assert!(!base.is_utf8());
    assert!(utf8.is_utf8());
}

#[test]
fn utf8_flag_is_not_applied_retroactively() {
    let doc = document()
        .with_author("Zoë")
        .with_utf8(true)
        .with_title("Zoë");

    let metadata = doc.metadata();
    assert!(!metadata.value(MetadataField::Author).unwrap().is_utf8());
    assert!(metadata.value(MetadataField::Title).unwrap().is_utf8());
    assert_eq!(doc.author(), doc.title());
}

#[test]
fn content_changes_produce_new_snapshots() {
    let base = document();
    let page = base.with_page();
    let written = page
        .with_text(TextBlock::new("Test Text"))
        .with_line_break(2);

    assert!(base.renderer().operations().is_empty());
    assert_eq!(page.renderer().operations(), &["page".to_owned()]);
    assert_eq!(
        written.renderer().operations(),
        &["page".to_owned(), "text Test Text".to_owned(), "break 2".to_owned()]
    );
}

#[test]
fn font_changes_propagate_renderer_errors() {
    let base = document().with_page();

    let bold = base.with_font("DejaVu", FontStyle::Bold, Some(10)).unwrap();
    assert_eq!(bold.renderer().operations().len(), 2);

    match base.with_font("Missing", FontStyle::Regular, None) {
        Err(Error::UnknownFontFamily(family)) => assert_eq!(family, "Missing"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(base.renderer().operations().len(), 1);

    let with_family = base.with_font_family("DejaVu", "/fonts").unwrap();
    assert_eq!(
        with_family.renderer().operations().last().unwrap(),
        "font-family DejaVu /fonts"
    );
}

#[test]
fn serialize_is_idempotent() {
    let doc = document()
        .with_title("Stable")
        .with_page()
        .with_text("Body");

    assert_eq!(doc.serialize().unwrap(), doc.serialize().unwrap());
}

#[test]
fn serialize_passes_metadata_and_flag_to_the_renderer() {
    let doc = document()
        .with_utf8(true)
        .with_subject("Subject")
        .with_custom_properties([("Department", "QA")]);
    let text = String::from_utf8(doc.serialize().unwrap()).unwrap();

    assert!(text.contains("Subject=Subject utf8=true"), "{text}");
    assert!(text.contains("custom Department=QA"), "{text}");
    assert!(text.contains("utf8=true\n%%EOF"), "{text}");
}

#[test]
fn string_destination_returns_the_serialized_bytes() {
    let doc = document().with_title("String output").with_text("Body");
    let sink = RecordingSink::default();

    let output = doc.output("S", &sink).unwrap();

    assert_eq!(output, Output::Bytes(doc.serialize().unwrap()));
    assert_eq!(output.into_bytes().unwrap(), doc.serialize().unwrap());
    assert!(sink.deliveries().is_empty());
}

#[test]
fn string_destination_needs_no_name() {
    let output = document().output("S", &RecordingSink::default()).unwrap();
    assert!(matches!(output, Output::Bytes(_)));
}

#[test]
fn download_and_inline_use_the_sink() {
    let doc = document().with_name("doc.pdf").with_text("Body");
    let sink = RecordingSink::default();

    let download = doc.output("D", &sink).unwrap().into_response().unwrap();
    let inline = doc.output("I", &sink).unwrap().into_response().unwrap();

    assert_eq!(download.disposition, Disposition::Attachment);
    assert_eq!(inline.disposition, Disposition::Inline);
    for delivery in [&download, &inline] {
        assert_eq!(delivery.name, "doc.pdf");
        assert_eq!(delivery.mime_type, MIME_TYPE);
        assert_eq!(delivery.content, doc.serialize().unwrap());
    }
    assert_eq!(sink.deliveries().len(), 2);
}

#[test]
fn destinations_needing_a_name_fail_without_one() {
    let doc = document();
    let sink = RecordingSink::default();

    for destination in ["D", "I", "F", "FS"] {
        match doc.output(destination, &sink) {
            Err(Error::NameNotSet) => {}
            other => panic!("{destination}: unexpected result {other:?}"),
        }
    }
    assert!(sink.deliveries().is_empty());
}

#[test]
fn unknown_destinations_are_rejected() {
    let doc = document().with_name("doc.pdf");
    let sink = RecordingSink::default();

    for destination in ["X", "s", "DI", "FF", "FX"] {
        match doc.output(destination, &sink) {
            Err(Error::InvalidDestination(code)) => assert_eq!(code, destination),
            other => panic!("{destination}: unexpected result {other:?}"),
        }
    }
}

#[test]
fn empty_destination_does_nothing() {
    let sink = RecordingSink::default();
    assert_eq!(document().output("", &sink).unwrap(), Output::Written(false));
    assert!(sink.deliveries().is_empty());
}

#[test]
fn shared_base_documents_can_be_specialised_on_other_threads() {
    let base = document().with_author("Shared author").with_page();

    let titles: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|index| {
                let base = &base;
                scope.spawn(move || base.with_title(format!("Report {index}")).title().to_owned())
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(titles, vec!["Report 0", "Report 1", "Report 2", "Report 3"]);
    assert_eq!(base.title(), "");
    assert_eq!(base.author(), "Shared author");
}
