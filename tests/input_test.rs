//! Integration tests for record decoding and validation.

use docchunk::input::{parse_elements, parse_image_captions, parse_table_records};
use docchunk::model::ElementType;
use docchunk::{render, Error, RecordDecoder, RecordKind, RecordRef};
use std::io::Cursor;

fn expect_malformed<T: std::fmt::Debug>(
    result: docchunk::Result<T>,
) -> (RecordKind, RecordRef, &'static str) {
    match result {
        Err(Error::MalformedRecord {
            kind,
            record,
            field,
        }) => (kind, record, field),
        other => panic!("expected malformed record, got {:?}", other),
    }
}

#[test]
fn test_elements_accept_both_page_shapes() {
    let elements = parse_elements(
        r#"[
            {"element_id": 0, "element_type": "Title", "text": "A", "page_number": 2},
            {"element_id": 1, "element_type": "ListItem", "text": "b",
             "metadata": {"page_number": 3, "coordinates": null}}
        ]"#,
    )
    .unwrap();

    assert_eq!(elements[0].page_number, 2);
    assert_eq!(elements[0].element_type, ElementType::Title);
    assert_eq!(elements[1].page_number, 3);
    assert_eq!(elements[1].element_type, ElementType::ListItem);
}

#[test]
fn test_unknown_element_type_is_kept() {
    let elements = parse_elements(
        r#"[{"element_id": 4, "element_type": "PageBreak", "text": "", "page_number": 1}]"#,
    )
    .unwrap();

    assert_eq!(
        elements[0].element_type,
        ElementType::Other("PageBreak".to_string())
    );
    assert!(!elements[0].is_title());
}

#[test]
fn test_missing_text_decodes_empty() {
    let elements =
        parse_elements(r#"[{"element_id": 0, "element_type": "Footer", "page_number": 1}]"#)
            .unwrap();
    assert_eq!(elements[0].text, "");
}

#[test]
fn test_element_missing_page() {
    let (kind, record, field) = expect_malformed(parse_elements(
        r#"[{"element_id": 17, "element_type": "NarrativeText", "text": "x", "metadata": {}}]"#,
    ));
    assert_eq!(kind, RecordKind::Element);
    assert_eq!(record, RecordRef::Id(17));
    assert_eq!(field, "page_number");
}

#[test]
fn test_element_missing_id_reports_index() {
    let (kind, record, field) = expect_malformed(parse_elements(
        r#"[
            {"element_id": 0, "element_type": "Title", "text": "A", "page_number": 1},
            {"element_type": "Title", "text": "B", "page_number": 1}
        ]"#,
    ));
    assert_eq!(kind, RecordKind::Element);
    assert_eq!(record, RecordRef::Index(1));
    assert_eq!(field, "element_id");
}

#[test]
fn test_negative_and_zero_pages_rejected() {
    let (_, record, field) = expect_malformed(parse_image_captions(
        r#"[{"element_id": 2, "page_number": 0, "blip_caption": "x"}]"#,
    ));
    assert_eq!((record, field), (RecordRef::Id(2), "page_number"));

    let (kind, _, field) = expect_malformed(parse_table_records(
        r#"[{"element_id": 3, "page_number": -1, "normalized_text": "x"}]"#,
    ));
    assert_eq!((kind, field), (RecordKind::Table, "page_number"));
}

#[test]
fn test_caption_pass_through_fields() {
    let captions = parse_image_captions(
        r#"[{"element_id": 5, "page_number": 2, "blip_caption": "",
             "image_path": "figures/5.jpg", "existing_text": "Fig. 1"}]"#,
    )
    .unwrap();

    assert_eq!(captions[0].blip_caption, "");
    assert_eq!(captions[0].image_path.as_deref(), Some("figures/5.jpg"));
    assert_eq!(captions[0].existing_text.as_deref(), Some("Fig. 1"));
}

#[test]
fn test_error_message_names_record_and_field() {
    let err = parse_table_records(r#"[{"element_id": 44, "normalized_text": "x"}]"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("table"));
    assert!(message.contains("44"));
    assert!(message.contains("page_number"));
}

#[test]
fn test_reader_input() {
    let decoder = RecordDecoder::new();

    let json = br#"[{"element_id": 1, "page_number": 1, "normalized_text": "A has 2."}]"#;
    let tables = decoder.tables_from_reader(Cursor::new(&json[..])).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].normalized_text, "A has 2.");

    let json = br#"[{"element_id": 2, "element_type": "Title", "text": "T",
                     "metadata": {"page_number": 5}}]"#;
    let elements = decoder.elements_from_reader(Cursor::new(&json[..])).unwrap();
    assert_eq!(elements[0].page_number, 5);
    assert!(elements[0].is_title());

    let json = br#"[{"element_id": 3, "page_number": 2, "blip_caption": "a map"}]"#;
    let captions = decoder
        .image_captions_from_reader(Cursor::new(&json[..]))
        .unwrap();
    assert_eq!(captions[0].blip_caption, "a map");
}

#[test]
fn test_reader_input_reports_malformed_record() {
    let decoder = RecordDecoder::new().sequential();

    let json = br#"[{"element_id": 61, "element_type": "NarrativeText", "text": "x"}]"#;
    let (kind, record, field) =
        expect_malformed(decoder.elements_from_reader(Cursor::new(&json[..])));
    assert_eq!(kind, RecordKind::Element);
    assert_eq!(record, RecordRef::Id(61));
    assert_eq!(field, "page_number");

    let json = br#"[{"page_number": 1, "blip_caption": "no id"}]"#;
    let (kind, record, field) =
        expect_malformed(decoder.image_captions_from_reader(Cursor::new(&json[..])));
    assert_eq!(kind, RecordKind::ImageCaption);
    assert_eq!(record, RecordRef::Index(0));
    assert_eq!(field, "element_id");

    let json = br#"[{"element_id": 62, "page_number": 0, "normalized_text": "x"}]"#;
    let (kind, record, _) = expect_malformed(decoder.tables_from_reader(Cursor::new(&json[..])));
    assert_eq!((kind, record), (RecordKind::Table, RecordRef::Id(62)));
}

#[test]
fn test_reader_input_invalid_json() {
    let result = RecordDecoder::new().tables_from_reader(Cursor::new("[{"));
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_largest_page_number_is_accepted() {
    let chunks = docchunk::chunk_json(
        r#"[{"element_id": 0, "element_type": "NarrativeText", "text": "x",
             "page_number": 4294967295}]"#,
        "[]",
        "[]",
    )
    .unwrap();
    assert_eq!(chunks[0].pages, vec![u32::MAX]);
    assert_eq!(render::format_pages(&chunks[0].pages), u32::MAX.to_string());

    let (_, _, field) = expect_malformed(parse_elements(
        r#"[{"element_id": 0, "element_type": "NarrativeText", "page_number": 4294967296}]"#,
    ));
    assert_eq!(field, "page_number");
}

#[test]
fn test_large_input_reports_first_error_in_order() {
    let mut records: Vec<String> = (0..5000)
        .map(|i| {
            format!(
                r#"{{"element_id": {}, "element_type": "NarrativeText", "text": "t", "page_number": 1}}"#,
                i
            )
        })
        .collect();
    records[3000] = r#"{"element_id": 3000, "element_type": "NarrativeText", "text": "t"}"#.into();
    records[4500] = r#"{"element_id": 4500, "text": "t", "page_number": 1}"#.into();
    let json = format!("[{}]", records.join(","));

    for decoder in [RecordDecoder::new(), RecordDecoder::new().sequential()] {
        let (_, record, field) = expect_malformed(decoder.elements(&json));
        assert_eq!(record, RecordRef::Id(3000));
        assert_eq!(field, "page_number");
    }
}

#[test]
fn test_not_an_array() {
    let result = parse_elements(r#"{"element_id": 0}"#);
    assert!(matches!(result, Err(Error::Json(_))));
}
