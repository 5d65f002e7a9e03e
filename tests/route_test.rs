//! Integration tests for element routing.

use docchunk::model::{Element, ElementType};
use docchunk::{route_elements, route_values, Error, RecordRef};
use serde_json::json;

#[test]
fn test_route_values_preserves_records() {
    let routed = route_values(vec![
        json!({"element_id": 0, "element_type": "Title", "text": "Intro",
               "metadata": {"page_number": 1}}),
        json!({"element_id": 1, "element_type": "Table", "text": "a | b",
               "metadata": {"page_number": 1, "text_as_html": "<table></table>"}}),
        json!({"element_id": 2, "element_type": "Image", "text": "",
               "metadata": {"page_number": 2, "image_path": "figures/2.jpg"}}),
        json!({"element_id": 3, "element_type": "Formula", "text": "E = mc2",
               "metadata": {"page_number": 2}}),
    ])
    .unwrap();

    assert_eq!(routed.len(), 4);
    assert_eq!(routed.text.len(), 2);
    assert_eq!(routed.text[1]["element_type"], "Formula");
    assert_eq!(
        routed.tables[0]["metadata"]["text_as_html"],
        "<table></table>"
    );
    assert_eq!(routed.images[0]["metadata"]["image_path"], "figures/2.jpg");
}

#[test]
fn test_route_values_missing_type() {
    let result = route_values(vec![json!({"element_id": 8, "text": "?"})]);
    assert!(matches!(
        result,
        Err(Error::MalformedRecord {
            record: RecordRef::Id(8),
            field: "element_type",
            ..
        })
    ));

    let result = route_values(vec![json!({"text": "?"})]);
    assert!(matches!(
        result,
        Err(Error::MalformedRecord {
            record: RecordRef::Index(0),
            ..
        })
    ));
}

#[test]
fn test_route_then_assemble() {
    let routed = route_elements(vec![
        Element::title(0, 1, "Data"),
        Element::new(1, ElementType::Table, 1, "x y"),
        Element::narrative(2, 1, "See the table."),
        Element::new(3, ElementType::Figure, 1, ""),
    ]);

    assert_eq!(routed.tables.len(), 1);
    assert_eq!(routed.images.len(), 1);

    let chunks = docchunk::chunk_elements(&routed.text, Vec::new(), Vec::new()).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].sources.text_elements, vec![2]);
}

#[test]
fn test_route_empty() {
    assert!(route_values(Vec::new()).unwrap().is_empty());
    assert!(route_elements(Vec::new()).is_empty());
}
