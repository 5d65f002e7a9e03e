//! Decoding and validation of upstream JSON records.
//!
//! Upstream stages write JSON arrays whose records may lack fields. Records
//! are first decoded into raw shapes where every field is optional, then
//! validated one by one. The first invalid record in input order is reported
//! as [`Error::MalformedRecord`]; no field is ever filled with a default.
//!
//! # Example
//!
//! ```
//! use docchunk::input::parse_elements;
//!
//! let json = r#"[
//!     {"element_id": 0, "element_type": "Title", "text": "Intro",
//!      "metadata": {"page_number": 1}},
//!     {"element_id": 1, "element_type": "NarrativeText", "text": null,
//!      "metadata": {"page_number": 1}}
//! ]"#;
//! let elements = parse_elements(json).unwrap();
//! assert_eq!(elements.len(), 2);
//! assert_eq!(elements[1].text, "");
//! ```

use crate::error::{Error, RecordKind, RecordRef, Result};
use crate::model::{Element, ElementType, ImageCaptionRecord, NormalizedTableRecord};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

/// Below this many records validation always runs sequentially.
const PARALLEL_THRESHOLD: usize = 2048;

/// Element metadata as written by the classifier.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawMetadata {
    page_number: Option<i64>,
}

/// Classifier element with every field optional.
#[derive(Debug, Clone, Deserialize)]
struct RawElement {
    element_id: Option<i64>,
    element_type: Option<String>,
    text: Option<String>,
    page_number: Option<i64>,
    metadata: Option<RawMetadata>,
}

/// Caption record with every field optional.
#[derive(Debug, Clone, Deserialize)]
struct RawImageCaption {
    element_id: Option<i64>,
    page_number: Option<i64>,
    blip_caption: Option<String>,
    image_path: Option<String>,
    existing_text: Option<String>,
}

/// Table record with every field optional.
#[derive(Debug, Clone, Deserialize)]
struct RawTableRecord {
    element_id: Option<i64>,
    page_number: Option<i64>,
    normalized_text: Option<String>,
}

/// A raw record that can be checked and converted into its model type.
trait Validate: DeserializeOwned + Send {
    type Output: Send;

    const KIND: RecordKind;

    /// Validate the record found at `index` in the input array.
    fn validate(self, index: usize) -> Result<Self::Output>;
}

impl Validate for RawElement {
    type Output = Element;

    const KIND: RecordKind = RecordKind::Element;

    fn validate(self, index: usize) -> Result<Element> {
        let element_id = require_id(Self::KIND, self.element_id, index)?;
        let record = RecordRef::Id(element_id);

        let element_type = self
            .element_type
            .ok_or_else(|| Error::malformed(Self::KIND, record, "element_type"))?;

        let page = self
            .page_number
            .or_else(|| self.metadata.and_then(|m| m.page_number));
        let page_number = require_page(Self::KIND, page, record)?;

        Ok(Element {
            element_id,
            element_type: ElementType::from(element_type),
            page_number,
            text: self.text.unwrap_or_default(),
        })
    }
}

impl Validate for RawImageCaption {
    type Output = ImageCaptionRecord;

    const KIND: RecordKind = RecordKind::ImageCaption;

    fn validate(self, index: usize) -> Result<ImageCaptionRecord> {
        let element_id = require_id(Self::KIND, self.element_id, index)?;
        let page_number = require_page(Self::KIND, self.page_number, RecordRef::Id(element_id))?;

        Ok(ImageCaptionRecord {
            element_id,
            page_number,
            blip_caption: self.blip_caption.unwrap_or_default(),
            image_path: self.image_path,
            existing_text: self.existing_text,
        })
    }
}

impl Validate for RawTableRecord {
    type Output = NormalizedTableRecord;

    const KIND: RecordKind = RecordKind::Table;

    fn validate(self, index: usize) -> Result<NormalizedTableRecord> {
        let element_id = require_id(Self::KIND, self.element_id, index)?;
        let page_number = require_page(Self::KIND, self.page_number, RecordRef::Id(element_id))?;

        Ok(NormalizedTableRecord {
            element_id,
            page_number,
            normalized_text: self.normalized_text.unwrap_or_default(),
        })
    }
}

fn require_id(kind: RecordKind, id: Option<i64>, index: usize) -> Result<u64> {
    id.and_then(|id| u64::try_from(id).ok())
        .ok_or_else(|| Error::malformed(kind, RecordRef::Index(index), "element_id"))
}

fn require_page(kind: RecordKind, page: Option<i64>, record: RecordRef) -> Result<u32> {
    page.and_then(|p| u32::try_from(p).ok())
        .filter(|&p| p > 0)
        .ok_or_else(|| Error::malformed(kind, record, "page_number"))
}

/// Decoder for upstream record arrays.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder {
    parallel: bool,
}

impl RecordDecoder {
    /// Create a decoder that validates large inputs in parallel.
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Enable or disable parallel validation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate on the calling thread only.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }

    /// Decode classifier elements from a JSON array.
    pub fn elements(&self, json: &str) -> Result<Vec<Element>> {
        self.validate_all(serde_json::from_str::<Vec<RawElement>>(json)?)
    }

    /// Decode classifier elements from a reader.
    pub fn elements_from_reader<R: Read>(&self, reader: R) -> Result<Vec<Element>> {
        self.validate_all(serde_json::from_reader::<_, Vec<RawElement>>(reader)?)
    }

    /// Decode image caption records from a JSON array.
    pub fn image_captions(&self, json: &str) -> Result<Vec<ImageCaptionRecord>> {
        self.validate_all(serde_json::from_str::<Vec<RawImageCaption>>(json)?)
    }

    /// Decode image caption records from a reader.
    pub fn image_captions_from_reader<R: Read>(
        &self,
        reader: R,
    ) -> Result<Vec<ImageCaptionRecord>> {
        self.validate_all(serde_json::from_reader::<_, Vec<RawImageCaption>>(reader)?)
    }

    /// Decode normalized table records from a JSON array.
    pub fn tables(&self, json: &str) -> Result<Vec<NormalizedTableRecord>> {
        self.validate_all(serde_json::from_str::<Vec<RawTableRecord>>(json)?)
    }

    /// Decode normalized table records from a reader.
    pub fn tables_from_reader<R: Read>(&self, reader: R) -> Result<Vec<NormalizedTableRecord>> {
        self.validate_all(serde_json::from_reader::<_, Vec<RawTableRecord>>(reader)?)
    }

    fn validate_all<V: Validate>(&self, raws: Vec<V>) -> Result<Vec<V::Output>> {
        log::debug!("Validating {} {} records", raws.len(), V::KIND);

        if self.parallel && raws.len() >= PARALLEL_THRESHOLD {
            // Collect per-record results first so the reported error is the
            // earliest in input order regardless of scheduling.
            let results: Vec<Result<V::Output>> = raws
                .into_par_iter()
                .enumerate()
                .map(|(index, raw)| raw.validate(index))
                .collect();
            results.into_iter().collect()
        } else {
            raws.into_iter()
                .enumerate()
                .map(|(index, raw)| raw.validate(index))
                .collect()
        }
    }
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode classifier elements from a JSON array.
pub fn parse_elements(json: &str) -> Result<Vec<Element>> {
    RecordDecoder::new().elements(json)
}

/// Decode image caption records from a JSON array.
pub fn parse_image_captions(json: &str) -> Result<Vec<ImageCaptionRecord>> {
    RecordDecoder::new().image_captions(json)
}

/// Decode normalized table records from a JSON array.
pub fn parse_table_records(json: &str) -> Result<Vec<NormalizedTableRecord>> {
    RecordDecoder::new().tables(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_page_from_metadata() {
        let json = r#"[{"element_id": 3, "element_type": "ListItem", "text": "- a",
                        "metadata": {"page_number": 4, "source_file": "a.pdf"}}]"#;
        let elements = parse_elements(json).unwrap();
        assert_eq!(elements[0].page_number, 4);
        assert_eq!(elements[0].element_type, ElementType::ListItem);
    }

    #[test]
    fn test_element_top_level_page_wins() {
        let json = r#"[{"element_id": 3, "element_type": "Title", "page_number": 2,
                        "metadata": {"page_number": 9}}]"#;
        let elements = parse_elements(json).unwrap();
        assert_eq!(elements[0].page_number, 2);
        assert_eq!(elements[0].text, "");
    }

    #[test]
    fn test_missing_page_number() {
        let json = r#"[{"element_id": 5, "element_type": "Title", "metadata": {}}]"#;
        let err = parse_elements(json).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                kind: RecordKind::Element,
                record: RecordRef::Id(5),
                field: "page_number",
            }
        ));
    }

    #[test]
    fn test_zero_page_number_rejected() {
        let json = r#"[{"element_id": 1, "page_number": 0, "normalized_text": "t"}]"#;
        let err = parse_table_records(json).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                field: "page_number",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_element_id_reports_index() {
        let json = r#"[
            {"element_id": 1, "page_number": 1, "blip_caption": "ok"},
            {"page_number": 1, "blip_caption": "no id"}
        ]"#;
        let err = parse_image_captions(json).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                kind: RecordKind::ImageCaption,
                record: RecordRef::Index(1),
                field: "element_id",
            }
        ));
    }

    #[test]
    fn test_negative_element_id_rejected() {
        let json = r#"[{"element_id": -1, "element_type": "Title", "page_number": 1}]"#;
        assert!(parse_elements(json).is_err());
    }

    #[test]
    fn test_missing_element_type() {
        let json = r#"[{"element_id": 8, "page_number": 1, "text": "x"}]"#;
        let err = parse_elements(json).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                record: RecordRef::Id(8),
                field: "element_type",
                ..
            }
        ));
    }

    #[test]
    fn test_caption_optional_fields() {
        let json = r#"[{"element_id": 2, "page_number": 1, "image_path": "figures/a.jpg",
                        "existing_text": null, "blip_caption": "a dog"}]"#;
        let captions = parse_image_captions(json).unwrap();
        assert_eq!(captions[0].blip_caption, "a dog");
        assert_eq!(captions[0].image_path.as_deref(), Some("figures/a.jpg"));
        assert!(captions[0].existing_text.is_none());
    }

    #[test]
    fn test_not_json() {
        let err = parse_elements("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_elements("[]").unwrap().is_empty());
        assert!(parse_table_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parallel_reports_first_error_in_order() {
        let mut records: Vec<String> = (0..PARALLEL_THRESHOLD + 10)
            .map(|i| format!(r#"{{"element_id": {}, "page_number": 1}}"#, i))
            .collect();
        records[100] = r#"{"element_id": 100}"#.to_string();
        records[2000] = r#"{"element_id": 2000}"#.to_string();
        let json = format!("[{}]", records.join(","));

        let err = RecordDecoder::new().tables(&json).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                record: RecordRef::Id(100),
                ..
            }
        ));
    }
}
