//! Page-keyed side-table records produced by upstream stages.

use crate::error::RecordKind;
use serde::{Deserialize, Serialize};

/// A record that belongs to a single page and carries an element id.
pub trait PageRecord {
    /// Upstream stream the record comes from.
    const KIND: RecordKind;

    /// Id of the element this record was derived from.
    fn element_id(&self) -> u64;

    /// Page the record was found on (1-indexed).
    fn page_number(&self) -> u32;
}

/// A caption generated for an image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCaptionRecord {
    /// Id of the source image element
    pub element_id: u64,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Generated caption (empty if captioning failed)
    #[serde(default)]
    pub blip_caption: String,

    /// Path of the extracted image file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Text the parser found inside the image region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_text: Option<String>,
}

impl ImageCaptionRecord {
    /// Create a new caption record.
    pub fn new(element_id: u64, page_number: u32, caption: impl Into<String>) -> Self {
        Self {
            element_id,
            page_number,
            blip_caption: caption.into(),
            image_path: None,
            existing_text: None,
        }
    }

    /// Set the extracted image path.
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Set the text found inside the image region.
    pub fn with_existing_text(mut self, text: impl Into<String>) -> Self {
        self.existing_text = Some(text.into());
        self
    }
}

impl PageRecord for ImageCaptionRecord {
    const KIND: RecordKind = RecordKind::ImageCaption;

    fn element_id(&self) -> u64 {
        self.element_id
    }

    fn page_number(&self) -> u32 {
        self.page_number
    }
}

/// A retrieval sentence derived from a table element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTableRecord {
    /// Id of the source table element
    pub element_id: u64,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Normalized table sentence
    #[serde(default)]
    pub normalized_text: String,
}

impl NormalizedTableRecord {
    /// Create a new table record.
    pub fn new(element_id: u64, page_number: u32, text: impl Into<String>) -> Self {
        Self {
            element_id,
            page_number,
            normalized_text: text.into(),
        }
    }
}

impl PageRecord for NormalizedTableRecord {
    const KIND: RecordKind = RecordKind::Table;

    fn element_id(&self) -> u64 {
        self.element_id
    }

    fn page_number(&self) -> u32 {
        self.page_number
    }
}
