//! Classified document elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag assigned to an element by the upstream classifier.
///
/// Serialized as the classifier's plain string (`"Title"`, `"NarrativeText"`, ...).
/// Unrecognized tags are preserved in [`ElementType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Section heading; opens a new chunk
    Title,
    /// Body paragraph
    NarrativeText,
    /// Bulleted or numbered list entry
    ListItem,
    /// Running page header
    Header,
    /// Running page footer
    Footer,
    /// Table region
    Table,
    /// Embedded image
    Image,
    /// Figure region
    Figure,
    /// Any tag the classifier emits that is not listed above
    Other(String),
}

impl ElementType {
    /// Get the classifier string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::Title => "Title",
            ElementType::NarrativeText => "NarrativeText",
            ElementType::ListItem => "ListItem",
            ElementType::Header => "Header",
            ElementType::Footer => "Footer",
            ElementType::Table => "Table",
            ElementType::Image => "Image",
            ElementType::Figure => "Figure",
            ElementType::Other(tag) => tag,
        }
    }

    /// Check if this type opens a new section.
    pub fn is_title(&self) -> bool {
        matches!(self, ElementType::Title)
    }

    /// Get the routing category for this type.
    ///
    /// Types the router does not know about are treated as text.
    pub fn category(&self) -> ElementCategory {
        match self {
            ElementType::Title
            | ElementType::NarrativeText
            | ElementType::ListItem
            | ElementType::Header
            | ElementType::Footer => ElementCategory::Text,
            ElementType::Table => ElementCategory::Table,
            ElementType::Image | ElementType::Figure => ElementCategory::Image,
            ElementType::Other(_) => ElementCategory::Text,
        }
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        match tag {
            "Title" => ElementType::Title,
            "NarrativeText" => ElementType::NarrativeText,
            "ListItem" => ElementType::ListItem,
            "Header" => ElementType::Header,
            "Footer" => ElementType::Footer,
            "Table" => ElementType::Table,
            "Image" => ElementType::Image,
            "Figure" => ElementType::Figure,
            other => ElementType::Other(other.to_string()),
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        match ElementType::from(tag.as_str()) {
            ElementType::Other(_) => ElementType::Other(tag),
            known => known,
        }
    }
}

impl From<ElementType> for String {
    fn from(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline branch an element is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    /// Narrative content consumed by chunk assembly
    Text,
    /// Tables, summarized upstream into normalized sentences
    Table,
    /// Images and figures, captioned upstream
    Image,
}

/// A classified document element.
///
/// Elements routed to [`ElementCategory::Text`] are the input of chunk
/// assembly; [`TextElement`] names that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Stable id assigned during parsing, unique within the document
    pub element_id: u64,

    /// Classifier type tag
    pub element_type: ElementType,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Element text (may be empty)
    #[serde(default)]
    pub text: String,
}

/// An element routed to the text branch.
pub type TextElement = Element;

impl Element {
    /// Create a new element.
    pub fn new(
        element_id: u64,
        element_type: ElementType,
        page_number: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            element_id,
            element_type,
            page_number,
            text: text.into(),
        }
    }

    /// Create a title element.
    pub fn title(element_id: u64, page_number: u32, text: impl Into<String>) -> Self {
        Self::new(element_id, ElementType::Title, page_number, text)
    }

    /// Create a narrative text element.
    pub fn narrative(element_id: u64, page_number: u32, text: impl Into<String>) -> Self {
        Self::new(element_id, ElementType::NarrativeText, page_number, text)
    }

    /// Check if this element opens a new section.
    pub fn is_title(&self) -> bool {
        self.element_type.is_title()
    }

    /// Get the element text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Get the routing category of this element.
    pub fn category(&self) -> ElementCategory {
        self.element_type.category()
    }
}
