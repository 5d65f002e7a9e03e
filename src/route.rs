//! Element routing by type.
//!
//! Splits classifier output into the text, table, and image branches of the
//! pipeline. Tags the router does not recognize go to the text branch.

use crate::error::{Error, RecordKind, RecordRef, Result};
use crate::model::{Element, ElementCategory, ElementType};
use serde_json::Value;

/// Records split by routing category, each bucket in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed<T> {
    /// Records for chunk assembly
    pub text: Vec<T>,
    /// Records for table normalization
    pub tables: Vec<T>,
    /// Records for image captioning
    pub images: Vec<T>,
}

/// Typed elements split by routing category.
pub type RoutedElements = Routed<Element>;

impl<T> Routed<T> {
    /// Create empty buckets.
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Append a record to the bucket for `category`.
    pub fn push(&mut self, category: ElementCategory, record: T) {
        match category {
            ElementCategory::Text => self.text.push(record),
            ElementCategory::Table => self.tables.push(record),
            ElementCategory::Image => self.images.push(record),
        }
    }

    /// Get the total number of routed records.
    pub fn len(&self) -> usize {
        self.text.len() + self.tables.len() + self.images.len()
    }

    /// Check if no records were routed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Routed<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Route typed elements.
pub fn route_elements(elements: Vec<Element>) -> RoutedElements {
    let mut routed = Routed::new();
    for element in elements {
        routed.push(element.category(), element);
    }
    routed
}

/// Route untyped classifier records, passing each record through unchanged.
///
/// Only `element_type` is inspected, so fields the downstream stages need
/// (such as `metadata.image_path`) survive routing.
pub fn route_values(records: Vec<Value>) -> Result<Routed<Value>> {
    let mut routed = Routed::new();
    for (index, record) in records.into_iter().enumerate() {
        let category = match record.get("element_type").and_then(Value::as_str) {
            Some(tag) => ElementType::from(tag).category(),
            None => {
                let id = match record.get("element_id").and_then(Value::as_u64) {
                    Some(id) => RecordRef::Id(id),
                    None => RecordRef::Index(index),
                };
                return Err(Error::malformed(RecordKind::Element, id, "element_type"));
            }
        };
        routed.push(category, record);
    }

    log::debug!(
        "Routed {} text, {} table, {} image records",
        routed.text.len(),
        routed.tables.len(),
        routed.images.len()
    );
    Ok(routed)
}
