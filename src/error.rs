//! Error types for docchunk library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for docchunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding inputs or assembling chunks.
#[derive(Error, Debug)]
pub enum Error {
    /// An upstream record lacks a required field or carries an invalid value.
    #[error("Malformed {kind} record ({record}): missing or invalid `{field}`")]
    MalformedRecord {
        /// Which upstream stream the record came from
        kind: RecordKind,
        /// Identity of the offending record
        record: RecordRef,
        /// Name of the missing or invalid field
        field: &'static str,
    },

    /// Input is not valid JSON or does not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error when writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error while rendering chunk records.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build a `MalformedRecord` error.
    pub fn malformed(kind: RecordKind, record: RecordRef, field: &'static str) -> Self {
        Error::MalformedRecord {
            kind,
            record,
            field,
        }
    }
}

/// Kind of upstream record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Classified document element
    Element,
    /// Image caption record
    ImageCaption,
    /// Normalized table record
    Table,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Element => write!(f, "element"),
            RecordKind::ImageCaption => write!(f, "image caption"),
            RecordKind::Table => write!(f, "table"),
        }
    }
}

/// Identifies a record in error messages.
///
/// Records are named by `element_id` when they have one, otherwise by their
/// zero-based position in the input array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    /// Record with a known element id
    Id(u64),
    /// Record without an element id, at this array position
    Index(usize),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Id(id) => write!(f, "element_id {}", id),
            RecordRef::Index(idx) => write!(f, "at index {}", idx),
        }
    }
}
