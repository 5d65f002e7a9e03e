//! Chunk types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Provenance of a chunk: element ids per origin, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSources {
    /// Ids of text elements that contributed a content line
    pub text_elements: Vec<u64>,

    /// Ids of attached image caption records
    pub image_elements: Vec<u64>,

    /// Ids of attached table records
    pub table_elements: Vec<u64>,
}

impl ChunkSources {
    /// Create empty sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no element contributed to the chunk.
    pub fn is_empty(&self) -> bool {
        self.text_elements.is_empty()
            && self.image_elements.is_empty()
            && self.table_elements.is_empty()
    }

    /// Get the total number of recorded ids.
    pub fn len(&self) -> usize {
        self.text_elements.len() + self.image_elements.len() + self.table_elements.len()
    }
}

/// A closed chunk, before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Triggering title text, or the introduction label
    pub title: String,

    /// Content lines in encounter order
    pub content: Vec<String>,

    /// Pages touched by any merged element
    pub pages: BTreeSet<u32>,

    /// Element provenance
    pub sources: ChunkSources,
}

impl Chunk {
    /// Create an empty chunk with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            pages: BTreeSet::new(),
            sources: ChunkSources::new(),
        }
    }

    /// Get the chunk body: content lines joined by newlines.
    pub fn text(&self) -> String {
        self.content.join("\n")
    }

    /// Check if the chunk has no content lines.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Freeze the chunk into its persisted record shape.
    pub fn into_record(self, chunk_id: usize) -> ChunkRecord {
        ChunkRecord {
            chunk_id,
            text: self.text(),
            title: self.title,
            pages: self.pages.into_iter().collect(),
            sources: self.sources,
        }
    }
}

/// Persisted chunk record consumed by the embedding stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Zero-based position in the output sequence
    pub chunk_id: usize,

    /// Chunk title
    pub title: String,

    /// Content lines joined by `\n`
    pub text: String,

    /// Pages in ascending order
    pub pages: Vec<u32>,

    /// Element provenance
    pub sources: ChunkSources,
}

impl ChunkRecord {
    /// Get the first page of the chunk.
    pub fn first_page(&self) -> Option<u32> {
        self.pages.first().copied()
    }

    /// Get the last page of the chunk.
    pub fn last_page(&self) -> Option<u32> {
        self.pages.last().copied()
    }

    /// Get a preview of the chunk text, cut at `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &self.text[..idx]),
            None => self.text.clone(),
        }
    }
}
