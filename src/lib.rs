//! # docchunk
//!
//! Section-aware chunk assembly for retrieval pipelines.
//!
//! This library turns the classified elements of a parsed document, together
//! with image captions and normalized table sentences keyed by page, into an
//! ordered list of titled chunks ready for embedding.
//!
//! ## Quick Start
//!
//! ```
//! use docchunk::{chunk_json, render};
//!
//! fn main() -> docchunk::Result<()> {
//!     let elements = r#"[
//!         {"element_id": 0, "element_type": "Title", "text": "Section 1",
//!          "metadata": {"page_number": 1}},
//!         {"element_id": 1, "element_type": "NarrativeText", "text": "Hello",
//!          "metadata": {"page_number": 1}}
//!     ]"#;
//!
//!     let chunks = chunk_json(elements, "[]", "[]")?;
//!     assert_eq!(chunks[0].title, "Section 1");
//!     assert_eq!(chunks[0].text, "Hello");
//!
//!     let json = render::to_json(&chunks, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Title boundaries**: every title element opens a chunk; content before
//!   the first title goes into an introduction chunk
//! - **Page-aligned attachments**: image captions and table sentences join
//!   the chunk that first visits their page, once per chunk
//! - **Provenance**: each chunk lists the element ids it was built from
//! - **Streaming**: [`assemble::ChunkStream`] yields chunks as sections close
//! - **Strict input validation**: malformed records fail with their id and
//!   the offending field

pub mod assemble;
pub mod error;
pub mod input;
pub mod model;
pub mod render;
pub mod route;

// Re-export commonly used types
pub use assemble::{
    assemble, assemble_records, AssembleOptions, Assembly, AssemblyStats, AttachmentScope,
    ChunkAssembler, ChunkStream, PageIndex, SideTables,
};
pub use error::{Error, RecordKind, RecordRef, Result};
pub use input::{parse_elements, parse_image_captions, parse_table_records, RecordDecoder};
pub use model::{
    Chunk, ChunkRecord, ChunkSources, Element, ElementCategory, ElementType,
    ImageCaptionRecord, NormalizedTableRecord, PageRecord, TextElement,
};
pub use render::JsonFormat;
pub use route::{route_elements, route_values, Routed, RoutedElements};

/// Assemble chunks from typed inputs with default options.
///
/// # Example
///
/// ```
/// use docchunk::{chunk_elements, Element};
///
/// let chunks = chunk_elements(&[Element::narrative(0, 1, "Intro text")], vec![], vec![])?;
/// assert_eq!(chunks[0].title, "Document Introduction");
/// # Ok::<(), docchunk::Error>(())
/// ```
pub fn chunk_elements(
    elements: &[Element],
    images: Vec<ImageCaptionRecord>,
    tables: Vec<NormalizedTableRecord>,
) -> Result<Vec<ChunkRecord>> {
    Chunker::new()
        .assemble(elements, images, tables)
        .map(|assembly| assembly.chunks)
}

/// Assemble chunks from the JSON arrays written by upstream stages.
///
/// `elements` must be the text bucket produced by [`route_values`]. Every
/// element other than a title becomes a content line, so table or image
/// elements left in the array show up as narrative text.
///
/// # Arguments
///
/// * `elements` - Text elements in document order
/// * `images` - Image caption records
/// * `tables` - Normalized table records
pub fn chunk_json(elements: &str, images: &str, tables: &str) -> Result<Vec<ChunkRecord>> {
    Chunker::new()
        .assemble_json(elements, images, tables)
        .map(|assembly| assembly.chunks)
}

/// Builder for decoding inputs and assembling chunks.
///
/// # Example
///
/// ```
/// use docchunk::{Chunker, JsonFormat};
///
/// let json = Chunker::new()
///     .with_intro_title("Preamble")
///     .document_scope()
///     .sequential()
///     .assemble_json(
///         r#"[{"element_id": 0, "element_type": "NarrativeText", "text": "Hi", "page_number": 1}]"#,
///         "[]",
///         "[]",
///     )?
///     .to_json(JsonFormat::Compact)?;
/// assert!(json.contains("Preamble"));
/// # Ok::<(), docchunk::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    decoder: RecordDecoder,
    options: AssembleOptions,
}

impl Chunker {
    /// Create a new chunker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all assembly options.
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the introduction chunk title.
    pub fn with_intro_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_intro_title(title);
        self
    }

    /// Set the image line prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.with_image_prefix(prefix);
        self
    }

    /// Set the table line prefix.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.with_table_prefix(prefix);
        self
    }

    /// Attach each image and table to at most one chunk.
    pub fn document_scope(mut self) -> Self {
        self.options = self.options.document_scope();
        self
    }

    /// Disable parallel input validation.
    pub fn sequential(mut self) -> Self {
        self.decoder = self.decoder.sequential();
        self
    }

    /// Get the assembly options.
    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Assemble chunks from typed inputs.
    pub fn assemble(
        &self,
        elements: &[Element],
        images: Vec<ImageCaptionRecord>,
        tables: Vec<NormalizedTableRecord>,
    ) -> Result<Assembly> {
        assemble_records(elements, images, tables, &self.options)
    }

    /// Decode the upstream JSON arrays, then assemble.
    ///
    /// As with [`chunk_json`], `elements` must already be routed to text.
    pub fn assemble_json(&self, elements: &str, images: &str, tables: &str) -> Result<Assembly> {
        let elements = self.decoder.elements(elements)?;
        let images = self.decoder.image_captions(images)?;
        let tables = self.decoder.tables(tables)?;
        self.assemble(&elements, images, tables)
    }
}
