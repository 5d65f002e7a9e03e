//! Chunk assembly engine.
//!
//! Walks text elements in document order and groups them into sections that
//! start at each title element. While a section is open, every element pulls
//! in the image captions and table sentences recorded for its page, each at
//! most once per section, ahead of the element's own text.
//!
//! # Example
//!
//! ```
//! use docchunk::assemble::{assemble, AssembleOptions, SideTables};
//! use docchunk::model::{Element, ImageCaptionRecord};
//!
//! let elements = vec![
//!     Element::title(0, 1, "Section 1"),
//!     Element::narrative(1, 1, "Hello"),
//! ];
//! let side_tables = SideTables::build(
//!     vec![ImageCaptionRecord::new(9, 1, "a chart")],
//!     Vec::new(),
//! )?;
//!
//! let assembly = assemble(&elements, &side_tables, &AssembleOptions::default());
//! assert_eq!(assembly.chunks[0].text, "[Image Description]: a chart\nHello");
//! # Ok::<(), docchunk::Error>(())
//! ```

mod assembler;
mod options;
mod page_index;
mod stats;
pub mod stream;

pub use assembler::ChunkAssembler;
pub use options::{
    AssembleOptions, AttachmentScope, DEFAULT_IMAGE_PREFIX, DEFAULT_INTRO_TITLE,
    DEFAULT_TABLE_PREFIX,
};
pub use page_index::{PageIndex, SideTables};
pub use stats::AssemblyStats;
pub use stream::ChunkStream;

use crate::error::Result;
use crate::model::{ChunkRecord, Element, ImageCaptionRecord, NormalizedTableRecord};
use crate::render::{self, JsonFormat};
use serde::{Deserialize, Serialize};

/// Output of one assembly pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    /// Chunk records in output order
    pub chunks: Vec<ChunkRecord>,

    /// Pass statistics
    pub stats: AssemblyStats,
}

impl Assembly {
    /// Get the number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if no chunk was produced.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Render the chunk records as a JSON array.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.chunks, format)
    }
}

/// Assemble chunks from text elements in document order.
pub fn assemble(
    elements: &[Element],
    side_tables: &SideTables,
    options: &AssembleOptions,
) -> Assembly {
    let (chunks, stats) = ChunkStream::new(elements.iter(), side_tables, options).finish();
    log::debug!(
        "Assembled {} chunks from {} elements",
        chunks.len(),
        stats.element_count
    );
    Assembly { chunks, stats }
}

/// Build side tables from upstream records, then assemble.
pub fn assemble_records(
    elements: &[Element],
    images: Vec<ImageCaptionRecord>,
    tables: Vec<NormalizedTableRecord>,
    options: &AssembleOptions,
) -> Result<Assembly> {
    let side_tables = SideTables::build(images, tables)?;
    Ok(assemble(elements, &side_tables, options))
}
