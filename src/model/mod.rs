//! Data model for chunk assembly.
//!
//! Inputs are classified elements plus the page-keyed records produced by
//! the captioning and table stages; the output is [`ChunkRecord`].

mod chunk;
mod element;
mod record;

pub use chunk::{Chunk, ChunkRecord, ChunkSources};
pub use element::{Element, ElementCategory, ElementType, TextElement};
pub use record::{ImageCaptionRecord, NormalizedTableRecord, PageRecord};
