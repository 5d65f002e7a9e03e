//! Lazy chunk iteration.
//!
//! [`ChunkStream`] drives a [`ChunkAssembler`] from an element iterator and
//! yields finished [`ChunkRecord`]s as soon as each section closes, so large
//! documents never hold more than one open chunk.
//!
//! # Example
//!
//! ```
//! use docchunk::assemble::{AssembleOptions, ChunkStream, SideTables};
//! use docchunk::model::Element;
//!
//! let elements = vec![
//!     Element::title(0, 1, "One"),
//!     Element::narrative(1, 1, "first"),
//!     Element::title(2, 2, "Two"),
//!     Element::narrative(3, 2, "second"),
//! ];
//! let tables = SideTables::new();
//! let options = AssembleOptions::default();
//!
//! for record in ChunkStream::new(elements.iter(), &tables, &options) {
//!     println!("{} {}", record.chunk_id, record.title);
//! }
//! ```

use super::{AssembleOptions, AssemblyStats, ChunkAssembler, SideTables};
use crate::model::{Chunk, ChunkRecord, Element};
use std::borrow::Borrow;

/// Iterator adapter that yields chunk records with dense ids.
pub struct ChunkStream<'a, I> {
    elements: I,
    assembler: Option<ChunkAssembler<'a>>,
    next_id: usize,
    stats: Option<AssemblyStats>,
}

impl<'a, I> ChunkStream<'a, I>
where
    I: Iterator,
    I::Item: Borrow<Element>,
{
    /// Create a stream over `elements`.
    pub fn new(elements: I, side_tables: &'a SideTables, options: &'a AssembleOptions) -> Self {
        Self {
            elements,
            assembler: Some(ChunkAssembler::new(side_tables, options)),
            next_id: 0,
            stats: None,
        }
    }

    /// Check if the input has been exhausted and the last chunk emitted.
    pub fn is_done(&self) -> bool {
        self.assembler.is_none()
    }

    /// Get the pass statistics once the stream is exhausted.
    pub fn stats(&self) -> Option<&AssemblyStats> {
        self.stats.as_ref()
    }

    /// Consume the remaining chunks, returning them with the statistics.
    pub fn finish(mut self) -> (Vec<ChunkRecord>, AssemblyStats) {
        let chunks: Vec<ChunkRecord> = self.by_ref().collect();
        (chunks, self.stats.unwrap_or_default())
    }

    fn emit(&mut self, chunk: Chunk) -> ChunkRecord {
        let record = chunk.into_record(self.next_id);
        self.next_id += 1;
        record
    }
}

impl<'a, I> Iterator for ChunkStream<'a, I>
where
    I: Iterator,
    I::Item: Borrow<Element>,
{
    type Item = ChunkRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let assembler = self.assembler.as_mut()?;
            match self.elements.next() {
                Some(element) => {
                    if let Some(chunk) = assembler.push(element.borrow()) {
                        return Some(self.emit(chunk));
                    }
                }
                None => {
                    let (last, stats) = self.assembler.take()?.finish();
                    self.stats = Some(stats);
                    return last.map(|chunk| self.emit(chunk));
                }
            }
        }
    }
}
