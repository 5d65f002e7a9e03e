//! Section boundary state machine.

use super::{AssembleOptions, AssemblyStats, AttachmentScope, SideTables};
use crate::model::{Chunk, Element};
use std::collections::HashSet;

/// The chunk under construction together with its attachment tracking.
#[derive(Debug)]
struct OpenChunk {
    chunk: Chunk,
    attached_images: HashSet<u64>,
    attached_tables: HashSet<u64>,
}

impl OpenChunk {
    fn new(title: impl Into<String>) -> Self {
        Self {
            chunk: Chunk::new(title),
            attached_images: HashSet::new(),
            attached_tables: HashSet::new(),
        }
    }
}

/// Incremental chunk assembler.
///
/// Feed text elements in document order with [`push`](Self::push); a title
/// closes the open chunk and returns it. Call [`finish`](Self::finish) after
/// the last element to close the final chunk and collect statistics.
///
/// # Example
///
/// ```
/// use docchunk::assemble::{AssembleOptions, ChunkAssembler, SideTables};
/// use docchunk::model::Element;
///
/// let tables = SideTables::new();
/// let options = AssembleOptions::default();
/// let mut assembler = ChunkAssembler::new(&tables, &options);
///
/// assert!(assembler.push(&Element::title(0, 1, "Overview")).is_none());
/// assert!(assembler.push(&Element::narrative(1, 1, "Body")).is_none());
/// let closed = assembler.push(&Element::title(2, 2, "Details")).unwrap();
/// assert_eq!(closed.title, "Overview");
///
/// let (last, stats) = assembler.finish();
/// assert_eq!(last.unwrap().title, "Details");
/// assert_eq!(stats.chunk_count, 2);
/// ```
#[derive(Debug)]
pub struct ChunkAssembler<'a> {
    side_tables: &'a SideTables,
    options: &'a AssembleOptions,
    current: Option<OpenChunk>,
    /// Ids attached to any chunk so far
    attached_images: HashSet<u64>,
    attached_tables: HashSet<u64>,
    /// (page, id) of every side-table record that produced a line
    emitted_images: HashSet<(u32, u64)>,
    emitted_tables: HashSet<(u32, u64)>,
    stats: AssemblyStats,
}

impl<'a> ChunkAssembler<'a> {
    /// Create an assembler over the given side tables.
    pub fn new(side_tables: &'a SideTables, options: &'a AssembleOptions) -> Self {
        Self {
            side_tables,
            options,
            current: None,
            attached_images: HashSet::new(),
            attached_tables: HashSet::new(),
            emitted_images: HashSet::new(),
            emitted_tables: HashSet::new(),
            stats: AssemblyStats::new(),
        }
    }

    /// Check if a chunk is currently open.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Get the statistics collected so far.
    pub fn stats(&self) -> &AssemblyStats {
        &self.stats
    }

    /// Process the next element. Returns the chunk closed by a title, if any.
    pub fn push(&mut self, element: &Element) -> Option<Chunk> {
        self.stats.element_count += 1;

        if element.is_title() {
            self.stats.title_count += 1;
            let closed = self.close();

            let mut open = OpenChunk::new(element.trimmed_text());
            open.chunk.pages.insert(element.page_number);
            self.current = Some(open);
            return closed;
        }

        let page = element.page_number;
        let options = self.options;
        let document_scope = options.attachment_scope == AttachmentScope::Document;

        let open = self.current.get_or_insert_with(|| {
            log::debug!(
                "Content before first title at element {}, opening introduction chunk",
                element.element_id
            );
            OpenChunk::new(options.intro_title.as_str())
        });

        // Pages are recorded even when the element has no text.
        open.chunk.pages.insert(page);

        for image in self.side_tables.images.get(page) {
            let id = image.element_id;
            if open.attached_images.contains(&id)
                || (document_scope && self.attached_images.contains(&id))
            {
                continue;
            }
            open.chunk
                .content
                .push(format!("{}{}", options.image_prefix, image.blip_caption));
            open.chunk.sources.image_elements.push(id);
            open.attached_images.insert(id);
            self.attached_images.insert(id);
            self.emitted_images.insert((page, id));
            self.stats.image_attachments += 1;
        }

        for table in self.side_tables.tables.get(page) {
            let id = table.element_id;
            if open.attached_tables.contains(&id)
                || (document_scope && self.attached_tables.contains(&id))
            {
                continue;
            }
            open.chunk
                .content
                .push(format!("{}{}", options.table_prefix, table.normalized_text));
            open.chunk.sources.table_elements.push(id);
            open.attached_tables.insert(id);
            self.attached_tables.insert(id);
            self.emitted_tables.insert((page, id));
            self.stats.table_attachments += 1;
        }

        let text = element.trimmed_text();
        if text.is_empty() {
            self.stats.empty_text_count += 1;
        } else {
            open.chunk.content.push(text.to_string());
            open.chunk.sources.text_elements.push(element.element_id);
            self.stats.text_line_count += 1;
        }

        None
    }

    /// Close the final chunk and return it with the pass statistics.
    ///
    /// A side-table record counts as unattached unless a line was emitted
    /// for its own page and id, so a record sharing its id with an attached
    /// record on another page is still reported.
    pub fn finish(mut self) -> (Option<Chunk>, AssemblyStats) {
        let last = self.close();

        let images = &self.side_tables.images;
        let tables = &self.side_tables.tables;
        self.stats.unattached_images = images
            .records()
            .filter(|r| !self.emitted_images.contains(&(r.page_number, r.element_id)))
            .count();
        self.stats.unattached_tables = tables
            .records()
            .filter(|r| !self.emitted_tables.contains(&(r.page_number, r.element_id)))
            .count();

        if self.stats.has_orphans() {
            log::warn!(
                "{} image and {} table records were not attached to any chunk",
                self.stats.unattached_images,
                self.stats.unattached_tables
            );
        }

        (last, self.stats)
    }

    fn close(&mut self) -> Option<Chunk> {
        let open = self.current.take()?;
        self.stats.chunk_count += 1;
        log::debug!(
            "Closed chunk {:?}: {} lines, pages {:?}",
            open.chunk.title,
            open.chunk.content.len(),
            open.chunk.pages
        );
        Some(open.chunk)
    }
}
