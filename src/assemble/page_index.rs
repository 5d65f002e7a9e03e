//! Page-indexed side tables.

use crate::error::{Error, RecordRef, Result};
use crate::model::{ImageCaptionRecord, NormalizedTableRecord, PageRecord};
use std::collections::HashMap;

/// Records grouped by page number.
///
/// Within a page, records keep the order they were given in, which is the
/// order they are attached in.
#[derive(Debug, Clone)]
pub struct PageIndex<T> {
    pages: HashMap<u32, Vec<T>>,
    len: usize,
}

impl<T: PageRecord> PageIndex<T> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            len: 0,
        }
    }

    /// Group records by page.
    ///
    /// Fails on the first record whose page number is 0.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(record)?;
        }

        log::debug!(
            "Indexed {} {} records across {} pages",
            index.len,
            T::KIND,
            index.pages.len()
        );
        Ok(index)
    }

    /// Append a record to its page.
    pub fn insert(&mut self, record: T) -> Result<()> {
        let page = record.page_number();
        if page == 0 {
            return Err(Error::malformed(
                T::KIND,
                RecordRef::Id(record.element_id()),
                "page_number",
            ));
        }

        self.pages.entry(page).or_default().push(record);
        self.len += 1;
        Ok(())
    }

    /// Get the records on a page; empty if the page has none.
    pub fn get(&self, page: u32) -> &[T] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the total number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the pages that hold at least one record, in ascending order.
    pub fn pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.pages.keys().copied().collect();
        pages.sort_unstable();
        pages
    }

    /// Iterate over all records, page by page in ascending order.
    pub fn records(&self) -> impl Iterator<Item = &T> + '_ {
        self.pages()
            .into_iter()
            .flat_map(move |page| self.get(page).iter())
    }
}

impl<T: PageRecord> Default for PageIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The image and table side tables consulted during assembly.
#[derive(Debug, Clone, Default)]
pub struct SideTables {
    /// Image captions by page
    pub images: PageIndex<ImageCaptionRecord>,

    /// Normalized table sentences by page
    pub tables: PageIndex<NormalizedTableRecord>,
}

impl SideTables {
    /// Create empty side tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both side tables from upstream records.
    pub fn build(
        images: Vec<ImageCaptionRecord>,
        tables: Vec<NormalizedTableRecord>,
    ) -> Result<Self> {
        Ok(Self {
            images: PageIndex::build(images)?,
            tables: PageIndex::build(tables)?,
        })
    }
}
