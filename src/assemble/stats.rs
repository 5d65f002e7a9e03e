//! Assembly statistics.

use serde::{Deserialize, Serialize};

/// Counters collected during one assembly pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Number of chunks produced
    pub chunk_count: usize,

    /// Number of text elements consumed
    pub element_count: usize,

    /// Number of title elements (chunk boundaries)
    pub title_count: usize,

    /// Number of narrative content lines added
    pub text_line_count: usize,

    /// Number of non-title elements with blank text
    pub empty_text_count: usize,

    /// Number of image lines added
    pub image_attachments: usize,

    /// Number of table lines added
    pub table_attachments: usize,

    /// Image records never attached to any chunk
    pub unattached_images: usize,

    /// Table records never attached to any chunk
    pub unattached_tables: usize,
}

impl AssemblyStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any side-table record was left unattached.
    pub fn has_orphans(&self) -> bool {
        self.unattached_images > 0 || self.unattached_tables > 0
    }

    /// Get the total number of content lines across all chunks.
    pub fn content_line_count(&self) -> usize {
        self.text_line_count + self.image_attachments + self.table_attachments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphans() {
        let mut stats = AssemblyStats::new();
        assert!(!stats.has_orphans());
        stats.unattached_tables = 1;
        assert!(stats.has_orphans());
    }

    #[test]
    fn test_content_line_count() {
        let stats = AssemblyStats {
            text_line_count: 4,
            image_attachments: 2,
            table_attachments: 1,
            ..Default::default()
        };
        assert_eq!(stats.content_line_count(), 7);
    }
}
