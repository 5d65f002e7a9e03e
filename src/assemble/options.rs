//! Assembly options and configuration.

/// Title given to content that appears before the first title element.
pub const DEFAULT_INTRO_TITLE: &str = "Document Introduction";

/// Prefix of content lines built from image captions.
pub const DEFAULT_IMAGE_PREFIX: &str = "[Image Description]: ";

/// Prefix of content lines built from normalized table text.
pub const DEFAULT_TABLE_PREFIX: &str = "[Table Information]: ";

/// Options for chunk assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Title of the synthetic chunk holding content before the first title
    pub intro_title: String,

    /// Prefix prepended to each image caption line
    pub image_prefix: String,

    /// Prefix prepended to each table line
    pub table_prefix: String,

    /// How long an attached image or table stays attached
    pub attachment_scope: AttachmentScope,
}

impl AssembleOptions {
    /// Create new assembly options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the introduction chunk title.
    pub fn with_intro_title(mut self, title: impl Into<String>) -> Self {
        self.intro_title = title.into();
        self
    }

    /// Set the image line prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    /// Set the table line prefix.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the attachment scope.
    pub fn with_attachment_scope(mut self, scope: AttachmentScope) -> Self {
        self.attachment_scope = scope;
        self
    }

    /// Attach each image and table to at most one chunk in the document.
    pub fn document_scope(self) -> Self {
        self.with_attachment_scope(AttachmentScope::Document)
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            intro_title: DEFAULT_INTRO_TITLE.to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            attachment_scope: AttachmentScope::PerChunk,
        }
    }
}

/// Scope of image and table deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentScope {
    /// Tracking resets at every title: a record whose page is visited again
    /// by a later chunk is attached again
    #[default]
    PerChunk,
    /// A record attaches to the first chunk that visits its page only
    Document,
}
