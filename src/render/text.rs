//! Plain text listing of chunk records.

use crate::model::ChunkRecord;

/// Render a readable listing of chunks with truncated text previews.
///
/// `preview_chars` limits each chunk body; 0 omits the body entirely.
pub fn to_text(chunks: &[ChunkRecord], preview_chars: usize) -> String {
    let mut output = String::new();

    for chunk in chunks {
        output.push_str(&format!("[{}] {}\n", chunk.chunk_id, chunk.title));
        output.push_str(&format!("Pages: {}\n", format_pages(&chunk.pages)));
        output.push_str(&format!(
            "Sources: {} text, {} image, {} table\n",
            chunk.sources.text_elements.len(),
            chunk.sources.image_elements.len(),
            chunk.sources.table_elements.len()
        ));
        if preview_chars > 0 && !chunk.text.is_empty() {
            output.push_str(&chunk.preview(preview_chars));
            output.push('\n');
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Format a sorted page list, collapsing consecutive runs (e.g. "1-3, 5").
pub fn format_pages(pages: &[u32]) -> String {
    let mut parts = Vec::new();
    let mut iter = pages.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while end.checked_add(1).is_some_and(|next| iter.peek() == Some(&next)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }

    parts.join(", ")
}
