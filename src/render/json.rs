//! JSON rendering for chunk records.

use crate::error::{Error, Result};
use crate::model::ChunkRecord;
use std::io::Write;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert chunk records to a JSON array.
pub fn to_json(chunks: &[ChunkRecord], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(chunks),
        JsonFormat::Compact => serde_json::to_string(chunks),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write chunk records as a JSON array.
pub fn to_writer<W: Write>(mut writer: W, chunks: &[ChunkRecord], format: JsonFormat) -> Result<()> {
    let json = to_json(chunks, format)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Parse chunk records back from a JSON array.
pub fn from_json(json: &str) -> Result<Vec<ChunkRecord>> {
    Ok(serde_json::from_str(json)?)
}
