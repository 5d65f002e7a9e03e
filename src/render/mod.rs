//! Rendering module for writing chunk records.

mod json;
mod text;

pub use json::{from_json, to_json, to_writer, JsonFormat};
pub use text::{format_pages, to_text};
