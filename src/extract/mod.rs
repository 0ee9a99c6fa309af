//! Text extraction from heterogeneous sources
//!
//! This module covers the two extraction paths the loader needs:
//! - visible-text extraction from rendered HTML (web pages and local
//!   HTML files), preserving anchor targets in the text stream
//! - format-dispatched extraction for local files, with an OCR seam for
//!   scanned documents and images

mod file;
mod html;
mod ocr;

pub use file::{ExtractError, ExtractResult, ExtractorRegistry, FileKind, TextExtractor};
pub use html::{extract_page, ExtractedPage};
pub use ocr::{OcrBackend, OcrPayload};
