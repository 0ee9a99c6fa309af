//! OCR backend seam
//!
//! Scanned PDFs, presentations, and images need an OCR service to yield
//! text. The service is an external collaborator: implementations take a
//! document or image payload and return per-page text. The backend is
//! injected through configuration (see [`crate::config::OcrConfig`]); when
//! none is configured, PDF extraction falls back to a registered static
//! extractor and image/presentation files are unsupported.

use async_trait::async_trait;
use std::path::Path;

use crate::extract::ExtractError;

/// Payload handed to an OCR backend
#[derive(Debug, Clone, Copy)]
pub enum OcrPayload<'a> {
    /// A multi-page document (PDF, presentation)
    Document { path: &'a Path },

    /// A single raster image
    Image { path: &'a Path },
}

impl OcrPayload<'_> {
    /// The file path behind this payload
    pub fn path(&self) -> &Path {
        match self {
            OcrPayload::Document { path } | OcrPayload::Image { path } => path,
        }
    }
}

/// OCR collaborator interface
///
/// Returns the concatenated per-page text for the payload, or an
/// [`ExtractError::Ocr`] the caller wraps into an error record.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    async fn process(&self, payload: OcrPayload<'_>) -> Result<String, ExtractError>;
}
