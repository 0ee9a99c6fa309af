//! File-format dispatch for local ingestion
//!
//! Extraction is resolved over a closed set of format kinds derived from
//! the file extension. Format-specific parsing (PDF, Office formats) is an
//! external collaborator concern: implementations of [`TextExtractor`] are
//! registered per kind, and unregistered kinds produce an explicit
//! [`ExtractError::NoExtractor`] instead of a fallthrough panic. Plain
//! text, markdown, and HTML extractors are built in.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::extract::html::extract_page;
use crate::extract::ocr::{OcrBackend, OcrPayload};

use thiserror::Error;

/// Errors that can occur during text extraction
///
/// These never escape a batch: the loader wraps each into an error record
/// for the file that failed.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file type detected for file: {0}")]
    MissingExtension(String),

    #[error("No extractor registered for {kind} files: {message}")]
    NoExtractor { kind: FileKind, message: String },

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Extraction failed: {0}")]
    Parse(String),
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Closed set of file formats the loader recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Doc,
    Xlsx,
    Txt,
    Md,
    Pptx,
    Html,
    Image,
    Unsupported,
}

impl FileKind {
    /// Resolves the format kind from a file path's extension
    pub fn from_path(path: &Path) -> ExtractResult<FileKind> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| ExtractError::MissingExtension(path.display().to_string()))?;

        Ok(match ext.as_str() {
            "pdf" => FileKind::Pdf,
            "doc" | "docx" => FileKind::Doc,
            "xlsx" | "xls" => FileKind::Xlsx,
            "txt" => FileKind::Txt,
            "md" => FileKind::Md,
            "pptx" | "ppt" => FileKind::Pptx,
            "html" => FileKind::Html,
            "png" | "jpg" | "jpeg" => FileKind::Image,
            _ => FileKind::Unsupported,
        })
    }

    /// Whether an OCR backend can process this kind, and with which payload
    fn ocr_payload<'a>(&self, path: &'a Path) -> Option<OcrPayload<'a>> {
        match self {
            FileKind::Pdf | FileKind::Pptx => Some(OcrPayload::Document { path }),
            FileKind::Image => Some(OcrPayload::Image { path }),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::Pdf => "PDF",
            FileKind::Doc => "Word",
            FileKind::Xlsx => "Excel",
            FileKind::Txt => "text",
            FileKind::Md => "markdown",
            FileKind::Pptx => "PowerPoint",
            FileKind::Html => "HTML",
            FileKind::Image => "image",
            FileKind::Unsupported => "unsupported",
        };
        write!(f, "{}", name)
    }
}

/// Format-specific text extraction collaborator
///
/// Given a file path, return the extracted plain text or a structured
/// failure. Implementations for PDF/Office formats live outside this crate
/// and are registered on the [`ExtractorRegistry`].
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> ExtractResult<String>;
}

/// Reads the file verbatim; used for plain text and markdown
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Extracts visible text from a local HTML file
///
/// Uses the same visible-text walk as the web crawler, with hrefs appended
/// as written since there is no base URL to resolve against.
struct HtmlFileExtractor;

impl TextExtractor for HtmlFileExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<String> {
        let html = std::fs::read_to_string(path)?;
        Ok(extract_page(&html, None).text)
    }
}

/// Registry mapping format kinds to extractors
///
/// Built-ins cover txt/md/html. An OCR backend, when set, takes precedence
/// for PDF, presentation, and image files; without one, PDF falls back to
/// whatever static extractor is registered and image/presentation files
/// are unsupported.
pub struct ExtractorRegistry {
    extractors: HashMap<FileKind, Box<dyn TextExtractor>>,
    ocr: Option<Box<dyn OcrBackend>>,
}

impl ExtractorRegistry {
    /// Creates a registry with the built-in extractors
    pub fn new() -> Self {
        let mut extractors: HashMap<FileKind, Box<dyn TextExtractor>> = HashMap::new();
        extractors.insert(FileKind::Txt, Box::new(PlainTextExtractor));
        extractors.insert(FileKind::Md, Box::new(PlainTextExtractor));
        extractors.insert(FileKind::Html, Box::new(HtmlFileExtractor));
        Self {
            extractors,
            ocr: None,
        }
    }

    /// Registers (or replaces) the extractor for a format kind
    pub fn register(&mut self, kind: FileKind, extractor: Box<dyn TextExtractor>) {
        self.extractors.insert(kind, extractor);
    }

    /// Sets the OCR backend
    pub fn set_ocr_backend(&mut self, backend: Box<dyn OcrBackend>) {
        self.ocr = Some(backend);
    }

    /// Whether an OCR backend is configured
    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// Extracts plain text from a local file
    ///
    /// Dispatch order: OCR backend for OCR-capable kinds when configured,
    /// then the registered extractor for the kind, then an explicit
    /// no-extractor failure.
    pub async fn extract(&self, path: &Path) -> ExtractResult<String> {
        let kind = FileKind::from_path(path)?;

        if let (Some(ocr), Some(payload)) = (self.ocr.as_ref(), kind.ocr_payload(path)) {
            return ocr.process(payload).await;
        }

        if let Some(extractor) = self.extractors.get(&kind) {
            return extractor.extract(path);
        }

        let message = match kind {
            FileKind::Image | FileKind::Pptx => {
                "only supported with an OCR backend configured".to_string()
            }
            FileKind::Unsupported => "unrecognized file extension".to_string(),
            _ => "register a format extractor or configure OCR".to_string(),
        };
        Err(ExtractError::NoExtractor { kind, message })
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
