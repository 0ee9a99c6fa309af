//! The document record entity
//!
//! A [`DocumentRecord`] is the unit of crawled or loaded content: one record
//! per discovered URL, local file, or inline text, plus one record per chunk
//! after splitting. Records are created through the constructors here, which
//! keep the error/content invariants intact:
//!
//! - `is_error` is true exactly when `error_message` is present
//! - `content` is `None` exactly when `is_error` is true
//! - chunk records always carry content and derive their id from the parent

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provenance category of a record, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Web,
    File,
    Text,
}

/// Unit of crawled/loaded content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique identifier, stable across chunking (chunk ids derive from it)
    pub id: String,

    /// Origin locator: URL, file path, or the literal `"text"`
    pub source: String,

    /// Extracted plain text; absent exactly when extraction failed
    pub content: Option<String>,

    /// Auxiliary attributes, at minimum `title` and `source` for web/file records
    pub metadata: BTreeMap<String, String>,

    /// Whether this record is a post-chunking fragment of a larger document
    pub is_chunk: bool,

    /// Whether extraction failed for this record
    pub is_error: bool,

    /// Human-readable failure description, present exactly when `is_error`
    pub error_message: Option<String>,

    /// Provenance category
    pub source_type: SourceType,
}

impl DocumentRecord {
    /// Creates a successfully extracted record
    pub fn success(
        id: impl Into<String>,
        source: impl Into<String>,
        content: impl Into<String>,
        metadata: BTreeMap<String, String>,
        source_type: SourceType,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            content: Some(content.into()),
            metadata,
            is_chunk: false,
            is_error: false,
            error_message: None,
            source_type,
        }
    }

    /// Creates an error record for a failed extraction
    ///
    /// Error records carry no content; the title metadata falls back to the
    /// source locator so failures stay identifiable downstream.
    pub fn failure(
        id: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
        source_type: SourceType,
        error_message: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let mut metadata = BTreeMap::new();
        metadata.insert("title".to_string(), title.into());
        metadata.insert("source".to_string(), source.clone());
        Self {
            id: id.into(),
            source,
            content: None,
            metadata,
            is_chunk: false,
            is_error: true,
            error_message: Some(error_message.into()),
            source_type,
        }
    }

    /// Creates a chunk record derived from a parent record
    ///
    /// Chunk ids are `{parent_id}_{index}` with a 0-based, contiguous index.
    /// Source, metadata, and source type are carried over from the parent.
    pub fn chunk_of(parent: &DocumentRecord, index: usize, text: impl Into<String>) -> Self {
        Self {
            id: format!("{}_{}", parent.id, index),
            source: parent.source.clone(),
            content: Some(text.into()),
            metadata: parent.metadata.clone(),
            is_chunk: true,
            is_error: false,
            error_message: None,
            source_type: parent.source_type,
        }
    }

    /// Whether this record carries usable content
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// The record title, falling back to the source locator
    pub fn title(&self) -> &str {
        self.metadata
            .get("title")
            .map(String::as_str)
            .unwrap_or(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str, source: &str) -> BTreeMap<String, String> {
        let mut m = BTreeMap::new();
        m.insert("title".to_string(), title.to_string());
        m.insert("source".to_string(), source.to_string());
        m
    }

    #[test]
    fn test_success_record_invariants() {
        let record = DocumentRecord::success(
            "doc1",
            "https://example.com",
            "body text",
            metadata("Example", "https://example.com"),
            SourceType::Web,
        );

        assert!(!record.is_error);
        assert!(record.error_message.is_none());
        assert_eq!(record.content.as_deref(), Some("body text"));
        assert!(!record.is_chunk);
        assert_eq!(record.title(), "Example");
    }

    #[test]
    fn test_failure_record_invariants() {
        let record = DocumentRecord::failure(
            "doc2",
            "https://example.com/missing",
            "https://example.com/missing",
            SourceType::Web,
            "connection refused",
        );

        assert!(record.is_error);
        assert_eq!(record.error_message.as_deref(), Some("connection refused"));
        assert!(record.content.is_none());
        assert!(!record.has_content());
        // Error records still carry source metadata for inspection
        assert_eq!(
            record.metadata.get("source").map(String::as_str),
            Some("https://example.com/missing")
        );
    }

    #[test]
    fn test_chunk_ids_derive_from_parent() {
        let parent = DocumentRecord::success(
            "doc1",
            "https://example.com",
            "long text",
            metadata("Example", "https://example.com"),
            SourceType::Web,
        );

        let chunks: Vec<DocumentRecord> = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, text)| DocumentRecord::chunk_of(&parent, i, *text))
            .collect();

        let ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["doc1_0", "doc1_1", "doc1_2"]);

        for chunk in &chunks {
            assert!(chunk.is_chunk);
            assert!(!chunk.is_error);
            assert!(chunk.content.is_some());
            assert_eq!(chunk.source, parent.source);
            assert_eq!(chunk.source_type, parent.source_type);
            assert_eq!(chunk.metadata, parent.metadata);
        }
    }

    #[test]
    fn test_title_falls_back_to_source() {
        let record = DocumentRecord::success(
            "doc3",
            "text",
            "inline text",
            BTreeMap::new(),
            SourceType::Text,
        );
        assert_eq!(record.title(), "text");
    }

    #[test]
    fn test_serde_round_trip() {
        let record = DocumentRecord::failure(
            "doc4",
            "/tmp/report.xyz",
            "report.xyz",
            SourceType::File,
            "unsupported file type",
        );

        let json = serde_json::to_string(&record).unwrap();
        let back: DocumentRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, record.id);
        assert_eq!(back.source_type, SourceType::File);
        assert!(back.is_error);
        assert_eq!(back.error_message, record.error_message);
    }
}
