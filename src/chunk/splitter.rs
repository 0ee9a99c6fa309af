//! Token-aware chunking of loaded documents
//!
//! Splits document text into overlapping windows measured in cl100k_base
//! tokens. Records that are already chunks pass through untouched, and
//! error records are skipped, so the operation is safe to run on a mixed
//! batch and idempotent over its own output.

use text_splitter::{ChunkConfig, TextSplitter};
use tiktoken_rs::{cl100k_base, CoreBPE};
use tracing::{debug, info};

use crate::document::DocumentRecord;
use crate::{LoaderError, Result};

/// A chunk ready for downstream indexing, stripped to text and origin
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    pub content: String,
    pub source: String,
}

/// Result of a chunking pass
///
/// `records` holds every surviving record (fresh chunks plus passthrough
/// ones); `documents` holds the same chunks in indexing form.
#[derive(Debug, Default)]
pub struct ChunkOutcome {
    pub records: Vec<DocumentRecord>,
    pub documents: Vec<IndexDocument>,
}

/// Token-window text splitter
pub struct Chunker {
    splitter: TextSplitter<CoreBPE>,
}

impl Chunker {
    /// Creates a chunker targeting `chunk_size` tokens per chunk with
    /// `chunk_overlap` tokens shared between neighbours
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let sizer = cl100k_base().map_err(|e| LoaderError::Chunker(e.to_string()))?;
        let config = ChunkConfig::new(chunk_size)
            .with_sizer(sizer)
            .with_overlap(chunk_overlap)
            .map_err(|e| LoaderError::Chunker(e.to_string()))?;
        Ok(Self {
            splitter: TextSplitter::new(config),
        })
    }

    /// Chunks every unchunked record in the batch
    ///
    /// Error records and records without content are dropped with a log
    /// line. Chunk ids are `{parent_id}_{index}` with indices starting
    /// at zero.
    pub fn chunk(&self, records: &[DocumentRecord]) -> ChunkOutcome {
        let mut outcome = ChunkOutcome::default();

        for record in records {
            if record.is_error || record.content.is_none() {
                debug!(id = %record.id, "skipping record without usable content");
                continue;
            }
            if record.is_chunk {
                outcome.records.push(record.clone());
                continue;
            }

            let content = record.content.as_deref().unwrap_or_default();
            for (index, piece) in self.splitter.chunks(content).enumerate() {
                outcome
                    .records
                    .push(DocumentRecord::chunk_of(record, index, piece.to_string()));
                outcome.documents.push(IndexDocument {
                    content: piece.to_string(),
                    source: record.source.clone(),
                });
            }
        }

        info!(
            input = records.len(),
            chunks = outcome.records.len(),
            "chunking complete"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceType;
    use std::collections::BTreeMap;

    fn create_chunker() -> Chunker {
        Chunker::new(50, 10).unwrap()
    }

    fn record(id: &str, content: &str) -> DocumentRecord {
        DocumentRecord::success(
            id.to_string(),
            format!("https://example.com/{id}"),
            content.to_string(),
            BTreeMap::new(),
            SourceType::Web,
        )
    }

    fn long_text() -> String {
        "The quick brown fox jumps over the lazy dog. ".repeat(60)
    }

    #[test]
    fn test_rejects_overlap_beyond_chunk_size() {
        assert!(Chunker::new(10, 20).is_err());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunker = create_chunker();
        let outcome = chunker.chunk(&[record("doc1", "short content")]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "doc1_0");
        assert!(outcome.records[0].is_chunk);
        assert_eq!(
            outcome.documents,
            vec![IndexDocument {
                content: "short content".to_string(),
                source: "https://example.com/doc1".to_string(),
            }]
        );
    }

    #[test]
    fn test_long_text_contiguous_chunk_ids() {
        let chunker = create_chunker();
        let outcome = chunker.chunk(&[record("doc1", &long_text())]);
        assert!(outcome.records.len() > 1);
        for (index, chunk) in outcome.records.iter().enumerate() {
            assert_eq!(chunk.id, format!("doc1_{index}"));
            assert!(chunk.is_chunk);
            assert!(chunk.has_content());
        }
        assert_eq!(outcome.documents.len(), outcome.records.len());
    }

    #[test]
    fn test_error_records_skipped() {
        let chunker = create_chunker();
        let failure = DocumentRecord::failure(
            "bad".to_string(),
            "https://example.com/bad".to_string(),
            "bad".to_string(),
            SourceType::Web,
            "timeout".to_string(),
        );
        let outcome = chunker.chunk(&[failure, record("doc1", "fine")]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "doc1_0");
    }

    #[test]
    fn test_chunking_is_idempotent() {
        let chunker = create_chunker();
        let first = chunker.chunk(&[record("doc1", &long_text())]);
        let second = chunker.chunk(&first.records);
        assert_eq!(second.records.len(), first.records.len());
        for (a, b) in first.records.iter().zip(second.records.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.content, b.content);
        }
        // Passthrough chunks produce no fresh index documents
        assert!(second.documents.is_empty());
    }
}
