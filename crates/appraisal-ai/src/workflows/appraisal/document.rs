use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::chunk::TextChunker;
use super::domain::{DocumentAnalysis, EntityCatalog, EntityKind, EntityMention};

/// Fixed vocabulary scanned for in every chunk of appraisal text.
static RISK_KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(damage|leak|crack|mold|fire|hazard|asbestos)\b")
        .expect("hard-coded keyword pattern compiles")
});

/// Failure reported by an entity tagging backend.
#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    #[error("entity tagging backend failed: {0}")]
    Backend(String),
}

/// Entity tagging backend contract. Implementations wrap a pretrained NLP
/// pipeline; the host process loads the model once and shares the handle.
pub trait EntityTagger: Send + Sync {
    fn tag(&self, chunk: &str) -> Result<Vec<EntityMention>, TaggerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentAnalysisError {
    #[error("document text is empty")]
    EmptyText,
    #[error("failed to process text chunk {index}: {source}")]
    Chunk {
        index: usize,
        #[source]
        source: TaggerError,
    },
}

/// Splits extracted text into overlapping chunks and folds per-chunk keyword
/// hits and entity mentions into a single de-duplicated analysis.
pub struct DocumentAnalyzer<T> {
    tagger: Arc<T>,
    chunker: TextChunker,
}

impl<T> DocumentAnalyzer<T>
where
    T: EntityTagger,
{
    pub fn new(tagger: Arc<T>) -> Self {
        Self::with_chunker(tagger, TextChunker::default())
    }

    pub fn with_chunker(tagger: Arc<T>, chunker: TextChunker) -> Self {
        Self { tagger, chunker }
    }

    pub fn analyze(&self, text: &str) -> Result<DocumentAnalysis, DocumentAnalysisError> {
        if text.trim().is_empty() {
            return Err(DocumentAnalysisError::EmptyText);
        }

        let mut risk_keywords = BTreeSet::new();
        let mut entities = EntityCatalog::default();

        for (index, chunk) in self.chunker.split(text).iter().enumerate() {
            for hit in RISK_KEYWORD_PATTERN.find_iter(chunk) {
                risk_keywords.insert(hit.as_str().to_ascii_lowercase());
            }

            let mentions = self
                .tagger
                .tag(chunk)
                .map_err(|source| DocumentAnalysisError::Chunk { index, source })?;
            for EntityMention { kind, text } in mentions {
                match kind {
                    EntityKind::Location => {
                        entities.locations.insert(text);
                    }
                    EntityKind::Date => {
                        entities.dates.insert(text);
                    }
                }
            }
        }

        Ok(DocumentAnalysis {
            risk_keywords,
            entities,
        })
    }
}
