//! Bulk ingestion of movie documents.
//!
//! Source records are preprocessed (an empty full plot falls back to the
//! short plot), deduplicated against the target store by identity, embedded
//! and inserted. Records with no usable text are skipped rather than
//! stored without an embedding.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::MovieDocument;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::store::DocumentStore;

/// Counters reported by an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents embedded and inserted.
    pub inserted: usize,
    /// Documents skipped because their identity already exists.
    pub skipped_duplicates: usize,
    /// Documents skipped because they carry no usable plot text.
    pub skipped_empty: usize,
}

impl IngestStats {
    /// Total number of source documents examined.
    pub fn total(&self) -> usize {
        self.inserted + self.skipped_duplicates + self.skipped_empty
    }
}

/// Replace an empty full plot with the short plot where available.
pub fn preprocess_document(mut doc: MovieDocument) -> MovieDocument {
    if doc.fullplot.trim().is_empty() {
        if let Some(plot) = &doc.plot {
            doc.fullplot = plot.clone();
        }
    }
    doc
}

/// Ingest source documents into the target store.
///
/// Stops after `limit` source documents when a limit is given. Returns the
/// run counters; failures from the store or embedder abort the run.
pub fn ingest_documents<S, E, I>(
    store: &S,
    embedder: &E,
    source: I,
    limit: Option<usize>,
) -> Result<IngestStats>
where
    S: DocumentStore,
    E: Embedder,
    I: IntoIterator<Item = MovieDocument>,
{
    let mut stats = IngestStats::default();

    for doc in source {
        if limit.is_some_and(|l| stats.total() >= l) {
            break;
        }

        if let Some(id) = doc.id {
            if store.find_one(id)?.is_some() {
                debug!(%id, title = %doc.title, "skipped duplicate");
                stats.skipped_duplicates += 1;
                continue;
            }
        }

        let doc = preprocess_document(doc);
        if doc.fullplot.trim().is_empty() {
            debug!(title = %doc.title, "skipped document without plot text");
            stats.skipped_empty += 1;
            continue;
        }

        let embedding = embedder.embed(&doc.fullplot)?;
        let id = store.insert_one(doc.with_embedding(embedding))?;
        debug!(%id, "inserted");
        stats.inserted += 1;
    }

    info!(
        inserted = stats.inserted,
        skipped_duplicates = stats.skipped_duplicates,
        skipped_empty = stats.skipped_empty,
        "ingestion finished"
    );
    Ok(stats)
}
