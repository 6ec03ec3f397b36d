//! Document store boundary.
//!
//! The search core talks to persistence exclusively through the
//! [`DocumentStore`] trait: one aggregation entry point that executes a
//! compiled [`Pipeline`](crate::pipeline::Pipeline) plus the four document
//! CRUD operations. [`MemoryDocumentStore`] is the bundled reference
//! implementation; production deployments adapt an external store behind
//! the same trait.

pub mod memory;

pub use memory::MemoryDocumentStore;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::MovieDocument;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// A document returned by a retrieval stage together with its raw score.
///
/// Raw scores are in the native scale of the retrieval mode that produced
/// them and are not comparable across modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatch {
    /// The matched document.
    pub document: MovieDocument,
    /// Mode-native relevance score.
    pub score: f32,
}

impl RawMatch {
    /// Create a new raw match.
    pub fn new(document: MovieDocument, score: f32) -> Self {
        RawMatch { document, score }
    }

    /// Document identity, nil when the document has none.
    pub fn id(&self) -> Uuid {
        self.document.id.unwrap_or(Uuid::nil())
    }
}

/// Partial field update applied by [`DocumentStore::update_one`].
///
/// Built by the service layer, which recomputes the embedding whenever the
/// full plot changes.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New full plot, if changing.
    pub fullplot: Option<String>,
    /// New embedding, present exactly when `fullplot` is.
    pub embedding: Option<Vec<f32>>,
}

impl DocumentPatch {
    /// Whether the patch contains no fields.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.fullplot.is_none() && self.embedding.is_none()
    }
}

/// Storage collaborator consumed by the search core.
///
/// `aggregate` returns matches in store-defined order; the core trusts the
/// store's own per-mode ranking but assumes nothing beyond it.
pub trait DocumentStore: Send + Sync {
    /// Execute a retrieval pipeline and return the raw matches.
    fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<RawMatch>>;

    /// Fetch a document by identity.
    fn find_one(&self, id: Uuid) -> Result<Option<MovieDocument>>;

    /// Insert a document, assigning an identity when it has none. Returns
    /// the identity.
    fn insert_one(&self, document: MovieDocument) -> Result<Uuid>;

    /// Apply a partial update. Returns the number of matched documents
    /// (0 or 1).
    fn update_one(&self, id: Uuid, patch: &DocumentPatch) -> Result<u64>;

    /// Delete a document. Returns the number of deleted documents (0 or 1).
    fn delete_one(&self, id: Uuid) -> Result<u64>;
}
