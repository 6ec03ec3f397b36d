//! Movie service: search dispatch and document CRUD.
//!
//! [`MovieService`] owns the collaborator handles (document store,
//! embedder) and exposes the public operations. Collaborators are passed in
//! at construction rather than referenced as ambient globals, so tests can
//! substitute counting or failing doubles.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::document::{MovieCreate, MovieDocument, MovieUpdate};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::pipeline::build_pipeline;
use crate::request::{RankedResult, SearchMode, SearchRequest};
use crate::search::{HybridSearchConfig, HybridSearcher};
use crate::store::{DocumentPatch, DocumentStore};

/// Service layer over the document store and embedding collaborators.
pub struct MovieService<S: DocumentStore, E: Embedder> {
    store: Arc<S>,
    embedder: Arc<E>,
    hybrid: HybridSearcher,
}

impl<S: DocumentStore, E: Embedder> MovieService<S, E> {
    /// Create a service with default hybrid fusion weights.
    pub fn new(store: Arc<S>, embedder: Arc<E>) -> Self {
        Self::with_config(store, embedder, HybridSearchConfig::default())
    }

    /// Create a service with explicit hybrid fusion weights.
    pub fn with_config(store: Arc<S>, embedder: Arc<E>, config: HybridSearchConfig) -> Self {
        Self {
            store,
            embedder,
            hybrid: HybridSearcher::new(config),
        }
    }

    /// The underlying document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute a search request and return the ranked results, capped at
    /// the requested K.
    ///
    /// The query embedding is computed once per search regardless of mode;
    /// single-mode searches return the store's mode-native scores
    /// unmodified, only hybrid search normalizes. An empty result list is a
    /// valid outcome, not an error.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<RankedResult>> {
        request.validate()?;
        debug!(query = %request.query, mode = %request.mode, top_k = request.top_k, "search");

        let embedding = self.embedder.embed(&request.query)?;

        match request.mode {
            SearchMode::Hybrid => {
                self.hybrid
                    .search(self.store.as_ref(), request, &embedding)
                    .await
            }
            SearchMode::Vector | SearchMode::Text => {
                let pipeline = build_pipeline(request, &embedding)?;
                let matches = self.store.aggregate(&pipeline)?;
                Ok(matches
                    .into_iter()
                    .map(|m| RankedResult::from_document(&m.document, m.score))
                    .collect())
            }
        }
    }

    /// Create a movie document, embedding its full plot. Returns the new
    /// identity.
    pub fn create_movie(&self, movie: MovieCreate) -> Result<Uuid> {
        let embedding = self.embedder.embed(&movie.fullplot)?;
        let document =
            MovieDocument::new(movie.title, movie.fullplot).with_embedding(embedding);
        let id = self.store.insert_one(document)?;
        debug!(%id, "movie created");
        Ok(id)
    }

    /// Fetch a movie document by identity.
    pub fn get_movie(&self, id: Uuid) -> Result<Option<MovieDocument>> {
        self.store.find_one(id)
    }

    /// Apply a partial update. When the full plot changes, its embedding is
    /// regenerated. Returns whether a document matched the identity.
    pub fn update_movie(&self, id: Uuid, update: MovieUpdate) -> Result<bool> {
        let embedding = match &update.fullplot {
            Some(fullplot) => Some(self.embedder.embed(fullplot)?),
            None => None,
        };
        let patch = DocumentPatch {
            title: update.title,
            fullplot: update.fullplot,
            embedding,
        };
        let matched = self.store.update_one(id, &patch)?;
        Ok(matched > 0)
    }

    /// Delete a movie document. Returns whether a document was deleted.
    pub fn delete_movie(&self, id: Uuid) -> Result<bool> {
        let deleted = self.store.delete_one(id)?;
        Ok(deleted > 0)
    }
}
