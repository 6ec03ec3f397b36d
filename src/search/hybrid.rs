//! Hybrid search orchestration and result fusion.

use std::cmp::Ordering;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::document::MovieDocument;
use crate::error::Result;
use crate::pipeline::build_pipeline;
use crate::request::{RankedResult, SearchMode, SearchRequest};
use crate::search::normalizer::{NormalizedMatch, ScoreNormalizer};
use crate::store::DocumentStore;

/// Configuration for hybrid search score fusion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HybridSearchConfig {
    /// Weight for normalized vector scores.
    pub vector_weight: f32,
    /// Weight for normalized text scores.
    pub text_weight: f32,
}

impl Default for HybridSearchConfig {
    fn default() -> Self {
        Self {
            vector_weight: 0.6,
            text_weight: 0.4,
        }
    }
}

/// A document with its combined weighted score, accumulated across the two
/// merge passes.
#[derive(Debug, Clone)]
struct MergedMatch {
    document: MovieDocument,
    score: f32,
}

/// Orchestrates the two retrieval legs of a hybrid search and fuses their
/// rankings.
#[derive(Debug, Clone)]
pub struct HybridSearcher {
    config: HybridSearchConfig,
    normalizer: ScoreNormalizer,
}

impl Default for HybridSearcher {
    fn default() -> Self {
        Self::new(HybridSearchConfig::default())
    }
}

impl HybridSearcher {
    /// Create a searcher with the given fusion weights.
    pub fn new(config: HybridSearchConfig) -> Self {
        Self {
            config,
            normalizer: ScoreNormalizer::new(),
        }
    }

    /// Run a hybrid search: build and execute both single-mode pipelines
    /// from the same request, normalize each result set, merge by document
    /// identity and return the top K.
    ///
    /// A failure in either leg aborts the whole search; there are no
    /// partial hybrid results.
    pub async fn search<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
        request: &SearchRequest,
        embedding: &[f32],
    ) -> Result<Vec<RankedResult>> {
        let vector_request = request.clone().with_mode(SearchMode::Vector);
        let text_request = request.clone().with_mode(SearchMode::Text);

        let vector_pipeline = build_pipeline(&vector_request, embedding)?;
        let text_pipeline = build_pipeline(&text_request, embedding)?;

        let vector_results = store.aggregate(&vector_pipeline)?;
        let text_results = store.aggregate(&text_pipeline)?;
        debug!(
            vector_matches = vector_results.len(),
            text_matches = text_results.len(),
            "hybrid legs retrieved"
        );

        let vector_normalized = self.normalizer.normalize(&vector_results);
        let text_normalized = self.normalizer.normalize(&text_results);

        Ok(self.merge(vector_normalized, text_normalized, request.top_k))
    }

    /// Merge two normalized result sets into one ranked list.
    ///
    /// The vector pass inserts entries scaled by the vector weight; the
    /// text pass adds its weighted score to existing entries or inserts new
    /// ones. Display fields come from whichever source inserted the entry
    /// first, so a document present in both sets keeps its vector-sourced
    /// fields. The accumulator preserves encounter order and the final sort
    /// is stable, making tie-breaks deterministic.
    pub fn merge(
        &self,
        vector_matches: Vec<NormalizedMatch>,
        text_matches: Vec<NormalizedMatch>,
        top_k: usize,
    ) -> Vec<RankedResult> {
        let mut merged: Vec<MergedMatch> = Vec::new();
        let mut slots: AHashMap<Uuid, usize> = AHashMap::new();

        for m in vector_matches {
            let id = m.document.id.unwrap_or(Uuid::nil());
            slots.insert(id, merged.len());
            merged.push(MergedMatch {
                document: m.document,
                score: m.score * self.config.vector_weight,
            });
        }

        for m in text_matches {
            let id = m.document.id.unwrap_or(Uuid::nil());
            let weighted = m.score * self.config.text_weight;
            if let Some(&slot) = slots.get(&id) {
                merged[slot].score += weighted;
            } else {
                slots.insert(id, merged.len());
                merged.push(MergedMatch {
                    document: m.document,
                    score: weighted,
                });
            }
        }

        merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        merged.truncate(top_k);

        merged
            .into_iter()
            .map(|m| RankedResult::from_document(&m.document, m.score))
            .collect()
    }
}
