//! Pipeline stage types.

use serde::{Deserialize, Serialize};

use crate::pipeline::filter::FilterSet;

/// Name of the vector search index.
pub const VECTOR_INDEX_NAME: &str = "vector_index";

/// Name of the lexical search index.
pub const TEXT_INDEX_NAME: &str = "default";

/// Document field holding the plot embedding.
pub const EMBEDDING_PATH: &str = "embedding";

/// Fields searched by the lexical stage.
pub const TEXT_SEARCH_PATHS: &[&str] = &["fullplot", "genres", "title"];

/// Fields projected into search results.
pub const DISPLAY_FIELDS: &[&str] = &[
    "id", "title", "fullplot", "writers", "cast", "rated", "genres", "year",
];

/// Over-fetch factor for the vector candidate pool relative to the
/// requested result count, trading recall against cost.
pub const CANDIDATE_MULTIPLIER: usize = 20;

/// Default fuzzy edit budget for lexical matching.
pub const DEFAULT_MAX_EDITS: u32 = 2;

/// A single stage of a retrieval pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Nearest-neighbor search over the embedding field, restricted by the
    /// filter set, producing a similarity score per result.
    VectorSearch {
        /// Search index to use.
        index: String,
        /// Document field holding the embeddings.
        path: String,
        /// Pre-filter applied during the candidate scan.
        filter: FilterSet,
        /// Query embedding.
        query_vector: Vec<f32>,
        /// Candidate pool size.
        num_candidates: usize,
        /// Maximum number of results produced by this stage.
        limit: usize,
    },
    /// Fuzzy lexical search over text fields, producing a relevance score
    /// per result.
    TextSearch {
        /// Search index to use.
        index: String,
        /// Query text.
        query: String,
        /// Fields to search.
        paths: Vec<String>,
        /// Maximum edit distance for fuzzy term matching.
        max_edits: u32,
    },
    /// Keep only documents matching the filter set. Never emitted with an
    /// empty set.
    Match(FilterSet),
    /// Restrict result documents to the named fields plus their score.
    Project {
        /// Fields to retain.
        fields: Vec<String>,
    },
    /// Truncate the result sequence.
    Limit(usize),
}

impl PipelineStage {
    /// Stage name, for logging and structural assertions.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::VectorSearch { .. } => "vector_search",
            PipelineStage::TextSearch { .. } => "text_search",
            PipelineStage::Match(_) => "match",
            PipelineStage::Project { .. } => "project",
            PipelineStage::Limit(_) => "limit",
        }
    }
}

/// An ordered sequence of pipeline stages for one retrieval mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    stages: Vec<PipelineStage>,
}

impl Pipeline {
    /// Create a pipeline from its stages.
    pub fn new(stages: Vec<PipelineStage>) -> Self {
        Pipeline { stages }
    }

    /// The stages in execution order.
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Whether the pipeline contains a `Match` stage.
    pub fn has_match_stage(&self) -> bool {
        self.stages
            .iter()
            .any(|s| matches!(s, PipelineStage::Match(_)))
    }
}
