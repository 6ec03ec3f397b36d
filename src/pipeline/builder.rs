//! Pipeline construction from search requests.

use crate::error::{CinedexError, Result};
use crate::pipeline::filter::FilterSet;
use crate::pipeline::stage::{
    CANDIDATE_MULTIPLIER, DEFAULT_MAX_EDITS, DISPLAY_FIELDS, EMBEDDING_PATH, Pipeline,
    PipelineStage, TEXT_INDEX_NAME, TEXT_SEARCH_PATHS, VECTOR_INDEX_NAME,
};
use crate::request::{SearchMode, SearchRequest};

/// Build the retrieval pipeline for a single-mode request.
///
/// Only `vector` and `text` modes compile to a pipeline. Hybrid search runs
/// this builder twice with overridden modes and is rejected here.
pub fn build_pipeline(request: &SearchRequest, embedding: &[f32]) -> Result<Pipeline> {
    let filters = FilterSet::from_request(request);

    match request.mode {
        SearchMode::Vector => Ok(vector_pipeline(request, embedding, filters)),
        SearchMode::Text => Ok(text_pipeline(request, filters)),
        SearchMode::Hybrid => Err(CinedexError::invalid_mode(
            "hybrid does not compile to a single pipeline",
        )),
    }
}

fn vector_pipeline(request: &SearchRequest, embedding: &[f32], filters: FilterSet) -> Pipeline {
    Pipeline::new(vec![
        PipelineStage::VectorSearch {
            index: VECTOR_INDEX_NAME.to_string(),
            path: EMBEDDING_PATH.to_string(),
            filter: filters,
            query_vector: embedding.to_vec(),
            num_candidates: request.top_k * CANDIDATE_MULTIPLIER,
            limit: request.top_k,
        },
        PipelineStage::Project {
            fields: display_fields(),
        },
    ])
}

fn text_pipeline(request: &SearchRequest, filters: FilterSet) -> Pipeline {
    // Optional stages are built as a list and the no-ops dropped; an empty
    // match stage would reject every document and must never be emitted.
    let stages = [
        Some(PipelineStage::TextSearch {
            index: TEXT_INDEX_NAME.to_string(),
            query: request.query.clone(),
            paths: TEXT_SEARCH_PATHS.iter().map(|p| p.to_string()).collect(),
            max_edits: DEFAULT_MAX_EDITS,
        }),
        (!filters.is_empty()).then(|| PipelineStage::Match(filters)),
        Some(PipelineStage::Project {
            fields: display_fields(),
        }),
        Some(PipelineStage::Limit(request.top_k)),
    ];

    Pipeline::new(stages.into_iter().flatten().collect())
}

fn display_fields() -> Vec<String> {
    DISPLAY_FIELDS.iter().map(|f| f.to_string()).collect()
}
