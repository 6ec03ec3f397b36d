//! Retrieval pipeline construction.
//!
//! A search request is compiled into a [`Pipeline`]: an ordered list of
//! stages the document store interprets. Vector and text retrieval produce
//! different stage sequences over the same shared filter set; hybrid search
//! is orchestrated one level up by building both single-mode pipelines.

pub mod builder;
pub mod filter;
pub mod stage;

pub use builder::build_pipeline;
pub use filter::{FilterSet, Predicate};
pub use stage::{
    CANDIDATE_MULTIPLIER, DEFAULT_MAX_EDITS, DISPLAY_FIELDS, EMBEDDING_PATH, Pipeline,
    PipelineStage, TEXT_INDEX_NAME, TEXT_SEARCH_PATHS, VECTOR_INDEX_NAME,
};
