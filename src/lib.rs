//! # Cinedex
//!
//! A hybrid vector and full-text search engine for movie documents.
//!
//! ## Features
//!
//! - Semantic (vector), lexical (text) and hybrid search modes
//! - Weighted score fusion with min-max normalization
//! - Declarative retrieval pipelines with filters and projections
//! - Pluggable document store and embedding backends
//! - Bulk ingestion with preprocessing and duplicate detection

pub mod analysis;
pub mod cli;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod request;
pub mod search;
pub mod service;
pub mod store;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
