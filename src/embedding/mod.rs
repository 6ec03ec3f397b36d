//! Text embedding generation.
//!
//! The search core only depends on the [`Embedder`] trait; production
//! deployments plug in a real sentence-embedding model behind it, while the
//! bundled [`HashingEmbedder`] provides a deterministic, training-free
//! implementation for local use and tests.

pub mod hashing;

pub use hashing::{EmbeddingConfig, HashingEmbedder};

use crate::error::Result;

/// A service that converts text into fixed-length vectors.
///
/// Implementations must be deterministic for identical input text and
/// return unit-length vectors when normalization is enabled, so that the
/// store can rank by plain dot product.
pub trait Embedder: Send + Sync {
    /// Embed the given text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output vector dimension.
    fn dimension(&self) -> usize;
}
