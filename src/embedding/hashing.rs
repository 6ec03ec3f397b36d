//! Feature-hashing embedder.

use serde::{Deserialize, Serialize};

use crate::analysis::tokenize;
use crate::embedding::Embedder;
use crate::error::{CinedexError, Result};

/// Configuration for embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Output vector dimension.
    pub dimension: usize,
    /// Whether to L2-normalize embeddings.
    pub normalize: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: 384,
            normalize: true,
        }
    }
}

/// A bag-of-words embedder using the hashing trick.
///
/// Each token is mapped to a bucket by its CRC32 checksum, which makes the
/// output deterministic across processes and machines without a vocabulary
/// or training step. Texts sharing terms land in shared buckets and score
/// high under dot-product similarity.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    config: EmbeddingConfig,
}

impl HashingEmbedder {
    /// Create a new embedder with the given configuration.
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        if config.dimension == 0 {
            return Err(CinedexError::invalid_argument(
                "embedding dimension must be positive",
            ));
        }
        Ok(Self { config })
    }

    /// Create a new embedder with the default configuration.
    pub fn new_default() -> Self {
        Self {
            config: EmbeddingConfig::default(),
        }
    }

    fn bucket(&self, token: &str) -> usize {
        crc32fast::hash(token.as_bytes()) as usize % self.config.dimension
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.config.dimension];
        for token in tokenize(text) {
            vector[self.bucket(&token)] += 1.0;
        }

        if self.config.normalize {
            let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                for v in vector.iter_mut() {
                    *v /= norm;
                }
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}
