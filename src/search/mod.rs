//! Search core: score normalization and hybrid fusion.
//!
//! Vector and text retrieval produce scores on disjoint scales. Hybrid
//! search rescales each result set onto [0, 1] with min-max normalization,
//! then merges by document identity with a weighted linear combination and
//! returns one globally ordered list.

pub mod hybrid;
pub mod normalizer;

pub use hybrid::{HybridSearchConfig, HybridSearcher};
pub use normalizer::{NormalizedMatch, ScoreNormalizer, SCORE_EPSILON};
