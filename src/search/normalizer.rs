//! Min-max score normalization.

use crate::document::MovieDocument;
use crate::store::RawMatch;

/// Added to the min-max range to guard the division when every raw score
/// in a result set is equal.
pub const SCORE_EPSILON: f32 = 1e-6;

/// A document with its score rescaled to [0, 1] relative to its own result
/// set.
#[derive(Debug, Clone)]
pub struct NormalizedMatch {
    /// The matched document.
    pub document: MovieDocument,
    /// Normalized score in [0, 1].
    pub score: f32,
}

/// Min-max normalizer for raw result-set scores.
///
/// Pure: no side effects, no external calls, input order preserved.
#[derive(Debug, Clone)]
pub struct ScoreNormalizer {
    epsilon: f32,
}

impl Default for ScoreNormalizer {
    fn default() -> Self {
        Self {
            epsilon: SCORE_EPSILON,
        }
    }
}

impl ScoreNormalizer {
    /// Create a normalizer with the default epsilon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescale each match's score to `(raw - min) / (max - min + epsilon)`
    /// with min/max taken over the whole input set.
    ///
    /// An empty input yields an empty output. When all raw scores are equal
    /// the numerator is zero for every match, so every normalized score is
    /// exactly 0 — a direct consequence of the formula, kept as is.
    pub fn normalize(&self, matches: &[RawMatch]) -> Vec<NormalizedMatch> {
        if matches.is_empty() {
            return Vec::new();
        }

        let min = matches.iter().map(|m| m.score).fold(f32::INFINITY, f32::min);
        let max = matches
            .iter()
            .map(|m| m.score)
            .fold(f32::NEG_INFINITY, f32::max);
        let range = max - min + self.epsilon;

        matches
            .iter()
            .map(|m| NormalizedMatch {
                document: m.document.clone(),
                score: (m.score - min) / range,
            })
            .collect()
    }
}
