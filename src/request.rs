//! Search request and result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::MovieDocument;
use crate::error::{CinedexError, Result};

/// Default number of results returned when the request does not say.
pub const DEFAULT_TOP_K: usize = 5;

/// Retrieval mode for a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Rank by embedding similarity.
    #[default]
    Vector,
    /// Rank by fuzzy lexical match.
    Text,
    /// Weighted fusion of vector and text rankings.
    Hybrid,
}

impl SearchMode {
    /// The canonical lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Vector => "vector",
            SearchMode::Text => "text",
            SearchMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = CinedexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vector" => Ok(SearchMode::Vector),
            "text" => Ok(SearchMode::Text),
            "hybrid" => Ok(SearchMode::Hybrid),
            other => Err(CinedexError::invalid_mode(other)),
        }
    }
}

/// A search request.
///
/// Immutable once constructed; the builder methods consume and return the
/// request so intermediate states are never observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text.
    pub query: String,
    /// Number of results to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Only match movies released strictly after this year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_gt: Option<i32>,
    /// Only match movies carrying this genre label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Retrieval mode.
    #[serde(default)]
    pub mode: SearchMode,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl SearchRequest {
    /// Create a new request with defaults (K = 5, vector mode, no filters).
    pub fn new<S: Into<String>>(query: S) -> Self {
        SearchRequest {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
            year_gt: None,
            genre: None,
            mode: SearchMode::default(),
        }
    }

    /// Set the number of results to return.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the year lower-bound filter.
    pub fn with_year_gt(mut self, year: i32) -> Self {
        self.year_gt = Some(year);
        self
    }

    /// Set the genre filter.
    pub fn with_genre<S: Into<String>>(mut self, genre: S) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the retrieval mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate request fields that serde cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(CinedexError::invalid_argument("query must not be empty"));
        }
        if self.top_k == 0 {
            return Err(CinedexError::invalid_argument("top_k must be positive"));
        }
        Ok(())
    }
}

/// A single ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    /// Document identity.
    pub id: Option<Uuid>,
    /// Movie title.
    pub title: String,
    /// Full plot text.
    pub fullplot: String,
    /// Writer credits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writers: Vec<String>,
    /// Cast credits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    /// Certification rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    /// Genre labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Relevance score. Mode-native for single-mode searches, a combined
    /// [0, 1] score for hybrid searches.
    pub score: f32,
}

impl RankedResult {
    /// Build a result from a document and its score, dropping non-display
    /// fields (embedding, short plot).
    pub fn from_document(doc: &MovieDocument, score: f32) -> Self {
        RankedResult {
            id: doc.id,
            title: doc.title.clone(),
            fullplot: doc.fullplot.clone(),
            writers: doc.writers.clone(),
            cast: doc.cast.clone(),
            rated: doc.rated.clone(),
            genres: doc.genres.clone(),
            year: doc.year,
            score,
        }
    }
}
