//! Movie document types.
//!
//! A [`MovieDocument`] is the unit of storage and retrieval. Documents carry
//! the display fields returned by searches plus an optional embedding of the
//! full plot, generated at ingestion or creation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie document as stored and retrieved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDocument {
    /// Document identity. Assigned by the store on insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Movie title.
    pub title: String,
    /// Full plot text. This is the field embeddings are generated from.
    #[serde(default)]
    pub fullplot: String,
    /// Short plot, used as a fallback when `fullplot` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// Writer credits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writers: Vec<String>,
    /// Cast credits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    /// Certification rating (e.g. "PG-13").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    /// Genre labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Plot embedding, unit-normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl MovieDocument {
    /// Create a new document with the given title and full plot.
    pub fn new<S: Into<String>>(title: S, fullplot: S) -> Self {
        MovieDocument {
            title: title.into(),
            fullplot: fullplot.into(),
            ..Default::default()
        }
    }

    /// Set genre labels.
    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    /// Set the release year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set cast credits.
    pub fn with_cast(mut self, cast: Vec<String>) -> Self {
        self.cast = cast;
        self
    }

    /// Set writer credits.
    pub fn with_writers(mut self, writers: Vec<String>) -> Self {
        self.writers = writers;
        self
    }

    /// Set the certification rating.
    pub fn with_rated<S: Into<String>>(mut self, rated: S) -> Self {
        self.rated = Some(rated.into());
        self
    }

    /// Set the document identity.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the plot embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Whether the document carries an embedding.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}

/// Fields accepted when creating a new movie document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCreate {
    /// Movie title.
    pub title: String,
    /// Full plot text.
    pub fullplot: String,
}

/// Partial update for an existing movie document.
///
/// Only the fields present in the update are written; updating `fullplot`
/// also regenerates the document's embedding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieUpdate {
    /// New title, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New full plot, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullplot: Option<String>,
}

impl MovieUpdate {
    /// Whether the update contains no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.fullplot.is_none()
    }
}
