//! Field filters derived from search requests.

use serde::{Deserialize, Serialize};

use crate::document::MovieDocument;
use crate::request::SearchRequest;

/// A predicate applied to a single document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Numeric field strictly greater than the given value.
    GreaterThan(i64),
    /// Field equals the given value; for list-valued fields, contains it.
    Equals(String),
}

/// A set of field filters shared by the vector and text pipelines.
///
/// Empty when the request carries no optional filters. An empty filter set
/// must never be emitted as a pipeline stage (see
/// [`build_pipeline`](crate::pipeline::build_pipeline)).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<(String, Predicate)>,
}

impl FilterSet {
    /// Derive the filter set from a search request.
    pub fn from_request(request: &SearchRequest) -> Self {
        let mut filters = Vec::new();
        if let Some(year) = request.year_gt {
            filters.push(("year".to_string(), Predicate::GreaterThan(year as i64)));
        }
        if let Some(genre) = &request.genre {
            filters.push(("genres".to_string(), Predicate::Equals(genre.clone())));
        }
        FilterSet { filters }
    }

    /// Whether no filters are present.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Number of filters present.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// The field/predicate pairs, in derivation order.
    pub fn entries(&self) -> &[(String, Predicate)] {
        &self.filters
    }

    /// Evaluate all predicates against a document. An empty set matches
    /// every document.
    pub fn matches(&self, doc: &MovieDocument) -> bool {
        self.filters.iter().all(|(field, predicate)| {
            match (field.as_str(), predicate) {
                ("year", Predicate::GreaterThan(bound)) => {
                    doc.year.is_some_and(|y| i64::from(y) > *bound)
                }
                ("genres", Predicate::Equals(genre)) => {
                    doc.genres.iter().any(|g| g == genre)
                }
                // Unknown field/predicate combinations match nothing.
                _ => false,
            }
        })
    }
}
