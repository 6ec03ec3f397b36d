//! In-memory document store implementation.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::analysis::{fuzzy_match, tokenize};
use crate::document::MovieDocument;
use crate::error::{CinedexError, Result};
use crate::pipeline::{FilterSet, Pipeline, PipelineStage};
use crate::store::{DocumentPatch, DocumentStore, RawMatch};

/// An in-memory document store.
///
/// Interprets retrieval pipelines directly over a guarded map. This is the
/// reference store used by the CLI and the test suite; it ranks vector
/// candidates by dot product (embeddings are unit length, so dot product is
/// cosine similarity) and lexical candidates by fuzzy term hits.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<AHashMap<Uuid, MovieDocument>>,
}

impl MemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing documents, assigning identities where
    /// missing.
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = MovieDocument>,
    {
        let store = Self::new();
        {
            let mut map = store.documents.write();
            for mut doc in documents {
                let id = *doc.id.get_or_insert_with(Uuid::new_v4);
                map.insert(id, doc);
            }
        }
        store
    }

    /// Load a store from a JSON snapshot file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let documents: Vec<MovieDocument> = serde_json::from_str(&data)?;
        Ok(Self::from_documents(documents))
    }

    /// Save the store to a JSON snapshot file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut documents: Vec<MovieDocument> =
            self.documents.read().values().cloned().collect();
        // Stable file contents across runs.
        documents.sort_by_key(|d| d.id);
        fs::write(path, serde_json::to_string_pretty(&documents)?)?;
        Ok(())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    fn vector_search(
        &self,
        filter: &FilterSet,
        query_vector: &[f32],
        num_candidates: usize,
        limit: usize,
    ) -> Result<Vec<RawMatch>> {
        let documents = self.documents.read();
        let mut matches: Vec<RawMatch> = documents
            .values()
            .filter(|doc| filter.matches(doc))
            .filter_map(|doc| {
                let embedding = doc.embedding.as_deref()?;
                if embedding.len() != query_vector.len() {
                    return None;
                }
                let score: f32 = embedding
                    .iter()
                    .zip(query_vector.iter())
                    .map(|(a, b)| a * b)
                    .sum();
                Some(RawMatch::new(doc.clone(), score))
            })
            .collect();

        sort_matches(&mut matches);
        matches.truncate(num_candidates);
        matches.truncate(limit);
        Ok(matches)
    }

    fn text_search(&self, query: &str, paths: &[String], max_edits: u32) -> Result<Vec<RawMatch>> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self.documents.read();
        let mut matches: Vec<RawMatch> = documents
            .values()
            .filter_map(|doc| {
                let tokens = field_tokens(doc, paths);
                let score: f32 = query_terms
                    .iter()
                    .map(|term| best_term_score(term, &tokens, max_edits))
                    .sum();
                if score > 0.0 {
                    Some(RawMatch::new(doc.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        sort_matches(&mut matches);
        Ok(matches)
    }
}

/// Sort by score descending with identity as the tie-break, so store output
/// order is deterministic.
fn sort_matches(matches: &mut [RawMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id().cmp(&b.id()))
    });
}

fn field_tokens(doc: &MovieDocument, paths: &[String]) -> Vec<String> {
    let mut tokens = Vec::new();
    for path in paths {
        match path.as_str() {
            "fullplot" => tokens.extend(tokenize(&doc.fullplot)),
            "title" => tokens.extend(tokenize(&doc.title)),
            "genres" => {
                for genre in &doc.genres {
                    tokens.extend(tokenize(genre));
                }
            }
            _ => {}
        }
    }
    tokens
}

/// Best match weight for one query term: 1.0 for an exact hit, decaying
/// with edit distance for fuzzy hits, 0.0 past the edit budget.
fn best_term_score(term: &str, tokens: &[String], max_edits: u32) -> f32 {
    let mut best = 0.0f32;
    for token in tokens {
        if token == term {
            return 1.0;
        }
        if fuzzy_match(term, token, max_edits) {
            let distance = crate::analysis::levenshtein_distance(term, token) as f32;
            best = best.max(1.0 / (1.0 + distance));
        }
    }
    best
}

impl DocumentStore for MemoryDocumentStore {
    fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<RawMatch>> {
        let mut results: Vec<RawMatch> = Vec::new();

        for stage in pipeline.stages() {
            match stage {
                PipelineStage::VectorSearch {
                    filter,
                    query_vector,
                    num_candidates,
                    limit,
                    ..
                } => {
                    results =
                        self.vector_search(filter, query_vector, *num_candidates, *limit)?;
                }
                PipelineStage::TextSearch {
                    query,
                    paths,
                    max_edits,
                    ..
                } => {
                    results = self.text_search(query, paths, *max_edits)?;
                }
                PipelineStage::Match(filter) => {
                    if filter.is_empty() {
                        return Err(CinedexError::store(
                            "match stage with empty filter set rejects all documents",
                        ));
                    }
                    results.retain(|m| filter.matches(&m.document));
                }
                PipelineStage::Project { fields } => {
                    for m in results.iter_mut() {
                        if !fields.iter().any(|f| f == "embedding") {
                            m.document.embedding = None;
                        }
                        m.document.plot = None;
                    }
                }
                PipelineStage::Limit(limit) => {
                    results.truncate(*limit);
                }
            }
        }

        Ok(results)
    }

    fn find_one(&self, id: Uuid) -> Result<Option<MovieDocument>> {
        Ok(self.documents.read().get(&id).cloned())
    }

    fn insert_one(&self, mut document: MovieDocument) -> Result<Uuid> {
        let id = *document.id.get_or_insert_with(Uuid::new_v4);
        self.documents.write().insert(id, document);
        Ok(id)
    }

    fn update_one(&self, id: Uuid, patch: &DocumentPatch) -> Result<u64> {
        let mut documents = self.documents.write();
        let Some(doc) = documents.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(title) = &patch.title {
            doc.title = title.clone();
        }
        if let Some(fullplot) = &patch.fullplot {
            doc.fullplot = fullplot.clone();
        }
        if let Some(embedding) = &patch.embedding {
            doc.embedding = Some(embedding.clone());
        }
        Ok(1)
    }

    fn delete_one(&self, id: Uuid) -> Result<u64> {
        Ok(u64::from(self.documents.write().remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::build_pipeline;
    use crate::request::{SearchMode, SearchRequest};

    fn unit(v: Vec<f32>) -> Vec<f32> {
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        v.into_iter().map(|x| x / norm).collect()
    }

    fn sample_store() -> MemoryDocumentStore {
        MemoryDocumentStore::from_documents(vec![
            MovieDocument::new("Alien", "A mining crew encounters a hostile alien lifeform.")
                .with_genres(vec!["Horror".to_string(), "Sci-Fi".to_string()])
                .with_year(1979)
                .with_embedding(unit(vec![1.0, 0.0, 0.0])),
            MovieDocument::new("Dragonheart", "A knight befriends the last living dragon.")
                .with_genres(vec!["Fantasy".to_string()])
                .with_year(1996)
                .with_embedding(unit(vec![0.0, 1.0, 0.0])),
            MovieDocument::new("Event Horizon", "A rescue crew boards a ship that went to hell.")
                .with_genres(vec!["Horror".to_string(), "Sci-Fi".to_string()])
                .with_year(1997)
                .with_embedding(unit(vec![0.9, 0.1, 0.0])),
        ])
    }

    #[test]
    fn test_crud_roundtrip() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert_one(MovieDocument::new("Alien", "plot"))
            .unwrap();

        let doc = store.find_one(id).unwrap().unwrap();
        assert_eq!(doc.title, "Alien");

        let patch = DocumentPatch {
            title: Some("Aliens".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update_one(id, &patch).unwrap(), 1);
        assert_eq!(store.find_one(id).unwrap().unwrap().title, "Aliens");

        assert_eq!(store.delete_one(id).unwrap(), 1);
        assert_eq!(store.delete_one(id).unwrap(), 0);
        assert!(store.find_one(id).unwrap().is_none());
    }

    #[test]
    fn test_vector_pipeline_ranks_by_similarity() {
        let store = sample_store();
        let request = SearchRequest::new("q").with_top_k(2);
        let pipeline = build_pipeline(&request, &unit(vec![1.0, 0.0, 0.0])).unwrap();

        let matches = store.aggregate(&pipeline).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].document.title, "Alien");
        assert_eq!(matches[1].document.title, "Event Horizon");
        assert!(matches[0].score >= matches[1].score);
    }

    #[test]
    fn test_vector_pipeline_applies_filter() {
        let store = sample_store();
        let request = SearchRequest::new("q").with_top_k(5).with_year_gt(1990);
        let pipeline = build_pipeline(&request, &unit(vec![1.0, 0.0, 0.0])).unwrap();

        let matches = store.aggregate(&pipeline).unwrap();
        let titles: Vec<_> = matches.iter().map(|m| m.document.title.as_str()).collect();
        assert!(!titles.contains(&"Alien"));
        assert!(titles.contains(&"Event Horizon"));
    }

    #[test]
    fn test_text_pipeline_fuzzy_matches_typo() {
        let store = sample_store();
        let request = SearchRequest::new("dragen knight").with_mode(SearchMode::Text);
        let pipeline = build_pipeline(&request, &[]).unwrap();

        let matches = store.aggregate(&pipeline).unwrap();
        assert!(!matches.is_empty());
        assert_eq!(matches[0].document.title, "Dragonheart");
    }

    #[test]
    fn test_text_pipeline_filter_and_limit() {
        let store = sample_store();
        let request = SearchRequest::new("crew")
            .with_mode(SearchMode::Text)
            .with_genre("Horror")
            .with_top_k(1);
        let pipeline = build_pipeline(&request, &[]).unwrap();

        let matches = store.aggregate(&pipeline).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].document.genres.iter().any(|g| g == "Horror"));
    }

    #[test]
    fn test_projection_strips_embedding() {
        let store = sample_store();
        let request = SearchRequest::new("q").with_top_k(3);
        let pipeline = build_pipeline(&request, &unit(vec![1.0, 0.0, 0.0])).unwrap();

        let matches = store.aggregate(&pipeline).unwrap();
        assert!(matches.iter().all(|m| m.document.embedding.is_none()));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");

        let store = sample_store();
        store.save_json(&path).unwrap();

        let restored = MemoryDocumentStore::load_json(&path).unwrap();
        assert_eq!(restored.len(), store.len());
    }

    #[test]
    fn test_documents_without_embedding_are_skipped_by_vector_search() {
        let store = MemoryDocumentStore::from_documents(vec![
            MovieDocument::new("No Embedding", "plot"),
            MovieDocument::new("Embedded", "plot").with_embedding(unit(vec![1.0, 0.0, 0.0])),
        ]);
        let request = SearchRequest::new("q").with_top_k(5);
        let pipeline = build_pipeline(&request, &unit(vec![1.0, 0.0, 0.0])).unwrap();

        let matches = store.aggregate(&pipeline).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].document.title, "Embedded");
    }
}
