//! End-to-end search tests over the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use cinedex::document::{MovieDocument, MovieUpdate};
use cinedex::embedding::{Embedder, HashingEmbedder};
use cinedex::error::{CinedexError, Result};
use cinedex::ingest::ingest_documents;
use cinedex::pipeline::Pipeline;
use cinedex::request::{SearchMode, SearchRequest};
use cinedex::service::MovieService;
use cinedex::store::{DocumentPatch, DocumentStore, MemoryDocumentStore, RawMatch};

fn corpus() -> Vec<MovieDocument> {
    vec![
        MovieDocument::new(
            "Alien",
            "A commercial mining crew in deep space encounters a hostile alien lifeform.",
        )
        .with_genres(vec!["Horror".to_string(), "Sci-Fi".to_string()])
        .with_year(1979),
        MovieDocument::new(
            "Event Horizon",
            "A rescue crew investigates a spaceship that disappeared into a black hole.",
        )
        .with_genres(vec!["Horror".to_string(), "Sci-Fi".to_string()])
        .with_year(1997),
        MovieDocument::new(
            "Dragonheart",
            "A dragonslaying knight befriends the last living dragon.",
        )
        .with_genres(vec!["Fantasy".to_string(), "Adventure".to_string()])
        .with_year(1996),
        MovieDocument::new(
            "Spirited Away",
            "A young girl wanders into a world ruled by spirits and witches.",
        )
        .with_genres(vec!["Animation".to_string(), "Fantasy".to_string()])
        .with_year(2001),
        MovieDocument::new(
            "12 Angry Men",
            "A jury holdout attempts to prevent a miscarriage of justice.",
        )
        .with_genres(vec!["Drama".to_string()])
        .with_year(1957),
        MovieDocument::new(
            "Moon",
            "A lone astronaut nearing the end of his contract on a lunar mining base.",
        )
        .with_genres(vec!["Sci-Fi".to_string(), "Drama".to_string()])
        .with_year(2009),
    ]
}

fn build_service() -> MovieService<MemoryDocumentStore, HashingEmbedder> {
    let store = Arc::new(MemoryDocumentStore::new());
    let embedder = Arc::new(HashingEmbedder::new_default());
    ingest_documents(store.as_ref(), embedder.as_ref(), corpus(), None).unwrap();
    MovieService::new(store, embedder)
}

#[tokio::test]
async fn test_hybrid_search_is_capped_sorted_and_duplicate_free() {
    let service = build_service();
    let request = SearchRequest::new("space mining crew")
        .with_top_k(4)
        .with_mode(SearchMode::Hybrid);

    let results = service.search(&request).await.unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 4);

    let mut seen = std::collections::HashSet::new();
    for result in &results {
        assert!(seen.insert(result.id), "duplicate identity in results");
        assert!((0.0..=1.0).contains(&result.score));
    }
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_text_search_tolerates_typos() {
    let service = build_service();
    let request = SearchRequest::new("dragen knigt").with_mode(SearchMode::Text);

    let results = service.search(&request).await.unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0].title, "Dragonheart");
}

#[tokio::test]
async fn test_vector_search_returns_mode_native_scores() {
    let service = build_service();
    let request = SearchRequest::new("astronaut on a lunar base").with_top_k(3);

    let results = service.search(&request).await.unwrap();
    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_filters_restrict_all_modes() {
    let service = build_service();

    for mode in [SearchMode::Vector, SearchMode::Text, SearchMode::Hybrid] {
        let request = SearchRequest::new("crew in space")
            .with_mode(mode)
            .with_year_gt(1990)
            .with_genre("Sci-Fi");

        let results = service.search(&request).await.unwrap();
        for result in &results {
            assert!(result.year.unwrap() > 1990, "mode {mode}: year filter leaked");
            assert!(
                result.genres.iter().any(|g| g == "Sci-Fi"),
                "mode {mode}: genre filter leaked"
            );
        }
    }
}

#[tokio::test]
async fn test_crud_lifecycle_affects_search() {
    let service = build_service();

    let id = service
        .create_movie(cinedex::document::MovieCreate {
            title: "Solaris".to_string(),
            fullplot: "A psychologist travels to a station orbiting an enigmatic ocean planet."
                .to_string(),
        })
        .unwrap();

    let request = SearchRequest::new("enigmatic ocean planet station")
        .with_mode(SearchMode::Text)
        .with_top_k(3);
    let results = service.search(&request).await.unwrap();
    assert!(results.iter().any(|r| r.id == Some(id)));

    assert!(
        service
            .update_movie(
                id,
                MovieUpdate {
                    title: Some("Solaris (1972)".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
    );
    assert_eq!(
        service.get_movie(id).unwrap().unwrap().title,
        "Solaris (1972)"
    );

    assert!(service.delete_movie(id).unwrap());
    let results = service.search(&request).await.unwrap();
    assert!(!results.iter().any(|r| r.id == Some(id)));
}

/// Store double that counts aggregate calls.
struct CountingStore {
    inner: MemoryDocumentStore,
    aggregates: AtomicUsize,
}

impl CountingStore {
    fn new(inner: MemoryDocumentStore) -> Self {
        Self {
            inner,
            aggregates: AtomicUsize::new(0),
        }
    }

    fn aggregate_calls(&self) -> usize {
        self.aggregates.load(Ordering::SeqCst)
    }
}

impl DocumentStore for CountingStore {
    fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<RawMatch>> {
        self.aggregates.fetch_add(1, Ordering::SeqCst);
        self.inner.aggregate(pipeline)
    }

    fn find_one(&self, id: Uuid) -> Result<Option<MovieDocument>> {
        self.inner.find_one(id)
    }

    fn insert_one(&self, document: MovieDocument) -> Result<Uuid> {
        self.inner.insert_one(document)
    }

    fn update_one(&self, id: Uuid, patch: &DocumentPatch) -> Result<u64> {
        self.inner.update_one(id, patch)
    }

    fn delete_one(&self, id: Uuid) -> Result<u64> {
        self.inner.delete_one(id)
    }
}

/// Embedder double that counts embed calls.
struct CountingEmbedder {
    inner: HashingEmbedder,
    embeds: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Self {
        Self {
            inner: HashingEmbedder::new_default(),
            embeds: AtomicUsize::new(0),
        }
    }

    fn embed_calls(&self) -> usize {
        self.embeds.load(Ordering::SeqCst)
    }
}

impl Embedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embeds.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

fn counting_service() -> (
    MovieService<CountingStore, CountingEmbedder>,
    Arc<CountingStore>,
    Arc<CountingEmbedder>,
) {
    let inner = MemoryDocumentStore::new();
    let plain_embedder = HashingEmbedder::new_default();
    ingest_documents(&inner, &plain_embedder, corpus(), None).unwrap();

    let store = Arc::new(CountingStore::new(inner));
    let embedder = Arc::new(CountingEmbedder::new());
    let service = MovieService::new(store.clone(), embedder.clone());
    (service, store, embedder)
}

#[tokio::test]
async fn test_hybrid_runs_two_retrievals_and_one_embedding() {
    let (service, store, embedder) = counting_service();

    let request = SearchRequest::new("space crew").with_mode(SearchMode::Hybrid);
    service.search(&request).await.unwrap();

    assert_eq!(store.aggregate_calls(), 2);
    assert_eq!(embedder.embed_calls(), 1);
}

#[tokio::test]
async fn test_text_mode_still_embeds_once() {
    let (service, store, embedder) = counting_service();

    let request = SearchRequest::new("space crew").with_mode(SearchMode::Text);
    service.search(&request).await.unwrap();

    assert_eq!(store.aggregate_calls(), 1);
    assert_eq!(embedder.embed_calls(), 1);
}

#[tokio::test]
async fn test_unknown_mode_fails_before_any_retrieval() {
    let (service, store, _embedder) = counting_service();

    // The mode string is rejected at parse time, before a request exists.
    let err = "fuzzy".parse::<SearchMode>().unwrap_err();
    assert!(matches!(err, CinedexError::InvalidMode(_)));
    assert!(err.is_client_error());
    assert_eq!(store.aggregate_calls(), 0);

    // A well-formed request still works afterwards.
    let request = SearchRequest::new("space crew");
    service.search(&request).await.unwrap();
    assert_eq!(store.aggregate_calls(), 1);
}

#[tokio::test]
async fn test_empty_results_are_ok_not_an_error() {
    let service = build_service();
    let request = SearchRequest::new("zzzzqqqq xyzzy").with_mode(SearchMode::Text);

    let results = service.search(&request).await.unwrap();
    assert!(results.is_empty());
}
