//! End-to-end tests for loading a catalog from disk and answering vibe
//! queries through a stand-in embedder.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ndarray::array;
use ndarray_npy::write_npy;
use tempfile::TempDir;
use timbre_core::{AlbumId, Error, VibeQuery};
use timbre_pipeline::{
    load_engine, Catalog, Config, EmbedError, EmbedResult, Embedder, LoadError, SearchError,
    VibeSearch,
};

/// Maps a few mood words onto fixed axes: [calm, energetic, dark].
#[derive(Debug, Default)]
struct MoodEmbedder {
    calls: AtomicUsize,
}

#[async_trait]
impl Embedder for MoodEmbedder {
    async fn embed(&self, text: &str) -> EmbedResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vector = vec![0.0_f32; 3];
        for word in text.split_whitespace() {
            match word {
                "calm" | "gentle" => vector[0] += 1.0,
                "energetic" | "loud" => vector[1] += 1.0,
                "dark" | "brooding" => vector[2] += 1.0,
                _ => {}
            }
        }
        Ok(vector)
    }
}

/// Always returns a vector of the wrong size.
#[derive(Debug)]
struct WrongModel;

#[async_trait]
impl Embedder for WrongModel {
    async fn embed(&self, _text: &str) -> EmbedResult<Vec<f32>> {
        Ok(vec![1.0; 5])
    }
}

#[derive(Debug)]
struct Offline;

#[async_trait]
impl Embedder for Offline {
    async fn embed(&self, _text: &str) -> EmbedResult<Vec<f32>> {
        Err(EmbedError::Http {
            status: 503,
            message: "model loading".to_string(),
        })
    }
}

const METADATA: &str = "\
artist,title,year_released,rating,review,genre,query,album_id
Brian Eno,Music for Airports,1978,9.0,Gentle loops.,Ambient,calm,10
Motorhead,Ace of Spades,1980,8.0,Fast and loud.,Metal,energetic,11
Portishead,Dummy,1994,9.2,Brooding trip-hop.,Trip Hop,dark,12
Massive Attack,Mezzanine,1998,9.1,Dark and heavy.,Trip Hop,dark energetic,13
";

struct Fixture {
    _dir: TempDir,
    embeddings: PathBuf,
    metadata: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let embeddings = dir.path().join("embeddings.npy");
    let metadata = dir.path().join("embeddings_metadata.csv");

    write_npy(
        &embeddings,
        &array![
            [1.0_f32, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.7, 0.7]
        ],
    )
    .unwrap();
    std::fs::File::create(&metadata)
        .unwrap()
        .write_all(METADATA.as_bytes())
        .unwrap();

    Fixture {
        _dir: dir,
        embeddings,
        metadata,
    }
}

fn service(fixture: &Fixture) -> VibeSearch<MoodEmbedder> {
    let engine = Catalog::load(&fixture.embeddings, &fixture.metadata)
        .unwrap()
        .into_engine()
        .unwrap();
    VibeSearch::new(Arc::new(engine), MoodEmbedder::default())
}

#[tokio::test]
async fn test_search_ranks_by_vibe() {
    let fixture = fixture();
    let search = service(&fixture);

    let results = search
        .search(&VibeQuery::new("something dark").with_top_k(2))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].album_id, AlbumId::new(12));
    assert_eq!(results[0].title, "Dummy");
    assert!((results[0].score - 1.0).abs() < 1e-5);
    assert_eq!(results[1].album_id, AlbumId::new(13));
    assert!((results[1].score - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
}

#[tokio::test]
async fn test_extras_shape_the_query() {
    let fixture = fixture();
    let search = service(&fixture);

    let query = VibeQuery::new("")
        .with_extras(["brooding", "loud"])
        .with_top_k(1);
    let results = search.search(&query).await.unwrap();

    assert_eq!(results[0].title, "Mezzanine");
}

#[tokio::test]
async fn test_empty_query_never_reaches_embedder() {
    let fixture = fixture();
    let search = service(&fixture);

    let err = search.search(&VibeQuery::new("   ")).await.unwrap_err();

    assert!(matches!(err, SearchError::Query(Error::EmptyQuery)));
    assert!(err.is_user_error());
}

#[tokio::test]
async fn test_rejected_queries_never_reach_embedder() {
    let fixture = fixture();
    let engine = Catalog::load(&fixture.embeddings, &fixture.metadata)
        .unwrap()
        .into_engine()
        .unwrap();
    let embedder = Arc::new(MoodEmbedder::default());
    let search = VibeSearch::new(Arc::new(engine), Arc::clone(&embedder));

    assert!(search.search(&VibeQuery::new("")).await.is_err());
    assert!(search.search(&VibeQuery::new("calm").with_top_k(0)).await.is_err());
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);

    search.search(&VibeQuery::new("calm")).await.unwrap();
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_oversized_top_k_returns_whole_catalog() {
    let fixture = fixture();
    let search = service(&fixture);

    let results = search
        .search(&VibeQuery::new("calm").with_top_k(10))
        .await
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].title, "Music for Airports");
}

#[tokio::test]
async fn test_model_dimension_mismatch_is_internal_error() {
    let fixture = fixture();
    let engine = Catalog::load(&fixture.embeddings, &fixture.metadata)
        .unwrap()
        .into_engine()
        .unwrap();
    let search = VibeSearch::new(Arc::new(engine), WrongModel);

    let err = search.search(&VibeQuery::new("calm")).await.unwrap_err();

    assert!(matches!(err, SearchError::Retrieve(Error::InvalidQuery(_))));
    assert!(!err.is_user_error());
}

#[tokio::test]
async fn test_embedding_failure_is_reported() {
    let fixture = fixture();
    let engine = Catalog::load(&fixture.embeddings, &fixture.metadata)
        .unwrap()
        .into_engine()
        .unwrap();
    let search = VibeSearch::new(Arc::new(engine), Offline);

    let err = search.search(&VibeQuery::new("calm")).await.unwrap_err();

    assert!(matches!(err, SearchError::Embed(EmbedError::Http { status: 503, .. })));
    assert!(!err.is_user_error());
}

#[test]
fn test_load_engine_from_config() {
    let fixture = fixture();
    let config = Config::default().with_overrides(
        Some(fixture.embeddings.clone()),
        Some(fixture.metadata.clone()),
    );

    let engine = load_engine(&config).unwrap();

    assert_eq!(engine.len(), 4);
    assert_eq!(engine.dimension(), 3);
    assert_eq!(engine.zero_vector_rows(), 0);
}

#[test]
fn test_load_engine_missing_files() {
    let config = Config::default().with_overrides(
        Some(PathBuf::from("/nonexistent/embeddings.npy")),
        Some(PathBuf::from("/nonexistent/meta.csv")),
    );
    assert!(matches!(load_engine(&config), Err(LoadError::Io { .. })));
}
