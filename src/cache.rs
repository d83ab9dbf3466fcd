//! Cache store for the computed paper collection.
//!
//! The collection is persisted as a single serialized blob, read and written
//! whole. There is no incremental update and no schema versioning: changing
//! the `Paper` layout silently invalidates old cache files, which then fail
//! to load and force a refresh.

use crate::paper::PaperCollection;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("serde_json error")]
    SerdeJson(#[from] serde_json::Error),
}

/// Trait defining the cache store interface.
///
/// One blob in, one blob out: implementations persist the whole collection
/// at once.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Loads the full paper collection from the store.
    async fn load(&self) -> Result<PaperCollection, CacheError>;

    /// Persists the full paper collection, replacing any previous contents.
    async fn store(&self, papers: &PaperCollection) -> Result<(), CacheError>;
}

/// File-backed cache store keeping the collection as one JSON document.
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileCache {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CacheStore for JsonFileCache {
    async fn load(&self) -> Result<PaperCollection, CacheError> {
        let blob = std::fs::read_to_string(&self.path)?;
        let papers = serde_json::from_str(&blob)?;
        Ok(papers)
    }

    async fn store(&self, papers: &PaperCollection) -> Result<(), CacheError> {
        let blob = serde_json::to_string(papers)?;
        std::fs::write(&self.path, blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::Paper;

    fn sample_collection() -> PaperCollection {
        let mut paper = Paper::new("10.1000/a");
        paper.titles = vec!["A paper".to_owned()];
        paper.authors = vec!["Brinch, C.".to_owned(), "Smith, J.".to_owned()];
        paper.pub_year = 2010.25;
        paper.citation_count = 3;
        paper.self_citation_count = 1;
        paper.citation_events = vec![2010.5, 2011.0, 2012.75];

        PaperCollection::from(vec![paper, Paper::new("10.1000/b")])
    }

    #[tokio::test]
    async fn round_trip_preserves_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::new(dir.path().join("papers.json"));

        let original = sample_collection();
        cache.store(&original).await.unwrap();
        let loaded = cache.load().await.unwrap();

        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::new(dir.path().join("absent.json"));

        let error = cache.load().await.unwrap_err();
        match error {
            CacheError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }

    #[tokio::test]
    async fn load_fails_on_garbage_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papers.json");
        std::fs::write(&path, "not json at all").unwrap();

        let cache = JsonFileCache::new(&path);
        let error = cache.load().await.unwrap_err();
        match error {
            CacheError::SerdeJson(_) => (),
            _ => panic!("Expected SerdeJson error"),
        }
    }

    #[tokio::test]
    async fn store_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::new(dir.path().join("papers.json"));

        cache.store(&sample_collection()).await.unwrap();
        let smaller = PaperCollection::from(vec![Paper::new("10.1000/z")]);
        cache.store(&smaller).await.unwrap();

        assert_eq!(cache.load().await.unwrap(), smaller);
    }
}
