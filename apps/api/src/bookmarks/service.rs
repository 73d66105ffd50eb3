//! Bookmark list with init-from-storage and write-through-on-mutation lifecycle.
//!
//! The in-memory list is authoritative for the running process. A failed
//! write-through is logged and reported as `persisted: false`; the mutation
//! itself still stands.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

use crate::bookmarks::store::KeyValueStore;
use crate::errors::AppError;
use crate::models::bookmark::{Bookmark, BookmarkId};

pub const STORAGE_KEY: &str = "my_bookmarks_v1";

/// Result of a mutation plus whether it reached storage.
#[derive(Debug, Clone, Serialize)]
pub struct Mutation<T> {
    pub value: T,
    pub persisted: bool,
}

pub fn default_bookmarks() -> Vec<Bookmark> {
    vec![Bookmark {
        id: 1,
        title: "Example".to_string(),
        url: "https://example.com".to_string(),
        fav: false,
    }]
}

/// Absolute URLs are kept in their serialized form; anything that does not
/// parse is treated as a bare host and gets an `https://` prefix.
pub fn normalize_url(value: &str) -> String {
    match Url::parse(value) {
        Ok(url) => url.to_string(),
        Err(_) => format!("https://{value}"),
    }
}

pub struct BookmarkService {
    store: Arc<dyn KeyValueStore>,
    bookmarks: RwLock<Vec<Bookmark>>,
}

impl BookmarkService {
    /// Loads the list from storage. Missing, unreadable or corrupt data all
    /// fall back to the default list.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let bookmarks = match store.get(STORAGE_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Bookmark>>(&raw).unwrap_or_else(|e| {
                warn!("Stored bookmarks are corrupt, using defaults: {e}");
                default_bookmarks()
            }),
            Ok(None) => default_bookmarks(),
            Err(e) => {
                warn!("Could not read bookmarks, using defaults: {e}");
                default_bookmarks()
            }
        };
        info!("Loaded {} bookmarks", bookmarks.len());

        Self {
            store,
            bookmarks: RwLock::new(bookmarks),
        }
    }

    pub async fn list(&self) -> Vec<Bookmark> {
        self.bookmarks.read().await.clone()
    }

    /// Adds a bookmark at the front of the list.
    pub async fn add(&self, title: &str, url: &str) -> Result<Mutation<Bookmark>, AppError> {
        let trimmed_url = url.trim();
        if trimmed_url.is_empty() {
            return Err(AppError::Validation("url is required".to_string()));
        }
        let trimmed_title = match title.trim() {
            "" => trimmed_url,
            t => t,
        };

        let mut bookmarks = self.bookmarks.write().await;
        let bookmark = Bookmark {
            id: next_id(&bookmarks),
            title: trimmed_title.to_string(),
            url: normalize_url(trimmed_url),
            fav: false,
        };
        bookmarks.insert(0, bookmark.clone());
        let persisted = self.write_through(&bookmarks).await;

        info!("Added bookmark {} -> {}", bookmark.id, bookmark.url);
        Ok(Mutation {
            value: bookmark,
            persisted,
        })
    }

    pub async fn remove(&self, id: BookmarkId) -> Option<Mutation<Bookmark>> {
        let mut bookmarks = self.bookmarks.write().await;
        let position = bookmarks.iter().position(|b| b.id == id)?;
        let removed = bookmarks.remove(position);
        let persisted = self.write_through(&bookmarks).await;
        Some(Mutation {
            value: removed,
            persisted,
        })
    }

    pub async fn toggle_favorite(&self, id: BookmarkId) -> Option<Mutation<Bookmark>> {
        let mut bookmarks = self.bookmarks.write().await;
        let bookmark = bookmarks.iter_mut().find(|b| b.id == id)?;
        bookmark.fav = !bookmark.fav;
        let updated = bookmark.clone();
        let persisted = self.write_through(&bookmarks).await;
        Some(Mutation {
            value: updated,
            persisted,
        })
    }

    async fn write_through(&self, bookmarks: &[Bookmark]) -> bool {
        let payload = match serde_json::to_string(bookmarks) {
            Ok(p) => p,
            Err(e) => {
                warn!("Could not serialize bookmarks: {e}");
                return false;
            }
        };
        match self.store.set(STORAGE_KEY, &payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Bookmark write-through failed: {e}");
                false
            }
        }
    }
}

/// Millisecond timestamp, bumped past any id already in use.
fn next_id(bookmarks: &[Bookmark]) -> BookmarkId {
    let mut id = Utc::now().timestamp_millis();
    while bookmarks.iter().any(|b| b.id == id) {
        id += 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::store::{InMemoryKvStore, StorageError};
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("offline".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("offline".to_string()))
        }
    }

    async fn fresh() -> (Arc<InMemoryKvStore>, BookmarkService) {
        let store = Arc::new(InMemoryKvStore::new());
        let service = BookmarkService::load(store.clone()).await;
        (store, service)
    }

    #[tokio::test]
    async fn test_empty_storage_loads_defaults() {
        let (_, service) = fresh().await;
        assert_eq!(service.list().await, default_bookmarks());
    }

    #[tokio::test]
    async fn test_corrupt_storage_loads_defaults() {
        let store = Arc::new(InMemoryKvStore::new());
        store.set(STORAGE_KEY, "{not json").await.unwrap();
        let service = BookmarkService::load(store).await;
        assert_eq!(service.list().await, default_bookmarks());
    }

    #[tokio::test]
    async fn test_existing_storage_is_loaded() {
        let store = Arc::new(InMemoryKvStore::new());
        store
            .set(
                STORAGE_KEY,
                r#"[{"id":5,"title":"Docs","url":"https://docs.rs/","fav":true}]"#,
            )
            .await
            .unwrap();
        let service = BookmarkService::load(store).await;
        let list = service.list().await;
        assert_eq!(list.len(), 1);
        assert!(list[0].fav);
    }

    #[tokio::test]
    async fn test_add_prepends_and_writes_through() {
        let (store, service) = fresh().await;
        let added = service.add("  ", " example.org ").await.unwrap();
        assert!(added.persisted);
        assert_eq!(added.value.title, "example.org");
        assert_eq!(added.value.url, "https://example.org");

        let list = service.list().await;
        assert_eq!(list[0], added.value);
        assert_eq!(list.len(), 2);

        let raw = store.get(STORAGE_KEY).await.unwrap().unwrap();
        let stored: Vec<Bookmark> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, list);
    }

    #[tokio::test]
    async fn test_add_requires_url() {
        let (_, service) = fresh().await;
        assert!(matches!(
            service.add("Title", "   ").await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_stay_unique_for_rapid_adds() {
        let (_, service) = fresh().await;
        for i in 0..5 {
            service.add("", &format!("site{i}.test")).await.unwrap();
        }
        let mut ids: Vec<_> = service.list().await.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[tokio::test]
    async fn test_toggle_favorite_and_remove() {
        let (_, service) = fresh().await;
        let toggled = service.toggle_favorite(1).await.unwrap();
        assert!(toggled.value.fav);
        let toggled = service.toggle_favorite(1).await.unwrap();
        assert!(!toggled.value.fav);

        assert!(service.toggle_favorite(404).await.is_none());
        assert!(service.remove(404).await.is_none());

        let removed = service.remove(1).await.unwrap();
        assert_eq!(removed.value.id, 1);
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_through_keeps_mutation() {
        let service = BookmarkService::load(Arc::new(BrokenStore)).await;
        assert_eq!(service.list().await, default_bookmarks());

        let added = service.add("Rust", "https://www.rust-lang.org").await.unwrap();
        assert!(!added.persisted);
        assert_eq!(service.list().await.len(), 2);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com/");
        assert_eq!(normalize_url("example.com/path"), "https://example.com/path");
        assert_eq!(
            normalize_url("http://Example.COM/a?b=1"),
            "http://example.com/a?b=1"
        );
    }
}
