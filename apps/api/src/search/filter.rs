use async_trait::async_trait;

use crate::bookmarks::service::BookmarkService;
use crate::errors::AppError;
use crate::models::bookmark::Bookmark;

/// Case-insensitive substring match on title or URL, in list order.
/// A blank term matches nothing.
pub fn filter_bookmarks(term: &str, bookmarks: &[Bookmark]) -> Vec<Bookmark> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return vec![];
    }

    bookmarks
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle) || b.url.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Where a dispatched query is answered. Errors are reported to the caller
/// and never clear results it already holds.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<Bookmark>, AppError>;
}

#[async_trait]
impl SearchSource for BookmarkService {
    async fn search(&self, term: &str) -> Result<Vec<Bookmark>, AppError> {
        Ok(filter_bookmarks(term, &self.list().await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bm(id: i64, title: &str, url: &str) -> Bookmark {
        Bookmark {
            id,
            title: title.to_string(),
            url: url.to_string(),
            fav: false,
        }
    }

    fn sample() -> Vec<Bookmark> {
        vec![
            bm(1, "Rust Book", "https://doc.rust-lang.org/book/"),
            bm(2, "Crates", "https://crates.io/"),
            bm(3, "Tokio docs", "https://tokio.rs/"),
        ]
    }

    #[test]
    fn test_blank_term_matches_nothing() {
        assert!(filter_bookmarks("", &sample()).is_empty());
        assert!(filter_bookmarks("   ", &sample()).is_empty());
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let hits = filter_bookmarks("  TOKIO ", &sample());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn test_matches_url_and_keeps_order() {
        let hits = filter_bookmarks("https://", &sample());
        let ids: Vec<_> = hits.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_bookmarks("python", &sample()).is_empty());
    }
}
