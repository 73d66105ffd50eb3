use std::sync::Arc;
use std::time::Duration;

use crate::analysis::analyzer::{ResumeAnalyzer, StaticResumeAnalyzer};
use crate::bookmarks::service::BookmarkService;
use crate::bookmarks::store::KeyValueStore;
use crate::config::Config;
use crate::export::summary::{MarkdownSummaryExporter, SummaryExporter};
use crate::search::coalescer::SearchCoalescer;
use crate::tracker::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Pluggable analyzer. Default: StaticResumeAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Pluggable exporter. Default: MarkdownSummaryExporter.
    pub exporter: Arc<dyn SummaryExporter>,
    pub bookmarks: Arc<BookmarkService>,
    /// Debounced search over `bookmarks`.
    pub search: Arc<SearchCoalescer>,
}

impl AppState {
    /// Wires the default collaborators. Bookmarks are loaded from `kv` before returning.
    pub async fn build(config: Config, kv: Arc<dyn KeyValueStore>) -> Self {
        let bookmarks = Arc::new(BookmarkService::load(kv).await);
        let search = Arc::new(SearchCoalescer::new(
            Duration::from_millis(config.search_debounce_ms),
            Duration::from_secs(config.search_client_ttl_secs),
            bookmarks.clone(),
        ));

        Self {
            analyzer: Arc::new(StaticResumeAnalyzer::new(config.min_resume_chars)),
            exporter: Arc::new(MarkdownSummaryExporter),
            sessions: SessionStore::new(Duration::from_secs(config.session_ttl_secs)),
            bookmarks,
            search,
            config,
        }
    }
}
