use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::suggestion::{Suggestion, SuggestionId};
use crate::tracker::completion::{CompletionState, SuggestionTracker, ToggleOutcome, TrackerError};
use crate::tracker::grouping::CategoryGroup;
use crate::tracker::progress::Progress;

/// One analysis run and the tracker over its suggestions.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub label: Option<String>,
    pub tracker: SuggestionTracker,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last read or write; drives idle eviction.
    pub last_seen: Instant,
}

/// Everything a client needs to render a session.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub id: Uuid,
    pub label: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub groups: Vec<CategoryGroup>,
    pub progress: Progress,
    pub state: CompletionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AnalysisSession> for AnalysisView {
    fn from(session: &AnalysisSession) -> Self {
        Self {
            id: session.id,
            label: session.label.clone(),
            suggestions: session.tracker.suggestions().to_vec(),
            groups: session.tracker.groups(),
            progress: session.tracker.progress(),
            state: session.tracker.state(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// In-memory registry of analysis sessions. Nothing here outlives the process,
/// and sessions idle for longer than `ttl` are evicted.
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, AnalysisSession>>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, AnalysisSession>) {
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen.elapsed() < self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {evicted} idle analysis sessions");
        }
    }

    /// Live session by id, marked as seen.
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, AnalysisSession>,
        id: &Uuid,
    ) -> Option<&'a mut AnalysisSession> {
        self.evict_idle(sessions);
        let session = sessions.get_mut(id)?;
        session.last_seen = Instant::now();
        Some(session)
    }

    pub async fn create(
        &self,
        label: Option<String>,
        suggestions: Vec<Suggestion>,
    ) -> Result<AnalysisView, TrackerError> {
        let tracker = SuggestionTracker::new(suggestions)?;
        let now = Utc::now();
        let session = AnalysisSession {
            id: Uuid::new_v4(),
            label,
            tracker,
            created_at: now,
            updated_at: now,
            last_seen: Instant::now(),
        };
        let view = AnalysisView::from(&session);

        info!(
            "Created analysis session {} with {} suggestions",
            session.id,
            view.suggestions.len()
        );
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);
        sessions.insert(session.id, session);
        Ok(view)
    }

    pub async fn view(&self, id: Uuid) -> Option<AnalysisView> {
        let mut sessions = self.sessions.write().await;
        self.touch(&mut sessions, &id).map(|s| AnalysisView::from(&*s))
    }

    /// Label and a snapshot of the current suggestions, for export.
    pub async fn snapshot(&self, id: Uuid) -> Option<(Option<String>, Vec<Suggestion>)> {
        let mut sessions = self.sessions.write().await;
        self.touch(&mut sessions, &id)
            .map(|s| (s.label.clone(), s.tracker.suggestions().to_vec()))
    }

    /// Replaces the session's list with a new analysis result.
    /// Returns `Ok(None)` when the session does not exist.
    pub async fn replace(
        &self,
        id: Uuid,
        suggestions: Vec<Suggestion>,
    ) -> Result<Option<AnalysisView>, TrackerError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = self.touch(&mut sessions, &id) else {
            return Ok(None);
        };
        session.tracker.replace(suggestions)?;
        session.updated_at = Utc::now();
        info!("Re-analyzed session {id}");
        Ok(Some(AnalysisView::from(&*session)))
    }

    /// Toggles a suggestion. `None` means the session itself is unknown.
    pub async fn toggle(
        &self,
        id: Uuid,
        suggestion_id: SuggestionId,
    ) -> Option<(ToggleOutcome, Progress)> {
        let mut sessions = self.sessions.write().await;
        let session = self.touch(&mut sessions, &id)?;
        let outcome = session.tracker.toggle(suggestion_id);

        if let ToggleOutcome::Toggled { celebration, .. } = &outcome {
            session.updated_at = Utc::now();
            if let Some(event) = celebration {
                info!(
                    "Session {id}: all {} suggestions completed at {}",
                    event.total, event.reached_at
                );
            }
        }

        Some((outcome, session.tracker.progress()))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Discarded analysis session {id}");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::Priority;

    const TTL: Duration = Duration::from_secs(60);

    fn store() -> SessionStore {
        SessionStore::new(TTL)
    }

    fn make(id: SuggestionId, category: &str) -> Suggestion {
        Suggestion::new(id, format!("s{id}"), "d", Priority::High, category)
    }

    #[tokio::test]
    async fn test_create_and_view() {
        let store = store();
        let created = store
            .create(Some("cv.pdf".to_string()), vec![make(1, "A"), make(2, "B")])
            .await
            .unwrap();

        let viewed = store.view(created.id).await.unwrap();
        assert_eq!(viewed.label.as_deref(), Some("cv.pdf"));
        assert_eq!(viewed.groups.len(), 2);
        assert_eq!(viewed.state, CompletionState::Incomplete);
    }

    #[tokio::test]
    async fn test_toggle_unknown_session() {
        let store = store();
        assert!(store.toggle(Uuid::new_v4(), 1).await.is_none());
    }

    #[tokio::test]
    async fn test_toggle_updates_progress() {
        let store = store();
        let view = store
            .create(None, vec![make(1, "A"), make(2, "A")])
            .await
            .unwrap();

        let (outcome, progress) = store.toggle(view.id, 1).await.unwrap();
        assert!(matches!(outcome, ToggleOutcome::Toggled { completed: true, .. }));
        assert_eq!(progress.completed_count, 1);

        let (outcome, _) = store.toggle(view.id, 99).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_replace_missing_session() {
        let store = store();
        let result = store.replace(Uuid::new_v4(), vec![make(1, "A")]).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_failed_replace_keeps_previous_list() {
        let store = store();
        let view = store.create(None, vec![make(1, "A")]).await.unwrap();

        let result = store
            .replace(view.id, vec![make(5, "A"), make(5, "B")])
            .await;
        assert!(result.is_err());

        let after = store.view(view.id).await.unwrap();
        assert_eq!(after.suggestions.len(), 1);
        assert_eq!(after.suggestions[0].id, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store();
        let view = store.create(None, vec![]).await.unwrap();
        assert!(store.remove(view.id).await);
        assert!(!store.remove(view.id).await);
        assert!(store.view(view.id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted() {
        let store = store();
        let view = store.create(None, vec![make(1, "A")]).await.unwrap();

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert!(store.view(view.id).await.is_none());
        assert!(store.toggle(view.id, 1).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_access_keeps_session_alive() {
        let store = store();
        let view = store.create(None, vec![make(1, "A")]).await.unwrap();

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(store.toggle(view.id, 1).await.is_some());
        tokio::time::advance(Duration::from_secs(40)).await;

        // 80s since creation, 40s since the last toggle
        let viewed = store.view(view.id).await.unwrap();
        assert_eq!(viewed.progress.completed_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_sweeps_idle_sessions() {
        let store = store();
        let old = store.create(None, vec![]).await.unwrap();

        tokio::time::advance(TTL).await;
        store.create(None, vec![]).await.unwrap();

        let sessions = store.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(!sessions.contains_key(&old.id));
    }
}
