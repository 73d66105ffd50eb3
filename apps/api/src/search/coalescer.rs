//! Per-client debounced search.
//!
//! Each client id owns a `Debouncer` and the snapshot of its last completed
//! query. Keystrokes are submitted as they arrive; the query runs against the
//! `SearchSource` only after the client has been quiet for the delay.
//! Clients that neither type nor poll for `ttl` are forgotten.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::models::bookmark::Bookmark;
use crate::search::debounce::Debouncer;
use crate::search::filter::SearchSource;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub term: String,
    pub results: Vec<Bookmark>,
    /// Number of dispatched queries that have completed for this client.
    pub generation: u64,
    /// Set when the latest dispatch failed; `results` then still holds the previous answer.
    pub notice: Option<String>,
}

struct ClientSearch {
    debouncer: Debouncer,
    snapshot: Arc<RwLock<SearchSnapshot>>,
}

struct ClientEntry {
    search: Arc<ClientSearch>,
    last_seen: Instant,
}

pub struct SearchCoalescer {
    delay: Duration,
    ttl: Duration,
    source: Arc<dyn SearchSource>,
    clients: Mutex<HashMap<String, ClientEntry>>,
}

impl SearchCoalescer {
    pub fn new(delay: Duration, ttl: Duration, source: Arc<dyn SearchSource>) -> Self {
        Self {
            delay,
            ttl,
            source,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Records a keystroke. The query itself runs later, if at all.
    pub fn submit(&self, client_id: &str, term: String) {
        let client = self.client(client_id);
        let snapshot = client.snapshot.clone();
        let source = self.source.clone();
        let client_id = client_id.to_string();

        client.debouncer.call(async move {
            let outcome = if term.trim().is_empty() {
                Ok(vec![])
            } else {
                source.search(&term).await
            };

            let mut snap = snapshot.write().await;
            snap.generation += 1;
            match outcome {
                Ok(results) => {
                    debug!(
                        "Search for client {client_id}: {:?} -> {} results",
                        term,
                        results.len()
                    );
                    snap.term = term;
                    snap.results = results;
                    snap.notice = None;
                }
                Err(e) => {
                    error!("Search failed for client {client_id}: {e}");
                    snap.notice = Some("Search failed; showing previous results".to_string());
                }
            }
        });
    }

    /// Latest completed results for a client, or `None` if it never searched
    /// or has been idle past the TTL.
    pub async fn results(&self, client_id: &str) -> Option<SearchSnapshot> {
        let client = {
            let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
            self.evict_idle(&mut clients);
            let entry = clients.get_mut(client_id)?;
            entry.last_seen = Instant::now();
            entry.search.clone()
        };
        let snapshot = client.snapshot.read().await.clone();
        Some(snapshot)
    }

    fn client(&self, client_id: &str) -> Arc<ClientSearch> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        self.evict_idle(&mut clients);
        let entry = clients
            .entry(client_id.to_string())
            .or_insert_with(|| ClientEntry {
                search: Arc::new(ClientSearch {
                    debouncer: Debouncer::new(self.delay),
                    snapshot: Arc::new(RwLock::new(SearchSnapshot::default())),
                }),
                last_seen: Instant::now(),
            });
        entry.last_seen = Instant::now();
        entry.search.clone()
    }

    /// Dropping an evicted client's debouncer aborts any query it still has pending.
    fn evict_idle(&self, clients: &mut HashMap<String, ClientEntry>) {
        let before = clients.len();
        clients.retain(|_, entry| entry.last_seen.elapsed() < self.ttl);
        let evicted = before - clients.len();
        if evicted > 0 {
            debug!("Evicted {evicted} idle search clients");
        }
    }
}
