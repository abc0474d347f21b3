use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use super::QrCodesView;
use crate::models::EventId;
use crate::store::QrCodeStore;

pub type SharedView = Arc<Mutex<QrCodesView>>;

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

struct Session {
    view: SharedView,
    last_used: Instant,
}

/// Open admin pages, one per event.
///
/// A session lives until it is reset, which plays the part of a browser
/// reload: a fresh view, a fresh fetch and an empty error slot. Sessions
/// idle longer than the TTL are dropped, and past `max_sessions` the least
/// recently used one goes.
///
/// Handlers hold a view's mutex for the whole store round trip of a load,
/// add or delete. Writes to one event are therefore serialized, and a slow
/// backend call also holds up page renders for that same event until it
/// returns. Other events are unaffected.
#[derive(Clone)]
pub struct ViewSessions {
    sessions: Arc<RwLock<HashMap<EventId, Session>>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for ViewSessions {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl ViewSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Returns the event's view, creating and loading it on first use.
    ///
    /// A view whose last load failed is replaced by a fresh one and loaded
    /// again, the same as reloading the page.
    pub async fn open(&self, event_id: &EventId, store: &dyn QrCodeStore) -> SharedView {
        let view = {
            let mut sessions = self.sessions.write().await;
            let now = Instant::now();
            self.evict(&mut sessions, now, event_id);

            let session = sessions.entry(event_id.clone()).or_insert_with(|| Session {
                view: Arc::new(Mutex::new(QrCodesView::new(Some(event_id.clone())))),
                last_used: now,
            });
            session.last_used = now;
            session.view.clone()
        };

        {
            let mut guard = view.lock().await;
            if guard.load_failed() {
                tracing::debug!(event_id = %event_id, "Retrying failed load");
                *guard = QrCodesView::new(Some(event_id.clone()));
            }
            if guard.is_loading() {
                guard.load(store).await;
            }
        }
        view
    }

    pub async fn reset(&self, event_id: &EventId) {
        if self.sessions.write().await.remove(event_id).is_some() {
            tracing::debug!(event_id = %event_id, "Discarded admin view session");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn contains(&self, event_id: &EventId) -> bool {
        self.sessions.read().await.contains_key(event_id)
    }

    /// Drops idle sessions, then makes room for one more if `incoming` is new.
    fn evict(&self, sessions: &mut HashMap<EventId, Session>, now: Instant, incoming: &EventId) {
        let ttl = self.idle_ttl;
        sessions.retain(|_, session| now.duration_since(session.last_used) <= ttl);

        while !sessions.contains_key(incoming) && sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_used)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!(event_id = %oldest, "Evicted least recently used admin view session");
        }
    }
}
