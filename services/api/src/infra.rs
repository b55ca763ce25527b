use metrics_exporter_prometheus::PrometheusHandle;
use productivity_coach::analysis::TextAnalyzer;
use productivity_coach::chat::{ChatSession, SessionId, SessionStore, StoreError};
use productivity_coach::config::{AppConfig, SessionConfig};
use productivity_coach::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct StoredSession {
    session: ChatSession,
    touched: Instant,
    tick: u64,
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<SessionId, StoredSession>,
    tick: u64,
}

impl SessionTable {
    fn touch(&mut self, id: &SessionId) -> Option<&mut StoredSession> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(id).map(|entry| {
            entry.touched = Instant::now();
            entry.tick = tick;
            entry
        })
    }

    fn sweep_idle(&mut self, idle_timeout: Duration) {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.touched.elapsed() <= idle_timeout);
        let swept = before - self.entries.len();
        if swept > 0 {
            info!(swept, remaining = self.entries.len(), "idle chat sessions dropped");
        }
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.tick)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            self.entries.remove(&id);
            info!(session_id = %id, "chat session evicted at capacity");
        }
    }
}

/// Process-local session store bounded by [`SessionConfig`].
///
/// Idle sessions are swept whenever a new one arrives; if the table is still
/// full the least recently used session makes room.
#[derive(Clone)]
pub(crate) struct InMemorySessionStore {
    table: Arc<Mutex<SessionTable>>,
    limits: SessionConfig,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl InMemorySessionStore {
    pub(crate) fn new(limits: &SessionConfig) -> Self {
        Self {
            table: Arc::new(Mutex::new(SessionTable::default())),
            limits: limits.clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionTable>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("session mutex poisoned".to_string()))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().map(|guard| guard.entries.len()).unwrap_or_default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: ChatSession) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        if table.entries.contains_key(&session.id) {
            return Err(StoreError::Conflict);
        }
        table.sweep_idle(self.limits.idle_timeout);
        while table.entries.len() >= self.limits.max_sessions.max(1) {
            table.evict_least_recent();
        }
        table.tick += 1;
        let tick = table.tick;
        table.entries.insert(
            session.id.clone(),
            StoredSession {
                session,
                touched: Instant::now(),
                tick,
            },
        );
        Ok(())
    }

    fn update(&self, session: ChatSession, expected_revision: u64) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        let entry = table.touch(&session.id).ok_or(StoreError::NotFound)?;
        if entry.session.revision() != expected_revision {
            return Err(StoreError::Conflict);
        }
        entry.session = session;
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ChatSession>, StoreError> {
        let mut table = self.lock()?;
        Ok(table.touch(id).map(|entry| entry.session.clone()))
    }

    fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        table.entries.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

/// Build the process-wide analyzer; a broken stopword override stops startup.
pub(crate) fn load_analyzer(config: &AppConfig) -> Result<Arc<TextAnalyzer>, AppError> {
    let analyzer = TextAnalyzer::from_config(&config.analysis)?;
    Ok(Arc::new(analyzer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use productivity_coach::chat::ChatService;

    fn limits(max_sessions: usize, idle_timeout: Duration) -> SessionConfig {
        SessionConfig {
            max_sessions,
            idle_timeout,
        }
    }

    fn service(store: &InMemorySessionStore) -> ChatService<InMemorySessionStore> {
        ChatService::new(Arc::new(store.clone()), Arc::new(TextAnalyzer::default()))
    }

    #[test]
    fn stale_update_is_rejected() {
        let store = InMemorySessionStore::default();
        let service = service(&store);
        let id = service.start().expect("start").session_id;

        let first = store.fetch(&id).expect("fetch").expect("stored");
        let second = first.clone();
        service.post(&id, "start").expect("post lands");

        assert!(matches!(
            store.update(second, first.revision()),
            Err(StoreError::Conflict)
        ));
        let stored = store.fetch(&id).expect("fetch").expect("stored");
        assert_eq!(stored.revision(), 1);
        assert_eq!(stored.stage().label(), "multiple_choice");
    }

    #[test]
    fn full_store_evicts_least_recently_used() {
        let store = InMemorySessionStore::new(&limits(2, Duration::from_secs(3600)));
        let service = service(&store);
        let first = service.start().expect("start").session_id;
        let second = service.start().expect("start").session_id;

        service.get(&first).expect("first still present");
        let third = service.start().expect("start").session_id;

        assert_eq!(store.len(), 2);
        assert!(store.fetch(&first).expect("fetch").is_some());
        assert!(store.fetch(&second).expect("fetch").is_none());
        assert!(store.fetch(&third).expect("fetch").is_some());
    }

    #[test]
    fn idle_sessions_are_swept_on_insert() {
        let store = InMemorySessionStore::new(&limits(10, Duration::ZERO));
        let service = service(&store);
        let idle = service.start().expect("start").session_id;
        std::thread::sleep(Duration::from_millis(5));

        let fresh = service.start().expect("start").session_id;
        assert_eq!(store.len(), 1);
        assert!(store.fetch(&idle).expect("fetch").is_none());
        assert!(store.fetch(&fresh).expect("fetch").is_some());
    }
}
