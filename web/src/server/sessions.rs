//! Signed-in admin sessions, keyed by an opaque cookie id.
//!
//! Tokens never reach the browser: the cookie only names an entry here,
//! and each entry owns its own auth client and auth context.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use almanbar_common::auth::AuthContext;
use almanbar_common::rest::RestAuth;

pub const SESSION_COOKIE: &str = "almanbar_session";

/// Sessions unused for this long are dropped by the sweeper.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub struct AdminSession {
    pub auth: Arc<RestAuth>,
    pub context: Arc<AuthContext>,
}

struct Entry {
    session: Arc<AdminSession>,
    last_seen: Instant,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.len())
            .finish()
    }
}

impl SessionStore {
    /// Store a session under a fresh random id and return the id.
    pub fn insert(&self, session: AdminSession) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.lock().insert(
            id.clone(),
            Entry {
                session: Arc::new(session),
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Look up a session and mark it as recently used.
    pub fn get(&self, id: &str) -> Option<Arc<AdminSession>> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    /// Remove a session and stop its auth listener.
    pub fn remove(&self, id: &str) -> Option<Arc<AdminSession>> {
        let removed = self.lock().remove(id).map(|entry| entry.session);
        if let Some(session) = &removed {
            session.context.teardown();
        }
        removed
    }

    /// Remove every session not used within `max_idle`. Returns how many
    /// were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let idle: Vec<String> = self
            .lock()
            .iter()
            .filter(|(_, entry)| entry.last_seen.elapsed() >= max_idle)
            .map(|(id, _)| id.clone())
            .collect();
        idle.iter().filter(|id| self.remove(id).is_some()).count()
    }

    /// Periodically evict idle sessions for the life of the process.
    pub fn spawn_sweeper(&self, every: Duration, max_idle: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(max_idle);
                if evicted > 0 {
                    tracing::info!("Evicted {evicted} idle session(s), {} left", store.len());
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ─── Cookies ─────────────────────────────────────────────────────────────────

pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; HttpOnly; SameSite=Lax; Path=/")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Value of cookie `name` in a `Cookie:` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use almanbar_common::rest::RestBackend;

    #[test]
    fn test_cookie_value() {
        let header = "theme=dark; almanbar_session=abc-123; other=1";
        assert_eq!(cookie_value(header, SESSION_COOKIE), Some("abc-123"));
        assert_eq!(cookie_value("almanbar_session=", SESSION_COOKIE), None);
        assert_eq!(cookie_value("x_almanbar_session=zzz", SESSION_COOKIE), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let set = session_cookie("abc");
        assert!(set.starts_with("almanbar_session=abc;"));
        assert!(set.contains("HttpOnly"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_store_lifecycle() {
        let client = RestBackend::new("http://127.0.0.1:9", "anon", None).unwrap();
        let auth = RestAuth::new(client);
        // Signed out: init makes no network call.
        let context = AuthContext::init(auth.clone(), auth.clone()).await;
        assert!(context.is_listening());

        let store = SessionStore::default();
        let id = store.insert(AdminSession {
            auth,
            context: context.clone(),
        });
        assert!(store.get(&id).is_some());
        assert_eq!(store.len(), 1);

        store.remove(&id);
        assert!(store.is_empty());
        assert!(!context.is_listening());
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let client = RestBackend::new("http://127.0.0.1:9", "anon", None).unwrap();
        let auth = RestAuth::new(client);
        let context = AuthContext::init(auth.clone(), auth.clone()).await;

        let store = SessionStore::default();
        let id = store.insert(AdminSession {
            auth,
            context: context.clone(),
        });

        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert!(store.get(&id).is_some());

        assert_eq!(store.evict_idle(Duration::ZERO), 1);
        assert!(store.get(&id).is_none());
        assert!(!context.is_listening());
    }

    #[tokio::test]
    async fn test_sweeper_evicts_in_background() {
        let client = RestBackend::new("http://127.0.0.1:9", "anon", None).unwrap();
        let auth = RestAuth::new(client);
        let context = AuthContext::init(auth.clone(), auth.clone()).await;

        let store = SessionStore::default();
        store.insert(AdminSession {
            auth,
            context: context.clone(),
        });

        let sweeper = store.spawn_sweeper(Duration::from_millis(10), Duration::ZERO);
        for _ in 0..50 {
            if store.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sweeper.abort();
        assert!(store.is_empty());
        assert!(!context.is_listening());
    }
}
