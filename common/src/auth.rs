//! Auth context: current session, user and admin flag.
//!
//! Lifecycle is explicit. [`AuthContext::init`] subscribes to auth events,
//! fetches the session once and resolves the role, then a listener task
//! keeps the state current until [`AuthContext::teardown`] (or drop).

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::{fetch_one, AuthProvider, Backend};
use crate::error::Result;
use crate::model::Profile;
use crate::queries::profile_query;
use crate::session::{AuthEvent, AuthSnapshot, Session};

#[derive(Debug, Default)]
struct AuthState {
    session: Option<Session>,
    is_admin: bool,
    is_loading: bool,
}

struct Shared {
    backend: Arc<dyn Backend>,
    state: RwLock<AuthState>,
}

impl Shared {
    fn write(&self, f: impl FnOnce(&mut AuthState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    fn snapshot(&self) -> AuthSnapshot {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        AuthSnapshot {
            is_loading: state.is_loading,
            user: state.session.as_ref().map(|s| s.user.clone()),
            is_admin: state.is_admin,
        }
    }

    /// Store a new session (or none) with its freshly resolved role.
    async fn set_session(&self, session: Option<Session>) {
        let is_admin = match &session {
            Some(s) => resolve_admin(self.backend.as_ref(), &s.user.id).await,
            None => false,
        };
        self.write(|state| {
            state.session = session;
            state.is_admin = is_admin;
            state.is_loading = false;
        });
    }

    async fn apply(&self, event: AuthEvent) {
        debug!("auth state change: {}", event.name());
        match event {
            AuthEvent::SignedOut => self.set_session(None).await,
            AuthEvent::SignedIn(s) | AuthEvent::TokenRefreshed(s) | AuthEvent::UserUpdated(s) => {
                self.set_session(Some(s)).await
            }
        }
    }
}

/// Admin iff the user's profile row says so. Any lookup failure counts as
/// not admin.
pub async fn resolve_admin(backend: &dyn Backend, user_id: &str) -> bool {
    match fetch_one::<Profile>(backend, &profile_query(user_id)).await {
        Ok(profile) => profile.is_admin(),
        Err(e) => {
            warn!("Role lookup for {user_id} failed, treating as non-admin: {e}");
            false
        }
    }
}

pub struct AuthContext {
    provider: Arc<dyn AuthProvider>,
    shared: Arc<Shared>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthContext {
    pub async fn init(provider: Arc<dyn AuthProvider>, backend: Arc<dyn Backend>) -> Arc<Self> {
        let shared = Arc::new(Shared {
            backend,
            state: RwLock::new(AuthState {
                is_loading: true,
                ..Default::default()
            }),
        });

        // Subscribe before the first fetch so no change slips between them.
        let mut events = provider.subscribe();

        let session = provider.get_session().await.unwrap_or_else(|e| {
            warn!("Initial session fetch failed: {e}");
            None
        });
        shared.set_session(session).await;

        let listener = tokio::spawn({
            let shared = shared.clone();
            async move {
                loop {
                    match events.recv().await {
                        Ok(event) => shared.apply(event).await,
                        Err(RecvError::Lagged(n)) => warn!("Auth listener skipped {n} event(s)"),
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        });

        Arc::new(Self {
            provider,
            shared,
            listener: Mutex::new(Some(listener)),
        })
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.shared.snapshot()
    }

    pub fn session(&self) -> Option<Session> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .clone()
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot().is_admin
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSnapshot> {
        let session = self.provider.sign_in_with_password(email, password).await?;
        self.shared.set_session(Some(session)).await;
        Ok(self.snapshot())
    }

    /// Re-read the session from the provider (refreshing tokens if due).
    pub async fn refresh(&self) -> Result<AuthSnapshot> {
        let session = self.provider.get_session().await?;
        self.shared.set_session(session).await;
        Ok(self.snapshot())
    }

    /// Clears local state whatever the remote sign-out returns.
    pub async fn sign_out(&self) {
        if let Err(e) = self.provider.sign_out().await {
            warn!("Remote sign-out failed: {e}");
        }
        self.shared.write(|state| {
            state.session = None;
            state.is_admin = false;
            state.is_loading = false;
        });
        info!("Signed out");
    }

    /// Stop the event listener. Safe to call more than once.
    pub fn teardown(&self) {
        let handle = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("auth listener stopped");
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AuthContext {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::backend::Table;
    use crate::memory::MemoryBackend;
    use crate::session::{admin_access, Access};

    async fn eventually(ctx: &AuthContext, check: impl Fn(&AuthSnapshot) -> bool) -> bool {
        for _ in 0..100 {
            if check(&ctx.snapshot()) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_signed_out_start() {
        let db = Arc::new(MemoryBackend::new());
        let ctx = AuthContext::init(db.clone(), db.clone()).await;
        let snap = ctx.snapshot();
        assert!(!snap.is_loading);
        assert_eq!(snap.user, None);
        assert_eq!(admin_access(&snap), Access::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_admin_sign_in_grants_access() {
        let db = Arc::new(MemoryBackend::new());
        db.add_user("admin@almanbar.sa", "pw", Some("admin"));
        let ctx = AuthContext::init(db.clone(), db.clone()).await;
        let snap = ctx.sign_in("admin@almanbar.sa", "pw").await.unwrap();
        assert!(matches!(admin_access(&snap), Access::Granted { .. }));
    }

    #[tokio::test]
    async fn test_non_admin_is_redirected() {
        let db = Arc::new(MemoryBackend::new());
        db.add_user("editor@almanbar.sa", "pw", Some("editor"));
        db.add_user("nobody@almanbar.sa", "pw", None);
        let ctx = AuthContext::init(db.clone(), db.clone()).await;

        let snap = ctx.sign_in("editor@almanbar.sa", "pw").await.unwrap();
        assert!(snap.user.is_some());
        assert_eq!(admin_access(&snap), Access::RedirectToLogin);

        // No profile row at all: lookup fails, fail closed.
        let snap = ctx.sign_in("nobody@almanbar.sa", "pw").await.unwrap();
        assert_eq!(admin_access(&snap), Access::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_profile_lookup_failure_is_not_admin() {
        let db = Arc::new(MemoryBackend::new());
        db.add_user("admin@almanbar.sa", "pw", Some("admin"));
        db.fail_selects_from(Table::Profiles);
        let ctx = AuthContext::init(db.clone(), db.clone()).await;
        let snap = ctx.sign_in("admin@almanbar.sa", "pw").await.unwrap();
        assert!(!snap.is_admin);
    }

    #[tokio::test]
    async fn test_listener_follows_external_events() {
        let db = Arc::new(MemoryBackend::new());
        let user = db.add_user("admin@almanbar.sa", "pw", Some("admin"));
        let ctx = AuthContext::init(db.clone(), db.clone()).await;

        db.emit(AuthEvent::SignedIn(Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: None,
            user,
        }));
        assert!(eventually(&ctx, |s| s.is_admin).await);

        db.emit(AuthEvent::SignedOut);
        assert!(eventually(&ctx, |s| s.user.is_none() && !s.is_admin).await);
    }

    #[tokio::test]
    async fn test_listener_applies_token_refresh() {
        let db = Arc::new(MemoryBackend::new());
        db.add_user("admin@almanbar.sa", "pw", Some("admin"));
        let ctx = AuthContext::init(db.clone(), db.clone()).await;
        let signed_in = ctx.sign_in("admin@almanbar.sa", "pw").await.unwrap();
        let user = signed_in.user.clone().unwrap();

        db.emit(AuthEvent::TokenRefreshed(Session {
            access_token: "rotated".into(),
            refresh_token: "rotated-refresh".into(),
            expires_at: Some(4_000_000_000),
            user,
        }));
        for _ in 0..100 {
            if ctx.session().is_some_and(|s| s.access_token == "rotated") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let session = ctx.session().unwrap();
        assert_eq!(session.access_token, "rotated");
        assert_eq!(session.refresh_token, "rotated-refresh");
        assert!(ctx.is_admin());
    }

    #[tokio::test]
    async fn test_sign_out_and_teardown() {
        let db = Arc::new(MemoryBackend::new());
        db.add_user("admin@almanbar.sa", "pw", Some("admin"));
        let ctx = AuthContext::init(db.clone(), db.clone()).await;
        ctx.sign_in("admin@almanbar.sa", "pw").await.unwrap();

        ctx.sign_out().await;
        assert_eq!(ctx.session(), None);
        assert!(!ctx.is_admin());

        assert!(ctx.is_listening());
        ctx.teardown();
        ctx.teardown();
        assert!(!ctx.is_listening());
    }
}
