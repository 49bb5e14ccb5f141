//! Session values and the admin route gate.
//!
//! These are plain data so both the server and the WASM client can decide
//! where an admin route should go.

use serde::{Deserialize, Serialize};

pub const LOGIN_ROUTE: &str = "/login";
pub const ADMIN_ROUTE: &str = "/admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued by the auth service for one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds; `None` when the service did not say.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// True when the access token expires within `margin_secs` of `now`.
    pub fn expires_within(&self, now: i64, margin_secs: i64) -> bool {
        self.expires_at
            .map(|at| at - now <= margin_secs)
            .unwrap_or(false)
    }
}

/// Changes pushed by the auth service after the initial session fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
    UserUpdated(Session),
}

impl AuthEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedIn(_) => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed(_) => "TOKEN_REFRESHED",
            Self::UserUpdated(_) => "USER_UPDATED",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedOut => None,
            Self::SignedIn(s) | Self::TokenRefreshed(s) | Self::UserUpdated(s) => Some(s),
        }
    }
}

/// What the UI may know about the current auth state (no tokens).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    pub is_loading: bool,
    pub user: Option<AuthUser>,
    pub is_admin: bool,
}

impl AuthSnapshot {
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Outcome of navigating to the admin route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    /// Auth state is still being resolved; render a spinner.
    Pending,
    Granted { email: Option<String> },
    RedirectToLogin,
}

/// Admin pages require a signed-in user whose profile carries the admin role.
pub fn admin_access(snapshot: &AuthSnapshot) -> Access {
    if snapshot.is_loading {
        return Access::Pending;
    }
    match &snapshot.user {
        Some(user) if snapshot.is_admin => Access::Granted {
            email: user.email.clone(),
        },
        _ => Access::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: "u1".into(),
            email: Some("admin@almanbar.sa".into()),
        }
    }

    #[test]
    fn test_non_admin_is_redirected() {
        let snapshot = AuthSnapshot {
            is_loading: false,
            user: Some(user()),
            is_admin: false,
        };
        assert_eq!(admin_access(&snapshot), Access::RedirectToLogin);
        assert_eq!(admin_access(&AuthSnapshot::signed_out()), Access::RedirectToLogin);
    }

    #[test]
    fn test_admin_is_granted() {
        let snapshot = AuthSnapshot {
            is_loading: false,
            user: Some(user()),
            is_admin: true,
        };
        assert_eq!(
            admin_access(&snapshot),
            Access::Granted {
                email: Some("admin@almanbar.sa".into())
            }
        );
    }

    #[test]
    fn test_loading_is_pending() {
        let snapshot = AuthSnapshot {
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(admin_access(&snapshot), Access::Pending);
    }

    #[test]
    fn test_expiry_margin() {
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: Some(1_000),
            user: user(),
        };
        assert!(session.expires_within(950, 60));
        assert!(!session.expires_within(900, 60));
    }
}
