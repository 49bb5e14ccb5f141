//! Server-only helpers for server functions: state access, the admin
//! session cookie and error mapping.

pub mod sessions;

use std::fmt::Display;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use leptos::*;

use almanbar_common::admin::AdminActions;
use almanbar_common::error::Error;
use almanbar_common::queries::Content;

use crate::app::AppState;
use sessions::{cookie_value, AdminSession, SESSION_COOKIE};

/// Display string of a library error, as the UI shows it.
pub fn server_error(e: impl Display) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

pub fn app_state() -> Result<AppState, ServerFnError> {
    use_context::<AppState>().ok_or_else(|| ServerFnError::new("Missing AppState"))
}

/// Add a `Set-Cookie` header to the server function's response.
pub fn set_cookie(cookie: &str) {
    if let (Some(response), Ok(value)) = (
        use_context::<leptos_axum::ResponseOptions>(),
        HeaderValue::from_str(cookie),
    ) {
        response.insert_header(header::SET_COOKIE, value);
    }
}

/// The session id from the request's cookie, if any.
pub async fn session_id() -> Result<Option<String>, ServerFnError> {
    let headers: HeaderMap = leptos_axum::extract().await?;
    Ok(headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|h| cookie_value(h, SESSION_COOKIE))
        .map(str::to_string))
}

pub async fn current_session(state: &AppState) -> Result<Option<Arc<AdminSession>>, ServerFnError> {
    Ok(session_id().await?.and_then(|id| state.sessions.get(&id)))
}

/// The caller's session if it still belongs to an admin.
///
/// Refreshes the access token when it is about to expire; a failed refresh
/// signs the session out.
pub async fn require_admin() -> Result<(AppState, Arc<AdminSession>), ServerFnError> {
    use almanbar_common::backend::AuthProvider;

    let state = app_state()?;
    let session = current_session(&state)
        .await?
        .ok_or_else(|| server_error(Error::Unauthenticated))?;
    let live = session.auth.get_session().await.map_err(server_error)?;
    if live.is_none() || !session.context.is_admin() {
        tracing::warn!("Rejected admin call without an admin session");
        return Err(server_error(Error::Unauthenticated));
    }
    Ok((state, session))
}

/// Write flows acting as the signed-in admin.
pub fn admin_actions(state: &AppState, session: &AdminSession) -> AdminActions {
    AdminActions::new(
        session.auth.clone(),
        session.auth.clone(),
        state.content.cache().clone(),
        state.config.storage_bucket.clone(),
    )
}

/// Reads that need the admin's row-level access (contact messages).
pub fn admin_content(state: &AppState, session: &AdminSession) -> Content {
    Content::new(session.auth.clone(), state.content.cache().clone())
}
