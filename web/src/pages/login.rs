//! Admin sign-in page and the auth server functions.

use leptos::*;
use leptos_router::*;

use almanbar_common::session::{AuthSnapshot, ADMIN_ROUTE};

use crate::app::use_lang;
use crate::components::feedback::{error_text, Notice, NoticeBar};
use crate::copy;

// ─── Server functions ────────────────────────────────────────────────────────

/// Sign in with email and password. The tokens stay in the server's
/// session store; the browser only gets the session cookie.
#[server(Login, "/api")]
pub async fn login(email: String, password: String) -> Result<AuthSnapshot, ServerFnError> {
    use almanbar_common::auth::AuthContext;
    use almanbar_common::rest::RestAuth;

    use crate::server::sessions::{session_cookie, AdminSession};
    use crate::server::{app_state, server_error, session_id, set_cookie};

    let state = app_state()?;
    if let Some(previous) = session_id().await? {
        state.sessions.remove(&previous);
    }

    let auth = RestAuth::new(state.rest.clone());
    let context = AuthContext::init(auth.clone(), auth.clone()).await;
    let snapshot = context
        .sign_in(email.trim(), &password)
        .await
        .map_err(server_error)?;

    let id = state.sessions.insert(AdminSession { auth, context });
    set_cookie(&session_cookie(&id));
    tracing::info!(
        "Signed in {} (admin: {}, {} live session(s))",
        email.trim(),
        snapshot.is_admin,
        state.sessions.len()
    );
    Ok(snapshot)
}

#[server(Logout, "/api")]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::server::sessions::clear_session_cookie;
    use crate::server::{app_state, session_id, set_cookie};

    let state = app_state()?;
    if let Some(id) = session_id().await? {
        if let Some(session) = state.sessions.remove(&id) {
            session.context.sign_out().await;
        }
    }
    set_cookie(&clear_session_cookie());
    Ok(())
}

/// The caller's auth state, refreshing the access token if it is due.
#[server(GetAuthSnapshot, "/api")]
pub async fn get_auth_snapshot() -> Result<AuthSnapshot, ServerFnError> {
    use crate::server::sessions::clear_session_cookie;
    use crate::server::{app_state, session_id, set_cookie};

    let state = app_state()?;
    let Some(id) = session_id().await? else {
        return Ok(AuthSnapshot::signed_out());
    };
    let Some(session) = state.sessions.get(&id) else {
        set_cookie(&clear_session_cookie());
        return Ok(AuthSnapshot::signed_out());
    };

    let snapshot = session.context.refresh().await.unwrap_or_else(|e| {
        tracing::warn!("Session refresh failed: {e}");
        AuthSnapshot::signed_out()
    });
    if snapshot.user.is_none() {
        state.sessions.remove(&id);
        set_cookie(&clear_session_cookie());
    }
    Ok(snapshot)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn LoginPage() -> impl IntoView {
    let lang = use_lang();
    let navigate = use_navigate();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (busy, set_busy) = create_signal(false);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_busy.set(true);
        set_notice.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match login(email.get_untracked(), password.get_untracked()).await {
                Ok(snapshot) if snapshot.is_admin => navigate(ADMIN_ROUTE, Default::default()),
                Ok(_) => set_notice.set(Some(Notice::Failure(
                    copy::NOT_ADMIN.pick(lang.get_untracked()).to_string(),
                ))),
                Err(e) => set_notice.set(Some(Notice::Failure(error_text(&e)))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="page login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>{move || copy::LOGIN_TITLE.pick(lang.get())}</h1>
                <label class="field">
                    <span>{move || copy::FIELD_EMAIL.pick(lang.get())}</span>
                    <input
                        type="email"
                        required
                        autocomplete="username"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>{move || copy::PASSWORD.pick(lang.get())}</span>
                    <input
                        type="password"
                        required
                        autocomplete="current-password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn btn-primary" disabled=busy>
                    {move || (if busy.get() { copy::SIGNING_IN } else { copy::SIGN_IN }).pick(lang.get())}
                </button>
                <NoticeBar notice=notice/>
            </form>
        </div>
    }
}
