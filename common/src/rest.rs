//! HTTP client for the hosted backend (PostgREST tables, storage, auth).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::backend::{AuthProvider, Backend, Query, Storage, Table};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{AuthEvent, AuthUser, Session};

/// Refresh the access token when it expires within this many seconds.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Table, storage and auth requests against one hosted project.
///
/// Cloning is cheap; clones share the connection pool. Requests carry the
/// anon key unless a user access token was attached with
/// [`RestBackend::with_access_token`].
#[derive(Clone)]
pub struct RestBackend {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url)
            .field("authorized", &self.access_token.is_some())
            .finish()
    }
}

impl RestBackend {
    pub fn new(base_url: &str, anon_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(15));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Backend(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.backend_url, &config.anon_key, config.request_timeout)
    }

    /// A handle that acts as the signed-in user.
    pub fn with_access_token(&self, token: &str) -> Self {
        Self {
            access_token: Some(token.to_string()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| Error::Backend(format!("invalid backend URL: {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn table_url(&self, table: Table, params: &[(String, String)]) -> Result<Url> {
        self.url(&format!("/rest/v1/{}", table.name()), params)
    }

    fn by_id(id: &str) -> [(String, String); 1] {
        [("id".to_string(), format!("eq.{id}"))]
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Send and map transport failures and non-success statuses.
    async fn send(builder: RequestBuilder) -> Result<Response> {
        let resp = builder
            .send()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Status {
            status: status.as_u16(),
            message: error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
        })
    }

    async fn json<T: for<'de> Deserialize<'de>>(resp: Response) -> Result<T> {
        resp.json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }
}

/// Pull the human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let text = body.trim();
    if text.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return Some(text.to_string());
    };
    ["message", "error_description", "msg", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| Some(text.to_string()))
}

#[async_trait]
impl Backend for RestBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        let url = self.table_url(query.table, &query.params())?;
        debug!("GET {url}");
        let resp = Self::send(self.request(Method::GET, url)).await?;
        Self::json(resp).await
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>> {
        let url = self.table_url(table, &[])?;
        debug!("POST {url} ({} row(s))", rows.len());
        let resp = Self::send(
            self.request(Method::POST, url)
                .header("Prefer", "return=representation")
                .json(&rows),
        )
        .await?;
        Self::json(resp).await
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<()> {
        let url = self.table_url(table, &Self::by_id(id))?;
        debug!("PATCH {url}");
        Self::send(self.request(Method::PATCH, url).json(&patch)).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<()> {
        let url = self.table_url(table, &Self::by_id(id))?;
        debug!("DELETE {url}");
        Self::send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for RestBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = self.url(&format!("/storage/v1/object/{bucket}/{path}"), &[])?;
        debug!("upload {} bytes to {url}", bytes.len());
        Self::send(
            self.request(Method::POST, url)
                .header("Content-Type", content_type)
                .header("x-upsert", "false")
                .body(bytes),
        )
        .await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        Session {
            expires_at: self.expires_at.or(self.expires_in.map(|secs| now + secs)),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user: self.user,
        }
    }
}

/// Password auth for one browser session.
///
/// Holds the tokens in memory and publishes every change on a broadcast
/// channel, like the hosted client's `onAuthStateChange`.
pub struct RestAuth {
    client: RestBackend,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl RestAuth {
    pub fn new(client: RestBackend) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            client,
            session: RwLock::new(None),
            events,
        })
    }

    /// A table/storage handle carrying the current user's access token,
    /// or the anon key when signed out.
    pub async fn authorized(&self) -> RestBackend {
        match self.session.read().await.as_ref() {
            Some(session) => self.client.with_access_token(&session.access_token),
            None => self.client.clone(),
        }
    }

    async fn token_request(&self, grant_type: &str, body: Value) -> Result<Session> {
        let params = [("grant_type".to_string(), grant_type.to_string())];
        let url = self.client.url("/auth/v1/token", &params)?;
        let resp = RestBackend::send(self.client.request(Method::POST, url).json(&body)).await?;
        let token: TokenResponse = RestBackend::json(resp).await?;
        Ok(token.into_session(chrono::Utc::now().timestamp()))
    }

    fn publish(&self, event: AuthEvent) {
        debug!("auth event {}", event.name());
        let _ = self.events.send(event);
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let session = self
            .token_request("refresh_token", json!({ "refresh_token": refresh_token }))
            .await?;
        *self.session.write().await = Some(session.clone());
        self.publish(AuthEvent::TokenRefreshed(session.clone()));
        Ok(session)
    }
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn get_session(&self) -> Result<Option<Session>> {
        let current = self.session.read().await.clone();
        let Some(session) = current else {
            return Ok(None);
        };
        if !session.expires_within(chrono::Utc::now().timestamp(), REFRESH_MARGIN_SECS) {
            return Ok(Some(session));
        }
        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => Ok(Some(fresh)),
            Err(e) => {
                warn!("Session refresh failed, signing out: {e}");
                *self.session.write().await = None;
                self.publish(AuthEvent::SignedOut);
                Ok(None)
            }
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let session = self
            .token_request("password", json!({ "email": email, "password": password }))
            .await?;
        *self.session.write().await = Some(session.clone());
        info!("Signed in {}", email);
        self.publish(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Local state is cleared even when the remote logout fails.
    async fn sign_out(&self) -> Result<()> {
        let previous = self.session.write().await.take();
        self.publish(AuthEvent::SignedOut);
        let Some(session) = previous else {
            return Ok(());
        };
        let url = self.client.url("/auth/v1/logout", &[])?;
        let request = self
            .client
            .with_access_token(&session.access_token)
            .request(Method::POST, url);
        RestBackend::send(request).await?;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

/// Table and storage calls made as the signed-in user, so row-level
/// security sees their token.
#[async_trait]
impl Backend for RestAuth {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        self.authorized().await.select(query).await
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>> {
        self.authorized().await.insert(table, rows).await
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<()> {
        self.authorized().await.update(table, id, patch).await
    }

    async fn delete(&self, table: Table, id: &str) -> Result<()> {
        self.authorized().await.delete(table, id).await
    }
}

#[async_trait]
impl Storage for RestAuth {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.authorized()
            .await
            .upload(bucket, path, bytes, content_type)
            .await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client.public_url(bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestBackend {
        RestBackend::new("https://demo.supabase.co/", "anon", None).unwrap()
    }

    #[test]
    fn test_table_url_encodes_params() {
        let q = Query::from(Table::Projects)
            .embed(Table::ProjectMedia)
            .eq("id", "a b");
        let url = client().table_url(q.table, &q.params()).unwrap();
        assert_eq!(url.path(), "/rest/v1/projects");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, q.params());
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            client().public_url("uploads", "p1/image_1_a.webp"),
            "https://demo.supabase.co/storage/v1/object/public/uploads/p1/image_1_a.webp"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"code":"23503","message":"violates foreign key"}"#),
            Some("violates foreign key".into())
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            Some("Invalid login credentials".into())
        );
        assert_eq!(error_message("Bad gateway"), Some("Bad gateway".into()));
        assert_eq!(error_message("  "), None);
    }

    #[test]
    fn test_token_expiry_from_expires_in() {
        let token = TokenResponse {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_in: Some(3600),
            expires_at: None,
            user: AuthUser {
                id: "u".into(),
                email: None,
            },
        };
        assert_eq!(token.into_session(100).expires_at, Some(3700));
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_local() {
        let auth = RestAuth::new(client());
        let mut events = auth.subscribe();
        auth.sign_out().await.unwrap();
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
        assert_eq!(auth.get_session().await.unwrap(), None);
    }

    // ─── Token refresh against a local auth stub ──────────────────────────

    async fn token_stub(
        axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
        axum::Json(body): axum::Json<Value>,
    ) -> axum::response::Response {
        use axum::response::IntoResponse;

        let grant = params.get("grant_type").map(String::as_str);
        if grant != Some("refresh_token") || body["refresh_token"] != "good-refresh" {
            let error = json!({"error": "invalid_grant", "error_description": "Invalid Refresh Token"});
            return (axum::http::StatusCode::BAD_REQUEST, axum::Json(error)).into_response();
        }
        axum::Json(json!({
            "access_token": "new-access",
            "refresh_token": "next-refresh",
            "expires_in": 3600,
            "user": {"id": "u1", "email": "admin@almanbar.sa"}
        }))
        .into_response()
    }

    async fn stub_client() -> RestBackend {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().route("/auth/v1/token", axum::routing::post(token_stub));
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        RestBackend::new(&format!("http://{addr}"), "anon", Some(Duration::from_secs(5))).unwrap()
    }

    fn session_expiring_in(secs: i64, refresh_token: &str) -> Session {
        Session {
            access_token: "old-access".into(),
            refresh_token: refresh_token.into(),
            expires_at: Some(chrono::Utc::now().timestamp() + secs),
            user: AuthUser {
                id: "u1".into(),
                email: Some("admin@almanbar.sa".into()),
            },
        }
    }

    #[tokio::test]
    async fn test_session_outside_margin_is_not_refreshed() {
        let auth = RestAuth::new(stub_client().await);
        let current = session_expiring_in(3600, "bad-refresh");
        *auth.session.write().await = Some(current.clone());
        assert_eq!(auth.get_session().await.unwrap(), Some(current));
    }

    #[tokio::test]
    async fn test_expiring_session_is_refreshed() {
        let auth = RestAuth::new(stub_client().await);
        *auth.session.write().await = Some(session_expiring_in(REFRESH_MARGIN_SECS / 2, "good-refresh"));
        let mut events = auth.subscribe();

        let fresh = auth.get_session().await.unwrap().unwrap();
        assert_eq!(fresh.access_token, "new-access");
        assert_eq!(fresh.refresh_token, "next-refresh");
        assert!(!fresh.expires_within(chrono::Utc::now().timestamp(), REFRESH_MARGIN_SECS));
        assert_eq!(events.recv().await.unwrap(), AuthEvent::TokenRefreshed(fresh.clone()));
        assert_eq!(auth.authorized().await.access_token.as_deref(), Some("new-access"));
    }

    #[tokio::test]
    async fn test_failed_refresh_signs_out() {
        let auth = RestAuth::new(stub_client().await);
        *auth.session.write().await = Some(session_expiring_in(-10, "revoked-refresh"));
        let mut events = auth.subscribe();

        assert_eq!(auth.get_session().await.unwrap(), None);
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
        assert!(auth.session.read().await.is_none());
        assert_eq!(auth.authorized().await.access_token, None);
    }
}
