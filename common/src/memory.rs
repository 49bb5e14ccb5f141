//! In-memory stand-in for the hosted backend.
//!
//! Implements all three capabilities over plain JSON rows, including the
//! foreign keys the hosted schema declares, so admin flows can be tested
//! without a network. Failures can be injected per table or per upload
//! path.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::debug;

use crate::backend::{AuthProvider, Backend, Order, Query, Storage, Table};
use crate::error::{Error, Result};
use crate::session::{AuthEvent, AuthUser, Session};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<Table, Vec<Value>>,
    next_media_id: i64,
    objects: HashMap<(String, String), StoredObject>,
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    failing_uploads: Vec<String>,
    failing_inserts: HashSet<Table>,
    failing_selects: HashSet<Table>,
}

pub struct MemoryBackend {
    base_url: String,
    inner: Mutex<Inner>,
    events: broadcast::Sender<AuthEvent>,
    selects: AtomicUsize,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            base_url: "http://memory.local".into(),
            inner: Mutex::new(Inner {
                next_media_id: 1,
                ..Default::default()
            }),
            events,
            selects: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert rows directly, bypassing defaults and foreign-key checks.
    pub fn seed(&self, table: Table, rows: impl IntoIterator<Item = Value>) {
        self.state().tables.entry(table).or_default().extend(rows);
    }

    /// Snapshot of a table, in insertion order.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.state().tables.get(&table).cloned().unwrap_or_default()
    }

    /// Content type and size of a stored object.
    pub fn object(&self, bucket: &str, path: &str) -> Option<(String, usize)> {
        self.state()
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .map(|o| (o.content_type.clone(), o.bytes.len()))
    }

    pub fn object_count(&self) -> usize {
        self.state().objects.len()
    }

    /// Number of `select` calls served so far.
    pub fn select_calls(&self) -> usize {
        self.selects.load(AtomicOrdering::SeqCst)
    }

    /// Reject uploads whose path contains `needle`.
    pub fn fail_uploads_matching(&self, needle: &str) {
        self.state().failing_uploads.push(needle.to_string());
    }

    pub fn fail_inserts_into(&self, table: Table) {
        self.state().failing_inserts.insert(table);
    }

    pub fn fail_selects_from(&self, table: Table) {
        self.state().failing_selects.insert(table);
    }

    /// Register an account; a `role` also creates its profile row.
    pub fn add_user(&self, email: &str, password: &str, role: Option<&str>) -> AuthUser {
        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
        };
        let mut state = self.state();
        state.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        if let Some(role) = role {
            state
                .tables
                .entry(Table::Profiles)
                .or_default()
                .push(serde_json::json!({ "id": user.id, "role": role }));
        }
        user
    }

    /// Push an auth event to subscribers, updating the stored session.
    pub fn emit(&self, event: AuthEvent) {
        self.state().session = event.session().cloned();
        let _ = self.events.send(event);
    }

    fn foreign_key_violation(table: Table, column: &str) -> Error {
        Error::Status {
            status: 409,
            message: format!(
                "insert or update on table \"{}\" violates foreign key constraint on \"{column}\"",
                table.name()
            ),
        }
    }

    /// Check the references a row makes to parent tables.
    fn check_references(state: &Inner, table: Table, row: &Map<String, Value>) -> Result<()> {
        let parent = match table {
            Table::Projects => Table::Services,
            Table::ProjectMedia => Table::Projects,
            _ => return Ok(()),
        };
        let Some(column) = parent.foreign_key() else {
            return Ok(());
        };
        match row.get(column) {
            None | Some(Value::Null) if table == Table::Projects => Ok(()),
            None | Some(Value::Null) => Err(Self::foreign_key_violation(table, column)),
            Some(value) => {
                let exists = state
                    .tables
                    .get(&parent)
                    .is_some_and(|rows| rows.iter().any(|r| cell_matches(r.get("id"), &cell_text(value))));
                if exists {
                    Ok(())
                } else {
                    Err(Self::foreign_key_violation(table, column))
                }
            }
        }
    }
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Text form of a cell, as PostgREST compares filter values.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_matches(cell: Option<&Value>, expected: &str) -> bool {
    match cell {
        None | Some(Value::Null) => false,
        Some(v) => cell_text(v) == expected,
    }
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // Nulls sort last, as in Postgres ascending order.
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn project_columns(row: &Value, columns: &str) -> Value {
    if columns.trim() == "*" {
        return row.clone();
    }
    let Some(obj) = row.as_object() else {
        return row.clone();
    };
    let picked: Map<String, Value> = columns
        .split(',')
        .map(str::trim)
        .filter_map(|c| obj.get(c).map(|v| (c.to_string(), v.clone())))
        .collect();
    Value::Object(picked)
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        self.selects.fetch_add(1, AtomicOrdering::SeqCst);
        let state = self.state();
        if state.failing_selects.contains(&query.table) {
            return Err(Error::Status {
                status: 500,
                message: format!("select from {} failed", query.table),
            });
        }

        let mut rows: Vec<Value> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(column, value)| cell_matches(row.get(column), value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, order)) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_cells(a.get(column), b.get(column));
                match order {
                    Order::Asc => ord,
                    Order::Desc => ord.reverse(),
                }
            });
        }

        let limit = if query.single { Some(1) } else { query.limit };
        if let Some(n) = limit {
            rows.truncate(n);
        }

        let fk = query.table.foreign_key();
        let rows = rows
            .iter()
            .map(|row| {
                let mut out = project_columns(row, &query.columns);
                for child in &query.embeds {
                    let id = row.get("id").map(cell_text).unwrap_or_default();
                    let children: Vec<Value> = match fk {
                        Some(fk) => state
                            .tables
                            .get(child)
                            .map(|rows| {
                                rows.iter()
                                    .filter(|c| cell_matches(c.get(fk), &id))
                                    .cloned()
                                    .collect()
                            })
                            .unwrap_or_default(),
                        None => Vec::new(),
                    };
                    if let Some(obj) = out.as_object_mut() {
                        obj.insert(child.name().to_string(), Value::Array(children));
                    }
                }
                out
            })
            .collect();
        Ok(rows)
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>> {
        let mut state = self.state();
        if state.failing_inserts.contains(&table) {
            return Err(Error::Status {
                status: 500,
                message: format!("insert into {table} failed"),
            });
        }

        // Validate the whole batch before storing any of it.
        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut obj) = row else {
                return Err(Error::Status {
                    status: 400,
                    message: "row must be a JSON object".into(),
                });
            };
            Self::check_references(&state, table, &obj)?;
            if !obj.contains_key("id") {
                let id = if table == Table::ProjectMedia {
                    let id = state.next_media_id + prepared.len() as i64;
                    Value::from(id)
                } else {
                    Value::from(uuid::Uuid::new_v4().to_string())
                };
                obj.insert("id".into(), id);
            }
            obj.entry("created_at").or_insert_with(|| Value::from(now_iso()));
            prepared.push(Value::Object(obj));
        }

        if table == Table::ProjectMedia {
            state.next_media_id += prepared.len() as i64;
        }
        debug!("memory insert: {} row(s) into {table}", prepared.len());
        state
            .tables
            .entry(table)
            .or_default()
            .extend(prepared.iter().cloned());
        Ok(prepared)
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<()> {
        let mut state = self.state();
        let Value::Object(patch) = patch else {
            return Err(Error::Status {
                status: 400,
                message: "patch must be a JSON object".into(),
            });
        };
        Self::check_references(&state, table, &patch)?;
        if let Some(rows) = state.tables.get_mut(&table) {
            for row in rows.iter_mut().filter(|r| cell_matches(r.get("id"), id)) {
                if let Some(obj) = row.as_object_mut() {
                    obj.extend(patch.clone());
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<()> {
        let mut state = self.state();
        if let Some(rows) = state.tables.get_mut(&table) {
            rows.retain(|r| !cell_matches(r.get("id"), id));
        }
        match table {
            // projects.service_id is ON DELETE SET NULL
            Table::Services => {
                if let Some(projects) = state.tables.get_mut(&Table::Projects) {
                    for p in projects
                        .iter_mut()
                        .filter(|p| cell_matches(p.get("service_id"), id))
                    {
                        p["service_id"] = Value::Null;
                    }
                }
            }
            // project_media.project_id is ON DELETE CASCADE
            Table::Projects => {
                if let Some(media) = state.tables.get_mut(&Table::ProjectMedia) {
                    media.retain(|m| !cell_matches(m.get("project_id"), id));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let mut state = self.state();
        if state.failing_uploads.iter().any(|n| path.contains(n.as_str())) {
            return Err(Error::Status {
                status: 400,
                message: format!("upload of {path} rejected"),
            });
        }
        let key = (bucket.to_string(), path.to_string());
        if state.objects.contains_key(&key) {
            return Err(Error::Status {
                status: 409,
                message: "The resource already exists".into(),
            });
        }
        state.objects.insert(
            key,
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn get_session(&self) -> Result<Option<Session>> {
        Ok(self.state().session.clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let session = {
            let mut state = self.state();
            let account = state
                .accounts
                .get(email)
                .filter(|a| a.password == password)
                .ok_or_else(|| Error::Status {
                    status: 400,
                    message: "Invalid login credentials".into(),
                })?;
            let session = Session {
                access_token: uuid::Uuid::new_v4().to_string(),
                refresh_token: uuid::Uuid::new_v4().to_string(),
                expires_at: None,
                user: account.user.clone(),
            };
            state.session = Some(session.clone());
            session
        };
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        self.state().session = None;
        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_filter_order_and_embed() {
        let db = MemoryBackend::new();
        db.seed(
            Table::Projects,
            [
                json!({"id": "b", "display_order": 2}),
                json!({"id": "a", "display_order": 1}),
            ],
        );
        db.seed(
            Table::ProjectMedia,
            [
                json!({"id": 1, "project_id": "a", "type": "image", "url": "u1"}),
                json!({"id": 2, "project_id": "b", "type": "image", "url": "u2"}),
            ],
        );

        let q = Query::from(Table::Projects)
            .embed(Table::ProjectMedia)
            .order("display_order", Order::Asc);
        let rows = db.select(&q).await.unwrap();
        assert_eq!(rows[0]["id"], "a");
        assert_eq!(rows[0]["project_media"].as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["project_media"][0]["url"], "u1");

        let one = db
            .select(&Query::from(Table::Projects).eq("id", "b").single())
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(db.select_calls(), 2);
    }

    #[tokio::test]
    async fn test_insert_enforces_service_reference() {
        let db = MemoryBackend::new();
        let err = db
            .insert(Table::Projects, vec![json!({"title_ar": "x", "service_id": "nope"})])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 409, .. }));

        let ok = db
            .insert(Table::Projects, vec![json!({"title_ar": "x", "service_id": null})])
            .await
            .unwrap();
        assert!(ok[0]["id"].is_string());
    }

    #[tokio::test]
    async fn test_media_batch_is_all_or_nothing() {
        let db = MemoryBackend::new();
        db.seed(Table::Projects, [json!({"id": "p"})]);
        let err = db
            .insert(
                Table::ProjectMedia,
                vec![json!({"project_id": "p"}), json!({"project_id": "missing"})],
            )
            .await;
        assert!(err.is_err());
        assert!(db.rows(Table::ProjectMedia).is_empty());

        let rows = db
            .insert(
                Table::ProjectMedia,
                vec![json!({"project_id": "p"}), json!({"project_id": "p"})],
            )
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let db = MemoryBackend::new();
        db.seed(Table::Services, [json!({"id": "s"})]);
        db.seed(Table::Projects, [json!({"id": "p", "service_id": "s"})]);
        db.seed(Table::ProjectMedia, [json!({"id": 1, "project_id": "p"})]);

        db.delete(Table::Services, "s").await.unwrap();
        assert_eq!(db.rows(Table::Projects)[0]["service_id"], Value::Null);

        db.delete(Table::Projects, "p").await.unwrap();
        assert!(db.rows(Table::ProjectMedia).is_empty());
    }

    #[tokio::test]
    async fn test_upload_failures_and_duplicates() {
        let db = MemoryBackend::new();
        db.fail_uploads_matching("bad");
        assert!(db.upload("uploads", "p/bad.webp", vec![1], "image/webp").await.is_err());
        db.upload("uploads", "p/good.webp", vec![1, 2], "image/webp")
            .await
            .unwrap();
        assert!(db.upload("uploads", "p/good.webp", vec![1], "image/webp").await.is_err());
        assert_eq!(
            db.object("uploads", "p/good.webp"),
            Some(("image/webp".to_string(), 2))
        );
        assert!(db
            .public_url("uploads", "p/good.webp")
            .ends_with("/storage/v1/object/public/uploads/p/good.webp"));
    }

    #[tokio::test]
    async fn test_sign_in_emits_event() {
        let db = MemoryBackend::new();
        db.add_user("admin@almanbar.sa", "secret", Some("admin"));
        let mut events = db.subscribe();

        assert!(db.sign_in_with_password("admin@almanbar.sa", "wrong").await.is_err());
        let session = db
            .sign_in_with_password("admin@almanbar.sa", "secret")
            .await
            .unwrap();
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedIn(session));
        assert_eq!(db.rows(Table::Profiles).len(), 1);

        db.sign_out().await.unwrap();
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
        assert_eq!(db.get_session().await.unwrap(), None);
    }
}
