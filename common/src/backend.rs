//! The hosted backend as injected capabilities.
//!
//! [`Backend`] is the PostgREST-style table API, [`Storage`] the object
//! bucket and [`AuthProvider`] the password auth service. Production code
//! uses [`crate::rest`]; tests use the in-memory `MemoryBackend`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::session::{AuthEvent, Session};

// ─── Tables ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Services,
    Projects,
    ProjectMedia,
    Partners,
    ContactMessages,
    Profiles,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Projects => "projects",
            Self::ProjectMedia => "project_media",
            Self::Partners => "partners",
            Self::ContactMessages => "contact_messages",
            Self::Profiles => "profiles",
        }
    }

    /// Column a child table uses to reference rows of this table.
    pub fn foreign_key(self) -> Option<&'static str> {
        match self {
            Self::Services => Some("service_id"),
            Self::Projects => Some("project_id"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Query shape ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One read against one table: projection, embeds, equality filters,
/// ordering and an optional single-row restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: Table,
    pub columns: String,
    pub embeds: Vec<Table>,
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, Order)>,
    pub single: bool,
    pub limit: Option<usize>,
}

impl Query {
    pub fn from(table: Table) -> Self {
        Self {
            table,
            columns: "*".into(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: None,
            single: false,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Embed all columns of a child table referencing this one.
    pub fn embed(mut self, child: Table) -> Self {
        self.embeds.push(child);
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    /// Expect exactly one row; zero rows becomes [`Error::NotFound`].
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// The `select` parameter, e.g. `*,project_media(*)`.
    pub fn select_param(&self) -> String {
        let mut select = self.columns.clone();
        for child in &self.embeds {
            select.push_str(&format!(",{}(*)", child.name()));
        }
        select
    }

    /// Unencoded PostgREST query parameters, in request order.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_param())];
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, order)) = &self.order {
            params.push(("order".into(), format!("{column}.{}", order.as_str())));
        }
        let limit = if self.single { Some(1) } else { self.limit };
        if let Some(n) = limit {
            params.push(("limit".into(), n.to_string()));
        }
        params
    }
}

// ─── Capabilities ────────────────────────────────────────────────────────────

/// Table reads and writes. Rows travel as JSON objects.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn select(&self, query: &Query) -> Result<Vec<Value>>;

    /// Insert all rows in one request; returns them as stored (ids filled).
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>>;

    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<()>;

    async fn delete(&self, table: Table, id: &str) -> Result<()>;
}

/// Object storage with public URLs.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Password sign-in plus a stream of session changes.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current session, refreshed if it is about to expire.
    async fn get_session(&self) -> Result<Option<Session>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

// ─── Typed reads ─────────────────────────────────────────────────────────────

pub async fn fetch_all<T: DeserializeOwned>(backend: &dyn Backend, query: &Query) -> Result<Vec<T>> {
    backend
        .select(query)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(Error::from))
        .collect()
}

pub async fn fetch_one<T: DeserializeOwned>(backend: &dyn Backend, query: &Query) -> Result<T> {
    let row = backend
        .select(query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::not_found(query.table.name()))?;
    Ok(serde_json::from_value(row)?)
}

/// The `id` of a row returned by an insert.
pub fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_by_id_params() {
        let q = Query::from(Table::Projects)
            .embed(Table::ProjectMedia)
            .eq("id", "p-1")
            .single();
        assert_eq!(
            q.params(),
            vec![
                ("select".to_string(), "*,project_media(*)".to_string()),
                ("id".to_string(), "eq.p-1".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_param() {
        let q = Query::from(Table::ContactMessages).order("created_at", Order::Desc);
        assert_eq!(q.params()[1], ("order".to_string(), "created_at.desc".to_string()));
    }

    #[test]
    fn test_row_id() {
        assert_eq!(row_id(&json!({"id": "abc"})), Some("abc".into()));
        assert_eq!(row_id(&json!({"id": 7})), Some("7".into()));
        assert_eq!(row_id(&json!({"name": "x"})), None);
    }
}
