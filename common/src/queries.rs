//! Content reads used by the public pages and the admin panel.
//!
//! Each operation is one fixed query against one table, served through the
//! shared [`QueryCache`].

use std::sync::Arc;

use tracing::warn;

use crate::backend::{fetch_all, fetch_one, Backend, Order, Query, Table};
use crate::cache::{QueryCache, QueryKey};
use crate::error::{Error, Result};
use crate::model::{ContactMessage, Partner, Profile, Project, Service};

// Cache key names. Writes invalidate by name.
pub const PROJECTS: &str = "projects";
pub const PROJECT: &str = "project";
pub const SERVICES: &str = "services";
pub const SERVICE: &str = "service";
pub const PARTNERS: &str = "partners";
pub const CONTACT_MESSAGES: &str = "contact_messages";

// ─── Query shapes ────────────────────────────────────────────────────────────

pub fn projects_query() -> Query {
    Query::from(Table::Projects)
        .embed(Table::ProjectMedia)
        .order("display_order", Order::Asc)
}

pub fn services_query() -> Query {
    Query::from(Table::Services).order("display_order", Order::Asc)
}

pub fn project_by_id_query(id: &str) -> Query {
    Query::from(Table::Projects)
        .embed(Table::ProjectMedia)
        .eq("id", id)
        .single()
}

pub fn service_by_id_query(id: &str) -> Query {
    Query::from(Table::Services).eq("id", id).single()
}

pub fn projects_by_service_query(service_id: &str) -> Query {
    Query::from(Table::Projects)
        .eq("service_id", service_id)
        .order("display_order", Order::Asc)
}

pub fn partners_query() -> Query {
    Query::from(Table::Partners).order("display_order", Order::Asc)
}

pub fn contact_messages_query() -> Query {
    Query::from(Table::ContactMessages).order("created_at", Order::Desc)
}

pub fn profile_query(user_id: &str) -> Query {
    Query::from(Table::Profiles)
        .select("role")
        .eq("id", user_id)
        .single()
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// Cached content reads over an injected backend.
#[derive(Clone)]
pub struct Content {
    backend: Arc<dyn Backend>,
    cache: QueryCache,
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Content").field("cache", &self.cache).finish()
    }
}

impl Content {
    pub fn new(backend: Arc<dyn Backend>, cache: QueryCache) -> Self {
        Self { backend, cache }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn list<T>(&self, key: QueryKey, query: Query) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let backend = self.backend.clone();
        self.cache
            .fetch(key, || async move { fetch_all(backend.as_ref(), &query).await })
            .await
            .inspect_err(|e| warn!("Query failed: {e}"))
    }

    async fn reload_list<T>(&self, key: QueryKey, query: Query) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let backend = self.backend.clone();
        self.cache
            .reload(key, || async move { fetch_all(backend.as_ref(), &query).await })
            .await
            .inspect_err(|e| warn!("Query failed: {e}"))
    }

    async fn one<T>(&self, key: QueryKey, query: Query) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let backend = self.backend.clone();
        self.cache
            .fetch(key, || async move { fetch_one(backend.as_ref(), &query).await })
            .await
    }

    /// All projects with their media, by display order.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.list(QueryKey::new(PROJECTS), projects_query()).await
    }

    pub async fn services(&self) -> Result<Vec<Service>> {
        self.list(QueryKey::new(SERVICES), services_query()).await
    }

    /// Re-read projects past the cache, refreshing its entry.
    pub async fn reload_projects(&self) -> Result<Vec<Project>> {
        self.reload_list(QueryKey::new(PROJECTS), projects_query())
            .await
    }

    pub async fn reload_services(&self) -> Result<Vec<Service>> {
        self.reload_list(QueryKey::new(SERVICES), services_query())
            .await
    }

    /// One project with its media. An empty id never reaches the backend.
    pub async fn project_by_id(&self, id: &str) -> Result<Project> {
        if id.is_empty() {
            return Err(Error::not_found(Table::Projects.name()));
        }
        self.one(QueryKey::with_arg(PROJECT, id), project_by_id_query(id))
            .await
    }

    pub async fn service_by_id(&self, id: &str) -> Result<Service> {
        if id.is_empty() {
            return Err(Error::not_found(Table::Services.name()));
        }
        self.one(QueryKey::with_arg(SERVICE, id), service_by_id_query(id))
            .await
    }

    /// Projects under one service (no media embed).
    pub async fn projects_by_service_id(&self, service_id: &str) -> Result<Vec<Project>> {
        if service_id.is_empty() {
            return Err(Error::not_found(Table::Projects.name()));
        }
        self.list(
            QueryKey::with_arg(PROJECTS, service_id),
            projects_by_service_query(service_id),
        )
        .await
    }

    pub async fn partners(&self) -> Result<Vec<Partner>> {
        self.list(QueryKey::new(PARTNERS), partners_query()).await
    }

    /// Contact messages, newest first.
    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>> {
        self.list(QueryKey::new(CONTACT_MESSAGES), contact_messages_query())
            .await
    }

    /// Role lookup for the auth gate; always read fresh.
    pub async fn profile(&self, user_id: &str) -> Result<Profile> {
        fetch_one(self.backend.as_ref(), &profile_query(user_id)).await
    }

    pub fn invalidate(&self, names: &[&str]) {
        for name in names {
            self.cache.invalidate(name);
        }
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::memory::MemoryBackend;

    fn content(db: &Arc<MemoryBackend>) -> Content {
        Content::new(db.clone(), QueryCache::new(Duration::from_secs(60)))
    }

    fn seeded() -> Arc<MemoryBackend> {
        let db = Arc::new(MemoryBackend::new());
        db.seed(
            Table::Services,
            [
                json!({"id": "s1", "title_ar": "تصوير", "title_en": "Photography", "display_order": 2}),
                json!({"id": "s2", "title_ar": "مونتاج", "title_en": "Editing", "display_order": 1}),
            ],
        );
        db.seed(
            Table::Projects,
            [
                json!({"id": "p1", "title_ar": "أ", "title_en": "A", "display_order": 3, "service_id": "s1"}),
                json!({"id": "p2", "title_ar": "ب", "title_en": "B", "display_order": 1, "service_id": "s2"}),
                json!({"id": "p3", "title_ar": "ج", "title_en": "C", "display_order": 2, "service_id": "s1"}),
            ],
        );
        db.seed(
            Table::ProjectMedia,
            [
                json!({"id": 1, "type": "image", "url": "https://cdn/1.webp", "project_id": "p1"}),
                json!({"id": 2, "type": "youtube", "url": "https://youtu.be/x", "project_id": "p1"}),
                json!({"id": 3, "type": "image", "url": "https://cdn/3.webp", "project_id": "p2"}),
            ],
        );
        db
    }

    #[tokio::test]
    async fn test_project_by_id_returns_only_its_media() {
        let db = seeded();
        let project = content(&db).project_by_id("p1").await.unwrap();
        assert_eq!(project.media.len(), 2);
        assert!(project.media.iter().all(|m| m.project_id == "p1"));
    }

    #[tokio::test]
    async fn test_lists_are_ordered_by_display_order() {
        let db = seeded();
        let c = content(&db);
        let projects = c.projects().await.unwrap();
        assert!(projects
            .windows(2)
            .all(|w| w[0].display_order <= w[1].display_order));
        let services = c.services().await.unwrap();
        assert_eq!(services[0].id, "s2");

        let by_service = c.projects_by_service_id("s1").await.unwrap();
        assert_eq!(
            by_service.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            ["p3", "p1"]
        );
        assert!(by_service.iter().all(|p| p.media.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() {
        let db = seeded();
        let err = content(&db).project_by_id("nope").await.unwrap_err();
        assert_eq!(err, Error::not_found("projects"));
    }

    #[tokio::test]
    async fn test_empty_id_issues_no_query() {
        let db = seeded();
        let c = content(&db);
        assert!(c.service_by_id("").await.is_err());
        assert!(c.projects_by_service_id("").await.is_err());
        assert_eq!(db.select_calls(), 0);
    }

    #[tokio::test]
    async fn test_cached_until_invalidated() {
        let db = seeded();
        let c = content(&db);
        c.services().await.unwrap();
        c.services().await.unwrap();
        assert_eq!(db.select_calls(), 1);
        c.invalidate(&[SERVICES]);
        c.services().await.unwrap();
        assert_eq!(db.select_calls(), 2);
    }

    #[tokio::test]
    async fn test_reload_keeps_other_entries() {
        let db = seeded();
        let c = content(&db);
        c.services().await.unwrap();
        c.projects().await.unwrap();
        let before = c.cache().len();

        c.reload_services().await.unwrap();
        assert_eq!(db.select_calls(), 3);
        assert_eq!(c.cache().len(), before);

        c.projects().await.unwrap();
        c.services().await.unwrap();
        assert_eq!(db.select_calls(), 3);
    }

    #[tokio::test]
    async fn test_backend_error_surfaces_message() {
        let db = seeded();
        db.fail_selects_from(Table::Partners);
        let err = content(&db).partners().await.unwrap_err();
        assert!(err.to_string().contains("select from partners failed"));
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let db = seeded();
        let user = db.add_user("a@almanbar.sa", "pw", Some("admin"));
        let profile = content(&db).profile(&user.id).await.unwrap();
        assert!(profile.is_admin());
        assert_eq!(profile.id, None);
    }
}
