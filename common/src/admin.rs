//! Admin write flows: services, projects (with media), partners and
//! contact-message triage.
//!
//! Every successful write invalidates the cached reads it affects, so the
//! next list fetch sees the change.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::backend::{row_id, Backend, Storage, Table};
use crate::cache::QueryCache;
use crate::error::{Error, Result};
use crate::media::{upload_images, youtube_media, ImageUpload};
use crate::model::{MessageStatus, PartnerDraft, ProjectDraft, ServiceDraft};
use crate::queries::{CONTACT_MESSAGES, PARTNERS, PROJECT, PROJECTS, SERVICE, SERVICES};

pub use crate::model::ProjectSaveReport;

/// The project form's payload.
#[derive(Debug, Clone, Default)]
pub struct ProjectSubmission {
    pub draft: ProjectDraft,
    pub images: Vec<ImageUpload>,
    pub youtube_links: Vec<String>,
}

#[derive(Clone)]
pub struct AdminActions {
    backend: Arc<dyn Backend>,
    storage: Arc<dyn Storage>,
    cache: QueryCache,
    bucket: String,
}

impl AdminActions {
    pub fn new(
        backend: Arc<dyn Backend>,
        storage: Arc<dyn Storage>,
        cache: QueryCache,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            storage,
            cache,
            bucket: bucket.into(),
        }
    }

    fn invalidate(&self, names: &[&str]) {
        for name in names {
            self.cache.invalidate(name);
        }
    }

    /// Update `id` if given (stamping `updated_at`), insert otherwise.
    /// Returns the row id.
    async fn upsert(&self, table: Table, id: Option<&str>, mut row: Value) -> Result<String> {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => {
                row["updated_at"] = Value::from(chrono::Utc::now().to_rfc3339());
                self.backend.update(table, id, row).await?;
                info!("Updated {table} row {id}");
                Ok(id.to_string())
            }
            None => {
                let inserted = self.backend.insert(table, vec![row]).await?;
                let id = inserted
                    .first()
                    .and_then(row_id)
                    .ok_or_else(|| Error::Decode(format!("insert into {table} returned no id")))?;
                info!("Inserted {table} row {id}");
                Ok(id)
            }
        }
    }

    // ─── Services ────────────────────────────────────────────────────────

    pub async fn save_service(&self, id: Option<&str>, draft: &ServiceDraft) -> Result<String> {
        draft.validate()?;
        let id = self.upsert(Table::Services, id, draft.to_row()).await?;
        self.invalidate(&[SERVICES, SERVICE]);
        Ok(id)
    }

    /// Projects under the service keep existing with no service.
    pub async fn delete_service(&self, id: &str) -> Result<()> {
        self.backend.delete(Table::Services, id).await?;
        info!("Deleted service {id}");
        self.invalidate(&[SERVICES, SERVICE, PROJECTS, PROJECT]);
        Ok(())
    }

    // ─── Projects ────────────────────────────────────────────────────────

    /// Save the project row, then attach uploaded images and YouTube links.
    ///
    /// Image failures are skipped and reported. A failed media insert is an
    /// error, but the project row written before it stays.
    pub async fn save_project(
        &self,
        id: Option<&str>,
        submission: ProjectSubmission,
    ) -> Result<ProjectSaveReport> {
        let ProjectSubmission {
            draft,
            images,
            youtube_links,
        } = submission;
        draft.validate()?;

        let created = id.map_or(true, str::is_empty);
        let project_id = self.upsert(Table::Projects, id, draft.to_row()).await?;

        let uploads = upload_images(self.storage.as_ref(), &self.bucket, &project_id, images).await;
        let images_attached = uploads.media.len();
        let videos = youtube_media(&youtube_links);
        let videos_attached = videos.len();

        let created_at = chrono::Utc::now().to_rfc3339();
        let rows: Vec<Value> = uploads
            .media
            .iter()
            .chain(videos.iter())
            .map(|m| m.to_row(&project_id, &created_at))
            .collect();

        let inserted = if rows.is_empty() {
            Ok(())
        } else {
            self.backend
                .insert(Table::ProjectMedia, rows)
                .await
                .map(|_| ())
        };
        self.invalidate(&[PROJECTS, PROJECT]);

        if let Err(e) = inserted {
            error!("Media insert for project {project_id} failed: {e}");
            return Err(e);
        }

        Ok(ProjectSaveReport {
            project_id,
            created,
            images_attached,
            videos_attached,
            failures: uploads.failures,
        })
    }

    /// Media rows go with the project.
    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.backend.delete(Table::Projects, id).await?;
        info!("Deleted project {id}");
        self.invalidate(&[PROJECTS, PROJECT]);
        Ok(())
    }

    // ─── Partners ────────────────────────────────────────────────────────

    pub async fn save_partner(&self, id: Option<&str>, draft: &PartnerDraft) -> Result<String> {
        draft.validate()?;
        let id = self.upsert(Table::Partners, id, draft.to_row()).await?;
        self.invalidate(&[PARTNERS]);
        Ok(id)
    }

    pub async fn delete_partner(&self, id: &str) -> Result<()> {
        self.backend.delete(Table::Partners, id).await?;
        self.invalidate(&[PARTNERS]);
        Ok(())
    }

    // ─── Messages ────────────────────────────────────────────────────────

    /// Any status may be written from any other.
    pub async fn set_message_status(&self, id: &str, status: MessageStatus) -> Result<()> {
        self.backend
            .update(
                Table::ContactMessages,
                id,
                serde_json::json!({ "status": status.as_str() }),
            )
            .await?;
        info!("Message {id} marked {}", status.as_str());
        self.invalidate(&[CONTACT_MESSAGES]);
        Ok(())
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::media::tests::png_bytes;
    use crate::memory::MemoryBackend;
    use crate::queries::Content;

    fn setup() -> (Arc<MemoryBackend>, AdminActions, Content) {
        let db = Arc::new(MemoryBackend::new());
        let cache = QueryCache::new(Duration::from_secs(60));
        let admin = AdminActions::new(db.clone(), db.clone(), cache.clone(), "uploads");
        let content = Content::new(db.clone(), cache);
        (db, admin, content)
    }

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title_ar: format!("{title} ar"),
            title_en: title.to_string(),
            ..Default::default()
        }
    }

    fn image(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            bytes: png_bytes(),
        }
    }

    #[tokio::test]
    async fn test_new_project_with_partial_upload_failures() {
        let (db, admin, content) = setup();
        db.fail_uploads_matching("bad");

        let report = admin
            .save_project(
                None,
                ProjectSubmission {
                    draft: draft("Launch film"),
                    images: vec![image("a.png"), image("bad1.png"), image("c.jpg"), image("bad2.png")],
                    youtube_links: vec!["https://youtu.be/x".into(), " ".into(), "https://youtu.be/y".into()],
                },
            )
            .await
            .unwrap();

        assert!(report.created);
        assert_eq!(report.images_attached, 2);
        assert_eq!(report.videos_attached, 2);
        assert_eq!(report.failures.len(), 2);

        assert_eq!(db.rows(Table::Projects).len(), 1);
        let project = content.project_by_id(&report.project_id).await.unwrap();
        assert_eq!(project.images().count(), 2);
        assert_eq!(project.videos().count(), 2);
        assert!(project.media.iter().all(|m| m.project_id == report.project_id));
    }

    #[tokio::test]
    async fn test_media_insert_failure_keeps_project_row() {
        let (db, admin, _) = setup();
        db.fail_inserts_into(Table::ProjectMedia);

        let err = admin
            .save_project(
                None,
                ProjectSubmission {
                    draft: draft("Doc"),
                    youtube_links: vec!["https://youtu.be/x".into()],
                    ..Default::default()
                },
            )
            .await;
        assert!(err.is_err());
        assert_eq!(db.rows(Table::Projects).len(), 1);
        assert!(db.rows(Table::ProjectMedia).is_empty());
    }

    #[tokio::test]
    async fn test_project_validation_blocks_writes() {
        let (db, admin, _) = setup();
        let err = admin
            .save_project(None, ProjectSubmission::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(db.rows(Table::Projects).is_empty());
    }

    #[tokio::test]
    async fn test_project_with_unknown_service_is_rejected() {
        let (db, admin, _) = setup();
        let mut d = draft("Promo");
        d.service_id = "missing".into();
        let err = admin
            .save_project(
                None,
                ProjectSubmission {
                    draft: d,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 409, .. }));
        assert!(db.rows(Table::Projects).is_empty());
    }

    #[tokio::test]
    async fn test_update_service_refreshes_cached_list() {
        let (db, admin, content) = setup();
        let mut d = ServiceDraft {
            title_ar: "تصوير".into(),
            title_en: "Photography".into(),
            description_ar: "وصف".into(),
            description_en: "Description".into(),
            ..Default::default()
        };
        let id = admin.save_service(None, &d).await.unwrap();
        assert_eq!(content.services().await.unwrap()[0].title_en, "Photography");

        d.title_en = "Photo & Video".into();
        admin.save_service(Some(&id), &d).await.unwrap();
        let services = content.services().await.unwrap();
        assert_eq!(services[0].title_en, "Photo & Video");
        assert!(services[0].updated_at.is_some());
        assert_eq!(db.rows(Table::Services).len(), 1);
    }

    #[tokio::test]
    async fn test_archived_status_persists() {
        let (db, admin, content) = setup();
        db.seed(
            Table::ContactMessages,
            [json!({"id": "m1", "name": "Ali", "email": "ali@x.sa", "message": "hi", "status": "new"})],
        );
        assert_eq!(content.contact_messages().await.unwrap()[0].status, MessageStatus::New);

        admin
            .set_message_status("m1", MessageStatus::Archived)
            .await
            .unwrap();
        let messages = content.contact_messages().await.unwrap();
        assert_eq!(messages[0].status, MessageStatus::Archived);
    }

    #[tokio::test]
    async fn test_delete_service_unlinks_projects() {
        let (db, admin, content) = setup();
        db.seed(Table::Services, [json!({"id": "s1", "title_ar": "x", "title_en": "x"})]);
        db.seed(
            Table::Projects,
            [json!({"id": "p1", "title_ar": "x", "title_en": "x", "service_id": "s1"})],
        );
        assert_eq!(content.projects().await.unwrap()[0].service_id.as_deref(), Some("s1"));

        admin.delete_service("s1").await.unwrap();
        assert_eq!(content.projects().await.unwrap()[0].service_id, None);
        assert!(content.services().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partner_round_trip() {
        let (_, admin, content) = setup();
        let id = admin
            .save_partner(
                None,
                &PartnerDraft {
                    name_ar: "شريك".into(),
                    name_en: "Partner".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(content.partners().await.unwrap().len(), 1);
        admin.delete_partner(&id).await.unwrap();
        assert!(content.partners().await.unwrap().is_empty());
    }
}
