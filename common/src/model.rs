//! Row types for the hosted tables, plus the drafts admin forms write.
//!
//! Timestamps stay ISO-8601 strings so the types serialise unchanged
//! between the server and the WASM client.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::i18n::{Bilingual, Lang};

// ─── Service ─────────────────────────────────────────────────────────────────

/// Icons an admin can attach to a service card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceIcon {
    #[default]
    Camera,
    Video,
    Target,
    Palette,
    Monitor,
    TrendingUp,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 6] = [
        Self::Camera,
        Self::Video,
        Self::Target,
        Self::Palette,
        Self::Monitor,
        Self::TrendingUp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Video => "Video",
            Self::Target => "Target",
            Self::Palette => "Palette",
            Self::Monitor => "Monitor",
            Self::TrendingUp => "TrendingUp",
        }
    }

    /// Unknown names render as the camera icon.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.name() == name)
            .unwrap_or_default()
    }

    /// Glyph shown in place of an icon font.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Camera => "📷",
            Self::Video => "🎬",
            Self::Target => "🎯",
            Self::Palette => "🎨",
            Self::Monitor => "🖥",
            Self::TrendingUp => "📈",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title_ar: String,
    pub title_en: String,
    #[serde(default)]
    pub description_ar: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub short_description_ar: Option<String>,
    #[serde(default)]
    pub short_description_en: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Service {
    pub fn title(&self) -> Bilingual<&str> {
        Bilingual::new(self.title_ar.as_str(), self.title_en.as_str())
    }

    pub fn description(&self) -> Bilingual<&str> {
        Bilingual::new(self.description_ar.as_str(), self.description_en.as_str())
    }

    /// Card blurb; falls back to the full description when no short one exists.
    pub fn short_description(&self) -> Bilingual<&str> {
        let short = Bilingual::new(
            self.short_description_ar.as_deref().unwrap_or_default(),
            self.short_description_en.as_deref().unwrap_or_default(),
        );
        if short.is_blank() {
            self.description()
        } else {
            short
        }
    }

    pub fn icon(&self) -> ServiceIcon {
        self.icon_name
            .as_deref()
            .map(ServiceIcon::from_name)
            .unwrap_or_default()
    }
}

// ─── Project & media ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Youtube,
    /// Any type the UI does not know how to render.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMedia {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title_ar: String,
    pub title_en: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub category_ar: Option<String>,
    #[serde(default)]
    pub category_en: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Present only when the query embedded `project_media`.
    #[serde(default, rename = "project_media")]
    pub media: Vec<ProjectMedia>,
}

impl Project {
    pub fn title(&self) -> Bilingual<&str> {
        Bilingual::new(self.title_ar.as_str(), self.title_en.as_str())
    }

    pub fn description(&self) -> Bilingual<&str> {
        Bilingual::new(
            self.description_ar.as_deref().unwrap_or_default(),
            self.description_en.as_deref().unwrap_or_default(),
        )
    }

    pub fn category(&self) -> Bilingual<&str> {
        Bilingual::new(
            self.category_ar.as_deref().unwrap_or_default(),
            self.category_en.as_deref().unwrap_or_default(),
        )
    }

    pub fn images(&self) -> impl Iterator<Item = &ProjectMedia> {
        self.media.iter().filter(|m| m.kind == MediaKind::Image)
    }

    pub fn videos(&self) -> impl Iterator<Item = &ProjectMedia> {
        self.media.iter().filter(|m| m.kind == MediaKind::Youtube)
    }
}

// ─── Partner ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name_ar: String,
    pub name_en: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Partner {
    pub fn name(&self) -> Bilingual<&str> {
        Bilingual::new(self.name_ar.as_str(), self.name_en.as_str())
    }
}

// ─── Contact messages ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 4] = [Self::New, Self::Read, Self::Replied, Self::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(self) -> Bilingual<&'static str> {
        match self {
            Self::New => Bilingual::new("جديد", "New"),
            Self::Read => Bilingual::new("مقروء", "Read"),
            Self::Replied => Bilingual::new("تم الرد", "Replied"),
            Self::Archived => Bilingual::new("مؤرشف", "Archived"),
        }
    }

    /// Buttons the triage view offers for a message in this status.
    ///
    /// Only a suggestion: any status may be written from any other.
    pub fn suggested_actions(self) -> Vec<MessageAction> {
        match self {
            Self::New => vec![MessageAction::MarkRead, MessageAction::Archive],
            Self::Read => vec![MessageAction::MarkReplied, MessageAction::Archive],
            Self::Replied | Self::Archived => vec![MessageAction::Archive],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    MarkRead,
    MarkReplied,
    Archive,
}

impl MessageAction {
    pub fn target(self) -> MessageStatus {
        match self {
            Self::MarkRead => MessageStatus::Read,
            Self::MarkReplied => MessageStatus::Replied,
            Self::Archive => MessageStatus::Archived,
        }
    }

    pub fn label(self) -> Bilingual<&'static str> {
        match self {
            Self::MarkRead => Bilingual::new("تحديد كمقروء", "Mark as read"),
            Self::MarkReplied => Bilingual::new("تحديد كمجاب عليه", "Mark as replied"),
            Self::Archive => Bilingual::new("أرشفة", "Archive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ContactMessage {
    pub fn subject_or_default(&self, lang: Lang) -> String {
        match self.subject.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => Bilingual::new("بدون موضوع", "No subject").resolve(lang).to_string(),
        }
    }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Other(String),
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        if s == "admin" {
            Self::Admin
        } else {
            Self::Other(s)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_string(),
            Role::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    pub role: Role,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ─── Drafts (write side) ─────────────────────────────────────────────────────

/// Collect the names of blank required fields into one validation error.
fn require(fields: &[(&'static str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub title_ar: String,
    pub title_en: String,
    pub description_ar: String,
    pub description_en: String,
    pub short_description_ar: String,
    pub short_description_en: String,
    pub icon_name: String,
    pub image_url: String,
    pub featured: bool,
    pub display_order: i32,
}

impl ServiceDraft {
    pub fn from_service(s: &Service) -> Self {
        Self {
            title_ar: s.title_ar.clone(),
            title_en: s.title_en.clone(),
            description_ar: s.description_ar.clone(),
            description_en: s.description_en.clone(),
            short_description_ar: s.short_description_ar.clone().unwrap_or_default(),
            short_description_en: s.short_description_en.clone().unwrap_or_default(),
            icon_name: s.icon().name().to_string(),
            image_url: s.image_url.clone().unwrap_or_default(),
            featured: s.featured,
            display_order: s.display_order,
        }
    }

    /// Titles and descriptions are required in both languages.
    pub fn validate(&self) -> Result<()> {
        require(&[
            ("title_ar", self.title_ar.as_str()),
            ("title_en", self.title_en.as_str()),
            ("description_ar", self.description_ar.as_str()),
            ("description_en", self.description_en.as_str()),
        ])
    }

    pub fn to_row(&self) -> Value {
        json!({
            "title_ar": self.title_ar.trim(),
            "title_en": self.title_en.trim(),
            "description_ar": self.description_ar.trim(),
            "description_en": self.description_en.trim(),
            "short_description_ar": non_empty(&self.short_description_ar),
            "short_description_en": non_empty(&self.short_description_en),
            "icon_name": ServiceIcon::from_name(&self.icon_name).name(),
            "image_url": non_empty(&self.image_url),
            "featured": self.featured,
            "display_order": self.display_order,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title_ar: String,
    pub title_en: String,
    pub description_ar: String,
    pub description_en: String,
    pub category_ar: String,
    pub category_en: String,
    pub featured: bool,
    /// Empty string means "no service".
    pub service_id: String,
    pub display_order: i32,
}

impl ProjectDraft {
    pub fn from_project(p: &Project) -> Self {
        Self {
            title_ar: p.title_ar.clone(),
            title_en: p.title_en.clone(),
            description_ar: p.description_ar.clone().unwrap_or_default(),
            description_en: p.description_en.clone().unwrap_or_default(),
            category_ar: p.category_ar.clone().unwrap_or_default(),
            category_en: p.category_en.clone().unwrap_or_default(),
            featured: p.featured,
            service_id: p.service_id.clone().unwrap_or_default(),
            display_order: p.display_order,
        }
    }

    /// Only the two titles are required for a project.
    pub fn validate(&self) -> Result<()> {
        require(&[("title_ar", self.title_ar.as_str()), ("title_en", self.title_en.as_str())])
    }

    pub fn to_row(&self) -> Value {
        json!({
            "title_ar": self.title_ar.trim(),
            "title_en": self.title_en.trim(),
            "description_ar": non_empty(&self.description_ar),
            "description_en": non_empty(&self.description_en),
            "category_ar": non_empty(&self.category_ar),
            "category_en": non_empty(&self.category_en),
            "featured": self.featured,
            "service_id": non_empty(&self.service_id),
            "display_order": self.display_order,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name_ar: String,
    pub name_en: String,
    pub logo_url: String,
    pub website_url: String,
    pub display_order: i32,
}

impl PartnerDraft {
    pub fn validate(&self) -> Result<()> {
        require(&[("name_ar", self.name_ar.as_str()), ("name_en", self.name_en.as_str())])
    }

    pub fn to_row(&self) -> Value {
        json!({
            "name_ar": self.name_ar.trim(),
            "name_en": self.name_en.trim(),
            "logo_url": non_empty(&self.logo_url),
            "website_url": non_empty(&self.website_url),
            "display_order": self.display_order,
        })
    }
}

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn validate(&self) -> Result<()> {
        require(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ])?;
        if !self.email.contains('@') {
            return Err(Error::Validation("email address is not valid".into()));
        }
        Ok(())
    }

    pub fn to_row(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "phone": non_empty(&self.phone),
            "subject": non_empty(&self.subject),
            "message": self.message.trim(),
            "status": MessageStatus::New.as_str(),
        })
    }
}

/// A media row prepared for the batch insert after a project save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProjectMedia {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub description: String,
}

impl NewProjectMedia {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            description: String::new(),
        }
    }

    pub fn youtube(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Youtube,
            url: url.into(),
            description: String::new(),
        }
    }

    pub fn to_row(&self, project_id: &str, created_at: &str) -> Value {
        json!({
            "type": self.kind,
            "url": self.url,
            "description": self.description,
            "project_id": project_id,
            "created_at": created_at,
        })
    }
}

// ─── Save reports ────────────────────────────────────────────────────────────

/// One image that was skipped during a project save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFailure {
    pub file_name: String,
    pub reason: String,
}

/// What a project save did, for the admin notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSaveReport {
    pub project_id: String,
    pub created: bool,
    pub images_attached: usize,
    pub videos_attached: usize,
    pub failures: Vec<UploadFailure>,
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_decodes_embedded_media() {
        let row = json!({
            "id": "p1",
            "title_ar": "إعلان",
            "title_en": "Commercial",
            "featured": true,
            "display_order": 2,
            "project_media": [
                {"id": 1, "type": "image", "url": "https://cdn/a.webp", "project_id": "p1"},
                {"id": 2, "type": "youtube", "url": "https://youtu.be/x", "project_id": "p1"},
                {"id": 3, "type": "vimeo", "url": "https://vimeo.com/1", "project_id": "p1"}
            ]
        });
        let p: Project = serde_json::from_value(row).unwrap();
        assert_eq!(p.images().count(), 1);
        assert_eq!(p.videos().count(), 1);
        assert_eq!(p.media[2].kind, MediaKind::Other);
        assert_eq!(p.description().resolve(Lang::En), "");
    }

    #[test]
    fn test_role_round_trip() {
        let admin: Profile = serde_json::from_value(json!({"role": "admin"})).unwrap();
        assert!(admin.is_admin());
        let editor: Profile = serde_json::from_value(json!({"role": "editor"})).unwrap();
        assert!(!editor.is_admin());
        assert_eq!(serde_json::to_value(&editor.role).unwrap(), json!("editor"));
    }

    #[test]
    fn test_service_draft_requires_both_languages() {
        let draft = ServiceDraft {
            title_ar: "تصوير".into(),
            title_en: " ".into(),
            description_ar: "وصف".into(),
            ..Default::default()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(
            err,
            Error::Validation("missing required field(s): title_en, description_en".into())
        );
    }

    #[test]
    fn test_project_draft_empty_service_becomes_null() {
        let draft = ProjectDraft {
            title_ar: "فيلم".into(),
            title_en: "Film".into(),
            service_id: "".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.to_row()["service_id"], Value::Null);
        assert_eq!(draft.to_row()["category_en"], Value::Null);
    }

    #[test]
    fn test_contact_message_validation() {
        let mut msg = NewContactMessage {
            name: "Sara".into(),
            email: "sara.example.com".into(),
            message: "Hello".into(),
            ..Default::default()
        };
        assert!(msg.validate().is_err());
        msg.email = "sara@example.com".into();
        assert!(msg.validate().is_ok());
        assert_eq!(msg.to_row()["status"], json!("new"));
        assert_eq!(msg.to_row()["subject"], Value::Null);
    }

    #[test]
    fn test_suggested_actions() {
        assert_eq!(
            MessageStatus::New.suggested_actions(),
            vec![MessageAction::MarkRead, MessageAction::Archive]
        );
        assert_eq!(
            MessageStatus::Read.suggested_actions(),
            vec![MessageAction::MarkReplied, MessageAction::Archive]
        );
        assert!(MessageStatus::Archived
            .suggested_actions()
            .contains(&MessageAction::Archive));
        assert_eq!(MessageStatus::parse("replied"), Some(MessageStatus::Replied));
        assert_eq!(MessageStatus::parse("spam"), None);
    }

    #[test]
    fn test_unknown_icon_defaults_to_camera() {
        assert_eq!(ServiceIcon::from_name("Rocket"), ServiceIcon::Camera);
        assert_eq!(ServiceIcon::from_name("TrendingUp"), ServiceIcon::TrendingUp);
    }
}
