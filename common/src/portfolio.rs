//! Portfolio filtering and grouping over an already-fetched project list.

use crate::model::{Project, Service};

/// Shown when a project has neither image media nor a cover image.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=600&h=400&fit=crop";

/// The filter buttons above the portfolio grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PortfolioFilter {
    #[default]
    All,
    Featured,
    Service(String),
}

impl PortfolioFilter {
    /// Parse the `filter` URL parameter; anything else is a service id.
    pub fn from_param(param: &str) -> Self {
        match param.trim() {
            "" | "all" => Self::All,
            "featured" => Self::Featured,
            id => Self::Service(id.to_string()),
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Featured => "featured",
            Self::Service(id) => id,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Featured => project.featured,
            Self::Service(id) => project.service_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Projects passing `filter`, in their original order.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &PortfolioFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Projects sharing one service reference (or none).
#[derive(Debug, Clone)]
pub struct ProjectGroup<'a> {
    pub service_id: Option<String>,
    /// Resolved service row, when the id is known.
    pub service: Option<&'a Service>,
    pub projects: Vec<&'a Project>,
}

/// Partition projects by service reference.
///
/// Groups appear in order of first appearance in `projects`; the
/// "no service" group always comes last. Every project lands in exactly
/// one group.
pub fn group_by_service<'a>(projects: &'a [Project], services: &'a [Service]) -> Vec<ProjectGroup<'a>> {
    let mut groups: Vec<ProjectGroup<'a>> = Vec::new();
    let mut unassigned: Vec<&'a Project> = Vec::new();

    for project in projects {
        let Some(sid) = project.service_id.as_deref().filter(|s| !s.is_empty()) else {
            unassigned.push(project);
            continue;
        };
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.service_id.as_deref() == Some(sid))
        {
            group.projects.push(project);
        } else {
            groups.push(ProjectGroup {
                service_id: Some(sid.to_string()),
                service: services.iter().find(|s| s.id == sid),
                projects: vec![project],
            });
        }
    }

    if !unassigned.is_empty() {
        groups.push(ProjectGroup {
            service_id: None,
            service: None,
            projects: unassigned,
        });
    }
    groups
}

/// First image media, then the project's own image, then the placeholder.
pub fn cover_image(project: &Project) -> &str {
    project
        .images()
        .next()
        .map(|m| m.url.as_str())
        .or(project.image_url.as_deref().filter(|u| !u.is_empty()))
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Extract the video id from the common YouTube URL shapes.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_prefix("m.").unwrap_or(rest);

    let id = if let Some(tail) = rest.strip_prefix("youtu.be/") {
        tail
    } else if let Some(tail) = rest.strip_prefix("youtube.com/") {
        if let Some(query) = tail.strip_prefix("watch?") {
            query
                .split('&')
                .find_map(|kv| kv.strip_prefix("v="))?
        } else if let Some(t) = tail.strip_prefix("embed/") {
            t
        } else if let Some(t) = tail.strip_prefix("shorts/") {
            t
        } else {
            return None;
        }
    } else {
        return None;
    };

    let end = id.find(['?', '&', '/', '#']).unwrap_or(id.len());
    let id = &id[..end];
    (!id.is_empty()).then_some(id)
}

/// Embeddable player URL; unrecognised links pass through unchanged.
pub fn youtube_embed_url(url: &str) -> String {
    match youtube_video_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{id}"),
        None => url.trim().to_string(),
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaKind, ProjectMedia};

    fn project(id: &str, service: Option<&str>, featured: bool) -> Project {
        Project {
            id: id.into(),
            title_ar: format!("مشروع {id}"),
            title_en: format!("Project {id}"),
            description_ar: None,
            description_en: None,
            category_ar: None,
            category_en: None,
            image_url: None,
            featured,
            service_id: service.map(String::from),
            display_order: 0,
            created_at: None,
            updated_at: None,
            media: vec![],
        }
    }

    fn service(id: &str) -> Service {
        serde_json::from_value(serde_json::json!({
            "id": id, "title_ar": id, "title_en": id
        }))
        .unwrap()
    }

    #[test]
    fn test_filter_by_service_and_featured() {
        let projects = vec![
            project("1", Some("s1"), false),
            project("2", Some("s2"), true),
            project("3", None, true),
            project("4", Some("s1"), false),
        ];
        let s1 = filter_projects(&projects, &PortfolioFilter::Service("s1".into()));
        assert_eq!(s1.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["1", "4"]);
        let featured = filter_projects(&projects, &PortfolioFilter::Featured);
        assert_eq!(featured.len(), 2);
        assert_eq!(filter_projects(&projects, &PortfolioFilter::All).len(), 4);
    }

    #[test]
    fn test_groups_partition_the_project_list() {
        let projects = vec![
            project("1", Some("s2"), false),
            project("2", None, false),
            project("3", Some("s1"), false),
            project("4", Some("s2"), false),
            project("5", Some(""), false),
        ];
        let services = vec![service("s1"), service("s2")];
        let groups = group_by_service(&projects, &services);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].service_id.as_deref(), Some("s2"));
        assert_eq!(groups[0].service.map(|s| s.id.as_str()), Some("s2"));
        assert_eq!(groups[2].service_id, None);

        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.projects.iter().map(|p| p.id.as_str()))
            .collect();
        seen.sort();
        assert_eq!(seen, ["1", "2", "3", "4", "5"]);

        // Each per-service group equals the service filter result.
        for g in groups.iter().filter(|g| g.service_id.is_some()) {
            let filter = PortfolioFilter::Service(g.service_id.clone().unwrap());
            assert_eq!(filter_projects(&projects, &filter), g.projects);
        }
    }

    #[test]
    fn test_cover_image_precedence() {
        let mut p = project("1", None, false);
        assert_eq!(cover_image(&p), PLACEHOLDER_IMAGE);
        p.image_url = Some("https://cdn/cover.jpg".into());
        assert_eq!(cover_image(&p), "https://cdn/cover.jpg");
        p.media.push(ProjectMedia {
            id: 1,
            kind: MediaKind::Youtube,
            url: "https://youtu.be/abc".into(),
            description: None,
            created_at: None,
            project_id: "1".into(),
        });
        p.media.push(ProjectMedia {
            id: 2,
            kind: MediaKind::Image,
            url: "https://cdn/1.webp".into(),
            description: None,
            created_at: None,
            project_id: "1".into(),
        });
        assert_eq!(cover_image(&p), "https://cdn/1.webp");
    }

    #[test]
    fn test_youtube_embed_url() {
        let expected = "https://www.youtube.com/embed/dQw4w9WgXcQ";
        assert_eq!(youtube_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=4"), expected);
        assert_eq!(youtube_embed_url("https://youtu.be/dQw4w9WgXcQ?si=x"), expected);
        assert_eq!(youtube_embed_url("youtube.com/shorts/dQw4w9WgXcQ"), expected);
        assert_eq!(youtube_embed_url("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(youtube_embed_url(" https://vimeo.com/42 "), "https://vimeo.com/42");
    }

    #[test]
    fn test_filter_param_round_trip() {
        assert_eq!(PortfolioFilter::from_param(""), PortfolioFilter::All);
        assert_eq!(PortfolioFilter::from_param("featured").as_param(), "featured");
        assert_eq!(
            PortfolioFilter::from_param("abc-123"),
            PortfolioFilter::Service("abc-123".into())
        );
    }
}
