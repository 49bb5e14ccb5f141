//! Home page: hero, services, portfolio preview, about and contact.
//!
//! The public list reads live here; other pages and the admin tabs reuse
//! them.

use leptos::*;

use almanbar_common::model::{Partner, Project, Service};

use crate::components::about::About;
use crate::components::contact::Contact;
use crate::components::hero::Hero;
use crate::components::portfolio::PortfolioSection;
use crate::components::services::ServicesSection;

// ─── Server functions ────────────────────────────────────────────────────────

/// All services by display order. `fresh` reads past the cache.
#[server(GetServices, "/api")]
pub async fn get_services(fresh: bool) -> Result<Vec<Service>, ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    let services = if fresh {
        state.content.reload_services().await
    } else {
        state.content.services().await
    };
    services.map_err(server_error)
}

/// All projects with their media. `fresh` reads past the cache.
#[server(GetProjects, "/api")]
pub async fn get_projects(fresh: bool) -> Result<Vec<Project>, ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    let projects = if fresh {
        state.content.reload_projects().await
    } else {
        state.content.projects().await
    };
    projects.map_err(server_error)
}

#[server(GetPartners, "/api")]
pub async fn get_partners() -> Result<Vec<Partner>, ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    state.content.partners().await.map_err(server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <Hero/>
        <ServicesSection/>
        <PortfolioSection/>
        <About/>
        <Contact/>
    }
}
