//! Service page: the service description and its projects.

use leptos::*;
use leptos_router::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::{Project, Service};

use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading};
use crate::components::project_card::ProjectCard;
use crate::copy;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(GetServiceById, "/api")]
pub async fn get_service_by_id(id: String) -> Result<Service, ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    state.content.service_by_id(&id).await.map_err(server_error)
}

#[server(GetProjectsByServiceId, "/api")]
pub async fn get_projects_by_service_id(service_id: String) -> Result<Vec<Project>, ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    state
        .content
        .projects_by_service_id(&service_id)
        .await
        .map_err(server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn ServiceDetailPage() -> impl IntoView {
    let lang = use_lang();
    let params = use_params_map();
    let id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let service = create_resource(id, get_service_by_id);
    let projects = create_resource(id, get_projects_by_service_id);

    view! {
        <div class="page service-detail">
            <A href="/#services" class="back-link">{move || copy::BACK.pick(lang.get())}</A>

            <Suspense fallback=|| view! { <Loading/> }>
                {move || service.get().map(|res| match res {
                    Ok(service) => service_header(&service),
                    Err(e) => view! {
                        <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| service.refetch())/>
                    }.into_view(),
                })}
            </Suspense>

            <section class="service-projects">
                <h2>{move || copy::SERVICE_PROJECTS.pick(lang.get())}</h2>
                <Suspense fallback=|| view! { <Loading/> }>
                    {move || projects.get().map(|res| match res {
                        Ok(list) if list.is_empty() => view! {
                            <p class="empty">{move || copy::NO_SERVICE_PROJECTS.pick(lang.get())}</p>
                        }.into_view(),
                        Ok(list) => view! {
                            <div class="projects-grid">
                                {list
                                    .into_iter()
                                    .map(|project| view! { <ProjectCard project=project/> })
                                    .collect_view()}
                            </div>
                        }.into_view(),
                        Err(e) => view! {
                            <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| projects.refetch())/>
                        }.into_view(),
                    })}
                </Suspense>
            </section>
        </div>
    }
}

fn service_header(service: &Service) -> View {
    let lang = use_lang();
    let title: Bilingual = service.title().into();
    let description: Bilingual = service.description().into();

    view! {
        <header class="detail-head">
            <span class="service-icon">{service.icon().glyph()}</span>
            <h1>{move || title.resolve(lang.get()).to_string()}</h1>
            {service.image_url.clone().map(|src| view! { <img class="detail-hero" src=src/> })}
            <p class="detail-description">{move || description.resolve(lang.get()).to_string()}</p>
        </header>
    }
    .into_view()
}
