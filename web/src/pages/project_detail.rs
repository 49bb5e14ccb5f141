//! Project page: description, image gallery and embedded videos.

use leptos::*;
use leptos_router::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::Project;
use almanbar_common::portfolio::{cover_image, youtube_embed_url};

use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading};
use crate::copy;

#[server(GetProjectById, "/api")]
pub async fn get_project_by_id(id: String) -> Result<Project, ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    state.content.project_by_id(&id).await.map_err(server_error)
}

#[component]
pub fn ProjectDetailPage() -> impl IntoView {
    let lang = use_lang();
    let params = use_params_map();
    let id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let project = create_resource(id, get_project_by_id);

    view! {
        <div class="page project-detail">
            <A href="/projects" class="back-link">{move || copy::BACK.pick(lang.get())}</A>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || project.get().map(|res| match res {
                    Ok(project) => project_view(project),
                    Err(e) => view! {
                        <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| project.refetch())/>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

fn project_view(project: Project) -> View {
    let lang = use_lang();
    let title: Bilingual = project.title().into();
    let description: Bilingual = project.description().into();
    let category: Bilingual = project.category().into();
    let cover = cover_image(&project).to_string();
    let images: Vec<String> = project.images().map(|m| m.url.clone()).collect();
    let videos: Vec<String> = project.videos().map(|m| youtube_embed_url(&m.url)).collect();
    let service_link = project.service_id.clone().map(|id| format!("/services/{id}"));

    // Gallery image shown full size; starts on the cover.
    let selected = create_rw_signal(cover);

    view! {
        <article>
            <header class="detail-head">
                <h1>{move || title.resolve(lang.get()).to_string()}</h1>
                <p class="project-category">{move || category.resolve(lang.get()).to_string()}</p>
                {project.featured.then(|| view! {
                    <span class="badge">{move || copy::FEATURED_BADGE.pick(lang.get())}</span>
                })}
                {service_link.map(|href| view! {
                    <a href=href class="group-link">{move || copy::SERVICE.pick(lang.get())}</a>
                })}
            </header>

            <img class="detail-hero" src=move || selected.get()/>
            <p class="detail-description">{move || description.resolve(lang.get()).to_string()}</p>

            {(!images.is_empty()).then(|| view! {
                <section class="gallery">
                    <h2>{move || copy::PROJECT_GALLERY.pick(lang.get())}</h2>
                    <div class="gallery-grid">
                        {images
                            .into_iter()
                            .map(|url| {
                                let src = url.clone();
                                let active_url = url.clone();
                                view! {
                                    <img
                                        src=src
                                        loading="lazy"
                                        class="gallery-thumb"
                                        class:active={
                                            let url = active_url;
                                            move || selected.with(|s| *s == url)
                                        }
                                        on:click=move |_| selected.set(url.clone())
                                    />
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            })}

            {(!videos.is_empty()).then(|| view! {
                <section class="videos">
                    <h2>{move || copy::PROJECT_VIDEOS.pick(lang.get())}</h2>
                    {videos
                        .into_iter()
                        .map(|src| view! {
                            <div class="video-frame">
                                <iframe
                                    src=src
                                    title="YouTube"
                                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; picture-in-picture"
                                    allowfullscreen
                                ></iframe>
                            </div>
                        })
                        .collect_view()}
                </section>
            })}
        </article>
    }
    .into_view()
}
