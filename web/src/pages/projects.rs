//! All-projects page, grouped under their services.

use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::{Project, Service};
use almanbar_common::portfolio::group_by_service;
use almanbar_common::state::QueryState;

use crate::app::use_lang;
use crate::components::feedback::{query_state, ErrorBlock, Loading};
use crate::components::project_card::ProjectCard;
use crate::copy;
use crate::pages::home::{get_projects, get_services};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let lang = use_lang();
    let attempt = create_rw_signal(0u32);
    let projects = create_resource(move || attempt.get(), |n| get_projects(n > 0));
    let services = create_resource(move || attempt.get(), |n| get_services(n > 0));

    view! {
        <div class="page projects-page">
            <h1>{move || copy::ALL_PROJECTS_TITLE.pick(lang.get())}</h1>

            <Suspense fallback=|| view! { <Loading/> }>
                {move || match query_state(projects.get()).zip(query_state(services.get())) {
                    QueryState::Loading => None,
                    QueryState::Ready((projects, services)) => Some(grouped(&projects, &services)),
                    QueryState::Failed(message) => Some(view! {
                        <ErrorBlock message=message on_retry=Callback::new(move |_| attempt.update(|n| *n += 1))/>
                    }.into_view()),
                }}
            </Suspense>
        </div>
    }
}

fn grouped(projects: &[Project], services: &[Service]) -> View {
    let lang = use_lang();
    if projects.is_empty() {
        return view! { <p class="empty">{move || copy::NO_PROJECTS.pick(lang.get())}</p> }.into_view();
    }

    group_by_service(projects, services)
        .into_iter()
        .map(|group| {
            let heading: Option<Bilingual> = group.service.map(|s| s.title().into());
            let link = group.service_id.map(|id| format!("/services/{id}"));
            let cards = group
                .projects
                .into_iter()
                .cloned()
                .map(|project| view! { <ProjectCard project=project/> })
                .collect_view();
            view! {
                <section class="project-group">
                    <h2>
                        {move || match &heading {
                            Some(title) => title.resolve(lang.get()).to_string(),
                            None => copy::OTHER_PROJECTS.pick(lang.get()).to_string(),
                        }}
                    </h2>
                    {link.map(|href| view! {
                        <a href=href class="group-link">{move || copy::LEARN_MORE.pick(lang.get())}</a>
                    })}
                    <div class="projects-grid">{cards}</div>
                </section>
            }
        })
        .collect_view()
}
