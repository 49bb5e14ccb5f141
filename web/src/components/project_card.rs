//! Portfolio card: cover image, title and category.

use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::Project;
use almanbar_common::portfolio::cover_image;

use crate::app::use_lang;
use crate::copy;

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let lang = use_lang();
    let href = format!("/projects/{}", project.id);
    let cover = cover_image(&project).to_string();
    let title: Bilingual = project.title().into();
    let category: Bilingual = project.category().into();
    let alt = title.clone();

    view! {
        <a href=href class="project-card">
            <div class="project-img-wrap">
                <img
                    src=cover
                    alt=move || alt.resolve(lang.get()).to_string()
                    class="project-img"
                    loading="lazy"
                />
                {project.featured.then(|| view! {
                    <span class="badge">{move || copy::FEATURED_BADGE.pick(lang.get())}</span>
                })}
            </div>
            <div class="project-card-body">
                <h3>{move || title.resolve(lang.get()).to_string()}</h3>
                <p class="project-category">{move || category.resolve(lang.get()).to_string()}</p>
            </div>
        </a>
    }
}
