//! Projects tab: list, edit and delete.

use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::Project;
use almanbar_common::portfolio::cover_image;

use super::project_form::ProjectForm;
use super::{confirm_delete, failure, success};
use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading, Notice, NoticeBar};
use crate::copy;
use crate::pages::home::get_projects;

#[server(DeleteProject, "/api")]
pub async fn delete_project(id: String) -> Result<(), ServerFnError> {
    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_actions(&state, &session)
        .delete_project(&id)
        .await
        .map_err(server_error)
}

/// `Some(None)` while creating, `Some(Some(p))` while editing `p`.
type Editing = Option<Option<Project>>;

#[component]
pub fn AdminProjects() -> impl IntoView {
    let lang = use_lang();
    let projects = create_resource(|| (), |_| get_projects(true));
    let editing = create_rw_signal::<Editing>(None);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let on_saved = Callback::new(move |message: String| {
        editing.set(None);
        set_notice.set(Some(Notice::Success(message)));
        projects.refetch();
    });
    let on_cancel = Callback::new(move |_| editing.set(None));

    let remove = move |id: String| {
        if !confirm_delete(lang.get_untracked()) {
            return;
        }
        spawn_local(async move {
            match delete_project(id).await {
                Ok(()) => {
                    set_notice.set(Some(success(lang.get_untracked(), copy::DELETED)));
                    projects.refetch();
                }
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
        });
    };

    view! {
        <div class="admin-tab">
            <div class="admin-tab-head">
                <h2>{move || copy::TAB_PROJECTS.pick(lang.get())}</h2>
                <button class="btn btn-primary" on:click=move |_| editing.set(Some(None))>
                    {move || copy::ADD_NEW.pick(lang.get())}
                </button>
            </div>
            <NoticeBar notice=notice/>

            {move || editing.get().map(|project| view! {
                <ProjectForm project=project on_saved=on_saved on_cancel=on_cancel/>
            })}

            <Suspense fallback=|| view! { <Loading/> }>
                {move || projects.get().map(|res| match res {
                    Ok(list) => view! {
                        <div class="admin-cards">
                            {list
                                .into_iter()
                                .map(|project| project_row(project, editing, remove))
                                .collect_view()}
                        </div>
                    }.into_view(),
                    Err(e) => view! {
                        <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| projects.refetch())/>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

fn project_row(
    project: Project,
    editing: RwSignal<Editing>,
    remove: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    let lang = use_lang();
    let title: Bilingual = project.title().into();
    let cover = cover_image(&project).to_string();
    let media = project.media.len();
    let featured = project.featured;
    let id = project.id.clone();

    view! {
        <div class="admin-card">
            <img src=cover class="admin-thumb" loading="lazy"/>
            <div class="admin-card-body">
                <h4>{move || title.resolve(lang.get()).to_string()}</h4>
                <p class="muted">
                    {featured.then(|| view! { <span class="badge">{move || copy::FEATURED_BADGE.pick(lang.get())}</span> })}
                    " " {media} " 🖼"
                </p>
            </div>
            <div class="row-actions">
                <button
                    class="btn btn-small"
                    on:click=move |_| editing.set(Some(Some(project.clone())))
                >
                    {move || copy::EDIT.pick(lang.get())}
                </button>
                <button class="btn btn-small btn-danger" on:click=move |_| remove(id.clone())>
                    {move || copy::DELETE.pick(lang.get())}
                </button>
            </div>
        </div>
    }
}
