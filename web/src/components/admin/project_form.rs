//! Project create/edit form.
//!
//! Submitted as multipart so the selected image files travel with the
//! fields; the server converts each image to WebP, uploads it and attaches
//! it (and any YouTube links) to the project.

use leptos::*;
use server_fn::codec::{MultipartData, MultipartFormData};

use almanbar_common::i18n::{Bilingual, Lang};
use almanbar_common::model::{Project, ProjectDraft, ProjectSaveReport};

use super::failure;
use crate::app::use_lang;
use crate::components::feedback::{Notice, NoticeBar};
use crate::copy;
use crate::pages::home::get_services;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(name = SaveProject, prefix = "/api", input = MultipartFormData)]
pub async fn save_project(data: MultipartData) -> Result<ProjectSaveReport, ServerFnError> {
    use almanbar_common::admin::ProjectSubmission;
    use almanbar_common::media::ImageUpload;

    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    let mut multipart = data
        .into_inner()
        .ok_or_else(|| ServerFnError::new("Missing form data"))?;

    let mut id: Option<String> = None;
    let mut submission = ProjectSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(server_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "images" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let bytes = field.bytes().await.map_err(server_error)?;
            // An empty file input still sends one nameless part.
            if !bytes.is_empty() {
                submission.images.push(ImageUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(server_error)?;
        let draft = &mut submission.draft;
        match name.as_str() {
            "id" => id = Some(value).filter(|v| !v.is_empty()),
            "title_ar" => draft.title_ar = value,
            "title_en" => draft.title_en = value,
            "description_ar" => draft.description_ar = value,
            "description_en" => draft.description_en = value,
            "category_ar" => draft.category_ar = value,
            "category_en" => draft.category_en = value,
            "featured" => draft.featured = true,
            "service_id" => draft.service_id = value,
            "display_order" => draft.display_order = value.trim().parse().unwrap_or_default(),
            "youtube" => submission.youtube_links.push(value),
            other => tracing::debug!("Ignoring project form field '{other}'"),
        }
    }

    tracing::info!(
        "Saving project {} with {} image(s), {} link(s)",
        id.as_deref().unwrap_or("(new)"),
        submission.images.len(),
        submission.youtube_links.len()
    );
    admin_actions(&state, &session)
        .save_project(id.as_deref(), submission)
        .await
        .map_err(server_error)
}

// ─── Component ───────────────────────────────────────────────────────────────

/// Summary line for a finished save.
fn report_text(report: &ProjectSaveReport, lang: Lang) -> String {
    let mut text = format!(
        "{} ({} 🖼, {} ▶)",
        copy::SAVED.pick(lang),
        report.images_attached,
        report.videos_attached
    );
    for f in &report.failures {
        text.push_str(&format!(" · {}: {} ({})", copy::UPLOAD_FAILED.pick(lang), f.file_name, f.reason));
    }
    text
}

#[component]
pub fn ProjectForm(
    /// `None` creates a new project.
    project: Option<Project>,
    on_saved: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let lang = use_lang();
    let services = create_resource(|| (), |_| get_services(false));
    let form_ref = create_node_ref::<html::Form>();
    let (saving, set_saving) = create_signal(false);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let id = project.as_ref().map(|p| p.id.clone()).unwrap_or_default();
    let initial = project.as_ref().map(ProjectDraft::from_project).unwrap_or_default();
    let existing_media = project.as_ref().map_or(0, |p| p.media.len());

    // One entry per YouTube input; the value is only a stable key.
    let next_link = create_rw_signal(1usize);
    let links = create_rw_signal(vec![0usize]);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(form) = form_ref.get() else {
            return;
        };
        let Ok(data) = web_sys::FormData::new_with_form(&form) else {
            return;
        };
        set_saving.set(true);
        set_notice.set(None);
        spawn_local(async move {
            match save_project(data.into()).await {
                Ok(report) => on_saved.call(report_text(&report, lang.get_untracked())),
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
            set_saving.set(false);
        });
    };

    let field = move |name: &'static str, label: Bilingual<&'static str>, value: String, required: bool| {
        view! {
            <label class="field">
                <span>{move || label.pick(lang.get())}</span>
                <input type="text" name=name value=value required=required/>
            </label>
        }
    };
    let area = move |name: &'static str, label: Bilingual<&'static str>, value: String| {
        view! {
            <label class="field">
                <span>{move || label.pick(lang.get())}</span>
                <textarea name=name rows="3">{value}</textarea>
            </label>
        }
    };

    let selected_service = initial.service_id.clone();

    view! {
        <form class="admin-form" node_ref=form_ref on:submit=on_submit>
            <input type="hidden" name="id" value=id/>
            {field("title_ar", copy::TITLE_AR, initial.title_ar.clone(), true)}
            {field("title_en", copy::TITLE_EN, initial.title_en.clone(), true)}
            {area("description_ar", copy::DESCRIPTION_AR, initial.description_ar.clone())}
            {area("description_en", copy::DESCRIPTION_EN, initial.description_en.clone())}
            {field("category_ar", copy::CATEGORY_AR, initial.category_ar.clone(), false)}
            {field("category_en", copy::CATEGORY_EN, initial.category_en.clone(), false)}

            <label class="field">
                <span>{move || copy::SERVICE.pick(lang.get())}</span>
                <select name="service_id">
                    <option value="">{move || copy::NO_SERVICE.pick(lang.get())}</option>
                    <Suspense fallback=|| ()>
                        {
                            let selected_service = selected_service.clone();
                            move || services.get().and_then(Result::ok).map(|list| {
                                list.into_iter()
                                    .map(|s| {
                                        let title: Bilingual = s.title().into();
                                        let selected = s.id == selected_service;
                                        view! {
                                            <option value=s.id selected=selected>
                                                {move || title.resolve(lang.get()).to_string()}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            })
                        }
                    </Suspense>
                </select>
            </label>

            <label class="field field-check">
                <input type="checkbox" name="featured" checked=initial.featured/>
                <span>{move || copy::FEATURED.pick(lang.get())}</span>
            </label>
            <label class="field">
                <span>{move || copy::DISPLAY_ORDER.pick(lang.get())}</span>
                <input type="number" name="display_order" value=initial.display_order.to_string()/>
            </label>

            <label class="field">
                <span>
                    {move || copy::IMAGES.pick(lang.get())}
                    {(existing_media > 0).then(|| format!(" (+{existing_media})"))}
                </span>
                <input type="file" name="images" accept="image/*" multiple/>
            </label>

            <fieldset class="field">
                <legend>{move || copy::YOUTUBE_LINKS.pick(lang.get())}</legend>
                <For
                    each=move || links.get()
                    key=|k| *k
                    children=move |_| view! {
                        <input type="url" name="youtube" placeholder="https://www.youtube.com/watch?v=…"/>
                    }
                />
                <button
                    type="button"
                    class="btn btn-small"
                    on:click=move |_| {
                        let key = next_link.get_untracked();
                        next_link.set(key + 1);
                        links.update(|l| l.push(key));
                    }
                >
                    {move || copy::ADD_LINK.pick(lang.get())}
                </button>
            </fieldset>

            <div class="form-actions">
                <button type="submit" class="btn btn-primary" disabled=saving>
                    {move || (if saving.get() { copy::SAVING } else { copy::SAVE }).pick(lang.get())}
                </button>
                <button type="button" class="btn btn-outline" on:click=move |_| on_cancel.call(())>
                    {move || copy::CANCEL.pick(lang.get())}
                </button>
            </div>
            <NoticeBar notice=notice/>
        </form>
    }
}
