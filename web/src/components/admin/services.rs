//! Services tab: list, edit and delete.

use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::{Service, ServiceDraft};

use super::service_form::ServiceForm;
use super::{confirm_delete, failure, success};
use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading, Notice, NoticeBar};
use crate::copy;
use crate::pages::home::get_services;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(SaveService, "/api")]
pub async fn save_service(id: Option<String>, draft: ServiceDraft) -> Result<String, ServerFnError> {
    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_actions(&state, &session)
        .save_service(id.as_deref(), &draft)
        .await
        .map_err(server_error)
}

#[server(DeleteService, "/api")]
pub async fn delete_service(id: String) -> Result<(), ServerFnError> {
    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_actions(&state, &session)
        .delete_service(&id)
        .await
        .map_err(server_error)
}

// ─── Component ───────────────────────────────────────────────────────────────

/// Which service the form is open for; `Some(None, _)` is a new one.
type Editing = Option<(Option<String>, ServiceDraft)>;

#[component]
pub fn AdminServices() -> impl IntoView {
    let lang = use_lang();
    let services = create_resource(|| (), |_| get_services(true));
    let editing = create_rw_signal::<Editing>(None);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let on_saved = Callback::new(move |_| {
        editing.set(None);
        set_notice.set(Some(success(lang.get_untracked(), copy::SAVED)));
        services.refetch();
    });
    let on_cancel = Callback::new(move |_| editing.set(None));

    let remove = move |id: String| {
        if !confirm_delete(lang.get_untracked()) {
            return;
        }
        spawn_local(async move {
            match delete_service(id).await {
                Ok(()) => {
                    set_notice.set(Some(success(lang.get_untracked(), copy::DELETED)));
                    services.refetch();
                }
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
        });
    };

    view! {
        <div class="admin-tab">
            <div class="admin-tab-head">
                <h2>{move || copy::TAB_SERVICES.pick(lang.get())}</h2>
                <button
                    class="btn btn-primary"
                    on:click=move |_| editing.set(Some((None, ServiceDraft::default())))
                >
                    {move || copy::ADD_NEW.pick(lang.get())}
                </button>
            </div>
            <NoticeBar notice=notice/>

            {move || editing.get().map(|(id, draft)| view! {
                <ServiceForm id=id initial=draft on_saved=on_saved on_cancel=on_cancel/>
            })}

            <Suspense fallback=|| view! { <Loading/> }>
                {move || services.get().map(|res| match res {
                    Ok(list) => view! {
                        <table class="admin-table">
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|service| service_row(service, editing, remove))
                                    .collect_view()}
                            </tbody>
                        </table>
                    }.into_view(),
                    Err(e) => view! {
                        <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| services.refetch())/>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

fn service_row(
    service: Service,
    editing: RwSignal<Editing>,
    remove: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    let lang = use_lang();
    let title: Bilingual = service.title().into();
    let draft = ServiceDraft::from_service(&service);
    let id = service.id.clone();

    view! {
        <tr>
            <td>{service.icon().glyph()}</td>
            <td>{move || title.resolve(lang.get()).to_string()}</td>
            <td>{service.featured.then(|| copy::FEATURED_BADGE.pick(lang.get_untracked()))}</td>
            <td>{service.display_order}</td>
            <td class="row-actions">
                <button
                    class="btn btn-small"
                    on:click={
                        let id = id.clone();
                        move |_| editing.set(Some((Some(id.clone()), draft.clone())))
                    }
                >
                    {move || copy::EDIT.pick(lang.get())}
                </button>
                <button class="btn btn-small btn-danger" on:click=move |_| remove(id.clone())>
                    {move || copy::DELETE.pick(lang.get())}
                </button>
            </td>
        </tr>
    }
}
