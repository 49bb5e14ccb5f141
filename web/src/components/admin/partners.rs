//! Partners tab with its inline form.

use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::{Partner, PartnerDraft};

use super::{confirm_delete, failure, number_field, success, text_field};
use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading, Notice, NoticeBar};
use crate::copy;
use crate::pages::home::get_partners;

#[server(SavePartner, "/api")]
pub async fn save_partner(id: Option<String>, draft: PartnerDraft) -> Result<String, ServerFnError> {
    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_actions(&state, &session)
        .save_partner(id.as_deref(), &draft)
        .await
        .map_err(server_error)
}

#[server(DeletePartner, "/api")]
pub async fn delete_partner(id: String) -> Result<(), ServerFnError> {
    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_actions(&state, &session)
        .delete_partner(&id)
        .await
        .map_err(server_error)
}

fn draft_of(p: &Partner) -> PartnerDraft {
    PartnerDraft {
        name_ar: p.name_ar.clone(),
        name_en: p.name_en.clone(),
        logo_url: p.logo_url.clone().unwrap_or_default(),
        website_url: p.website_url.clone().unwrap_or_default(),
        display_order: p.display_order,
    }
}

#[component]
pub fn AdminPartners() -> impl IntoView {
    let lang = use_lang();
    let partners = create_resource(|| (), |_| get_partners());
    let editing = create_rw_signal::<Option<(Option<String>, PartnerDraft)>>(None);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let on_saved = Callback::new(move |_| {
        editing.set(None);
        set_notice.set(Some(success(lang.get_untracked(), copy::SAVED)));
        partners.refetch();
    });

    let remove = move |id: String| {
        if !confirm_delete(lang.get_untracked()) {
            return;
        }
        spawn_local(async move {
            match delete_partner(id).await {
                Ok(()) => {
                    set_notice.set(Some(success(lang.get_untracked(), copy::DELETED)));
                    partners.refetch();
                }
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
        });
    };

    view! {
        <div class="admin-tab">
            <div class="admin-tab-head">
                <h2>{move || copy::TAB_PARTNERS.pick(lang.get())}</h2>
                <button
                    class="btn btn-primary"
                    on:click=move |_| editing.set(Some((None, PartnerDraft::default())))
                >
                    {move || copy::ADD_NEW.pick(lang.get())}
                </button>
            </div>
            <NoticeBar notice=notice/>

            {move || editing.get().map(|(id, draft)| view! {
                <PartnerForm
                    id=id
                    initial=draft
                    on_saved=on_saved
                    on_cancel=Callback::new(move |_| editing.set(None))
                />
            })}

            <Suspense fallback=|| view! { <Loading/> }>
                {move || partners.get().map(|res| match res {
                    Ok(list) => view! {
                        <table class="admin-table">
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|partner| {
                                        let name: Bilingual = partner.name().into();
                                        let draft = draft_of(&partner);
                                        let edit_id = partner.id.clone();
                                        let id = partner.id;
                                        view! {
                                            <tr>
                                                <td>{move || name.resolve(lang.get()).to_string()}</td>
                                                <td>{partner.website_url}</td>
                                                <td>{partner.display_order}</td>
                                                <td class="row-actions">
                                                    <button
                                                        class="btn btn-small"
                                                        on:click=move |_| editing.set(Some((Some(edit_id.clone()), draft.clone())))
                                                    >
                                                        {move || copy::EDIT.pick(lang.get())}
                                                    </button>
                                                    <button
                                                        class="btn btn-small btn-danger"
                                                        on:click=move |_| remove(id.clone())
                                                    >
                                                        {move || copy::DELETE.pick(lang.get())}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }.into_view(),
                    Err(e) => view! {
                        <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| partners.refetch())/>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn PartnerForm(
    id: Option<String>,
    initial: PartnerDraft,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let lang = use_lang();
    let draft = create_rw_signal(initial);
    let (saving, set_saving) = create_signal(false);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let value = draft.get_untracked();
        if let Err(e) = value.validate() {
            set_notice.set(Some(Notice::Failure(e.to_string())));
            return;
        }
        set_saving.set(true);
        let id = id.clone();
        spawn_local(async move {
            match save_partner(id, value).await {
                Ok(_) => on_saved.call(()),
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="admin-form" on:submit=on_submit>
            {text_field(copy::NAME_AR, draft, |d| &d.name_ar, |d, v| d.name_ar = v, false)}
            {text_field(copy::NAME_EN, draft, |d| &d.name_en, |d, v| d.name_en = v, false)}
            {text_field(copy::LOGO_URL, draft, |d| &d.logo_url, |d, v| d.logo_url = v, false)}
            {text_field(copy::WEBSITE_URL, draft, |d| &d.website_url, |d, v| d.website_url = v, false)}
            {number_field(copy::DISPLAY_ORDER, draft, |d| d.display_order, |d, v| d.display_order = v)}
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
