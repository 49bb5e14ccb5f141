//! Create/edit form for a service, with the icon picker.

use leptos::*;

use almanbar_common::model::{ServiceDraft, ServiceIcon};

use super::services::save_service;
use super::{checkbox_field, failure, number_field, text_field};
use crate::app::use_lang;
use crate::components::feedback::{Notice, NoticeBar};
use crate::copy;

/// Create or edit one service. Titles and descriptions are required in
/// both languages.
#[component]
pub fn ServiceForm(
    id: Option<String>,
    initial: ServiceDraft,
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
            match save_service(id, value).await {
                Ok(_) => on_saved.call(()),
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="admin-form" on:submit=on_submit>
            {text_field(copy::TITLE_AR, draft, |d| &d.title_ar, |d, v| d.title_ar = v, false)}
            {text_field(copy::TITLE_EN, draft, |d| &d.title_en, |d, v| d.title_en = v, false)}
            {text_field(copy::DESCRIPTION_AR, draft, |d| &d.description_ar, |d, v| d.description_ar = v, true)}
            {text_field(copy::DESCRIPTION_EN, draft, |d| &d.description_en, |d, v| d.description_en = v, true)}
            {text_field(
                copy::SHORT_DESCRIPTION_AR,
                draft,
                |d| &d.short_description_ar,
                |d, v| d.short_description_ar = v,
                false,
            )}
            {text_field(
                copy::SHORT_DESCRIPTION_EN,
                draft,
                |d| &d.short_description_en,
                |d, v| d.short_description_en = v,
                false,
            )}

            <label class="field">
                <span>{move || copy::ICON.pick(lang.get())}</span>
                <select on:change=move |ev| draft.update(|d| d.icon_name = event_target_value(&ev))>
                    {ServiceIcon::ALL
                        .into_iter()
                        .map(|icon| view! {
                            <option
                                value=icon.name()
                                selected=move || draft.with(|d| ServiceIcon::from_name(&d.icon_name) == icon)
                            >
                                {icon.glyph()} " " {icon.name()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </label>

            {text_field(copy::IMAGE_URL, draft, |d| &d.image_url, |d, v| d.image_url = v, false)}
            {checkbox_field(copy::FEATURED, draft, |d| d.featured, |d, v| d.featured = v)}
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
