//! Admin panel tabs and the form fields they share.

pub mod messages;
pub mod partners;
pub mod project_form;
pub mod projects;
pub mod service_form;
pub mod services;

use leptos::*;

use almanbar_common::i18n::{Bilingual, Lang};

use crate::app::use_lang;
use crate::components::feedback::{error_text, Notice};
use crate::copy;

type Label = Bilingual<&'static str>;

/// Text input (or textarea) bound to one string field of a draft.
pub(crate) fn text_field<D: 'static>(
    label: Label,
    draft: RwSignal<D>,
    get: fn(&D) -> &String,
    set: fn(&mut D, String),
    multiline: bool,
) -> impl IntoView {
    let lang = use_lang();
    let value = move || draft.with(|d| get(d).clone());
    let on_input = move |ev: ev::Event| draft.update(|d| set(d, event_target_value(&ev)));

    view! {
        <label class="field">
            <span>{move || label.pick(lang.get())}</span>
            {if multiline {
                view! { <textarea rows="3" prop:value=value on:input=on_input></textarea> }.into_view()
            } else {
                view! { <input type="text" prop:value=value on:input=on_input/> }.into_view()
            }}
        </label>
    }
}

pub(crate) fn number_field<D: 'static>(
    label: Label,
    draft: RwSignal<D>,
    get: fn(&D) -> i32,
    set: fn(&mut D, i32),
) -> impl IntoView {
    let lang = use_lang();
    view! {
        <label class="field">
            <span>{move || label.pick(lang.get())}</span>
            <input
                type="number"
                prop:value=move || draft.with(|d| get(d).to_string())
                on:input=move |ev| {
                    let n = event_target_value(&ev).trim().parse().unwrap_or_default();
                    draft.update(|d| set(d, n));
                }
            />
        </label>
    }
}

pub(crate) fn checkbox_field<D: 'static>(
    label: Label,
    draft: RwSignal<D>,
    get: fn(&D) -> bool,
    set: fn(&mut D, bool),
) -> impl IntoView {
    let lang = use_lang();
    view! {
        <label class="field field-check">
            <input
                type="checkbox"
                prop:checked=move || draft.with(get)
                on:change=move |ev| draft.update(|d| set(d, event_target_checked(&ev)))
            />
            <span>{move || label.pick(lang.get())}</span>
        </label>
    }
}

/// Ask before a destructive action.
pub(crate) fn confirm_delete(lang: Lang) -> bool {
    window()
        .confirm_with_message(copy::CONFIRM_DELETE.pick(lang))
        .unwrap_or(false)
}

/// Notice for a failed write.
pub(crate) fn failure(lang: Lang, e: &ServerFnError) -> Notice {
    Notice::Failure(format!("{}{}", copy::SAVE_FAILED.pick(lang), error_text(e)))
}

pub(crate) fn success(lang: Lang, text: Label) -> Notice {
    Notice::Success(text.pick(lang).to_string())
}
