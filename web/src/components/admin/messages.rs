//! Messages tab: contact-form triage.

use leptos::*;

use almanbar_common::model::{ContactMessage, MessageStatus};

use super::failure;
use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading, Notice, NoticeBar};
use crate::copy;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(ListMessages, "/api")]
pub async fn list_messages() -> Result<Vec<ContactMessage>, ServerFnError> {
    use crate::server::{admin_content, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_content(&state, &session)
        .contact_messages()
        .await
        .map_err(server_error)
}

#[server(SetMessageStatus, "/api")]
pub async fn set_message_status(id: String, status: MessageStatus) -> Result<(), ServerFnError> {
    use crate::server::{admin_actions, require_admin, server_error};

    let (state, session) = require_admin().await?;
    admin_actions(&state, &session)
        .set_message_status(&id, status)
        .await
        .map_err(server_error)
}

// ─── Component ───────────────────────────────────────────────────────────────

#[component]
pub fn AdminMessages() -> impl IntoView {
    let lang = use_lang();
    let messages = create_resource(|| (), |_| list_messages());
    let expanded = create_rw_signal::<Option<String>>(None);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let set_status = move |id: String, status: MessageStatus| {
        spawn_local(async move {
            match set_message_status(id, status).await {
                Ok(()) => messages.refetch(),
                Err(e) => set_notice.set(Some(failure(lang.get_untracked(), &e))),
            }
        });
    };

    view! {
        <div class="admin-tab">
            <div class="admin-tab-head">
                <h2>{move || copy::TAB_MESSAGES.pick(lang.get())}</h2>
            </div>
            <NoticeBar notice=notice/>

            <Suspense fallback=|| view! { <Loading/> }>
                {move || messages.get().map(|res| match res {
                    Ok(list) if list.is_empty() => view! {
                        <p class="empty">{move || copy::NO_MESSAGES.pick(lang.get())}</p>
                    }.into_view(),
                    Ok(list) => list
                        .into_iter()
                        .map(|message| message_card(message, expanded, set_status))
                        .collect_view(),
                    Err(e) => view! {
                        <ErrorBlock message=error_text(&e) on_retry=Callback::new(move |_| messages.refetch())/>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

fn message_card(
    message: ContactMessage,
    expanded: RwSignal<Option<String>>,
    set_status: impl Fn(String, MessageStatus) + Copy + 'static,
) -> impl IntoView {
    let lang = use_lang();
    let status = message.status;
    let is_open = {
        let id = message.id.clone();
        move || expanded.with(|open| open.as_deref() == Some(id.as_str()))
    };
    let toggle = {
        let id = message.id.clone();
        move |_| {
            expanded.update(|open| {
                *open = if open.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    Some(id.clone())
                }
            })
        }
    };
    let subject = {
        let message = message.clone();
        move || message.subject_or_default(lang.get())
    };
    let actions = status
        .suggested_actions()
        .into_iter()
        .map(|action| {
            let id = message.id.clone();
            view! {
                <button
                    class="btn btn-small"
                    on:click=move |_| set_status(id.clone(), action.target())
                >
                    {move || action.label().pick(lang.get())}
                </button>
            }
        })
        .collect_view();
    let ContactMessage {
        name,
        email,
        phone,
        message: body,
        created_at,
        ..
    } = message;

    view! {
        <div class="message-card" class:unread={status == MessageStatus::New}>
            <div class="message-head" on:click=toggle>
                <span class=format!("status status-{}", status.as_str())>
                    {move || status.label().pick(lang.get())}
                </span>
                <strong>{name}</strong>
                <span class="muted">{subject}</span>
                <span class="muted">{created_at.map(|at| at.chars().take(16).collect::<String>())}</span>
            </div>
            <Show when=is_open>
                <div class="message-body">
                    <p>
                        <a href=format!("mailto:{email}")>{email.clone()}</a>
                        {phone.clone().map(|p| view! { " · " <a href=format!("tel:{p}") dir="ltr">{p.clone()}</a> })}
                    </p>
                    <p class="message-text">{body.clone()}</p>
                </div>
            </Show>
            <div class="row-actions">{actions}</div>
        </div>
    }
}
