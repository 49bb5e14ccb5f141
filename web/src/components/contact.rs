//! Contact section: company details plus the message form.

use leptos::*;

use almanbar_common::model::NewContactMessage;

use crate::app::use_lang;
use crate::components::feedback::{error_text, Notice, NoticeBar};
use crate::copy;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(SubmitContactMessage, "/api")]
pub async fn submit_contact_message(message: NewContactMessage) -> Result<(), ServerFnError> {
    use crate::server::{app_state, server_error};

    let state = app_state()?;
    almanbar_common::contact::submit_message(
        state.content.backend().as_ref(),
        state.content.cache(),
        &message,
    )
    .await
    .map_err(server_error)?;
    Ok(())
}

// ─── Component ───────────────────────────────────────────────────────────────

#[component]
pub fn Contact() -> impl IntoView {
    let lang = use_lang();
    let form = create_rw_signal(NewContactMessage::default());
    let (sending, set_sending) = create_signal(false);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let message = form.get_untracked();
        if let Err(e) = message.validate() {
            set_notice.set(Some(Notice::Failure(e.to_string())));
            return;
        }
        set_sending.set(true);
        set_notice.set(None);
        spawn_local(async move {
            match submit_contact_message(message).await {
                Ok(()) => {
                    form.set(NewContactMessage::default());
                    set_notice.set(Some(Notice::Success(
                        copy::MESSAGE_SENT.pick(lang.get_untracked()).to_string(),
                    )));
                }
                Err(e) => set_notice.set(Some(Notice::Failure(error_text(&e)))),
            }
            set_sending.set(false);
        });
    };

    view! {
        <section id="contact" class="section contact-section">
            <div class="section-head">
                <h2>{move || copy::CONTACT_TITLE.pick(lang.get())}</h2>
                <p>{move || copy::CONTACT_SUBTITLE.pick(lang.get())}</p>
            </div>

            <div class="contact-grid">
                <div class="contact-info">
                    <h3>{move || copy::CONTACT_INFO.pick(lang.get())}</h3>
                    <dl>
                        <dt>{move || copy::CALL_US.pick(lang.get())}</dt>
                        <dd dir="ltr">{copy::PHONE_NUMBER}</dd>
                        <dt>{move || copy::EMAIL_US.pick(lang.get())}</dt>
                        <dd>{copy::EMAIL_ADDRESS}</dd>
                        <dt>{move || copy::VISIT_US.pick(lang.get())}</dt>
                        <dd>{move || copy::LOCATION.pick(lang.get())}</dd>
                        <dt>{move || copy::WORKING_HOURS.pick(lang.get())}</dt>
                        <dd>{move || copy::HOURS.pick(lang.get())}</dd>
                    </dl>
                </div>

                <form class="contact-form" on:submit=on_submit>
                    <label>
                        {move || copy::FIELD_NAME.pick(lang.get())}
                        <input
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {move || copy::FIELD_EMAIL.pick(lang.get())}
                        <input
                            type="email"
                            required
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {move || copy::FIELD_PHONE.pick(lang.get())}
                        <input
                            type="tel"
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {move || copy::FIELD_SUBJECT.pick(lang.get())}
                        <input
                            type="text"
                            prop:value=move || form.with(|f| f.subject.clone())
                            on:input=move |ev| form.update(|f| f.subject = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {move || copy::FIELD_MESSAGE.pick(lang.get())}
                        <textarea
                            rows="5"
                            required
                            prop:value=move || form.with(|f| f.message.clone())
                            on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button type="submit" class="btn btn-primary" disabled=sending>
                        {move || {
                            let text = if sending.get() { copy::SENDING } else { copy::SEND };
                            text.pick(lang.get())
                        }}
                    </button>
                    <NoticeBar notice=notice/>
                </form>
            </div>
        </section>
    }
}
