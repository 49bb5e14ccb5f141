//! Loading, error and notice blocks shared by pages and admin tabs.

use leptos::*;

use almanbar_common::state::QueryState;

use crate::app::use_lang;
use crate::copy;

#[component]
pub fn Loading() -> impl IntoView {
    let lang = use_lang();
    view! {
        <div class="loading">
            <span class="spinner"></span>
            <span>{move || copy::LOADING.pick(lang.get())}</span>
        </div>
    }
}

/// Error message with an optional "try again" button.
#[component]
pub fn ErrorBlock(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let lang = use_lang();
    view! {
        <div class="error-block">
            <p class="error-title">{move || copy::LOAD_ERROR.pick(lang.get())}</p>
            <p class="error-detail">{message}</p>
            {on_retry.map(|retry| view! {
                <button class="btn btn-outline" on:click=move |_| retry.call(())>
                    {move || copy::RETRY.pick(lang.get())}
                </button>
            })}
        </div>
    }
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

/// Renders the latest notice, if any.
#[component]
pub fn NoticeBar(notice: ReadSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| match n {
            Notice::Success(text) => view! { <p class="notice notice-ok">{text}</p> },
            Notice::Failure(text) => view! { <p class="notice notice-error">{text}</p> },
        })
    }
}

/// The message carried by a server function error, without the
/// transport prefix.
pub fn error_text(e: &ServerFnError) -> String {
    match e {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

/// A resource value as a [`QueryState`], with display-ready errors.
pub fn query_state<T>(value: Option<Result<T, ServerFnError>>) -> QueryState<T> {
    value.map(|res| res.map_err(|e| error_text(&e))).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_keeps_backend_message() {
        let e = ServerFnError::new("backend error (status 409): duplicate");
        assert_eq!(error_text(&e), "backend error (status 409): duplicate");

        let state = query_state::<Vec<u8>>(Some(Err(ServerFnError::new("offline"))));
        assert_eq!(state.error(), Some("offline"));
        assert!(query_state::<Vec<u8>>(None).is_loading());
    }
}
