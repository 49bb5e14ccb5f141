use leptos::*;

use crate::app::use_lang;
use crate::copy;

#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(http::StatusCode::NOT_FOUND);
        }
    }

    let lang = use_lang();
    view! {
        <div class="page not-found">
            <h1>"404"</h1>
            <p>{move || copy::NOT_FOUND.pick(lang.get())}</p>
            <a href="/" class="btn btn-primary">{move || copy::NAV_HOME.pick(lang.get())}</a>
        </div>
    }
}
