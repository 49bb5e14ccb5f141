//! Top navigation bar with the language toggle.

use leptos::*;
use leptos_router::*;

use crate::app::use_lang;
use crate::copy;

/// Site-wide navigation bar.
#[component]
pub fn Nav() -> impl IntoView {
    let lang = use_lang();
    let (open, set_open) = create_signal(false);

    let links = [
        ("/", copy::NAV_HOME),
        ("/#services", copy::NAV_SERVICES),
        ("/projects", copy::NAV_PORTFOLIO),
        ("/#about", copy::NAV_ABOUT),
        ("/#contact", copy::NAV_CONTACT),
    ];

    view! {
        <nav class="nav-bar">
            <div class="nav-brand">
                <A href="/" class="nav-logo">{move || copy::SITE_NAME.pick(lang.get())}</A>
            </div>
            <button class="nav-burger" on:click=move |_| set_open.update(|o| *o = !*o)>"☰"</button>
            <div class="nav-links" class:open=open>
                {links
                    .into_iter()
                    .map(|(href, label)| view! {
                        <a href=href class="nav-link" on:click=move |_| set_open.set(false)>
                            {move || label.pick(lang.get())}
                        </a>
                    })
                    .collect_view()}
                <button class="lang-toggle" on:click=move |_| lang.update(|l| *l = l.toggle())>
                    {move || copy::LANG_TOGGLE.pick(lang.get())}
                </button>
            </div>
        </nav>
    }
}
