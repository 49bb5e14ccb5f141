use leptos::*;

use crate::app::use_lang;
use crate::copy;

/// Landing banner with the two calls to action.
#[component]
pub fn Hero() -> impl IntoView {
    let lang = use_lang();
    view! {
        <section id="home" class="hero">
            <div class="hero-inner">
                <h1 class="hero-title">{move || copy::HERO_TITLE.pick(lang.get())}</h1>
                <p class="hero-subtitle">{move || copy::HERO_SUBTITLE.pick(lang.get())}</p>
                <div class="hero-actions">
                    <a href="/projects" class="btn btn-primary">
                        {move || copy::HERO_CTA.pick(lang.get())}
                    </a>
                    <a href="/#contact" class="btn btn-outline">
                        {move || copy::HERO_CONTACT.pick(lang.get())}
                    </a>
                </div>
            </div>
        </section>
    }
}
