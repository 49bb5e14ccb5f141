//! Services section of the home page.

use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::Service;

use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading};
use crate::copy;
use crate::pages::home::get_services;

#[component]
pub fn ServicesSection() -> impl IntoView {
    let lang = use_lang();
    // Bumped by "try again"; any value above zero bypasses the cache.
    let attempt = create_rw_signal(0u32);
    let services = create_resource(move || attempt.get(), |n| get_services(n > 0));

    view! {
        <section id="services" class="section services-section">
            <div class="section-head">
                <h2>{move || copy::SERVICES_TITLE.pick(lang.get())}</h2>
                <p>{move || copy::SERVICES_SUBTITLE.pick(lang.get())}</p>
            </div>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || services.get().map(|res| match res {
                    Ok(list) => view! {
                        <div class="services-grid">
                            {list
                                .into_iter()
                                .map(|service| view! { <ServiceCard service=service/> })
                                .collect_view()}
                        </div>
                    }.into_view(),
                    Err(e) => view! {
                        <ErrorBlock
                            message=error_text(&e)
                            on_retry=Callback::new(move |_| attempt.update(|n| *n += 1))
                        />
                    }.into_view(),
                })}
            </Suspense>
        </section>
    }
}

/// Icon, title and blurb linking to the service page.
#[component]
pub fn ServiceCard(service: Service) -> impl IntoView {
    let lang = use_lang();
    let href = format!("/services/{}", service.id);
    let glyph = service.icon().glyph();
    let title: Bilingual = service.title().into();
    let blurb: Bilingual = service.short_description().into();

    view! {
        <a href=href class="service-card" class:featured=service.featured>
            <span class="service-icon">{glyph}</span>
            <h3>{move || title.resolve(lang.get()).to_string()}</h3>
            <p>{move || blurb.resolve(lang.get()).to_string()}</p>
            <span class="service-more">{move || copy::LEARN_MORE.pick(lang.get())}</span>
        </a>
    }
}
