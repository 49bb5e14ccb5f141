use leptos::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::model::Partner;

use crate::app::use_lang;
use crate::copy;
use crate::pages::home::get_partners;

/// Company blurb followed by the partner logo strip.
#[component]
pub fn About() -> impl IntoView {
    let lang = use_lang();
    let partners = create_resource(|| (), |_| get_partners());

    view! {
        <section id="about" class="section about-section">
            <div class="section-head">
                <h2>{move || copy::ABOUT_TITLE.pick(lang.get())}</h2>
            </div>
            <p class="about-body">{move || copy::ABOUT_BODY.pick(lang.get())}</p>
            <p class="about-body">{move || copy::ABOUT_BELIEF.pick(lang.get())}</p>

            // A partner-list failure hides the strip rather than the section.
            <Suspense fallback=|| ()>
                {move || partners.get().and_then(Result::ok).filter(|p| !p.is_empty()).map(|list| view! {
                    <h3 class="partners-title">{move || copy::PARTNERS_TITLE.pick(lang.get())}</h3>
                    <div class="partners-strip">
                        {list.into_iter().map(|partner| view! { <PartnerLogo partner=partner/> }).collect_view()}
                    </div>
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn PartnerLogo(partner: Partner) -> impl IntoView {
    let lang = use_lang();
    let name: Bilingual = partner.name().into();
    let label = name.clone();
    let inner = match partner.logo_url {
        Some(logo) => view! {
            <img src=logo alt=move || label.resolve(lang.get()).to_string() loading="lazy"/>
        }
        .into_view(),
        None => view! { <span>{move || label.resolve(lang.get()).to_string()}</span> }.into_view(),
    };

    match partner.website_url {
        Some(url) => view! {
            <a href=url class="partner" target="_blank" rel="noopener noreferrer"
               title=move || name.resolve(lang.get()).to_string()>
                {inner}
            </a>
        }
        .into_view(),
        None => view! { <div class="partner">{inner}</div> }.into_view(),
    }
}
