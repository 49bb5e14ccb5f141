use leptos::*;

use crate::app::use_lang;
use crate::copy;

#[component]
pub fn Footer() -> impl IntoView {
    let lang = use_lang();

    view! {
        <footer class="footer">
            <div class="footer-grid">
                <div class="footer-about">
                    <h3>{move || copy::SITE_NAME.pick(lang.get())}</h3>
                    <p>{move || copy::FOOTER_TAGLINE.pick(lang.get())}</p>
                </div>
                <div class="footer-links">
                    <h4>{move || copy::QUICK_LINKS.pick(lang.get())}</h4>
                    <a href="/#services">{move || copy::NAV_SERVICES.pick(lang.get())}</a>
                    <a href="/projects">{move || copy::NAV_PORTFOLIO.pick(lang.get())}</a>
                    <a href="/#about">{move || copy::NAV_ABOUT.pick(lang.get())}</a>
                    <a href="/#contact">{move || copy::NAV_CONTACT.pick(lang.get())}</a>
                </div>
                <div class="footer-contact">
                    <h4>{move || copy::CONTACT_INFO.pick(lang.get())}</h4>
                    <a href=format!("tel:{}", copy::PHONE_NUMBER.replace(' ', "")) dir="ltr">
                        {copy::PHONE_NUMBER}
                    </a>
                    <a href=format!("mailto:{}", copy::EMAIL_ADDRESS)>{copy::EMAIL_ADDRESS}</a>
                    <span>{move || copy::LOCATION.pick(lang.get())}</span>
                </div>
            </div>
            <p class="footer-rights">
                "© " {move || copy::SITE_NAME.pick(lang.get())} " – "
                {move || copy::RIGHTS.pick(lang.get())}
            </p>
        </footer>
    }
}
