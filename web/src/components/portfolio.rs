//! Portfolio section of the home page: filter buttons over the project grid.

use leptos::*;
use leptos_router::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::portfolio::{filter_projects, PortfolioFilter};

use crate::app::use_lang;
use crate::components::feedback::{error_text, ErrorBlock, Loading};
use crate::components::project_card::ProjectCard;
use crate::copy;
use crate::pages::home::{get_projects, get_services};

/// Cards shown on the home page before "view all".
const PREVIEW_COUNT: usize = 6;

#[component]
pub fn PortfolioSection() -> impl IntoView {
    let lang = use_lang();
    let attempt = create_rw_signal(0u32);
    let projects = create_resource(move || attempt.get(), |n| get_projects(n > 0));
    let services = create_resource(|| (), |_| get_services(false));

    // The active filter lives in the `filter` query parameter.
    let query = use_query_map();
    let filter = create_memo(move |_| {
        query.with(|q| PortfolioFilter::from_param(q.get("filter").map(String::as_str).unwrap_or_default()))
    });
    let navigate = use_navigate();
    let select = Callback::new(move |value: PortfolioFilter| {
        navigate(
            &format!("/?filter={}", value.as_param()),
            NavigateOptions {
                scroll: false,
                ..Default::default()
            },
        )
    });

    let filter_button = move |value: PortfolioFilter, label: Bilingual| {
        let active = {
            let value = value.clone();
            move || filter.get() == value
        };
        view! {
            <button
                class="filter-btn"
                class:active=active
                on:click=move |_| select.call(value.clone())
            >
                {move || label.resolve(lang.get()).to_string()}
            </button>
        }
    };

    view! {
        <section id="portfolio" class="section portfolio-section">
            <div class="section-head">
                <h2>{move || copy::PORTFOLIO_TITLE.pick(lang.get())}</h2>
                <p>{move || copy::PORTFOLIO_SUBTITLE.pick(lang.get())}</p>
            </div>

            <div class="filter-bar">
                {filter_button(PortfolioFilter::All, copy::FILTER_ALL.into())}
                {filter_button(PortfolioFilter::Featured, copy::FILTER_FEATURED.into())}
                <Suspense fallback=|| ()>
                    {move || services.get().and_then(Result::ok).map(|list| {
                        list.into_iter()
                            .map(|s| filter_button(PortfolioFilter::Service(s.id.clone()), s.title().into()))
                            .collect_view()
                    })}
                </Suspense>
            </div>

            <Suspense fallback=|| view! { <Loading/> }>
                {move || projects.get().map(|res| match res {
                    Ok(list) => {
                        let shown: Vec<_> = filter_projects(&list, &filter.get())
                            .into_iter()
                            .take(PREVIEW_COUNT)
                            .cloned()
                            .collect();
                        if shown.is_empty() {
                            view! {
                                <p class="empty">{move || copy::NO_PROJECTS.pick(lang.get())}</p>
                            }.into_view()
                        } else {
                            view! {
                                <div class="projects-grid">
                                    {shown
                                        .into_iter()
                                        .map(|project| view! { <ProjectCard project=project/> })
                                        .collect_view()}
                                </div>
                            }.into_view()
                        }
                    }
                    Err(e) => view! {
                        <ErrorBlock
                            message=error_text(&e)
                            on_retry=Callback::new(move |_| attempt.update(|n| *n += 1))
                        />
                    }.into_view(),
                })}
            </Suspense>

            <div class="section-foot">
                <a href="/projects" class="btn btn-outline">
                    {move || copy::VIEW_ALL_PROJECTS.pick(lang.get())}
                </a>
            </div>
        </section>
    }
}
