//! Admin panel behind the auth gate.

use leptos::*;
use leptos_router::*;

use almanbar_common::i18n::Bilingual;
use almanbar_common::session::{admin_access, Access, AuthSnapshot, LOGIN_ROUTE};

use crate::app::use_lang;
use crate::components::admin::messages::AdminMessages;
use crate::components::admin::partners::AdminPartners;
use crate::components::admin::projects::AdminProjects;
use crate::components::admin::services::AdminServices;
use crate::components::feedback::Loading;
use crate::copy;
use crate::pages::login::{get_auth_snapshot, logout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Services,
    Projects,
    Messages,
    Partners,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Services, Tab::Projects, Tab::Messages, Tab::Partners];

    fn label(self) -> Bilingual<&'static str> {
        match self {
            Tab::Services => copy::TAB_SERVICES,
            Tab::Projects => copy::TAB_PROJECTS,
            Tab::Messages => copy::TAB_MESSAGES,
            Tab::Partners => copy::TAB_PARTNERS,
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = create_resource(|| (), |_| get_auth_snapshot());

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                // An unreachable auth check counts as signed out.
                let snapshot = match auth.get() {
                    None => AuthSnapshot { is_loading: true, ..Default::default() },
                    Some(res) => res.unwrap_or_else(|_| AuthSnapshot::signed_out()),
                };
                match admin_access(&snapshot) {
                    Access::Pending => view! { <Loading/> }.into_view(),
                    Access::RedirectToLogin => view! { <Redirect path=LOGIN_ROUTE/> }.into_view(),
                    Access::Granted { email } => view! { <AdminPanel email=email/> }.into_view(),
                }
            }}
        </Suspense>
    }
}

#[component]
fn AdminPanel(email: Option<String>) -> impl IntoView {
    let lang = use_lang();
    let navigate = use_navigate();
    let tab = create_rw_signal(Tab::Services);

    let sign_out = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            if let Err(e) = logout().await {
                logging::warn!("sign-out failed: {e}");
            }
            navigate("/", Default::default());
        });
    };

    view! {
        <div class="page admin-page">
            <header class="admin-head">
                <h1>{move || copy::ADMIN_TITLE.pick(lang.get())}</h1>
                <span class="muted">{email}</span>
                <button class="btn btn-outline" on:click=sign_out>
                    {move || copy::SIGN_OUT.pick(lang.get())}
                </button>
            </header>

            <nav class="admin-tabs">
                {Tab::ALL
                    .into_iter()
                    .map(|t| view! {
                        <button
                            class="tab-btn"
                            class:active=move || tab.get() == t
                            on:click=move |_| tab.set(t)
                        >
                            {move || t.label().pick(lang.get())}
                        </button>
                    })
                    .collect_view()}
            </nav>

            {move || match tab.get() {
                Tab::Services => view! { <AdminServices/> }.into_view(),
                Tab::Projects => view! { <AdminProjects/> }.into_view(),
                Tab::Messages => view! { <AdminMessages/> }.into_view(),
                Tab::Partners => view! { <AdminPartners/> }.into_view(),
            }}
        </div>
    }
}
