//! Root Leptos application component with routing.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use almanbar_common::i18n::Lang;

use crate::components::footer::Footer;
use crate::components::nav::Nav;
use crate::copy;
use crate::pages::{
    admin::AdminPage, home::Home, login::LoginPage, not_found::NotFound,
    project_detail::ProjectDetailPage, projects::ProjectsPage, service_detail::ServiceDetailPage,
};

/// Server-side application state, provided as Leptos context for server functions.
#[derive(Clone, Debug)]
#[cfg(feature = "ssr")]
pub struct AppState {
    pub leptos_options: leptos::LeptosOptions,
    pub config: std::sync::Arc<almanbar_common::config::Config>,
    /// Anon-key client; per-admin clients are derived from it at sign-in.
    pub rest: almanbar_common::rest::RestBackend,
    pub content: almanbar_common::queries::Content,
    pub sessions: crate::server::sessions::SessionStore,
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<AppState> for leptos::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

/// Dummy state for the client – never actually constructed on WASM, but the
/// type must exist so server functions can reference it in their signatures.
#[derive(Clone, Debug)]
#[cfg(not(feature = "ssr"))]
pub struct AppState;

#[server(GetDefaultLang, "/api")]
pub async fn get_default_lang() -> Result<Lang, ServerFnError> {
    let state = crate::server::app_state()?;
    Ok(state.config.default_lang)
}

/// The current display language, shared through context.
pub fn use_lang() -> RwSignal<Lang> {
    use_context::<RwSignal<Lang>>().unwrap_or_else(|| create_rw_signal(Lang::default()))
}

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let lang = create_rw_signal(Lang::default());
    provide_context(lang);

    // Switch to the configured site language once it is known.
    let site_lang = create_resource(|| (), |_| async { get_default_lang().await });
    create_effect(move |_| {
        if let Some(Ok(default)) = site_lang.get() {
            lang.set(default);
        }
    });

    view! {
        <Html lang=move || lang.get().code() dir=move || lang.get().dir()/>
        <Stylesheet id="leptos" href="/pkg/almanbar-web.css"/>
        <Title text=move || copy::SITE_TITLE.pick(lang.get())/>
        <Meta name="viewport" content="width=device-width, initial-scale=1"/>
        <Meta name="description" content="Almanbar World – media production and advertising, Riyadh"/>

        <Router>
            <Nav/>
            <main class="main-content">
                <Routes>
                    <Route path="/" view=Home/>
                    <Route path="/projects" view=ProjectsPage/>
                    <Route path="/projects/:id" view=ProjectDetailPage/>
                    <Route path="/services/:id" view=ServiceDetailPage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/admin" view=AdminPage/>
                    <Route path="/*any" view=NotFound/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
