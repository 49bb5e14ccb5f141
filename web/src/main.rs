//! Server entry-point – Axum + Leptos SSR.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use axum::{
        body::Body,
        extract::State,
        http::Request,
        response::{IntoResponse, Response},
        routing::get,
        Router,
    };
    use leptos::*;
    use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
    use tower_http::services::ServeDir;

    use almanbar_common::cache::QueryCache;
    use almanbar_common::config::{self, Config};
    use almanbar_common::queries::Content;
    use almanbar_common::rest::RestBackend;
    use almanbar_web::app::{App, AppState};
    use almanbar_web::server::sessions::{SessionStore, SESSION_IDLE_TIMEOUT, SWEEP_INTERVAL};

    /// Server functions get the shared state as context.
    async fn server_fn_handler(State(state): State<AppState>, req: Request<Body>) -> impl IntoResponse {
        handle_server_fns_with_context(move || provide_context(state.clone()), req).await
    }

    /// Fallback: try to serve a static file, otherwise return 404.
    async fn fallback_handler(
        State(options): State<LeptosOptions>,
        req: Request<Body>,
    ) -> Response {
        let root = options.site_root.clone();
        let (parts, _body) = req.into_parts();
        let path = format!("{}{}", root, parts.uri.path());

        if let Ok(meta) = tokio::fs::metadata(&path).await {
            if meta.is_file() {
                if let Ok(bytes) = tokio::fs::read(&path).await {
                    return (
                        axum::http::StatusCode::OK,
                        [(axum::http::header::CONTENT_TYPE, mime_for(&path))],
                        bytes,
                    )
                        .into_response();
                }
            }
        }

        (axum::http::StatusCode::NOT_FOUND, "Not Found").into_response()
    }

    fn mime_for(path: &str) -> &'static str {
        match path.rsplit('.').next().unwrap_or("") {
            "html" => "text/html; charset=utf-8",
            "css" => "text/css",
            "js" => "application/javascript",
            "wasm" => "application/wasm",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "ico" => "image/x-icon",
            "json" => "application/json",
            "woff2" => "font/woff2",
            _ => "application/octet-stream",
        }
    }

    // ── Tracing ──────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "almanbar_web=info,almanbar_common=info,tower_http=info".into()
            }),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let conf = get_configuration(None)
        .await
        .context("Cannot read Leptos configuration")?;
    let leptos_options = conf.leptos_options.clone();
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    let config = config::load(&Config::default_path())?;
    tracing::info!(
        "Backend {} (bucket '{}', cache TTL {:?})",
        config.backend_url,
        config.storage_bucket,
        config.cache_ttl
    );

    let rest = RestBackend::from_config(&config).context("Cannot create backend client")?;
    let content = Content::new(Arc::new(rest.clone()), QueryCache::new(config.cache_ttl));

    let state = AppState {
        leptos_options: leptos_options.clone(),
        config: Arc::new(config),
        rest,
        content,
        sessions: SessionStore::default(),
    };
    state
        .sessions
        .spawn_sweeper(SWEEP_INTERVAL, SESSION_IDLE_TIMEOUT);

    // ── Routes ───────────────────────────────────────────────────────────
    let routes = generate_route_list(App);

    let app = Router::new()
        .route(
            "/api/*fn_name",
            get(server_fn_handler).post(server_fn_handler),
        )
        .leptos_routes_with_context(
            &state,
            routes,
            {
                let state = state.clone();
                move || provide_context(state.clone())
            },
            App,
        )
        // Serve static assets (WASM bundle, CSS, images, etc.)
        .nest_service("/pkg", ServeDir::new(format!("{site_root}/pkg")))
        .fallback(fallback_handler)
        .with_state(state);

    tracing::info!("Almanbar Web listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This binary is only built with the `ssr` feature.
    // The WASM entry point is `lib::hydrate()`.
}
