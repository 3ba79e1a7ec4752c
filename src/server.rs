// Server module - assembles the HTTP app: API routes, static assets,
// website path resolution with locale redirects.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Router,
};
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::infrastructure::AppState;
use crate::routing::{self, Locale, Resolution};

/// Served when no built frontend is present in the static directory.
const FALLBACK_SHELL: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Terramar Viajes</title></head>
<body><div id="root">Terramar Viajes</div></body>
</html>
"#;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let api_router = api::api_router(state.clone());
    let cors = cors_layer(&state.config.cors_allowed_origins);
    let assets_dir = Path::new(&state.config.static_dir).join("assets");

    // Everything that is not an API route, a doc route or an asset is a
    // website path and goes through locale resolution.
    let site = Router::new().fallback(site_entry).with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router)
        .nest_service("/assets", ServeDir::new(assets_dir))
        .merge(site)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let mut origins = Vec::new();
    for origin in allowed_origins {
        match origin.parse::<axum::http::HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

// Resolve a website path: permanent redirect to the canonical locale path,
// the SPA shell for pages, 404 otherwise.
async fn site_entry(
    State(config): State<Arc<Config>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let preferred = Locale::negotiate(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
    );

    match routing::resolve(uri.path(), preferred) {
        Resolution::Redirect(target) => Redirect::permanent(&target).into_response(),
        Resolution::Page { .. } => serve_shell(&config.static_dir).await,
        Resolution::NotFound => (
            StatusCode::NOT_FOUND,
            Html(FALLBACK_SHELL.to_string()),
        )
            .into_response(),
    }
}

/// The built frontend's index.html when present, a bare shell otherwise.
async fn serve_shell(static_dir: &str) -> Response {
    let index = Path::new(static_dir).join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Html(FALLBACK_SHELL.to_string()).into_response(),
    }
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    ((preferred_port + 1)..(preferred_port + 100))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}
