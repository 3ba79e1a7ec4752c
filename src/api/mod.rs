pub mod experiences;
pub mod health;
pub mod home;
pub mod legal;
pub mod packages;
pub mod quotes;
pub mod site;
pub mod webhooks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::domain::ContentError;
use crate::infrastructure::AppState;
use crate::routing::Locale;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Locales
        .route("/locales", get(site::list_locales))
        // Landing page
        .route("/:locale/home", get(home::home_page))
        // Catalog
        .route("/:locale/experiences", get(experiences::list_experiences))
        .route("/:locale/experiences/:slug", get(experiences::get_experience))
        .route("/:locale/packages", get(packages::list_packages))
        .route("/:locale/packages/:slug", get(packages::get_package))
        // Legal pages
        .route("/:locale/legal/:slug", get(legal::get_legal_page))
        // Site chrome (single types)
        .route("/:locale/hero", get(site::get_hero))
        .route("/:locale/settings", get(site::get_settings))
        .route("/:locale/texts", get(site::get_texts))
        // Quote requests
        .route("/quotes", post(quotes::submit_quote))
        // CMS webhooks
        .route("/webhooks/cms", post(webhooks::cms_webhook))
        .with_state(state)
}

// Map a domain error onto the generic JSON error states the frontend knows.
// Upstream details are logged, never leaked.
pub(crate) fn error_response(err: ContentError) -> Response {
    let (status, message) = match &err {
        ContentError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        ContentError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        ContentError::Upstream(_) => (
            StatusCode::BAD_GATEWAY,
            "Content source unavailable".to_string(),
        ),
        ContentError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
        ),
    };
    match &err {
        ContentError::NotFound | ContentError::Validation(_) => {}
        other => tracing::error!("request failed: {}", other),
    }
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

// Parse the {locale} path parameter, rejecting unsupported codes.
pub(crate) fn require_locale(param: &str) -> Result<Locale, Response> {
    match Locale::parse(param) {
        Some(locale) => Ok(locale),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Unsupported locale '{}'", param)
            })),
        )
            .into_response()),
    }
}
