use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::api::require_locale;
use crate::routing::Locale;
use crate::services::ContentService;

// Supported locales, for the language switcher
#[utoipa::path(
    get,
    path = "/api/locales",
    responses(
        (status = 200, description = "Supported locales and the default")
    )
)]
pub async fn list_locales() -> impl IntoResponse {
    let locales: Vec<&str> = Locale::ALL.iter().map(Locale::as_str).collect();
    Json(json!({
        "locales": locales,
        "default": Locale::DEFAULT.as_str()
    }))
}

// Hero section for the locale; placeholder content when the CMS is down
#[utoipa::path(
    get,
    path = "/api/{locale}/hero",
    responses(
        (status = 200, description = "Hero banner, never fails"),
        (status = 404, description = "Unsupported locale")
    )
)]
pub async fn get_hero(
    State(content): State<Arc<ContentService>>,
    Path(locale): Path<String>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    Json(json!({ "hero": content.hero(locale).await })).into_response()
}

// Site settings for the locale; placeholder content when the CMS is down
#[utoipa::path(
    get,
    path = "/api/{locale}/settings",
    responses(
        (status = 200, description = "Contact channels, social links, branding"),
        (status = 404, description = "Unsupported locale")
    )
)]
pub async fn get_settings(
    State(content): State<Arc<ContentService>>,
    Path(locale): Path<String>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    Json(json!({ "settings": content.settings(locale).await })).into_response()
}

// UI string table for the locale; compiled-in strings when the CMS is down
#[utoipa::path(
    get,
    path = "/api/{locale}/texts",
    responses(
        (status = 200, description = "UI strings keyed by dotted identifiers"),
        (status = 404, description = "Unsupported locale")
    )
)]
pub async fn get_texts(
    State(content): State<Arc<ContentService>>,
    Path(locale): Path<String>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    Json(json!({ "texts": content.texts(locale).await })).into_response()
}
