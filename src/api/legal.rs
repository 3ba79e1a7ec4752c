use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{error_response, require_locale};
use crate::services::ContentService;

// Get a legal page (terms, privacy, cancellation policy) by slug
#[utoipa::path(
    get,
    path = "/api/{locale}/legal/{slug}",
    responses(
        (status = 200, description = "Legal page with markdown body"),
        (status = 404, description = "Unknown slug or unsupported locale"),
        (status = 502, description = "Content source unavailable")
    )
)]
pub async fn get_legal_page(
    State(content): State<Arc<ContentService>>,
    Path((locale, slug)): Path<(String, String)>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    match content.legal_page(locale, &slug).await {
        Ok(page) => Json(serde_json::json!({ "page": page })).into_response(),
        Err(e) => error_response(e),
    }
}
