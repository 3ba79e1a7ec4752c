use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::experiences::CatalogQuery;
use crate::api::{error_response, require_locale};
use crate::services::ContentService;

// List packages in the requested locale, with optional catalog filters
#[utoipa::path(
    get,
    path = "/api/{locale}/packages",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Package catalog for the locale"),
        (status = 404, description = "Unsupported locale"),
        (status = 502, description = "Content source unavailable")
    )
)]
pub async fn list_packages(
    State(content): State<Arc<ContentService>>,
    Path(locale): Path<String>,
    Query(params): Query<CatalogQuery>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    match content.packages(locale, &params.into()).await {
        Ok((packages, pagination)) => {
            let total = pagination.map(|p| p.total).unwrap_or(packages.len() as u64);
            Json(serde_json::json!({
                "packages": packages,
                "total": total,
                "pagination": pagination
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

// Get one package by slug, media back-filled from the default locale
#[utoipa::path(
    get,
    path = "/api/{locale}/packages/{slug}",
    responses(
        (status = 200, description = "Package detail with itinerary and bundled experiences"),
        (status = 404, description = "Unknown slug or unsupported locale"),
        (status = 502, description = "Content source unavailable")
    )
)]
pub async fn get_package(
    State(content): State<Arc<ContentService>>,
    Path((locale, slug)): Path<(String, String)>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    match content.package(locale, &slug).await {
        Ok(package) => Json(serde_json::json!({ "package": package })).into_response(),
        Err(e) => error_response(e),
    }
}
