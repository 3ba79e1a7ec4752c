use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::api::{error_response, require_locale};
use crate::services::{CatalogFilter, ContentService};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// One of: title, price, price_desc, newest.
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<CatalogQuery> for CatalogFilter {
    fn from(query: CatalogQuery) -> Self {
        CatalogFilter {
            category: query.category,
            featured: query.featured,
            sort: query.sort,
            page: query.page,
            page_size: query.page_size,
        }
    }
}

// List experiences in the requested locale, with optional catalog filters
#[utoipa::path(
    get,
    path = "/api/{locale}/experiences",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Experience catalog for the locale"),
        (status = 404, description = "Unsupported locale"),
        (status = 502, description = "Content source unavailable")
    )
)]
pub async fn list_experiences(
    State(content): State<Arc<ContentService>>,
    Path(locale): Path<String>,
    Query(params): Query<CatalogQuery>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    match content.experiences(locale, &params.into()).await {
        Ok((experiences, pagination)) => {
            let total = pagination
                .map(|p| p.total)
                .unwrap_or(experiences.len() as u64);
            Json(serde_json::json!({
                "experiences": experiences,
                "total": total,
                "pagination": pagination
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

// Get one experience by slug, media back-filled from the default locale
#[utoipa::path(
    get,
    path = "/api/{locale}/experiences/{slug}",
    responses(
        (status = 200, description = "Experience detail"),
        (status = 404, description = "Unknown slug or unsupported locale"),
        (status = 502, description = "Content source unavailable")
    )
)]
pub async fn get_experience(
    State(content): State<Arc<ContentService>>,
    Path((locale, slug)): Path<(String, String)>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    match content.experience(locale, &slug).await {
        Ok(experience) => Json(serde_json::json!({ "experience": experience })).into_response(),
        Err(e) => error_response(e),
    }
}
