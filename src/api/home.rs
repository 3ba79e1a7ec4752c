use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::require_locale;
use crate::services::ContentService;

// Landing page payload: hero plus featured catalog entries, one round trip.
// Parts fail independently; the response is always 200.
#[utoipa::path(
    get,
    path = "/api/{locale}/home",
    responses(
        (status = 200, description = "Hero and featured content for the locale"),
        (status = 404, description = "Unsupported locale")
    )
)]
pub async fn home_page(
    State(content): State<Arc<ContentService>>,
    Path(locale): Path<String>,
) -> impl IntoResponse {
    let locale = match require_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    Json(content.home(locale).await).into_response()
}
