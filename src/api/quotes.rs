use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::error_response;
use crate::models::QuoteRequest;
use crate::services::QuoteService;

// Accept a quote request and forward it to the CMS
#[utoipa::path(
    post,
    path = "/api/quotes",
    responses(
        (status = 202, description = "Quote request accepted, reference returned"),
        (status = 400, description = "Validation failed"),
        (status = 502, description = "Quote could not be stored")
    )
)]
pub async fn submit_quote(
    State(quotes): State<Arc<QuoteService>>,
    Json(request): Json<QuoteRequest>,
) -> impl IntoResponse {
    match quotes.submit(request).await {
        Ok(receipt) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "message": "Quote request received",
                "reference": receipt.reference,
                "status": receipt.status
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
