use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::infrastructure::AppState;
use crate::services::content_service;

/// The slice of a CMS webhook event we act on. Unknown fields are ignored so
/// CMS upgrades do not break the hook.
#[derive(Debug, Deserialize)]
pub struct CmsWebhook {
    pub event: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub entry: WebhookEntry,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookEntry {
    pub locale: Option<String>,
}

// Receive a CMS publish/update event and evict the matching cached payloads.
// Requires the shared webhook token; disabled entirely when none is
// configured.
pub async fn cms_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<CmsWebhook>,
) -> impl IntoResponse {
    let expected = match &state.config.cms_webhook_token {
        Some(token) => token,
        None => {
            return (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "error": "Webhook endpoint disabled" })),
            )
                .into_response();
        }
    };
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or("");
    if provided != expected {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid webhook token" })),
        )
            .into_response();
    }

    let collection = event
        .model
        .as_deref()
        .and_then(content_service::collection_for_model);
    let invalidated = match (collection, event.entry.locale.as_deref()) {
        (Some(collection), Some(locale)) => {
            state.content.invalidate_collection(collection, locale).await
        }
        (None, Some(locale)) => state.content.invalidate_locale(locale).await,
        // No locale on the event: play it safe and flush everything.
        _ => state.content.invalidate_all().await,
    };

    tracing::info!(
        "CMS webhook {:?} for {:?}: {} cached payloads evicted",
        event.event,
        event.model,
        invalidated
    );
    Json(serde_json::json!({ "invalidated": invalidated })).into_response()
}
