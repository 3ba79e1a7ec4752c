//! Wire types for the headless CMS (Strapi v5 REST API).
//!
//! Collection fields vary per content type, so a [`Document`] keeps them as
//! raw JSON; the typed models one level up parse what they need.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// One document inside a Strapi `data` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(flatten)]
    pub fields: Value,
}

impl Document {
    /// Locale the CMS says this document instance is in.
    pub fn locale(&self) -> Option<&str> {
        self.fields.get("locale").and_then(Value::as_str)
    }
}

/// Envelope for collection responses.
#[derive(Debug, Deserialize)]
pub struct EntryList {
    pub data: Vec<Document>,
    #[serde(default)]
    pub meta: Meta,
}

/// Envelope for single-entry responses. `data` is null when the entry does
/// not exist in the requested locale.
#[derive(Debug, Deserialize)]
pub struct SingleEntry {
    pub data: Option<Document>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

/// A media reference with its URL already resolved to an absolute one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    url: String,
    #[serde(rename = "alternativeText")]
    alternative_text: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
}

impl Media {
    /// Parse a populated media field. Unpopulated or null fields yield `None`.
    pub fn from_value(value: &Value, base: &Url) -> Option<Media> {
        let raw: RawMedia = serde_json::from_value(value.clone()).ok()?;
        Some(Media {
            url: resolve_media_url(&raw.url, base),
            alt: raw.alternative_text,
            width: raw.width,
            height: raw.height,
        })
    }

    /// Parse a populated multi-media field, skipping malformed items.
    pub fn list_from_value(value: &Value, base: &Url) -> Vec<Media> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| Media::from_value(item, base))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Locally-stored uploads come back as `/uploads/...` paths; provider-backed
/// media already carries an absolute URL.
pub fn resolve_media_url(raw: &str, base: &Url) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }
    match base.join(raw) {
        Ok(joined) => joined.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// One entry of a document's `localizations` field.
#[derive(Debug, Clone, Deserialize)]
pub struct Localization {
    pub locale: String,
    pub slug: Option<String>,
}

/// Parse the `localizations` field of a populated document.
pub fn localizations(fields: &Value) -> Vec<Localization> {
    fields
        .get("localizations")
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .unwrap_or_default()
}
