//! Legal page: terms, privacy, cancellation policy. Markdown body, no media.

use serde::{Deserialize, Serialize};

use crate::cms::types::Document;
use crate::models::Alternate;

#[derive(Debug, Clone, Serialize)]
pub struct LegalPage {
    pub id: String,
    pub locale: String,
    pub slug: String,
    pub title: String,
    /// Markdown source, rendered by the frontend.
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<Alternate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegalPageFields {
    slug: String,
    title: String,
    body: Option<String>,
    locale: Option<String>,
    updated_at: Option<String>,
}

impl LegalPage {
    pub fn from_document(doc: &Document) -> Result<LegalPage, String> {
        let fields: LegalPageFields = serde_json::from_value(doc.fields.clone())
            .map_err(|e| format!("legal page {}: {}", doc.document_id, e))?;
        Ok(LegalPage {
            id: doc.document_id.clone(),
            locale: fields.locale.unwrap_or_default(),
            slug: fields.slug,
            title: fields.title,
            body: fields.body.unwrap_or_default(),
            updated_at: fields.updated_at,
            alternates: Vec::new(),
        })
    }
}
