//! Quote request: the one write path of the site.

use serde::{Deserialize, Serialize};

use crate::routing::Locale;

/// Incoming quote-request payload, as posted by the quote form.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub locale: Locale,
    pub message: String,
    /// Slug of the experience the visitor asked about, if any.
    #[serde(default)]
    pub experience_slug: Option<String>,
    /// Slug of the package the visitor asked about, if any.
    #[serde(default)]
    pub package_slug: Option<String>,
    /// Desired travel date, `YYYY-MM-DD`.
    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
}

/// Acknowledgement returned to the form; `reference` is quoted back to the
/// visitor and stored with the CMS entry.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReceipt {
    pub reference: String,
    pub status: String,
}
