//! Site settings: contact channels, social links, branding (single type).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cms::types::{Document, Media};
use crate::routing::Locale;

#[derive(Debug, Clone, Serialize)]
pub struct SiteSettings {
    pub locale: String,
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    pub logo: Option<Media>,
    pub share_image: Option<Media>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteSettingsFields {
    site_name: String,
    tagline: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    whatsapp: Option<String>,
    address: Option<String>,
    instagram: Option<String>,
    facebook: Option<String>,
    youtube: Option<String>,
    locale: Option<String>,
}

impl SiteSettings {
    pub fn from_document(doc: &Document, base: &Url) -> Result<SiteSettings, String> {
        let fields: SiteSettingsFields = serde_json::from_value(doc.fields.clone())
            .map_err(|e| format!("site settings {}: {}", doc.document_id, e))?;
        Ok(SiteSettings {
            locale: fields.locale.unwrap_or_default(),
            site_name: fields.site_name,
            tagline: fields.tagline,
            contact_email: fields.contact_email,
            contact_phone: fields.contact_phone,
            whatsapp: fields.whatsapp,
            address: fields.address,
            instagram: fields.instagram,
            facebook: fields.facebook,
            youtube: fields.youtube,
            logo: doc.fields.get("logo").and_then(|v| Media::from_value(v, base)),
            share_image: doc
                .fields
                .get("shareImage")
                .and_then(|v| Media::from_value(v, base)),
        })
    }

    pub fn has_missing_media(&self) -> bool {
        self.logo.is_none() || self.share_image.is_none()
    }

    pub fn fill_media_from(&mut self, fallback: &SiteSettings) {
        if self.logo.is_none() {
            self.logo = fallback.logo.clone();
        }
        if self.share_image.is_none() {
            self.share_image = fallback.share_image.clone();
        }
    }

    /// Bare-bones settings used when the CMS has nothing usable.
    pub fn placeholder(locale: Locale) -> SiteSettings {
        SiteSettings {
            locale: locale.as_str().to_string(),
            site_name: "Terramar Viajes".to_string(),
            tagline: None,
            contact_email: None,
            contact_phone: None,
            whatsapp: None,
            address: None,
            instagram: None,
            facebook: None,
            youtube: None,
            logo: None,
            share_image: None,
        }
    }
}
