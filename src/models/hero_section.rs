//! Hero section: the landing banner (single type in the CMS).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cms::types::{Document, Media};
use crate::routing::Locale;

#[derive(Debug, Clone, Serialize)]
pub struct HeroSection {
    pub locale: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    /// Site-relative path the call-to-action points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_target: Option<String>,
    pub background_image: Option<Media>,
    pub background_video: Option<Media>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeroSectionFields {
    title: String,
    subtitle: Option<String>,
    cta_label: Option<String>,
    cta_target: Option<String>,
    locale: Option<String>,
}

impl HeroSection {
    pub fn from_document(doc: &Document, base: &Url) -> Result<HeroSection, String> {
        let fields: HeroSectionFields = serde_json::from_value(doc.fields.clone())
            .map_err(|e| format!("hero section {}: {}", doc.document_id, e))?;
        Ok(HeroSection {
            locale: fields.locale.unwrap_or_default(),
            title: fields.title,
            subtitle: fields.subtitle,
            cta_label: fields.cta_label,
            cta_target: fields.cta_target,
            background_image: doc
                .fields
                .get("backgroundImage")
                .and_then(|v| Media::from_value(v, base)),
            background_video: doc
                .fields
                .get("backgroundVideo")
                .and_then(|v| Media::from_value(v, base)),
        })
    }

    pub fn has_missing_media(&self) -> bool {
        self.background_image.is_none() || self.background_video.is_none()
    }

    pub fn fill_media_from(&mut self, fallback: &HeroSection) {
        if self.background_image.is_none() {
            self.background_image = fallback.background_image.clone();
        }
        if self.background_video.is_none() {
            self.background_video = fallback.background_video.clone();
        }
    }

    /// Compiled-in banner used when the CMS has nothing usable for the
    /// locale.
    pub fn placeholder(locale: Locale) -> HeroSection {
        let (title, subtitle, cta_label) = match locale {
            Locale::Es => (
                "Viajes que se quedan contigo",
                "Experiencias auténticas por Sudamérica",
                "Pide tu cotización",
            ),
            Locale::En => (
                "Journeys that stay with you",
                "Authentic experiences across South America",
                "Request a quote",
            ),
            Locale::Fr => (
                "Des voyages qui vous marquent",
                "Expériences authentiques en Amérique du Sud",
                "Demander un devis",
            ),
            Locale::De => (
                "Reisen, die bleiben",
                "Authentische Erlebnisse in Südamerika",
                "Angebot anfordern",
            ),
        };
        HeroSection {
            locale: locale.as_str().to_string(),
            title: title.to_string(),
            subtitle: Some(subtitle.to_string()),
            cta_label: Some(cta_label.to_string()),
            cta_target: Some(crate::routing::path_for(
                locale,
                &crate::routing::PageRoute::Section(crate::routing::Section::Quote),
            )),
            background_image: None,
            background_video: None,
        }
    }
}
