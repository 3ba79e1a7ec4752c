//! Experience: a bookable single activity (trek, tasting, day trip).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cms::types::{Document, Media};
use crate::models::Alternate;

/// An experience as served by the API, media already resolved to absolute
/// URLs.
#[derive(Debug, Clone, Serialize)]
pub struct Experience {
    /// Cross-locale CMS identifier.
    pub id: String,
    pub locale: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    pub featured: bool,
    pub hero_image: Option<Media>,
    pub thumbnail: Option<Media>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<Media>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<Alternate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExperienceFields {
    slug: String,
    title: String,
    subtitle: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    category: Option<String>,
    location: Option<String>,
    duration_hours: Option<f64>,
    price_from: Option<f64>,
    currency: Option<String>,
    highlights: Option<Vec<String>>,
    #[serde(default)]
    featured: bool,
    locale: Option<String>,
}

impl Experience {
    pub fn from_document(doc: &Document, base: &Url) -> Result<Experience, String> {
        let fields: ExperienceFields = serde_json::from_value(doc.fields.clone())
            .map_err(|e| format!("experience {}: {}", doc.document_id, e))?;
        Ok(Experience {
            id: doc.document_id.clone(),
            locale: fields.locale.unwrap_or_default(),
            slug: fields.slug,
            title: fields.title,
            subtitle: fields.subtitle,
            summary: fields.summary,
            description: fields.description,
            category: fields.category,
            location: fields.location,
            duration_hours: fields.duration_hours,
            price_from: fields.price_from,
            currency: fields.currency,
            highlights: fields.highlights.unwrap_or_default(),
            featured: fields.featured,
            hero_image: doc
                .fields
                .get("heroImage")
                .and_then(|v| Media::from_value(v, base)),
            thumbnail: doc
                .fields
                .get("thumbnail")
                .and_then(|v| Media::from_value(v, base)),
            gallery: doc
                .fields
                .get("gallery")
                .map(|v| Media::list_from_value(v, base))
                .unwrap_or_default(),
            alternates: Vec::new(),
        })
    }

    pub fn has_missing_media(&self) -> bool {
        self.hero_image.is_none() || self.thumbnail.is_none() || self.gallery.is_empty()
    }

    /// Back-fill media fields missing in this locale from the default-locale
    /// record. Text is never touched.
    pub fn fill_media_from(&mut self, fallback: &Experience) {
        if self.hero_image.is_none() {
            self.hero_image = fallback.hero_image.clone();
        }
        if self.thumbnail.is_none() {
            self.thumbnail = fallback.thumbnail.clone();
        }
        if self.gallery.is_empty() {
            self.gallery = fallback.gallery.clone();
        }
    }
}

/// Slimmed-down experience for catalog listings.
#[derive(Debug, Clone, Serialize)]
pub struct ExperienceCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub featured: bool,
    pub thumbnail: Option<Media>,
}

impl From<Experience> for ExperienceCard {
    fn from(exp: Experience) -> Self {
        ExperienceCard {
            id: exp.id,
            slug: exp.slug,
            title: exp.title,
            subtitle: exp.subtitle,
            category: exp.category,
            location: exp.location,
            duration_hours: exp.duration_hours,
            price_from: exp.price_from,
            currency: exp.currency,
            featured: exp.featured,
            // Lists fall back to the hero shot when no thumbnail is set.
            thumbnail: exp.thumbnail.or(exp.hero_image),
        }
    }
}
