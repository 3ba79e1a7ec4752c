//! Package: a multi-day itinerary bundling several experiences.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cms::types::{Document, Media};
use crate::models::Alternate;

#[derive(Debug, Clone, Serialize)]
pub struct Package {
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
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub itinerary: Vec<ItineraryDay>,
    /// Experiences bundled in this package, linked by slug.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub experiences: Vec<IncludedExperience>,
    pub featured: bool,
    pub hero_image: Option<Media>,
    pub thumbnail: Option<Media>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<Media>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<Alternate>,
}

/// One day of a package itinerary (a CMS component).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A populated experience relation, slimmed to what detail pages link with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncludedExperience {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageFields {
    slug: String,
    title: String,
    subtitle: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    duration_days: Option<u32>,
    nights: Option<u32>,
    price_from: Option<f64>,
    currency: Option<String>,
    includes: Option<Vec<String>>,
    itinerary: Option<Vec<ItineraryDay>>,
    experiences: Option<Vec<IncludedExperience>>,
    #[serde(default)]
    featured: bool,
    locale: Option<String>,
}

impl Package {
    pub fn from_document(doc: &Document, base: &Url) -> Result<Package, String> {
        let fields: PackageFields = serde_json::from_value(doc.fields.clone())
            .map_err(|e| format!("package {}: {}", doc.document_id, e))?;
        Ok(Package {
            id: doc.document_id.clone(),
            locale: fields.locale.unwrap_or_default(),
            slug: fields.slug,
            title: fields.title,
            subtitle: fields.subtitle,
            summary: fields.summary,
            description: fields.description,
            duration_days: fields.duration_days,
            nights: fields.nights,
            price_from: fields.price_from,
            currency: fields.currency,
            includes: fields.includes.unwrap_or_default(),
            itinerary: fields.itinerary.unwrap_or_default(),
            experiences: fields.experiences.unwrap_or_default(),
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

    pub fn fill_media_from(&mut self, fallback: &Package) {
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

/// Slimmed-down package for catalog listings.
#[derive(Debug, Clone, Serialize)]
pub struct PackageCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub featured: bool,
    pub thumbnail: Option<Media>,
}

impl From<Package> for PackageCard {
    fn from(pkg: Package) -> Self {
        PackageCard {
            id: pkg.id,
            slug: pkg.slug,
            title: pkg.title,
            subtitle: pkg.subtitle,
            duration_days: pkg.duration_days,
            price_from: pkg.price_from,
            currency: pkg.currency,
            featured: pkg.featured,
            thumbnail: pkg.thumbnail.or(pkg.hero_image),
        }
    }
}
