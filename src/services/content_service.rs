//! Content service: locale-aware CMS reads with default-locale fallback.
//!
//! Reads always hit the CMS in the requested locale. When media fields are
//! missing there, the `es` record for the same slug fills them in; the `es`
//! payloads are the only thing cached (see [`FallbackCache`]). When the
//! requested locale cannot be fetched at all, the `es` payload is served
//! whole, and single types degrade further to compiled-in placeholders so
//! the site chrome never hard-fails.

use serde::Serialize;
use std::time::Duration;

use crate::cms::cache::{CacheKey, FallbackCache};
use crate::cms::client::{CmsClient, CmsError};
use crate::cms::types::{localizations, Document, Pagination};
use crate::domain::ContentError;
use crate::models::{
    Alternate, Experience, ExperienceCard, HeroSection, LegalPage, Package, PackageCard,
    SiteSettings, SiteTexts,
};
use crate::routing::{self, Locale, PageRoute, Section};

pub const EXPERIENCES: &str = "experiences";
pub const PACKAGES: &str = "packages";
pub const LEGAL_PAGES: &str = "legal-pages";
pub const HERO_SECTION: &str = "hero-section";
pub const SITE_SETTINGS: &str = "site-settings";
pub const SITE_TEXTS: &str = "site-texts";

const DEFAULT_PAGE_SIZE: u32 = 24;
const MAX_PAGE_SIZE: u32 = 100;
const FEATURED_LIMIT: u32 = 6;

/// Catalog list filters, straight from the query string.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Everything the landing page needs in one response.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub hero: HeroSection,
    pub featured_experiences: Vec<ExperienceCard>,
    pub featured_packages: Vec<PackageCard>,
}

pub struct ContentService {
    client: CmsClient,
    cache: FallbackCache,
}

impl ContentService {
    pub fn new(client: CmsClient, cache_ttl: Duration, cache_max_entries: usize) -> ContentService {
        ContentService {
            client,
            cache: FallbackCache::new(cache_ttl, cache_max_entries),
        }
    }

    // ---- catalog lists ----

    pub async fn experiences(
        &self,
        locale: Locale,
        filter: &CatalogFilter,
    ) -> Result<(Vec<ExperienceCard>, Option<Pagination>), ContentError> {
        let query = catalog_query(locale, filter);
        let (documents, pagination) = self.client.fetch_entries(EXPERIENCES, &query).await?;
        let base = self.client.base().clone();
        let cards = documents
            .iter()
            .filter_map(|doc| match Experience::from_document(doc, &base) {
                Ok(experience) => Some(ExperienceCard::from(experience)),
                Err(e) => {
                    tracing::warn!("skipping malformed experience: {}", e);
                    None
                }
            })
            .collect();
        Ok((cards, pagination))
    }

    pub async fn packages(
        &self,
        locale: Locale,
        filter: &CatalogFilter,
    ) -> Result<(Vec<PackageCard>, Option<Pagination>), ContentError> {
        let query = catalog_query(locale, filter);
        let (documents, pagination) = self.client.fetch_entries(PACKAGES, &query).await?;
        let base = self.client.base().clone();
        let cards = documents
            .iter()
            .filter_map(|doc| match Package::from_document(doc, &base) {
                Ok(package) => Some(PackageCard::from(package)),
                Err(e) => {
                    tracing::warn!("skipping malformed package: {}", e);
                    None
                }
            })
            .collect();
        Ok((cards, pagination))
    }

    // ---- detail pages ----

    pub async fn experience(&self, locale: Locale, slug: &str) -> Result<Experience, ContentError> {
        let (doc, served) = self.localized_entry(EXPERIENCES, locale, slug).await?;
        let base = self.client.base().clone();
        let mut experience =
            Experience::from_document(&doc, &base).map_err(ContentError::Upstream)?;

        if served != Locale::DEFAULT && experience.has_missing_media() {
            match self.fallback_entry(EXPERIENCES, slug).await {
                // Media only merges across localizations of the same
                // document; an unrelated es record may share the slug.
                Ok(Some(fb)) if fb.document_id == doc.document_id => {
                    match Experience::from_document(&fb, &base) {
                        Ok(fallback) => experience.fill_media_from(&fallback),
                        Err(e) => tracing::warn!("experience '{}': unusable fallback: {}", slug, e),
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("experience '{}': fallback fetch failed: {}", slug, e),
            }
        }

        experience.alternates = alternates_for(Section::Experiences, &doc, served, slug);
        Ok(experience)
    }

    pub async fn package(&self, locale: Locale, slug: &str) -> Result<Package, ContentError> {
        let (doc, served) = self.localized_entry(PACKAGES, locale, slug).await?;
        let base = self.client.base().clone();
        let mut package = Package::from_document(&doc, &base).map_err(ContentError::Upstream)?;

        if served != Locale::DEFAULT && package.has_missing_media() {
            match self.fallback_entry(PACKAGES, slug).await {
                Ok(Some(fb)) if fb.document_id == doc.document_id => {
                    match Package::from_document(&fb, &base) {
                        Ok(fallback) => package.fill_media_from(&fallback),
                        Err(e) => tracing::warn!("package '{}': unusable fallback: {}", slug, e),
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("package '{}': fallback fetch failed: {}", slug, e),
            }
        }

        package.alternates = alternates_for(Section::Packages, &doc, served, slug);
        Ok(package)
    }

    pub async fn legal_page(&self, locale: Locale, slug: &str) -> Result<LegalPage, ContentError> {
        let (doc, served) = self.localized_entry(LEGAL_PAGES, locale, slug).await?;
        let mut page = LegalPage::from_document(&doc).map_err(ContentError::Upstream)?;
        page.alternates = alternates_for(Section::Legal, &doc, served, slug);
        Ok(page)
    }

    // ---- single types (site chrome, never hard-fail) ----

    pub async fn hero(&self, locale: Locale) -> HeroSection {
        let base = self.client.base().clone();
        match self.localized_single(HERO_SECTION, locale).await {
            Ok((doc, served)) => match HeroSection::from_document(&doc, &base) {
                Ok(mut hero) => {
                    if served != Locale::DEFAULT && hero.has_missing_media() {
                        if let Ok(Some(fallback_doc)) = self.fallback_single(HERO_SECTION).await
                            && let Ok(fallback) = HeroSection::from_document(&fallback_doc, &base)
                        {
                            hero.fill_media_from(&fallback);
                        }
                    }
                    hero
                }
                Err(e) => {
                    tracing::warn!("hero section unusable for {}: {}; serving placeholder", locale, e);
                    HeroSection::placeholder(locale)
                }
            },
            Err(e) => {
                tracing::warn!("hero section unavailable for {}: {}; serving placeholder", locale, e);
                HeroSection::placeholder(locale)
            }
        }
    }

    pub async fn settings(&self, locale: Locale) -> SiteSettings {
        let base = self.client.base().clone();
        match self.localized_single(SITE_SETTINGS, locale).await {
            Ok((doc, served)) => match SiteSettings::from_document(&doc, &base) {
                Ok(mut settings) => {
                    if served != Locale::DEFAULT && settings.has_missing_media() {
                        if let Ok(Some(fallback_doc)) = self.fallback_single(SITE_SETTINGS).await
                            && let Ok(fallback) = SiteSettings::from_document(&fallback_doc, &base)
                        {
                            settings.fill_media_from(&fallback);
                        }
                    }
                    settings
                }
                Err(e) => {
                    tracing::warn!("site settings unusable for {}: {}; serving placeholder", locale, e);
                    SiteSettings::placeholder(locale)
                }
            },
            Err(e) => {
                tracing::warn!("site settings unavailable for {}: {}; serving placeholder", locale, e);
                SiteSettings::placeholder(locale)
            }
        }
    }

    pub async fn texts(&self, locale: Locale) -> SiteTexts {
        match self.localized_single(SITE_TEXTS, locale).await {
            Ok((doc, _)) => match SiteTexts::from_document(&doc) {
                Ok(texts) if !texts.is_empty() => texts,
                Ok(_) => SiteTexts::placeholder(locale),
                Err(e) => {
                    tracing::warn!("site texts unusable for {}: {}; serving placeholder", locale, e);
                    SiteTexts::placeholder(locale)
                }
            },
            Err(e) => {
                tracing::warn!("site texts unavailable for {}: {}; serving placeholder", locale, e);
                SiteTexts::placeholder(locale)
            }
        }
    }

    /// Compose the landing page. The three parts are fetched in parallel and
    /// fail independently: a broken catalog leaves the hero standing.
    pub async fn home(&self, locale: Locale) -> HomePage {
        let featured = CatalogFilter {
            featured: Some(true),
            page_size: Some(FEATURED_LIMIT),
            ..Default::default()
        };
        let (hero, experiences, packages) = tokio::join!(
            self.hero(locale),
            self.experiences(locale, &featured),
            self.packages(locale, &featured),
        );

        HomePage {
            hero,
            featured_experiences: experiences.map(|(cards, _)| cards).unwrap_or_else(|e| {
                tracing::warn!("featured experiences unavailable: {}", e);
                Vec::new()
            }),
            featured_packages: packages.map(|(cards, _)| cards).unwrap_or_else(|e| {
                tracing::warn!("featured packages unavailable: {}", e);
                Vec::new()
            }),
        }
    }

    // ---- cache eviction (driven by CMS webhooks) ----

    pub async fn invalidate_locale(&self, locale: &str) -> usize {
        self.cache.invalidate_locale(locale).await
    }

    pub async fn invalidate_collection(&self, collection: &str, locale: &str) -> usize {
        self.cache.invalidate_collection(collection, locale).await
    }

    pub async fn invalidate_all(&self) -> usize {
        self.cache.invalidate_all().await
    }

    // ---- internals ----

    /// Fetch a slug-addressed document in `locale`. Returns the document and
    /// the locale actually served: during a CMS outage the cached `es`
    /// payload stands in for the requested locale.
    async fn localized_entry(
        &self,
        collection: &'static str,
        locale: Locale,
        slug: &str,
    ) -> Result<(Document, Locale), ContentError> {
        if locale == Locale::DEFAULT {
            let doc = self
                .fallback_entry(collection, slug)
                .await
                .map_err(ContentError::Upstream)?;
            return match doc {
                Some(doc) => Ok((doc, locale)),
                None => Err(ContentError::NotFound),
            };
        }

        match self
            .client
            .fetch_by_slug(collection, locale.as_str(), slug)
            .await
        {
            Ok(Some(doc)) => Ok((doc, locale)),
            Ok(None) => Err(ContentError::NotFound),
            Err(err) if is_outage(&err) => {
                tracing::warn!(
                    "{} '{}' unreachable in {} ({}); serving default-locale data",
                    collection,
                    slug,
                    locale,
                    err
                );
                match self.fallback_entry(collection, slug).await {
                    Ok(Some(doc)) => Ok((doc, Locale::DEFAULT)),
                    Ok(None) => Err(ContentError::NotFound),
                    Err(e) => Err(ContentError::Upstream(e)),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch a single type in `locale`. A locale the editors have not
    /// translated yet serves the `es` entry whole.
    async fn localized_single(
        &self,
        single: &'static str,
        locale: Locale,
    ) -> Result<(Document, Locale), ContentError> {
        if locale == Locale::DEFAULT {
            let doc = self
                .fallback_single(single)
                .await
                .map_err(ContentError::Upstream)?;
            return match doc {
                Some(doc) => Ok((doc, locale)),
                None => Err(ContentError::NotFound),
            };
        }

        match self.client.fetch_single(single, locale.as_str()).await {
            Ok(Some(doc)) => Ok((doc, locale)),
            Ok(None) => self.default_single(single).await,
            Err(err) if is_outage(&err) => {
                tracing::warn!(
                    "{} unreachable in {} ({}); serving default-locale data",
                    single,
                    locale,
                    err
                );
                self.default_single(single).await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn default_single(
        &self,
        single: &'static str,
    ) -> Result<(Document, Locale), ContentError> {
        match self.fallback_single(single).await {
            Ok(Some(doc)) => Ok((doc, Locale::DEFAULT)),
            Ok(None) => Err(ContentError::NotFound),
            Err(e) => Err(ContentError::Upstream(e)),
        }
    }

    /// The cached `es` payload for a slug-addressed entry; one upstream
    /// request per TTL window however many handlers ask.
    async fn fallback_entry(
        &self,
        collection: &'static str,
        slug: &str,
    ) -> Result<Option<Document>, String> {
        let key = CacheKey::entry(collection, Locale::DEFAULT.as_str(), slug);
        let client = self.client.clone();
        let slug = slug.to_string();
        self.cache
            .get_or_fetch(key, move || async move {
                client
                    .fetch_by_slug(collection, Locale::DEFAULT.as_str(), &slug)
                    .await
                    .map_err(|e| e.to_string())
            })
            .await
    }

    /// The cached `es` payload for a single type.
    async fn fallback_single(&self, single: &'static str) -> Result<Option<Document>, String> {
        let key = CacheKey::single(single, Locale::DEFAULT.as_str());
        let client = self.client.clone();
        self.cache
            .get_or_fetch(key, move || async move {
                client
                    .fetch_single(single, Locale::DEFAULT.as_str())
                    .await
                    .map_err(|e| e.to_string())
            })
            .await
    }
}

/// Map a webhook `model` name onto the collection it belongs to.
pub fn collection_for_model(model: &str) -> Option<&'static str> {
    match model {
        "experience" => Some(EXPERIENCES),
        "package" => Some(PACKAGES),
        "legal-page" => Some(LEGAL_PAGES),
        "hero-section" => Some(HERO_SECTION),
        "site-settings" => Some(SITE_SETTINGS),
        "site-texts" => Some(SITE_TEXTS),
        _ => None,
    }
}

/// Transport failures and CMS-side 5xx both count as an outage worth
/// degrading for; 4xx answers are real answers.
fn is_outage(err: &CmsError) -> bool {
    match err {
        CmsError::Unavailable(_) => true,
        CmsError::Status(code) => *code >= 500,
        CmsError::Decode(_) => false,
    }
}

fn catalog_query(locale: Locale, filter: &CatalogFilter) -> Vec<(String, String)> {
    let page = filter.page.unwrap_or(1).max(1);
    let page_size = filter
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let mut query = vec![
        ("locale".to_string(), locale.as_str().to_string()),
        ("populate".to_string(), "*".to_string()),
        ("pagination[page]".to_string(), page.to_string()),
        ("pagination[pageSize]".to_string(), page_size.to_string()),
    ];
    if let Some(category) = &filter.category
        && !category.is_empty()
    {
        query.push(("filters[category][$eq]".to_string(), category.clone()));
    }
    if let Some(featured) = filter.featured {
        query.push(("filters[featured][$eq]".to_string(), featured.to_string()));
    }
    if let Some(sort) = filter.sort.as_deref()
        && let Some(mapped) = sort_expression(sort)
    {
        query.push(("sort".to_string(), mapped.to_string()));
    }
    query
}

/// Whitelist of sort keys the API accepts, mapped to CMS field expressions.
fn sort_expression(sort: &str) -> Option<&'static str> {
    match sort {
        "title" => Some("title:asc"),
        "price" => Some("priceFrom:asc"),
        "price_desc" => Some("priceFrom:desc"),
        "newest" => Some("publishedAt:desc"),
        _ => None,
    }
}

/// Language-switcher links for a detail page: the served rendition plus every
/// localization the CMS reports. Localizations may carry their own slug;
/// otherwise the shared slug is assumed.
fn alternates_for(section: Section, doc: &Document, served: Locale, slug: &str) -> Vec<Alternate> {
    let mut alternates = vec![Alternate {
        locale: served.as_str().to_string(),
        path: routing::path_for(served, &PageRoute::Detail(section, slug.to_string())),
    }];
    for localization in localizations(&doc.fields) {
        let Some(locale) = Locale::parse(&localization.locale) else {
            continue;
        };
        if locale == served {
            continue;
        }
        let alt_slug = localization.slug.unwrap_or_else(|| slug.to_string());
        alternates.push(Alternate {
            locale: locale.as_str().to_string(),
            path: routing::path_for(locale, &PageRoute::Detail(section, alt_slug)),
        });
    }
    alternates
}
