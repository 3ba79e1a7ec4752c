//! Content records as served by the API: CMS-shaped, media resolved,
//! alternate-language links attached by the services layer.

pub mod experience;
pub mod hero_section;
pub mod legal_page;
pub mod package;
pub mod quote;
pub mod site_settings;
pub mod site_texts;

pub use experience::{Experience, ExperienceCard};
pub use hero_section::HeroSection;
pub use legal_page::LegalPage;
pub use package::{IncludedExperience, ItineraryDay, Package, PackageCard};
pub use quote::{QuoteReceipt, QuoteRequest};
pub use site_settings::SiteSettings;
pub use site_texts::SiteTexts;

use serde::Serialize;

/// Alternate-language link for a detail page, used by the language switcher.
#[derive(Debug, Clone, Serialize)]
pub struct Alternate {
    pub locale: String,
    pub path: String,
}
