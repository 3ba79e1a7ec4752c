//! Translated URL segments and website path resolution.
//!
//! The public site exposes one URL tree per locale, with section segments
//! translated (`/es/experiencias/...`, `/en/experiences/...`, `/de/erlebnisse/...`).
//! Resolution is pure string mapping: slugs are carried through verbatim and
//! never translated here, since each record owns its slugs in the CMS.

use crate::routing::Locale;

/// Canonical page sections, independent of locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Experiences,
    Packages,
    Legal,
    Quote,
    About,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Experiences,
        Section::Packages,
        Section::Legal,
        Section::Quote,
        Section::About,
    ];

    /// URL segment for this section in the given locale.
    pub fn segment(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Section::Experiences, Locale::Es) => "experiencias",
            (Section::Experiences, Locale::En) => "experiences",
            (Section::Experiences, Locale::Fr) => "experiences",
            (Section::Experiences, Locale::De) => "erlebnisse",
            (Section::Packages, Locale::Es) => "paquetes",
            (Section::Packages, Locale::En) => "packages",
            (Section::Packages, Locale::Fr) => "forfaits",
            (Section::Packages, Locale::De) => "pakete",
            (Section::Legal, Locale::Es) => "legal",
            (Section::Legal, Locale::En) => "legal",
            (Section::Legal, Locale::Fr) => "mentions-legales",
            (Section::Legal, Locale::De) => "rechtliches",
            (Section::Quote, Locale::Es) => "cotizar",
            (Section::Quote, Locale::En) => "quote",
            (Section::Quote, Locale::Fr) => "devis",
            (Section::Quote, Locale::De) => "angebot",
            (Section::About, Locale::Es) => "nosotros",
            (Section::About, Locale::En) => "about",
            (Section::About, Locale::Fr) => "a-propos",
            (Section::About, Locale::De) => "ueber-uns",
        }
    }

    /// Whether the section addresses individual records by slug.
    pub fn has_detail(&self) -> bool {
        matches!(
            self,
            Section::Experiences | Section::Packages | Section::Legal
        )
    }
}

/// The page a path points at, minus the locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRoute {
    Home,
    Section(Section),
    Detail(Section, String),
}

/// Outcome of resolving a website path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The path is canonical and maps to a page.
    Page { locale: Locale, route: PageRoute },
    /// The path is understood but not canonical; permanent-redirect to the
    /// target.
    Redirect(String),
    NotFound,
}

/// Canonical path for a page in a locale.
pub fn path_for(locale: Locale, route: &PageRoute) -> String {
    match route {
        PageRoute::Home => format!("/{}", locale),
        PageRoute::Section(section) => format!("/{}/{}", locale, section.segment(locale)),
        PageRoute::Detail(section, slug) => format!(
            "/{}/{}/{}",
            locale,
            section.segment(locale),
            urlencoding::encode(slug)
        ),
    }
}

/// Path for the same page in another locale, or `None` when the path does
/// not resolve to a page. Used to build language-switcher links.
pub fn switch_locale(path: &str, target: Locale) -> Option<String> {
    match resolve(path, Locale::DEFAULT) {
        Resolution::Page { route, .. } => Some(path_for(target, &route)),
        _ => None,
    }
}

/// Resolve a request path into a page, a permanent redirect, or a 404.
///
/// `preferred` is the negotiated visitor locale; it only decides where the
/// bare root redirects.
pub fn resolve(path: &str, preferred: Locale) -> Resolution {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Resolution::Redirect(format!("/{}", preferred));
    }
    // Canonical paths never end in a slash.
    if trimmed.len() != path.len() {
        return Resolution::Redirect(trimmed.to_string());
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let first = segments[0];

    if let Some(locale) = Locale::parse(first) {
        return resolve_in_locale(locale, &segments[1..]);
    }

    // A two-letter first segment that is not a supported locale is an
    // unsupported language code: map the remainder onto the default locale.
    if first.len() == 2 && first.chars().all(|c| c.is_ascii_alphabetic()) {
        return match resolve_in_locale(Locale::DEFAULT, &segments[1..]) {
            Resolution::Page { locale, route } => Resolution::Redirect(path_for(locale, &route)),
            Resolution::Redirect(target) => Resolution::Redirect(target),
            Resolution::NotFound => Resolution::Redirect(format!("/{}", Locale::DEFAULT)),
        };
    }

    // Unprefixed section segment: redirect into the tree of the locale that
    // owns the segment.
    if let Some((owner, section)) = owning_locale(first) {
        let route = match segments.len() {
            1 => PageRoute::Section(section),
            2 if section.has_detail() => PageRoute::Detail(section, segments[1].to_string()),
            _ => return Resolution::NotFound,
        };
        return Resolution::Redirect(path_for(owner, &route));
    }

    Resolution::NotFound
}

fn resolve_in_locale(locale: Locale, rest: &[&str]) -> Resolution {
    if rest.is_empty() {
        return Resolution::Page {
            locale,
            route: PageRoute::Home,
        };
    }
    if rest.len() > 2 {
        return Resolution::NotFound;
    }

    let segment = rest[0];
    let slug = rest.get(1).copied();

    if let Some(section) = section_in(locale, segment) {
        return match slug {
            None => Resolution::Page {
                locale,
                route: PageRoute::Section(section),
            },
            Some(slug) if section.has_detail() => Resolution::Page {
                locale,
                route: PageRoute::Detail(section, slug.to_string()),
            },
            Some(_) => Resolution::NotFound,
        };
    }

    // Segment borrowed from another locale's tree: keep the locale, fix the
    // segment.
    if let Some((_, section)) = owning_locale(segment) {
        let route = match slug {
            None => PageRoute::Section(section),
            Some(slug) if section.has_detail() => PageRoute::Detail(section, slug.to_string()),
            Some(_) => return Resolution::NotFound,
        };
        return Resolution::Redirect(path_for(locale, &route));
    }

    Resolution::NotFound
}

fn section_in(locale: Locale, segment: &str) -> Option<Section> {
    Section::ALL
        .iter()
        .copied()
        .find(|section| section.segment(locale) == segment)
}

/// First locale (in priority order) whose tree contains the segment.
fn owning_locale(segment: &str) -> Option<(Locale, Section)> {
    for locale in Locale::ALL {
        if let Some(section) = section_in(locale, segment) {
            return Some((locale, section));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(locale: Locale, route: PageRoute) -> Resolution {
        Resolution::Page { locale, route }
    }

    fn redirect(target: &str) -> Resolution {
        Resolution::Redirect(target.to_string())
    }

    #[test]
    fn root_redirects_to_negotiated_locale() {
        assert_eq!(resolve("/", Locale::Fr), redirect("/fr"));
        assert_eq!(resolve("/", Locale::Es), redirect("/es"));
    }

    #[test]
    fn locale_home_resolves() {
        assert_eq!(resolve("/es", Locale::En), page(Locale::Es, PageRoute::Home));
        assert_eq!(resolve("/de", Locale::Es), page(Locale::De, PageRoute::Home));
    }

    #[test]
    fn trailing_slash_redirects_to_canonical_path() {
        assert_eq!(resolve("/es/", Locale::Es), redirect("/es"));
        assert_eq!(
            resolve("/en/experiences/", Locale::Es),
            redirect("/en/experiences")
        );
    }

    #[test]
    fn translated_sections_resolve_in_their_locale() {
        assert_eq!(
            resolve("/es/experiencias", Locale::Es),
            page(Locale::Es, PageRoute::Section(Section::Experiences))
        );
        assert_eq!(
            resolve("/fr/forfaits", Locale::Es),
            page(Locale::Fr, PageRoute::Section(Section::Packages))
        );
        assert_eq!(
            resolve("/de/angebot", Locale::Es),
            page(Locale::De, PageRoute::Section(Section::Quote))
        );
    }

    #[test]
    fn detail_paths_keep_their_slug() {
        assert_eq!(
            resolve("/en/packages/patagonia-express", Locale::Es),
            page(
                Locale::En,
                PageRoute::Detail(Section::Packages, "patagonia-express".to_string())
            )
        );
    }

    #[test]
    fn segment_from_another_locale_redirects_within_locale() {
        // English segment under the Spanish prefix.
        assert_eq!(
            resolve("/es/packages/andes", Locale::Es),
            redirect("/es/paquetes/andes")
        );
        // French segment under the German prefix.
        assert_eq!(
            resolve("/de/forfaits", Locale::Es),
            redirect("/de/pakete")
        );
    }

    #[test]
    fn shared_segments_stay_in_the_requested_locale() {
        // "experiences" exists in both en and fr; under /fr it is canonical.
        assert_eq!(
            resolve("/fr/experiences", Locale::Es),
            page(Locale::Fr, PageRoute::Section(Section::Experiences))
        );
        assert_eq!(
            resolve("/en/legal/terms", Locale::Es),
            page(
                Locale::En,
                PageRoute::Detail(Section::Legal, "terms".to_string())
            )
        );
    }

    #[test]
    fn unsupported_language_prefix_maps_to_default_locale() {
        assert_eq!(resolve("/it", Locale::Es), redirect("/es"));
        assert_eq!(
            resolve("/pt/experiencias/islas", Locale::Es),
            redirect("/es/experiencias/islas")
        );
        // English segment under an unsupported prefix resolves through es.
        assert_eq!(
            resolve("/it/packages/andes", Locale::Es),
            redirect("/es/paquetes/andes")
        );
        // Unresolvable remainder falls back to the default home.
        assert_eq!(resolve("/xx/nada-conocido", Locale::Es), redirect("/es"));
    }

    #[test]
    fn unprefixed_segment_redirects_to_owning_locale() {
        assert_eq!(resolve("/experiencias", Locale::Es), redirect("/es/experiencias"));
        assert_eq!(
            resolve("/experiences/trek", Locale::Es),
            redirect("/en/experiences/trek")
        );
        assert_eq!(resolve("/forfaits", Locale::Es), redirect("/fr/forfaits"));
        // "legal" is shared between es and en; es wins by priority.
        assert_eq!(resolve("/legal", Locale::Es), redirect("/es/legal"));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(resolve("/wat", Locale::Es), Resolution::NotFound);
        assert_eq!(resolve("/es/wat", Locale::Es), Resolution::NotFound);
        assert_eq!(
            resolve("/es/experiencias/a/b", Locale::Es),
            Resolution::NotFound
        );
        // Quote and about pages take no slug.
        assert_eq!(resolve("/es/cotizar/extra", Locale::Es), Resolution::NotFound);
    }

    #[test]
    fn path_for_encodes_slugs() {
        assert_eq!(
            path_for(
                Locale::Es,
                &PageRoute::Detail(Section::Experiences, "san josé".to_string())
            ),
            "/es/experiencias/san%20jos%C3%A9"
        );
    }

    #[test]
    fn switch_locale_maps_pages_across_trees() {
        assert_eq!(
            switch_locale("/es/paquetes/andes", Locale::De),
            Some("/de/pakete/andes".to_string())
        );
        assert_eq!(
            switch_locale("/en/experiences", Locale::Fr),
            Some("/fr/experiences".to_string())
        );
        assert_eq!(switch_locale("/es", Locale::En), Some("/en".to_string()));
        assert_eq!(switch_locale("/nope", Locale::En), None);
    }
}
