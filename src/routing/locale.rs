use serde::{Deserialize, Serialize};
use std::fmt;

/// A site locale. `es` is the default and also the content fallback locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Es,
    En,
    Fr,
    De,
}

impl Locale {
    /// Supported locales in priority order (used when a URL segment is
    /// claimed by more than one locale).
    pub const ALL: [Locale; 4] = [Locale::Es, Locale::En, Locale::Fr, Locale::De];

    pub const DEFAULT: Locale = Locale::Es;

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    pub fn parse(code: &str) -> Option<Locale> {
        match code.to_ascii_lowercase().as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    /// The first entry whose primary subtag we support wins; q-values beyond
    /// the header's own ordering are ignored.
    pub fn negotiate(accept_language: Option<&str>) -> Locale {
        let header = match accept_language {
            Some(value) => value,
            None => return Locale::DEFAULT,
        };

        for entry in header.split(',') {
            let tag = entry.split(';').next().unwrap_or("").trim();
            let primary = tag.split('-').next().unwrap_or("");
            if let Some(locale) = Locale::parse(primary) {
                return locale;
            }
        }

        Locale::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
