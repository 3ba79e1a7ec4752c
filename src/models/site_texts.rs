//! Site texts: the UI string table per locale (single type).
//!
//! The CMS stores the strings as one JSON object per locale so editors can
//! tweak microcopy without a deploy. Non-string values are dropped on parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::cms::types::Document;
use crate::routing::Locale;

#[derive(Debug, Clone, Serialize)]
pub struct SiteTexts {
    pub locale: String,
    pub strings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SiteTextsFields {
    strings: Option<serde_json::Map<String, Value>>,
    locale: Option<String>,
}

impl SiteTexts {
    pub fn from_document(doc: &Document) -> Result<SiteTexts, String> {
        let fields: SiteTextsFields = serde_json::from_value(doc.fields.clone())
            .map_err(|e| format!("site texts {}: {}", doc.document_id, e))?;
        let strings = fields
            .strings
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect();
        Ok(SiteTexts {
            locale: fields.locale.unwrap_or_default(),
            strings,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Compiled-in string table used when the CMS has nothing usable for the
    /// locale. Covers the navigation, quote form and error banner.
    pub fn placeholder(locale: Locale) -> SiteTexts {
        let pairs: &[(&str, &str)] = match locale {
            Locale::Es => &[
                ("nav.home", "Inicio"),
                ("nav.experiences", "Experiencias"),
                ("nav.packages", "Paquetes"),
                ("nav.about", "Nosotros"),
                ("nav.quote", "Cotizar"),
                ("cta.quote", "Pide tu cotización"),
                ("form.name", "Nombre"),
                ("form.email", "Correo electrónico"),
                ("form.message", "Mensaje"),
                ("form.send", "Enviar"),
                ("error.generic", "Algo salió mal. Inténtalo de nuevo."),
                ("footer.rights", "Todos los derechos reservados"),
            ],
            Locale::En => &[
                ("nav.home", "Home"),
                ("nav.experiences", "Experiences"),
                ("nav.packages", "Packages"),
                ("nav.about", "About us"),
                ("nav.quote", "Get a quote"),
                ("cta.quote", "Request a quote"),
                ("form.name", "Name"),
                ("form.email", "Email"),
                ("form.message", "Message"),
                ("form.send", "Send"),
                ("error.generic", "Something went wrong. Please try again."),
                ("footer.rights", "All rights reserved"),
            ],
            Locale::Fr => &[
                ("nav.home", "Accueil"),
                ("nav.experiences", "Expériences"),
                ("nav.packages", "Forfaits"),
                ("nav.about", "À propos"),
                ("nav.quote", "Devis"),
                ("cta.quote", "Demander un devis"),
                ("form.name", "Nom"),
                ("form.email", "E-mail"),
                ("form.message", "Message"),
                ("form.send", "Envoyer"),
                ("error.generic", "Une erreur est survenue. Veuillez réessayer."),
                ("footer.rights", "Tous droits réservés"),
            ],
            Locale::De => &[
                ("nav.home", "Startseite"),
                ("nav.experiences", "Erlebnisse"),
                ("nav.packages", "Pakete"),
                ("nav.about", "Über uns"),
                ("nav.quote", "Angebot"),
                ("cta.quote", "Angebot anfordern"),
                ("form.name", "Name"),
                ("form.email", "E-Mail"),
                ("form.message", "Nachricht"),
                ("form.send", "Senden"),
                ("error.generic", "Etwas ist schiefgelaufen. Bitte erneut versuchen."),
                ("footer.rights", "Alle Rechte vorbehalten"),
            ],
        };
        SiteTexts {
            locale: locale.as_str().to_string(),
            strings: pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_string_values_are_dropped() {
        let doc: Document = serde_json::from_value(json!({
            "id": 1,
            "documentId": "texts",
            "locale": "en",
            "strings": {
                "nav.home": "Home",
                "broken.number": 42,
                "broken.nested": { "x": 1 }
            }
        }))
        .unwrap();

        let texts = SiteTexts::from_document(&doc).unwrap();
        assert_eq!(texts.strings.len(), 1);
        assert_eq!(texts.strings.get("nav.home").map(String::as_str), Some("Home"));
    }

    #[test]
    fn placeholders_exist_for_every_locale() {
        for locale in Locale::ALL {
            let texts = SiteTexts::placeholder(locale);
            assert!(!texts.is_empty());
            assert!(texts.strings.contains_key("error.generic"));
            assert_eq!(texts.locale, locale.as_str());
        }
    }
}
