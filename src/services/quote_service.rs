//! Quote-request intake: validate, stamp a reference, forward to the CMS.

use chrono::{NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::cms::CmsClient;
use crate::domain::ContentError;
use crate::models::{QuoteReceipt, QuoteRequest};

pub const QUOTE_REQUESTS: &str = "quote-requests";

const MAX_MESSAGE_CHARS: usize = 4000;
const MAX_PARTY_SIZE: u32 = 50;

pub struct QuoteService {
    client: CmsClient,
}

impl QuoteService {
    pub fn new(client: CmsClient) -> QuoteService {
        QuoteService { client }
    }

    pub fn validate(request: &QuoteRequest) -> Result<(), ContentError> {
        if request.name.trim().is_empty() {
            return Err(ContentError::Validation("name is required".to_string()));
        }
        let email = request.email.trim();
        if email.len() < 5 || !email.contains('@') || !email.contains('.') {
            return Err(ContentError::Validation(
                "a valid email address is required".to_string(),
            ));
        }
        if request.message.trim().is_empty() {
            return Err(ContentError::Validation("message is required".to_string()));
        }
        if request.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ContentError::Validation(format!(
                "message exceeds {} characters",
                MAX_MESSAGE_CHARS
            )));
        }
        if request.experience_slug.is_some() && request.package_slug.is_some() {
            return Err(ContentError::Validation(
                "a quote may reference an experience or a package, not both".to_string(),
            ));
        }
        if let Some(party_size) = request.party_size
            && !(1..=MAX_PARTY_SIZE).contains(&party_size)
        {
            return Err(ContentError::Validation(format!(
                "party_size must be between 1 and {}",
                MAX_PARTY_SIZE
            )));
        }
        if let Some(date) = request.travel_date.as_deref()
            && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            return Err(ContentError::Validation(
                "travel_date must be formatted YYYY-MM-DD".to_string(),
            ));
        }
        Ok(())
    }

    /// Store the quote request in the CMS. The generated reference is quoted
    /// back to the visitor and stored with the entry, so a lost response can
    /// still be matched to the submission.
    pub async fn submit(&self, request: QuoteRequest) -> Result<QuoteReceipt, ContentError> {
        Self::validate(&request)?;

        let reference = Uuid::new_v4().to_string();
        let payload = json!({
            "reference": reference,
            "name": request.name.trim(),
            "email": request.email.trim(),
            "phone": request.phone,
            "locale": request.locale,
            "message": request.message.trim(),
            "experienceSlug": request.experience_slug,
            "packageSlug": request.package_slug,
            "travelDate": request.travel_date,
            "partySize": request.party_size,
            "submittedAt": Utc::now().to_rfc3339(),
        });

        match self.client.create_entry(QUOTE_REQUESTS, payload).await {
            Ok(doc) => {
                tracing::info!("quote {} stored as CMS document {}", reference, doc.document_id);
                Ok(QuoteReceipt {
                    reference,
                    status: "received".to_string(),
                })
            }
            Err(e) => {
                tracing::error!("quote {} could not be forwarded: {}", reference, e);
                Err(ContentError::Upstream(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Locale;

    fn request() -> QuoteRequest {
        QuoteRequest {
            name: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            locale: Locale::Es,
            message: "Quisiera cotizar un viaje para dos personas.".to_string(),
            experience_slug: Some("trekking-andes".to_string()),
            package_slug: None,
            travel_date: Some("2026-03-15".to_string()),
            party_size: Some(2),
        }
    }

    #[test]
    fn a_complete_request_validates() {
        assert!(QuoteService::validate(&request()).is_ok());
    }

    #[test]
    fn blank_name_or_message_is_rejected() {
        let mut r = request();
        r.name = "   ".to_string();
        assert!(QuoteService::validate(&r).is_err());

        let mut r = request();
        r.message = String::new();
        assert!(QuoteService::validate(&r).is_err());
    }

    #[test]
    fn implausible_email_is_rejected() {
        for email in ["", "a@b", "not-an-email", "@x."] {
            let mut r = request();
            r.email = email.to_string();
            assert!(QuoteService::validate(&r).is_err(), "accepted '{}'", email);
        }
    }

    #[test]
    fn referencing_both_catalog_types_is_rejected() {
        let mut r = request();
        r.package_slug = Some("patagonia-express".to_string());
        assert!(QuoteService::validate(&r).is_err());
    }

    #[test]
    fn malformed_travel_date_is_rejected() {
        let mut r = request();
        r.travel_date = Some("15/03/2026".to_string());
        assert!(QuoteService::validate(&r).is_err());
    }

    #[test]
    fn party_size_bounds_are_enforced() {
        let mut r = request();
        r.party_size = Some(0);
        assert!(QuoteService::validate(&r).is_err());
        r.party_size = Some(51);
        assert!(QuoteService::validate(&r).is_err());
        r.party_size = Some(50);
        assert!(QuoteService::validate(&r).is_ok());
    }
}
