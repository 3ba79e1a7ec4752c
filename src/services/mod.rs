//! Services layer - business logic between the HTTP handlers and the CMS.

pub mod content_service;
pub mod quote_service;

pub use content_service::{CatalogFilter, ContentService, HomePage};
pub use quote_service::QuoteService;
