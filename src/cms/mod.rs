//! CMS access layer: wire types, REST client, fallback cache.

pub mod cache;
pub mod client;
pub mod types;

pub use cache::{CacheKey, FallbackCache};
pub use client::{CmsClient, CmsError};
pub use types::{Document, Media, Pagination};
