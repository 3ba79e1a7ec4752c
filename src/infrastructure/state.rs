//! Application state containing services and shared resources

use std::sync::Arc;
use std::time::Duration;

use crate::cms::CmsClient;
use crate::config::Config;
use crate::services::{ContentService, QuoteService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub content: Arc<ContentService>,
    pub quotes: Arc<QuoteService>,
}

impl AppState {
    /// Create a new AppState with the CMS client and services wired up
    pub fn new(config: Config) -> Result<Self, String> {
        let client = CmsClient::new(
            &config.cms_base_url,
            config.cms_token.clone(),
            Duration::from_secs(config.cms_timeout_secs),
        )?;
        let content = Arc::new(ContentService::new(
            client.clone(),
            Duration::from_secs(config.fallback_cache_ttl_secs),
            config.fallback_cache_max_entries,
        ));
        let quotes = Arc::new(QuoteService::new(client));

        Ok(Self {
            config: Arc::new(config),
            content,
            quotes,
        })
    }
}

// Implement FromRef so handlers can extract the service they need directly
impl axum::extract::FromRef<AppState> for Arc<ContentService> {
    fn from_ref(state: &AppState) -> Self {
        state.content.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<QuoteService> {
    fn from_ref(state: &AppState) -> Self {
        state.quotes.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
