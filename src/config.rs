use std::env;

#[derive(Clone)]
pub struct Config {
    pub cms_base_url: String,
    pub cms_token: Option<String>,
    pub cms_timeout_secs: u64,
    pub cms_webhook_token: Option<String>,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub fallback_cache_ttl_secs: u64,
    pub fallback_cache_max_entries: usize,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            cms_base_url: env::var("CMS_URL")
                .unwrap_or_else(|_| "http://localhost:1337".to_string()),
            cms_token: env::var("CMS_TOKEN").ok().filter(|t| !t.is_empty()),
            cms_timeout_secs: env::var("CMS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cms_webhook_token: env::var("CMS_WEBHOOK_TOKEN").ok().filter(|t| !t.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            fallback_cache_ttl_secs: env::var("FALLBACK_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            fallback_cache_max_entries: env::var("FALLBACK_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }
}
