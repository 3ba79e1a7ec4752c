//! Thin REST client for the CMS.
//!
//! Every method hits the CMS `/api` namespace with the locale as a query
//! parameter and `populate=*` so media and relations come back in one round
//! trip. No retries here: callers decide what a failure means.

use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::cms::types::{Document, EntryList, Pagination, SingleEntry};

#[derive(Debug)]
pub enum CmsError {
    /// Transport-level failure: connect, timeout, TLS.
    Unavailable(String),
    /// The CMS answered with a non-success status.
    Status(u16),
    /// The payload did not match the expected envelope.
    Decode(String),
}

impl fmt::Display for CmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmsError::Unavailable(msg) => write!(f, "CMS unreachable: {}", msg),
            CmsError::Status(code) => write!(f, "CMS returned status {}", code),
            CmsError::Decode(msg) => write!(f, "CMS payload not understood: {}", msg),
        }
    }
}

impl std::error::Error for CmsError {}

impl From<reqwest::Error> for CmsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CmsError::Decode(err.to_string())
        } else {
            CmsError::Unavailable(err.to_string())
        }
    }
}

#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl CmsClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<CmsClient, String> {
        let base = Url::parse(base_url)
            .map_err(|e| format!("invalid CMS base URL '{}': {}", base_url, e))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        Ok(CmsClient { http, base, token })
    }

    /// Base URL of the CMS, used to resolve relative media paths.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Fetch collection entries matching the query parameters.
    pub async fn fetch_entries(
        &self,
        collection: &str,
        query: &[(String, String)],
    ) -> Result<(Vec<Document>, Option<Pagination>), CmsError> {
        let url = self.endpoint(collection);
        let response = self.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(CmsError::Status(response.status().as_u16()));
        }
        let list: EntryList = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        Ok((list.data, list.meta.pagination))
    }

    /// Fetch the entry with the given slug in the given locale, fully
    /// populated. Returns `None` when no entry matches.
    pub async fn fetch_by_slug(
        &self,
        collection: &str,
        locale: &str,
        slug: &str,
    ) -> Result<Option<Document>, CmsError> {
        let query = vec![
            ("locale".to_string(), locale.to_string()),
            ("filters[slug][$eq]".to_string(), slug.to_string()),
            ("populate".to_string(), "*".to_string()),
        ];
        let (mut documents, _) = self.fetch_entries(collection, &query).await?;
        if documents.len() > 1 {
            tracing::warn!(
                "{} entries share slug '{}' in locale {}, keeping the first",
                documents.len(),
                slug,
                locale
            );
        }
        if documents.is_empty() {
            Ok(None)
        } else {
            Ok(Some(documents.remove(0)))
        }
    }

    /// Fetch a single-type entry (hero section, site settings, site texts).
    pub async fn fetch_single(
        &self,
        single: &str,
        locale: &str,
    ) -> Result<Option<Document>, CmsError> {
        let url = self.endpoint(single);
        let response = self
            .get(&url)
            .query(&[("locale", locale), ("populate", "*")])
            .send()
            .await?;
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(CmsError::Status(response.status().as_u16()));
        }
        let single: SingleEntry = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        Ok(single.data)
    }

    /// Create an entry; `data` is wrapped in the CMS `data` envelope.
    pub async fn create_entry(&self, collection: &str, data: Value) -> Result<Document, CmsError> {
        let url = self.endpoint(collection);
        let mut request = self.http.post(&url).json(&serde_json::json!({ "data": data }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(CmsError::Status(response.status().as_u16()));
        }
        let single: SingleEntry = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        single
            .data
            .ok_or_else(|| CmsError::Decode("create response carried no data".to_string()))
    }
}
