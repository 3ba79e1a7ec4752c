//! TTL cache for default-locale fallback payloads.
//!
//! Content in the visitor's locale is always fetched fresh; the `es` record
//! backing media fallback is the hot, shared payload, so it is kept in memory
//! for a fixed TTL. A pending map collapses concurrent fetches of the same
//! key into a single upstream request, and "document absent" results are
//! cached too so a missing record does not hammer the CMS.

use dashmap::DashMap;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::cms::types::Document;

type FetchResult = Result<Option<Document>, String>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// One cached payload per (collection, locale, identifier). The identifier
/// is a slug for collection entries and `"@single"` for single types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub collection: String,
    pub locale: String,
    pub ident: String,
}

impl CacheKey {
    pub fn entry(collection: &str, locale: &str, slug: &str) -> CacheKey {
        CacheKey {
            collection: collection.to_string(),
            locale: locale.to_string(),
            ident: slug.to_string(),
        }
    }

    pub fn single(single: &str, locale: &str) -> CacheKey {
        CacheKey {
            collection: single.to_string(),
            locale: locale.to_string(),
            ident: "@single".to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.collection, self.locale, self.ident)
    }
}

struct CacheSlot {
    /// `None` records an upstream miss, so absent documents are remembered
    /// for the TTL as well.
    value: Option<Document>,
    stored_at: Instant,
}

pub struct FallbackCache {
    entries: DashMap<CacheKey, CacheSlot>,
    pending: Mutex<HashMap<CacheKey, SharedFetch>>,
    ttl: Duration,
    max_entries: usize,
}

impl FallbackCache {
    pub fn new(ttl: Duration, max_entries: usize) -> FallbackCache {
        FallbackCache {
            entries: DashMap::new(),
            pending: Mutex::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Return the cached payload, or run `fetch` once and share its result
    /// with every concurrent caller of the same key. Errors are returned but
    /// never cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetch: F) -> FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult> + Send + 'static,
    {
        if let Some(value) = self.lookup(&key) {
            tracing::debug!("fallback cache hit: {}", key);
            return Ok(value);
        }

        let shared = {
            let mut pending = self.pending.lock().await;
            // A fetch may have landed while we queued for the lock.
            if let Some(value) = self.lookup(&key) {
                return Ok(value);
            }
            match pending.get(&key) {
                Some(inflight) => inflight.clone(),
                None => {
                    tracing::debug!("fallback cache fetch: {}", key);
                    let fetch = fetch().boxed().shared();
                    pending.insert(key.clone(), fetch.clone());
                    fetch
                }
            }
        };

        let result = shared.await;
        if let Ok(value) = &result {
            // Store before dropping the pending slot so late callers see
            // either the in-flight future or the cached value.
            self.store(key.clone(), value.clone());
        }
        self.pending.lock().await.remove(&key);
        result
    }

    fn lookup(&self, key: &CacheKey) -> Option<Option<Document>> {
        let slot = self.entries.get(key)?;
        if slot.stored_at.elapsed() < self.ttl {
            return Some(slot.value.clone());
        }
        drop(slot);
        self.entries.remove(key);
        None
    }

    fn store(&self, key: CacheKey, value: Option<Document>) {
        if self.entries.len() >= self.max_entries {
            // Drop expired slots first, then evict the oldest if still full.
            let ttl = self.ttl;
            self.entries.retain(|_, slot| slot.stored_at.elapsed() < ttl);
            if self.entries.len() >= self.max_entries {
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|entry| entry.value().stored_at)
                    .map(|entry| entry.key().clone());
                if let Some(oldest) = oldest {
                    self.entries.remove(&oldest);
                }
            }
        }
        self.entries.insert(
            key,
            CacheSlot {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop everything cached for one locale. Returns the number of entries
    /// evicted.
    pub async fn invalidate_locale(&self, locale: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.locale != locale);
        self.pending.lock().await.retain(|key, _| key.locale != locale);
        before - self.entries.len()
    }

    /// Drop one collection's cached entries for a locale.
    pub async fn invalidate_collection(&self, collection: &str, locale: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key.collection != collection || key.locale != locale);
        self.pending
            .lock()
            .await
            .retain(|key, _| key.collection != collection || key.locale != locale);
        before - self.entries.len()
    }

    /// Drop every cached payload.
    pub async fn invalidate_all(&self) -> usize {
        let before = self.entries.len();
        self.entries.clear();
        self.pending.lock().await.clear();
        before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn doc(id: &str) -> Document {
        serde_json::from_value(json!({
            "id": 1,
            "documentId": id,
            "locale": "es",
            "title": "x"
        }))
        .unwrap()
    }

    fn key(slug: &str) -> CacheKey {
        CacheKey::entry("experiences", "es", slug)
    }

    #[tokio::test]
    async fn second_call_within_ttl_is_served_from_cache() {
        let cache = FallbackCache::new(Duration::from_secs(60), 16);
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let got = cache
                .get_or_fetch(key("andes"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(doc("d1")))
                })
                .await
                .unwrap();
            assert_eq!(got.unwrap().document_id, "d1");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_fetched_again() {
        let cache = FallbackCache::new(Duration::from_millis(20), 16);
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            cache
                .get_or_fetch(key("andes"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(doc("d1")))
                })
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(40)).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_fetches_collapse_into_one_request() {
        let cache = Arc::new(FallbackCache::new(Duration::from_secs(60), 16));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(key("andes"), move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        Ok(Some(doc("d1")))
                    })
                    .await
            }));
        }
        for handle in handles {
            let got = handle.await.unwrap().unwrap();
            assert_eq!(got.unwrap().document_id, "d1");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn misses_are_cached_and_errors_are_not() {
        let cache = FallbackCache::new(Duration::from_secs(60), 16);
        let calls = Arc::new(AtomicUsize::new(0));

        let boom: FetchResult = cache
            .get_or_fetch(key("nope"), || async { Err("boom".to_string()) })
            .await;
        assert!(boom.is_err());

        for _ in 0..2 {
            let calls = calls.clone();
            let got = cache
                .get_or_fetch(key("nope"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                })
                .await
                .unwrap();
            assert!(got.is_none());
        }

        // The error was not cached; the miss was.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_is_bounded() {
        let cache = FallbackCache::new(Duration::from_secs(60), 4);
        for i in 0..10 {
            let slug = format!("slug-{}", i);
            cache
                .get_or_fetch(key(&slug), move || async move { Ok(Some(doc("d"))) })
                .await
                .unwrap();
        }
        assert!(cache.len() <= 4);
    }

    #[tokio::test]
    async fn invalidate_locale_evicts_matching_entries() {
        let cache = FallbackCache::new(Duration::from_secs(60), 16);
        cache
            .get_or_fetch(key("a"), || async { Ok(Some(doc("d1"))) })
            .await
            .unwrap();
        cache
            .get_or_fetch(CacheKey::single("hero-section", "es"), || async {
                Ok(Some(doc("d2")))
            })
            .await
            .unwrap();

        assert_eq!(cache.invalidate_locale("en").await, 0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.invalidate_locale("es").await, 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn invalidate_collection_leaves_other_collections_alone() {
        let cache = FallbackCache::new(Duration::from_secs(60), 16);
        cache
            .get_or_fetch(key("a"), || async { Ok(Some(doc("d1"))) })
            .await
            .unwrap();
        cache
            .get_or_fetch(CacheKey::entry("packages", "es", "b"), || async {
                Ok(Some(doc("d2")))
            })
            .await
            .unwrap();

        assert_eq!(cache.invalidate_collection("experiences", "es").await, 1);
        assert_eq!(cache.len(), 1);
    }
}
