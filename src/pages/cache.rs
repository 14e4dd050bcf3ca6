use crate::pages::profile::PageStatus;
use crate::slug::RouteParams;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;

/// What to do with a path that was not built ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Generate it synchronously on first request, then serve it from cache
    Blocking,
}

#[derive(Debug, Clone)]
pub struct StaticPaths {
    pub paths: Vec<RouteParams>,
    pub fallback: Fallback,
}

#[derive(Debug, Clone)]
pub struct CachedPage {
    pub status: PageStatus,
    pub html: Arc<str>,
    pub generated_at: DateTime<Utc>,
}

/// Rendered pages keyed by request path, soft 404s included. Entries live
/// until evicted by capacity.
#[derive(Clone)]
pub struct PageCache {
    inner: Cache<String, CachedPage>,
}

impl PageCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub async fn get(&self, path: &str) -> Option<CachedPage> {
        self.inner.get(path).await
    }

    pub async fn insert(&self, path: &str, status: PageStatus, html: String) -> CachedPage {
        let page = CachedPage {
            status,
            html: html.into(),
            generated_at: Utc::now(),
        };
        self.inner.insert(path.to_string(), page.clone()).await;
        page
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.inner.get(path).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_status_with_the_page() {
        let cache = PageCache::new(10);
        assert!(cache.get("/@nobody").await.is_none());

        cache.insert("/@nobody", PageStatus::NotFound, "<div>404</div>".into()).await;

        let hit = cache.get("/@nobody").await.unwrap();
        assert_eq!(hit.status, PageStatus::NotFound);
        assert_eq!(&*hit.html, "<div>404</div>");
        assert!(cache.contains("/@nobody").await);
    }
}
