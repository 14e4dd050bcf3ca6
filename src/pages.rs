//! Page generation and the blocking-fallback page cache.

use crate::error::PageResult;
use crate::query::QueryClient;
use crate::slug::{ParamValue, RouteParams, SLUG_PARAM, single_param};
use crate::state::registry::Registry;
use std::sync::Arc;
use std::time::Instant;

mod cache;
pub mod components;
pub mod post_view;
pub mod profile;
pub mod ssg;

pub use cache::{CachedPage, Fallback, PageCache, StaticPaths};
pub use profile::{PageProps, PageStatus, RenderedPage, get_static_paths, get_static_props, render_profile_page};
pub use ssg::ServerSideHelpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServedPage {
    pub status: PageStatus,
    pub html: Arc<str>,
    pub cache: CacheStatus,
}

/// Generates one profile page from scratch: props first, then the render.
pub async fn generate(registry: &Registry, params: &RouteParams) -> PageResult<RenderedPage> {
    let started = Instant::now();

    let helpers = ServerSideHelpers::new(registry.router, registry.anonymous_ctx());
    let props = get_static_props(&helpers, params).await?;

    let client = QueryClient::new(Arc::new(registry.local_link()));
    let page = render_profile_page(&props, &client, &registry.config.base_url).await?;

    tracing::info!(
        username = %props.username,
        status = ?page.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated profile page"
    );

    Ok(page)
}

/// Serves `/{slug}`: from cache when it has been generated before, otherwise
/// generated on the spot and cached, whatever its status. Failures are not
/// cached.
pub async fn serve_profile(registry: &Registry, slug: &str) -> PageResult<ServedPage> {
    let path = format!("/{slug}");

    if let Some(hit) = registry.pages.get(&path).await {
        tracing::debug!(%path, generated_at = %hit.generated_at, "page cache hit");
        return Ok(ServedPage {
            status: hit.status,
            html: hit.html,
            cache: CacheStatus::Hit,
        });
    }

    let page = generate(registry, &single_param(slug)).await?;
    let cached = registry.pages.insert(&path, page.status, page.html).await;

    Ok(ServedPage {
        status: cached.status,
        html: cached.html,
        cache: CacheStatus::Miss,
    })
}

/// Builds every pre-declared path into the cache. Returns how many were stored.
pub async fn prebuild(registry: &Registry) -> PageResult<usize> {
    let mut built = 0;
    for params in get_static_paths().paths {
        let Some(ParamValue::One(slug)) = params.get(SLUG_PARAM) else {
            continue;
        };
        let page = generate(registry, &params).await?;
        registry.pages.insert(&format!("/{slug}"), page.status, page.html).await;
        built += 1;
    }

    tracing::info!(built, "prebuilt profile pages");
    Ok(built)
}
