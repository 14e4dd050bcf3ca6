use crate::config::Config;
use crate::db::Db;
use crate::db::repo::{PostRepo, PostRepository, ProfileRepo, ProfileRepository};
use crate::pages::PageCache;
use crate::rpc::{AppRouter, LocalLink, QueryCtx};
use crate::services::{PostService, ProfileService};
use std::sync::Arc;

pub struct Repos {
    pub profile: Arc<dyn ProfileRepo>,
    pub post: Arc<dyn PostRepo>,
}

pub struct Services {
    pub profile: Arc<ProfileService>,
    pub post: Arc<PostService>,
}

impl Services {
    pub fn new(profile_repo: Arc<dyn ProfileRepo>, post_repo: Arc<dyn PostRepo>, feed_limit: i64) -> Self {
        Self {
            profile: Arc::new(ProfileService::new(profile_repo.clone())),
            post: Arc::new(PostService::new(post_repo, profile_repo, feed_limit)),
        }
    }
}

/// Everything a request handler needs, built once at startup.
pub struct Registry {
    pub config: Arc<Config>,
    pub services: Arc<Services>,
    pub router: AppRouter,
    pub pages: PageCache,
}

impl Registry {
    /// Registry backed by PostgreSQL.
    pub fn new(db: Arc<Db>, config: Arc<Config>) -> Self {
        let repos = Repos {
            profile: Arc::new(ProfileRepository::new(db.clone())),
            post: Arc::new(PostRepository::new(db)),
        };
        Self::with_repos(repos, config)
    }

    pub fn with_repos(repos: Repos, config: Arc<Config>) -> Self {
        let services = Arc::new(Services::new(repos.profile.clone(), repos.post.clone(), config.feed_limit));

        Self {
            pages: PageCache::new(config.page_cache_capacity),
            config,
            services,
            router: AppRouter,
        }
    }

    /// Context for calls made on behalf of nobody in particular (page generation, public RPC).
    pub fn anonymous_ctx(&self) -> QueryCtx {
        QueryCtx::anonymous(self.services.clone())
    }

    pub fn local_link(&self) -> LocalLink {
        LocalLink::new(self.router, self.anonymous_ctx())
    }
}
