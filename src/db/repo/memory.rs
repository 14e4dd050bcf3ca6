use crate::db::DbResult;
use crate::db::error::DbError;
use crate::db::repo::{PostRepo, ProfileRepo};
use crate::models::post::Post;
use crate::models::profile::UserProfile;
use crate::models::types::ProfileId;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Ephemeral store backing both repositories. Used for fixtures and tests.
#[derive(Default)]
pub struct MemoryStore {
    profiles: DashMap<ProfileId, UserProfile>,
    posts: DashMap<ProfileId, Vec<Post>>,
    unavailable: AtomicBool,
}

/// On-disk shape of a fixture file.
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        let store = Self::new();
        for p in fixture.profiles {
            store.insert_profile(p);
        }
        for p in fixture.posts {
            store.insert_post(p);
        }
        store
    }

    pub fn insert_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.id.clone(), profile);
    }

    pub fn insert_post(&self, post: Post) {
        self.posts.entry(post.author_id.clone()).or_default().push(post);
    }

    /// Makes every subsequent call fail, as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepo for MemoryStore {
    async fn get_by_username(&self, username: &str) -> DbResult<Option<UserProfile>> {
        self.check()?;
        Ok(self
            .profiles
            .iter()
            .find(|p| p.username.as_deref() == Some(username))
            .map(|p| p.value().clone()))
    }

    async fn get_by_ids(&self, ids: &[ProfileId]) -> DbResult<Vec<UserProfile>> {
        self.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.profiles.get(id).map(|p| p.value().clone()))
            .collect())
    }
}

#[async_trait]
impl PostRepo for MemoryStore {
    async fn by_author(&self, author_id: &ProfileId, limit: i64) -> DbResult<Vec<Post>> {
        self.check()?;
        let mut posts = self.posts.get(author_id).map(|p| p.value().clone()).unwrap_or_default();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        posts.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(posts)
    }
}
