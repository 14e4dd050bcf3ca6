use crate::db::repo::{PostRepo, ProfileRepo};
use crate::models::post::FullPost;
use crate::models::profile::UserProfile;
use crate::models::types::ProfileId;
use crate::services::{ServiceError, ServiceResult};
use std::collections::HashMap;
use std::sync::Arc;

pub struct PostService {
    post_repo: Arc<dyn PostRepo>,
    profile_repo: Arc<dyn ProfileRepo>,
    feed_limit: i64,
}

impl PostService {
    pub fn new(post_repo: Arc<dyn PostRepo>, profile_repo: Arc<dyn ProfileRepo>, feed_limit: i64) -> Self {
        Self {
            post_repo,
            profile_repo,
            feed_limit,
        }
    }

    /// Newest posts of a single author, each paired with the author's profile.
    pub async fn by_author(&self, author_id: &ProfileId) -> ServiceResult<Vec<FullPost>> {
        let posts = self.post_repo.by_author(author_id, self.feed_limit).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<ProfileId> = posts.iter().map(|p| p.author_id.clone()).collect();
        author_ids.sort();
        author_ids.dedup();

        let authors: HashMap<ProfileId, UserProfile> = self
            .profile_repo
            .get_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let Some(author) = authors.get(&post.author_id) else {
                    tracing::warn!(post_id = %post.id, author_id = %post.author_id, "post without author");
                    return Err(ServiceError::AuthorNotFound(post.id));
                };
                Ok(FullPost {
                    author: author.clone(),
                    post,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repo::MemoryStore;
    use crate::models::post::Post;
    use crate::models::types::PostId;
    use chrono::{Duration, Utc};

    fn store_with_posts(n: usize) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert_profile(UserProfile {
            id: ProfileId::from("u1"),
            username: Some("alice".into()),
            profile_image_url: "https://x/a.png".into(),
        });
        let now = Utc::now();
        for i in 0..n {
            store.insert_post(Post {
                id: PostId::new(format!("p{i}")),
                author_id: ProfileId::from("u1"),
                content: format!("hello {i}"),
                created_at: now - Duration::minutes(i as i64),
            });
        }
        store
    }

    #[tokio::test]
    async fn attaches_author_to_every_post() {
        let store = store_with_posts(3);
        let svc = PostService::new(store.clone(), store, 100);

        let feed = svc.by_author(&ProfileId::from("u1")).await.unwrap();
        assert_eq!(feed.len(), 3);
        assert!(feed.iter().all(|fp| fp.author.username.as_deref() == Some("alice")));
        assert_eq!(feed[0].post.id.as_str(), "p0");
    }

    #[tokio::test]
    async fn feed_is_capped_by_limit() {
        let store = store_with_posts(5);
        let svc = PostService::new(store.clone(), store, 2);

        let feed = svc.by_author(&ProfileId::from("u1")).await.unwrap();
        assert_eq!(feed.len(), 2);
    }

    #[tokio::test]
    async fn missing_author_fails_the_whole_feed() {
        let store = Arc::new(MemoryStore::new());
        store.insert_post(Post {
            id: PostId::from("orphan"),
            author_id: ProfileId::from("ghost"),
            content: "boo".into(),
            created_at: Utc::now(),
        });
        let svc = PostService::new(store.clone(), store, 100);

        let err = svc.by_author(&ProfileId::from("ghost")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AuthorNotFound(id) if id.as_str() == "orphan"));
    }
}
