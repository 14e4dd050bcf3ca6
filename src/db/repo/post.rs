use crate::db::DbResult;
use crate::models::post::Post;
use crate::models::types::ProfileId;

#[async_trait::async_trait]
pub trait PostRepo: Send + Sync {
    /// Posts written by `author_id`, newest first, at most `limit` of them
    async fn by_author(&self, author_id: &ProfileId, limit: i64) -> DbResult<Vec<Post>>;
}
