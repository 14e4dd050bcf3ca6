use crate::db::repo::PostRepo;
use crate::db::{Db, DbResult, map_rows};
use crate::models::post::Post;
use crate::models::types::ProfileId;
use std::sync::Arc;

pub struct PostRepository {
    db: Arc<Db>,
}

impl PostRepository {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl PostRepo for PostRepository {
    async fn by_author(&self, author_id: &ProfileId, limit: i64) -> DbResult<Vec<Post>> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached(
                r#"
                SELECT id, author_id, content, created_at FROM posts
                WHERE author_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .await?;

        let rows = client.query(&stmt, &[&author_id.as_str(), &limit]).await?;
        map_rows(
            &rows,
            Post::try_from_row,
            &format!("PostRepo::by_author author_id={}", author_id),
        )
    }
}
