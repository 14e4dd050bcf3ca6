use crate::db::repo::ProfileRepo;
use crate::db::{Db, DbResult, map_row_opt, map_rows};
use crate::models::profile::UserProfile;
use crate::models::types::ProfileId;
use std::sync::Arc;

pub struct ProfileRepository {
    db: Arc<Db>,
}

impl ProfileRepository {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ProfileRepo for ProfileRepository {
    async fn get_by_username(&self, username: &str) -> DbResult<Option<UserProfile>> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached("SELECT id, username, profile_image_url FROM profiles WHERE username = $1")
            .await?;

        let row_opt = client.query_opt(&stmt, &[&username]).await?;
        map_row_opt(
            row_opt,
            UserProfile::try_from_row,
            &format!("ProfileRepo::get_by_username username={}", username),
        )
    }

    async fn get_by_ids(&self, ids: &[ProfileId]) -> DbResult<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let client = self.db.get_client().await?;
        let ids: Vec<&str> = ids.iter().map(ProfileId::as_str).collect();

        let stmt = client
            .prepare_cached("SELECT id, username, profile_image_url FROM profiles WHERE id = ANY($1)")
            .await?;

        let rows = client.query(&stmt, &[&ids]).await?;
        map_rows(&rows, UserProfile::try_from_row, "ProfileRepo::get_by_ids")
    }
}
