use crate::db::DbResult;
use crate::models::profile::UserProfile;
use crate::models::types::ProfileId;

#[async_trait::async_trait]
pub trait ProfileRepo: Send + Sync {
    /// Point lookup on the (unique) username
    async fn get_by_username(&self, username: &str) -> DbResult<Option<UserProfile>>;
    /// Bulk lookup, order of the result is unspecified. Unknown ids are skipped.
    async fn get_by_ids(&self, ids: &[ProfileId]) -> DbResult<Vec<UserProfile>>;
}
