use crate::db::repo::ProfileRepo;
use crate::models::profile::UserProfile;
use crate::services::ServiceResult;
use std::sync::Arc;

pub struct ProfileService {
    repo: Arc<dyn ProfileRepo>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_by_username(&self, username: &str) -> ServiceResult<Option<UserProfile>> {
        let profile = self.repo.get_by_username(username).await?;
        if profile.is_none() {
            tracing::debug!(%username, "no profile for username");
        }
        Ok(profile)
    }
}
