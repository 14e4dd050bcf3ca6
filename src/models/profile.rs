use crate::db::DbResult;
use crate::models::types::ProfileId;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Public view of an account, as the posting app shows it to other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Internal identifier (stable across username changes)
    pub id: ProfileId,
    /// Handle shown as `@username`. `None` for deleted or half-created accounts.
    pub username: Option<String>,
    /// Avatar URL
    pub profile_image_url: String,
}

impl UserProfile {
    pub fn try_from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            profile_image_url: row.try_get("profile_image_url")?,
        })
    }

    /// Username, if the account still has a non-empty one.
    pub fn handle(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}
