use crate::db::DbResult;
use crate::models::profile::UserProfile;
use crate::models::types::{PostId, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    /// Profile that wrote the post
    pub author_id: ProfileId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn try_from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            author_id: row.try_get("author_id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A post joined with its author, the element type of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullPost {
    pub post: Post,
    pub author: UserProfile,
}
