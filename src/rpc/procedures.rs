//! Procedure definitions: input schemas, output types and handlers.

use crate::models::post::FullPost;
use crate::models::profile::UserProfile;
use crate::models::types::ProfileId;
use crate::rpc::{Procedure, QueryCtx, RpcResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Type-level description of a query procedure, shared by the router and the
/// query client so both sides agree on input and output shapes.
pub trait QueryProcedure {
    const PROCEDURE: Procedure;
    type Input: Serialize + DeserializeOwned + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameInput {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdInput {
    pub user_id: ProfileId,
}

/// `profile.getUserByUsername`
pub struct GetUserByUsername;

impl QueryProcedure for GetUserByUsername {
    const PROCEDURE: Procedure = Procedure::ProfileGetUserByUsername;
    type Input = UsernameInput;
    type Output = Option<UserProfile>;
}

/// `posts.getPostsByUserId`
pub struct GetPostsByUserId;

impl QueryProcedure for GetPostsByUserId {
    const PROCEDURE: Procedure = Procedure::PostsGetPostsByUserId;
    type Input = UserIdInput;
    type Output = Vec<FullPost>;
}

pub(super) async fn get_user_by_username(ctx: &QueryCtx, input: UsernameInput) -> RpcResult<Option<UserProfile>> {
    Ok(ctx.services.profile.get_by_username(&input.username).await?)
}

pub(super) async fn get_posts_by_user_id(ctx: &QueryCtx, input: UserIdInput) -> RpcResult<Vec<FullPost>> {
    Ok(ctx.services.post.by_author(&input.user_id).await?)
}
