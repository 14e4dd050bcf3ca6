//! Typed query procedures and the router that dispatches them.
//!
//! Procedures are addressed by a dotted path (`profile.getUserByUsername`)
//! and take a JSON input that is validated against the procedure's input
//! schema before the handler runs.

use crate::models::types::ProfileId;
use crate::query::transformer;
use crate::state::registry::Services;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

mod error;
mod link;
pub mod procedures;

pub use error::{RpcError, RpcErrorCode, RpcResult};
pub use link::{HttpLink, LocalLink, RpcLink, RpcResponse};
pub use procedures::{GetPostsByUserId, GetUserByUsername, QueryProcedure, UserIdInput, UsernameInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    ProfileGetUserByUsername,
    PostsGetPostsByUserId,
}

impl Procedure {
    pub const ALL: [Procedure; 2] = [Procedure::ProfileGetUserByUsername, Procedure::PostsGetPostsByUserId];

    pub fn path(self) -> &'static str {
        match self {
            Procedure::ProfileGetUserByUsername => "profile.getUserByUsername",
            Procedure::PostsGetPostsByUserId => "posts.getPostsByUserId",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }
}

impl std::fmt::Display for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Per-call context handed to every procedure.
#[derive(Clone)]
pub struct QueryCtx {
    pub services: Arc<Services>,
    /// Authenticated caller, if any. Page generation always runs anonymous.
    pub user_id: Option<ProfileId>,
}

impl QueryCtx {
    pub fn anonymous(services: Arc<Services>) -> Self {
        Self { services, user_id: None }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AppRouter;

impl AppRouter {
    pub async fn call(&self, ctx: &QueryCtx, path: &str, input: Value) -> RpcResult<Value> {
        let Some(procedure) = Procedure::from_path(path) else {
            return Err(RpcError::not_found(format!("no procedure on path \"{path}\"")));
        };

        tracing::debug!(%procedure, "dispatching procedure");

        match procedure {
            Procedure::ProfileGetUserByUsername => {
                let out = procedures::get_user_by_username(ctx, parse_input(procedure, input)?).await?;
                encode_output(procedure, &out)
            }
            Procedure::PostsGetPostsByUserId => {
                let out = procedures::get_posts_by_user_id(ctx, parse_input(procedure, input)?).await?;
                encode_output(procedure, &out)
            }
        }
    }
}

fn parse_input<T: DeserializeOwned>(procedure: Procedure, input: Value) -> RpcResult<T> {
    transformer::deserialize(input).map_err(|e| RpcError::bad_request(format!("invalid input for {procedure}: {e}")))
}

fn encode_output<T: serde::Serialize>(procedure: Procedure, out: &T) -> RpcResult<Value> {
    transformer::serialize(out).map_err(|e| RpcError::internal(format!("cannot encode output of {procedure}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repo::MemoryStore;
    use crate::models::profile::UserProfile;
    use serde_json::json;

    fn ctx() -> QueryCtx {
        let store = Arc::new(MemoryStore::new());
        store.insert_profile(UserProfile {
            id: ProfileId::from("u1"),
            username: Some("alice".into()),
            profile_image_url: "https://x/a.png".into(),
        });
        QueryCtx::anonymous(Arc::new(Services::new(store.clone(), store, 100)))
    }

    #[test]
    fn procedure_paths_round_trip() {
        for p in Procedure::ALL {
            assert_eq!(Procedure::from_path(p.path()), Some(p));
        }
        assert_eq!(Procedure::from_path("profile.nope"), None);
    }

    #[tokio::test]
    async fn dispatches_profile_lookup() {
        let out = AppRouter
            .call(&ctx(), "profile.getUserByUsername", json!({"username": "alice"}))
            .await
            .unwrap();
        assert_eq!(out["id"], "u1");
        assert_eq!(out["profileImageUrl"], "https://x/a.png");
    }

    #[tokio::test]
    async fn unknown_username_is_null() {
        let out = AppRouter
            .call(&ctx(), "profile.getUserByUsername", json!({"username": "bob"}))
            .await
            .unwrap();
        assert!(out.is_null());
    }

    #[tokio::test]
    async fn malformed_input_is_bad_request() {
        let err = AppRouter
            .call(&ctx(), "posts.getPostsByUserId", json!({"username": 3}))
            .await
            .unwrap_err();
        assert_eq!(err.code, RpcErrorCode::BadRequest);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let err = AppRouter.call(&ctx(), "posts.create", json!({})).await.unwrap_err();
        assert_eq!(err.code, RpcErrorCode::NotFound);
    }
}
