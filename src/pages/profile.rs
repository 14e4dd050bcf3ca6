//! The `/@username` profile page: props generation and views.

use crate::error::PageResult;
use crate::models::post::FullPost;
use crate::models::profile::UserProfile;
use crate::models::types::ProfileId;
use crate::pages::components::{loading_page, loading_spinner, not_found, page_layout, page_shell};
use crate::pages::post_view::post_view;
use crate::pages::ssg::ServerSideHelpers;
use crate::pages::{Fallback, StaticPaths};
use crate::query::{DehydratedState, QueryClient, QueryState, transformer};
use crate::rpc::{GetPostsByUserId, GetUserByUsername, RpcError, UserIdInput, UsernameInput};
use crate::slug::{RouteParams, Username, profile_path, resolve_username};
use chrono::Utc;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// Payload handed from generation to rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub trpc_state: DehydratedState,
    pub username: Username,
}

/// No profile is built ahead of time; each one is generated on first request.
pub fn get_static_paths() -> StaticPaths {
    StaticPaths {
        paths: Vec::new(),
        fallback: Fallback::Blocking,
    }
}

/// Resolves the slug and prefetches the profile so the first render needs no
/// round trip. Posts are left for the feed to fetch.
pub async fn get_static_props(helpers: &ServerSideHelpers, params: &RouteParams) -> PageResult<PageProps> {
    let username = resolve_username(params)?;

    helpers
        .prefetch::<GetUserByUsername>(&UsernameInput {
            username: username.as_str().to_string(),
        })
        .await?;

    Ok(PageProps {
        trpc_state: helpers.dehydrate(),
        username,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Loading,
    NotFound,
    Found(UserProfile),
}

impl ProfileState {
    pub fn from_query(q: QueryState<Option<UserProfile>>) -> Result<Self, RpcError> {
        match q {
            QueryState::Loading => Ok(ProfileState::Loading),
            QueryState::Error(e) => Err(e),
            QueryState::Success(Some(p)) if p.handle().is_some() => Ok(ProfileState::Found(p)),
            QueryState::Success(_) => Ok(ProfileState::NotFound),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Loading,
    Empty,
    Posts(Vec<FullPost>),
}

impl FeedState {
    pub fn from_query(q: QueryState<Vec<FullPost>>) -> Result<Self, RpcError> {
        match q {
            QueryState::Loading => Ok(FeedState::Loading),
            QueryState::Error(e) => Err(e),
            QueryState::Success(posts) if posts.is_empty() => Ok(FeedState::Empty),
            QueryState::Success(posts) => Ok(FeedState::Posts(posts)),
        }
    }
}

/// Hydrates `client` from the props and renders the whole page.
///
/// The profile comes out of the hydrated cache when it was prefetched; the
/// feed is always fetched through the client's link, and only after the
/// profile has resolved. Found pages link to `{base_url}/@{username}` as
/// their canonical URL.
pub async fn render_profile_page(
    props: &PageProps,
    client: &QueryClient,
    base_url: &str,
) -> PageResult<RenderedPage> {
    client.hydrate(props.trpc_state.clone());

    let input = UsernameInput {
        username: props.username.as_str().to_string(),
    };

    let mut profile = ProfileState::from_query(client.peek::<GetUserByUsername>(&input))?;
    if matches!(profile, ProfileState::Loading) {
        tracing::debug!(username = %props.username, "profile not prefetched, fetching");
        profile = ProfileState::from_query(client.query::<GetUserByUsername>(&input).await)?;
    }

    let feed = match &profile {
        ProfileState::Found(p) => Some(load_feed(client, &p.id).await?),
        _ => None,
    };

    let props_json = transformer::to_embedded_json(props)?;

    let (status, title, canonical) = match &profile {
        ProfileState::Found(p) => {
            let handle = p.handle().unwrap_or_default();
            (
                PageStatus::Found,
                format!("{handle}'s Profile"),
                Some(format!("{}{}", base_url.trim_end_matches('/'), profile_path(handle))),
            )
        }
        _ => (PageStatus::NotFound, "Profile".to_string(), None),
    };

    let body = profile_view(&profile, feed.as_ref());
    let html = page_shell(&title, canonical.as_deref(), body, Some(&props_json)).into_string();

    Ok(RenderedPage { status, html })
}

pub async fn load_feed(client: &QueryClient, user_id: &ProfileId) -> Result<FeedState, RpcError> {
    let input = UserIdInput {
        user_id: user_id.clone(),
    };
    FeedState::from_query(client.query::<GetPostsByUserId>(&input).await)
}

pub fn profile_view(state: &ProfileState, feed: Option<&FeedState>) -> Markup {
    match state {
        ProfileState::Loading => loading_page(),
        ProfileState::NotFound => not_found(),
        ProfileState::Found(profile) => {
            let handle = profile.handle().unwrap_or_default();
            page_layout(html! {
                div class="profile-banner" {
                    img class="profile-avatar" src=(profile.profile_image_url)
                        alt="Profile Picture" width="148" height="148";
                }
                div class="profile-spacer" {}
                h1 class="profile-handle" { "@" (handle) }
                div class="divider" {}
                (profile_feed(feed.unwrap_or(&FeedState::Loading)))
            })
        }
    }
}

pub fn profile_feed(state: &FeedState) -> Markup {
    match state {
        FeedState::Loading => loading_spinner(),
        FeedState::Empty => html! { div class="empty" { "No posts!" } },
        FeedState::Posts(posts) => {
            let now = Utc::now();
            html! {
                div class="feed" {
                    @for full in posts {
                        (post_view(full, now))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::Post;
    use crate::models::types::PostId;

    fn profile(username: Option<&str>) -> UserProfile {
        UserProfile {
            id: ProfileId::from("u1"),
            username: username.map(str::to_string),
            profile_image_url: "https://x/a.png".into(),
        }
    }

    fn full_post(id: &str) -> FullPost {
        FullPost {
            post: Post {
                id: PostId::from(id),
                author_id: ProfileId::from("u1"),
                content: format!("content of {id}"),
                created_at: Utc::now(),
            },
            author: profile(Some("alice")),
        }
    }

    #[test]
    fn missing_profile_is_not_found() {
        assert_eq!(ProfileState::from_query(QueryState::Success(None)), Ok(ProfileState::NotFound));
    }

    #[test]
    fn profile_without_username_is_not_found() {
        assert_eq!(
            ProfileState::from_query(QueryState::Success(Some(profile(Some(""))))),
            Ok(ProfileState::NotFound)
        );
        assert_eq!(
            ProfileState::from_query(QueryState::Success(Some(profile(None)))),
            Ok(ProfileState::NotFound)
        );
    }

    #[test]
    fn pending_profile_is_loading() {
        assert_eq!(ProfileState::from_query(QueryState::Loading), Ok(ProfileState::Loading));
    }

    #[test]
    fn failed_profile_query_propagates() {
        let err = ProfileState::from_query(QueryState::Error(RpcError::internal("down"))).unwrap_err();
        assert_eq!(err.message, "down");
    }

    #[test]
    fn not_found_renders_placeholder() {
        let html = profile_view(&ProfileState::NotFound, None).into_string();
        assert_eq!(html, "<div>404</div>");
    }

    #[test]
    fn empty_feed_renders_only_the_message() {
        let html = profile_feed(&FeedState::Empty).into_string();
        assert!(html.contains("No posts!"));
        assert!(!html.contains("data-key"));
    }

    #[test]
    fn feed_keeps_query_order_and_keys() {
        let posts = vec![full_post("p2"), full_post("p9"), full_post("p1")];
        let html = profile_feed(&FeedState::Posts(posts)).into_string();

        assert_eq!(html.matches("class=\"post\"").count(), 3);
        let at = |k: &str| html.find(&format!("data-key=\"{k}\"")).unwrap();
        assert!(at("p2") < at("p9"));
        assert!(at("p9") < at("p1"));
    }

    #[test]
    fn found_profile_renders_header_and_feed() {
        let html = profile_view(
            &ProfileState::Found(profile(Some("alice"))),
            Some(&FeedState::Posts(vec![full_post("p1")])),
        )
        .into_string();

        assert!(html.contains("@alice"));
        assert!(html.contains("src=\"https://x/a.png\""));
        assert!(html.contains("data-key=\"p1\""));
    }

    #[test]
    fn found_profile_without_feed_yet_shows_spinner() {
        let html = profile_view(&ProfileState::Found(profile(Some("alice"))), None).into_string();
        assert!(html.contains("class=\"spinner\""));
    }

    #[test]
    fn nothing_is_prebuilt() {
        let paths = get_static_paths();
        assert!(paths.paths.is_empty());
        assert_eq!(paths.fallback, Fallback::Blocking);
    }
}
