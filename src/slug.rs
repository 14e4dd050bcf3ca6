//! Route parameters and the `@username` slug.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Name of the dynamic segment in `/{slug}`.
pub const SLUG_PARAM: &str = "slug";

/// Sigil that conventionally prefixes a username in profile URLs.
pub const SIGIL: char = '@';

/// Value of a dynamic route segment. Catch-all segments produce `Many`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

pub type RouteParams = HashMap<String, ParamValue>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route parameter `{0}` is missing")]
    Missing(&'static str),

    #[error("route parameter `{0}` must be a single value")]
    MultiValued(&'static str),
}

/// A username as it appears after the sigil.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the parameter bag for a single-segment route.
pub fn single_param(value: &str) -> RouteParams {
    HashMap::from([(SLUG_PARAM.to_string(), ParamValue::One(value.to_string()))])
}

/// Pulls the username out of the `slug` parameter.
///
/// Only the first `@` is removed, wherever it sits in the slug.
pub fn resolve_username(params: &RouteParams) -> Result<Username, RouteError> {
    match params.get(SLUG_PARAM) {
        None => Err(RouteError::Missing(SLUG_PARAM)),
        Some(ParamValue::Many(_)) => Err(RouteError::MultiValued(SLUG_PARAM)),
        Some(ParamValue::One(slug)) => Ok(Username(slug.replacen(SIGIL, "", 1))),
    }
}

/// Canonical profile path for a username.
pub fn profile_path(username: &str) -> String {
    format!("/{SIGIL}{username}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_sigil() {
        for u in ["alice", "a", "bob_99", "émile"] {
            let got = resolve_username(&single_param(&format!("@{u}"))).unwrap();
            assert_eq!(got.as_str(), u);
        }
    }

    #[test]
    fn sigil_is_optional() {
        assert_eq!(resolve_username(&single_param("alice")).unwrap().as_str(), "alice");
    }

    #[test]
    fn only_the_first_sigil_goes_wherever_it_is() {
        assert_eq!(resolve_username(&single_param("al@ice")).unwrap().as_str(), "alice");
        assert_eq!(resolve_username(&single_param("@al@ice")).unwrap().as_str(), "al@ice");
    }

    #[test]
    fn missing_slug_fails() {
        assert_eq!(resolve_username(&RouteParams::new()), Err(RouteError::Missing("slug")));
    }

    #[test]
    fn multi_valued_slug_fails() {
        let params = HashMap::from([(
            SLUG_PARAM.to_string(),
            ParamValue::Many(vec!["@alice".into(), "@bob".into()]),
        )]);
        assert_eq!(resolve_username(&params), Err(RouteError::MultiValued("slug")));
    }

    #[test]
    fn profile_path_adds_sigil() {
        assert_eq!(profile_path("alice"), "/@alice");
    }
}
