use crate::db::error::DbError;
use crate::rpc::RpcError;
use crate::slug::RouteError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};
use thiserror::Error;

pub type PageResult<T> = Result<T, PageError>;

/// Everything that can fail the generation of a page.
#[derive(Debug, Error)]
pub enum PageError {
    /// Slug missing or multi-valued
    #[error("invalid route parameter: {0}")]
    InvalidRouteParameter(#[from] RouteError),

    /// A procedure call failed (data store down, bad output, ...)
    #[error("upstream failure: {0}")]
    Upstream(#[from] RpcError),

    #[error("cannot encode page props: {0}")]
    Props(#[from] serde_json::Error),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::InvalidRouteParameter(_) => StatusCode::BAD_REQUEST,
            PageError::Upstream(_) | PageError::Props(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (title, message) = match &self {
            PageError::InvalidRouteParameter(e) => ("Bad Request", e.to_string()),
            PageError::Upstream(e) => {
                tracing::error!(error = %e, "page generation failed upstream");
                (
                    "Something went wrong",
                    "The page could not be generated. Please try again later.".to_string(),
                )
            }
            PageError::Props(e) => {
                tracing::error!(error = %e, "page props encoding failed");
                ("Something went wrong", "The page could not be generated.".to_string())
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Home" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid configuration: {0}")]
    Env(#[source] ConfigErrorKind),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_errors_are_client_errors() {
        let err = PageError::from(RouteError::Missing("slug"));
        assert_eq!(err.to_string(), "invalid route parameter: route parameter `slug` is missing");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_errors_are_server_errors() {
        let err = PageError::from(RpcError::internal("db down"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
