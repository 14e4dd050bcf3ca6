use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Registry;
use crate::error::{InfraError, PageError};
use crate::pages::{PageStatus, serve_profile};
use crate::rpc::{RpcError, RpcResponse};

#[derive(Clone)]
struct HttpAppCtx {
    registry: Arc<Registry>,
}

pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rpc/{procedure}", get(rpc_query))
        .route("/{slug}", get(profile_page))
        .with_state(HttpAppCtx { registry })
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn serve(addr: std::net::SocketAddr, registry: Arc<Registry>) -> Result<(), InfraError> {
    let app = router(registry);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn profile_page(State(state): State<HttpAppCtx>, Path(slug): Path<String>) -> Result<Response, PageError> {
    let page = serve_profile(&state.registry, &slug).await?;

    let status = match page.status {
        PageStatus::Found => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
    };

    let mut resp = (status, page.html.to_string()).into_response();
    let headers = resp.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    headers.insert("x-page-cache", HeaderValue::from_static(page.cache.as_str()));
    if page.status == PageStatus::Found {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, s-maxage=31536000, stale-while-revalidate"),
        );
    }

    Ok(resp)
}

#[derive(Debug, Deserialize)]
struct RpcQueryParams {
    input: Option<String>,
}

async fn rpc_query(
    State(state): State<HttpAppCtx>,
    Path(procedure): Path<String>,
    Query(params): Query<RpcQueryParams>,
) -> Response {
    let result = match parse_rpc_input(params.input.as_deref()) {
        Ok(input) => {
            state
                .registry
                .router
                .call(&state.registry.anonymous_ctx(), &procedure, input)
                .await
        }
        Err(e) => Err(e),
    };

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(%procedure, code = ?e.code, message = %e.message, "procedure failed");
            StatusCode::from_u16(e.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    (status, Json(RpcResponse::from(result))).into_response()
}

fn parse_rpc_input(raw: Option<&str>) -> Result<Value, RpcError> {
    match raw {
        None => Ok(Value::Null),
        Some(s) => serde_json::from_str(s).map_err(|e| RpcError::bad_request(format!("input is not valid JSON: {e}"))),
    }
}
