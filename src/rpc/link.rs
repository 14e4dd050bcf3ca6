use crate::rpc::{AppRouter, QueryCtx, RpcError, RpcResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Transport a query client uses to reach the procedures.
#[async_trait]
pub trait RpcLink: Send + Sync {
    async fn call(&self, path: &str, input: Value) -> RpcResult<Value>;
}

/// Calls the router in-process.
#[derive(Clone)]
pub struct LocalLink {
    router: AppRouter,
    ctx: QueryCtx,
}

impl LocalLink {
    pub fn new(router: AppRouter, ctx: QueryCtx) -> Self {
        Self { router, ctx }
    }
}

#[async_trait]
impl RpcLink for LocalLink {
    async fn call(&self, path: &str, input: Value) -> RpcResult<Value> {
        self.router.call(&self.ctx, path, input).await
    }
}

/// Body returned by the `/api/rpc/{procedure}` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcResponse {
    Ok { result: RpcData },
    Err { error: RpcError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcData {
    pub data: Value,
}

impl From<RpcResult<Value>> for RpcResponse {
    fn from(r: RpcResult<Value>) -> Self {
        match r {
            Ok(data) => RpcResponse::Ok {
                result: RpcData { data },
            },
            Err(error) => RpcResponse::Err { error },
        }
    }
}

impl From<RpcResponse> for RpcResult<Value> {
    fn from(r: RpcResponse) -> Self {
        match r {
            RpcResponse::Ok { result } => Ok(result.data),
            RpcResponse::Err { error } => Err(error),
        }
    }
}

/// Calls a remote server over HTTP.
#[derive(Clone)]
pub struct HttpLink {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLink {
    pub fn new(base_url: &str) -> RpcResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| RpcError::internal(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RpcLink for HttpLink {
    async fn call(&self, path: &str, input: Value) -> RpcResult<Value> {
        let url = format!("{}/api/rpc/{path}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("input", input.to_string())])
            .send()
            .await
            .map_err(|e| RpcError::internal(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        let body: RpcResponse = resp
            .json()
            .await
            .map_err(|e| RpcError::internal(format!("unreadable response from {url} ({status}): {e}")))?;

        body.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::RpcErrorCode;
    use serde_json::json;

    #[test]
    fn response_envelope_shapes() {
        let ok = RpcResponse::from(Ok::<_, RpcError>(json!({"id": "u1"})));
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"result": {"data": {"id": "u1"}}}));

        let err = RpcResponse::from(Err::<Value, _>(RpcError::bad_request("nope")));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"error": {"code": "BAD_REQUEST", "message": "nope"}})
        );
    }

    #[test]
    fn null_data_parses_as_success() {
        let parsed: RpcResponse = serde_json::from_value(json!({"result": {"data": null}})).unwrap();
        let r: RpcResult<Value> = parsed.into();
        assert_eq!(r, Ok(Value::Null));

        let parsed: RpcResponse =
            serde_json::from_value(json!({"error": {"code": "NOT_FOUND", "message": "x"}})).unwrap();
        let r: RpcResult<Value> = parsed.into();
        assert_eq!(r.unwrap_err().code, RpcErrorCode::NotFound);
    }
}
