//! Client-side query cache.
//!
//! Every procedure result is cached under its path and canonical input. The
//! cache can be dehydrated into page props on the server and hydrated again
//! before rendering, so the first read of a prefetched query needs no round
//! trip.

use crate::rpc::{QueryProcedure, RpcError, RpcLink, RpcResult};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

mod dehydrate;
pub mod transformer;

pub use dehydrate::{DehydratedKey, DehydratedQuery, DehydratedQueryState, DehydratedState};

/// Cache key: procedure path + input serialized with sorted object keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub path: String,
    pub input: String,
}

impl QueryKey {
    pub fn new(path: &str, input: &Value) -> Self {
        Self {
            path: path.to_string(),
            input: input.to_string(),
        }
    }

    pub fn for_query<Q: QueryProcedure>(input: &Q::Input) -> RpcResult<(Self, Value)> {
        let input = transformer::serialize(input).map_err(|e| RpcError::bad_request(e.to_string()))?;
        Ok((Self::new(Q::PROCEDURE.path(), &input), input))
    }
}

#[derive(Debug, Clone)]
struct CachedQuery {
    input: Value,
    data: Value,
    updated_at: DateTime<Utc>,
}

/// Observable state of a single query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// No data yet
    Loading,
    Success(T),
    Error(RpcError),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<RpcResult<T>> for QueryState<T> {
    fn from(r: RpcResult<T>) -> Self {
        match r {
            Ok(v) => QueryState::Success(v),
            Err(e) => QueryState::Error(e),
        }
    }
}

pub struct QueryClient {
    link: Arc<dyn RpcLink>,
    cache: DashMap<QueryKey, CachedQuery>,
}

impl QueryClient {
    pub fn new(link: Arc<dyn RpcLink>) -> Self {
        Self {
            link,
            cache: DashMap::new(),
        }
    }

    /// Returns the cached value for the query, or fetches and caches it.
    /// Errors are returned to the caller and never cached.
    pub async fn fetch<Q: QueryProcedure>(&self, input: &Q::Input) -> RpcResult<Q::Output> {
        let (key, input) = QueryKey::for_query::<Q>(input)?;

        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(path = %key.path, "query cache hit");
            return decode_output::<Q>(hit.data.clone());
        }

        tracing::debug!(path = %key.path, input = %key.input, "query cache miss");
        let data = self.link.call(&key.path, input.clone()).await?;
        let out = decode_output::<Q>(data.clone())?;

        self.cache.insert(
            key,
            CachedQuery {
                input,
                data,
                updated_at: Utc::now(),
            },
        );

        Ok(out)
    }

    /// Warms the cache for the query.
    pub async fn prefetch<Q: QueryProcedure>(&self, input: &Q::Input) -> RpcResult<()> {
        self.fetch::<Q>(input).await.map(|_| ())
    }

    /// Fetches the query and reports the outcome as a state.
    pub async fn query<Q: QueryProcedure>(&self, input: &Q::Input) -> QueryState<Q::Output> {
        self.fetch::<Q>(input).await.into()
    }

    /// Reads the cache only; `Loading` when nothing is cached yet.
    pub fn peek<Q: QueryProcedure>(&self, input: &Q::Input) -> QueryState<Q::Output> {
        let key = match QueryKey::for_query::<Q>(input) {
            Ok((key, _)) => key,
            Err(e) => return QueryState::Error(e),
        };

        match self.cache.get(&key) {
            Some(hit) => decode_output::<Q>(hit.data.clone()).into(),
            None => QueryState::Loading,
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Snapshot of every cached query, ordered by path then input.
    pub fn dehydrate(&self) -> DehydratedState {
        let mut queries: Vec<DehydratedQuery> = self
            .cache
            .iter()
            .map(|entry| DehydratedQuery {
                query_key: DehydratedKey {
                    path: entry.key().path.clone(),
                    input: entry.value().input.clone(),
                },
                state: DehydratedQueryState {
                    data: entry.value().data.clone(),
                    data_updated_at: entry.value().updated_at.timestamp_millis(),
                },
            })
            .collect();

        queries.sort_by(|a, b| {
            a.query_key
                .path
                .cmp(&b.query_key.path)
                .then_with(|| a.query_key.input.to_string().cmp(&b.query_key.input.to_string()))
        });

        DehydratedState { queries }
    }

    /// Seeds the cache from a snapshot. Entries already cached with newer data win.
    pub fn hydrate(&self, state: DehydratedState) {
        for q in state.queries {
            let key = QueryKey::new(&q.query_key.path, &q.query_key.input);
            let incoming = CachedQuery {
                input: q.query_key.input,
                data: q.state.data,
                updated_at: DateTime::from_timestamp_millis(q.state.data_updated_at).unwrap_or_else(Utc::now),
            };

            self.cache
                .entry(key)
                .and_modify(|existing| {
                    if existing.updated_at < incoming.updated_at {
                        *existing = incoming.clone();
                    }
                })
                .or_insert_with(|| incoming.clone());
        }
    }
}

fn decode_output<Q: QueryProcedure>(data: Value) -> RpcResult<Q::Output> {
    transformer::deserialize(data)
        .map_err(|e| RpcError::internal(format!("cannot decode output of {}: {e}", Q::PROCEDURE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{GetUserByUsername, UsernameInput};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every call with the same profile and counts round trips.
    #[derive(Default)]
    struct CountingLink {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RpcLink for CountingLink {
        async fn call(&self, _path: &str, input: Value) -> RpcResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if input["username"] == "broken" {
                return Err(RpcError::internal("boom"));
            }
            Ok(json!({"id": "u1", "username": input["username"], "profileImageUrl": "https://x/a.png"}))
        }
    }

    fn alice() -> UsernameInput {
        UsernameInput {
            username: "alice".into(),
        }
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let link = Arc::new(CountingLink::default());
        let client = QueryClient::new(link.clone());

        client.fetch::<GetUserByUsername>(&alice()).await.unwrap();
        client.fetch::<GetUserByUsername>(&alice()).await.unwrap();

        assert_eq!(link.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let link = Arc::new(CountingLink::default());
        let client = QueryClient::new(link.clone());
        let input = UsernameInput {
            username: "broken".into(),
        };

        assert!(client.fetch::<GetUserByUsername>(&input).await.is_err());
        assert!(client.fetch::<GetUserByUsername>(&input).await.is_err());
        assert_eq!(link.calls.load(Ordering::SeqCst), 2);
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn peek_never_hits_the_link() {
        let link = Arc::new(CountingLink::default());
        let client = QueryClient::new(link.clone());

        assert!(client.peek::<GetUserByUsername>(&alice()).is_loading());
        assert_eq!(link.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hydrated_client_skips_the_round_trip() {
        let server = QueryClient::new(Arc::new(CountingLink::default()));
        server.prefetch::<GetUserByUsername>(&alice()).await.unwrap();
        let state = server.dehydrate();
        assert_eq!(state.len(), 1);

        let link = Arc::new(CountingLink::default());
        let browser = QueryClient::new(link.clone());
        browser.hydrate(state);

        let profile = browser.fetch::<GetUserByUsername>(&alice()).await.unwrap().unwrap();
        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(link.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hydrate_keeps_newer_local_data() {
        let client = QueryClient::new(Arc::new(CountingLink::default()));
        client.prefetch::<GetUserByUsername>(&alice()).await.unwrap();

        let mut stale = client.dehydrate();
        stale.queries[0].state.data = json!(null);
        stale.queries[0].state.data_updated_at = (Utc::now() - chrono::Duration::hours(1)).timestamp_millis();
        client.hydrate(stale);

        assert!(matches!(client.peek::<GetUserByUsername>(&alice()), QueryState::Success(Some(_))));
    }

    #[test]
    fn keys_ignore_object_key_order() {
        let a = QueryKey::new("p", &json!({"a": 1, "b": 2}));
        let b = QueryKey::new("p", &serde_json::from_str::<Value>(r#"{"b":2,"a":1}"#).unwrap());
        assert_eq!(a, b);
    }
}
