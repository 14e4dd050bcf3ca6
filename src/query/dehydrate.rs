use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializable snapshot of a query cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DehydratedState {
    pub queries: Vec<DehydratedQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DehydratedQuery {
    pub query_key: DehydratedKey,
    pub state: DehydratedQueryState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DehydratedKey {
    pub path: String,
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DehydratedQueryState {
    pub data: Value,
    /// Unix epoch milliseconds
    pub data_updated_at: i64,
}

impl DehydratedState {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }
}
