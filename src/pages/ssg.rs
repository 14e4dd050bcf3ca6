use crate::query::{DehydratedState, QueryClient};
use crate::rpc::{AppRouter, LocalLink, QueryCtx, QueryProcedure, RpcLink, RpcResult};
use std::sync::Arc;

/// Query client used during page generation. Calls go straight into the
/// router; the filled cache is dehydrated into the page props.
pub struct ServerSideHelpers {
    client: QueryClient,
}

impl ServerSideHelpers {
    pub fn new(router: AppRouter, ctx: QueryCtx) -> Self {
        Self::with_link(Arc::new(LocalLink::new(router, ctx)))
    }

    /// Generation against a procedure server that lives elsewhere.
    pub fn with_link(link: Arc<dyn RpcLink>) -> Self {
        Self {
            client: QueryClient::new(link),
        }
    }

    pub async fn prefetch<Q: QueryProcedure>(&self, input: &Q::Input) -> RpcResult<()> {
        self.client.prefetch::<Q>(input).await
    }

    pub fn dehydrate(&self) -> DehydratedState {
        self.client.dehydrate()
    }
}
