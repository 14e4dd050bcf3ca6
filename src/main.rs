use chirp::{Registry, config, db, net::http, pages};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chirp::init_tracing("info")?;

    let cfg = Arc::new(config::Config::from_env()?);

    let db = Arc::new(db::Db::new(&cfg.database_url, cfg.db_pool_size)?);
    db.init().await?;

    let registry = Arc::new(Registry::new(db, cfg.clone()));

    pages::prebuild(&registry).await?;

    let addr: SocketAddr = cfg.http_addr.parse()?;
    tracing::info!(%addr, "chirp profile pages listening");
    if let Err(e) = http::serve(addr, registry).await {
        tracing::error!(error = %e, "http server failed");
        return Err(e.into());
    }

    Ok(())
}
