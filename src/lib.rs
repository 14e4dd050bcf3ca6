pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod net;
pub mod pages;
pub mod query;
pub mod rpc;
pub mod services;
pub mod slug;
pub mod state;

// Convenient re-exports (so call sites can do `chirp::Registry`, etc.)
pub use state::registry::Registry;

/// Installs error reports and the tracing subscriber. Shared by all binaries.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().map_err(|e| anyhow::anyhow!("cannot install error hooks: {e}"))?;

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
