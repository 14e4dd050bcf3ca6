use anyhow::Context;
use chirp::Registry;
use chirp::config::Config;
use chirp::db::Db;
use chirp::db::repo::{Fixture, MemoryStore};
use chirp::pages::{PageStatus, ServerSideHelpers, get_static_props, render_profile_page};
use chirp::query::QueryClient;
use chirp::rpc::{HttpLink, RpcLink};
use chirp::slug::single_param;
use chirp::state::registry::Repos;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

// cargo run --bin render-profile -- @alice --fixture demo.json --out alice.html

#[derive(Debug, Parser)]
#[command(name = "render-profile", version, about = "Render a single profile page to HTML")]
struct Args {
    /// Profile slug (eg: "@alice")
    slug: String,

    /// Read settings from a TOML file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the page here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override database URL (if omitted, use env/config)
    #[arg(long, conflicts_with_all = ["remote", "fixture"])]
    database_url: Option<String>,

    /// Fetch through a running server's procedure endpoint (eg: "http://localhost:4001")
    #[arg(long, conflicts_with = "fixture")]
    remote: Option<String>,

    /// Serve data from a JSON fixture with `profiles` and `posts` arrays
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chirp::init_tracing("warn")?;
    let args = Args::parse();

    let cfg = Arc::new(match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    });
    let params = single_param(&args.slug);

    let (helpers, link): (ServerSideHelpers, Arc<dyn RpcLink>) = if let Some(remote) = &args.remote {
        let link: Arc<dyn RpcLink> = Arc::new(HttpLink::new(remote)?);
        (ServerSideHelpers::with_link(link.clone()), link)
    } else {
        let registry = if let Some(path) = &args.fixture {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("cannot read fixture {}", path.display()))?;
            let fixture: Fixture = serde_json::from_str(&raw).context("fixture is not valid")?;
            let store = Arc::new(MemoryStore::from_fixture(fixture));
            Registry::with_repos(
                Repos {
                    profile: store.clone(),
                    post: store,
                },
                cfg.clone(),
            )
        } else {
            let database_url = args.database_url.as_deref().unwrap_or(&cfg.database_url);
            let db = Arc::new(Db::new(database_url, 2)?);
            db.init().await?;
            Registry::new(db, cfg.clone())
        };

        let link: Arc<dyn RpcLink> = Arc::new(registry.local_link());
        (ServerSideHelpers::new(registry.router, registry.anonymous_ctx()), link)
    };

    let props = get_static_props(&helpers, &params).await?;
    let page = render_profile_page(&props, &QueryClient::new(link), &cfg.base_url).await?;

    if page.status == PageStatus::NotFound {
        tracing::warn!(slug = %args.slug, "no such profile, rendered the 404 placeholder");
    }

    match args.out {
        Some(path) => {
            tokio::fs::write(&path, page.html)
                .await
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{}", page.html),
    }

    Ok(())
}
