use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use clicktrack_core::config::Config;
use clicktrack_duckdb::DuckDbBackend;
use clicktrack_server::state::AppState;

/// `clicktrack health`: liveness probe for container health checks.
///
/// Calls `GET http://localhost:$CLICKTRACK_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("CLICKTRACK_PORT").unwrap_or_else(|_| "8000".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

fn open_database(cfg: &Config) -> Result<DuckDbBackend> {
    std::fs::create_dir_all(&cfg.data_dir)?;
    DuckDbBackend::open(&cfg.database_path(), &cfg.duckdb_memory_limit)
}

/// `clicktrack seed`: fill the configured database with demo data.
async fn run_seed(cfg: &Config) -> Result<()> {
    let db = open_database(cfg)?;
    let mut rng = StdRng::from_entropy();
    let summary = clicktrack_server::seed::seed_demo_data(&db, &mut rng).await?;
    info!(
        offers = summary.offers,
        campaigns = summary.campaigns,
        events = summary.events,
        "Demo data inserted; open {} to browse it",
        cfg.base_url
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str());

    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    if command == Some("health") {
        run_health_check();
    }

    let cfg = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Initialise structured JSON logging. Level controlled via RUST_LOG env var.
    let default_level = if cfg.debug { "clicktrack=debug" } else { "clicktrack=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.parse()?),
        )
        .json()
        .init();

    match command {
        None | Some("serve") => {}
        Some("seed") => return run_seed(&cfg).await,
        Some(other) => anyhow::bail!("unknown command {other:?}; expected serve, seed or health"),
    }

    let db = open_database(&cfg)?;
    let state = Arc::new(AppState::new(db, cfg.clone()));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = clicktrack_server::app::build_app(state);

    info!(port = cfg.port, base_url = %cfg.base_url, "Click tracker listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        tokio::signal::ctrl_c().await.ok();
    })
    .await?;

    info!("Shut down");
    Ok(())
}
