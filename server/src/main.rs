//! HTTP server for the MGnify proteins API.
//!
//! Database settings come from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and
//! `DB_PASS` (a `.env` file is honoured). `LISTEN_ADDR` overrides the bind
//! address, `RUST_LOG` the log filter.

use mgnify_proteins_api::{app, AppState, DatabaseSettings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mgnify_proteins_api=info,tower_http=info")),
        )
        .init();

    let settings = DatabaseSettings::from_env()?;
    tracing::info!(host = %settings.host, port = settings.port, database = %settings.name, "connecting");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect_with(settings.connect_options())
        .await?;

    let router = app(AppState::new(pool));
    let addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
