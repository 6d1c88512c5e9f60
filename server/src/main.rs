use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use marketplace_server::config::Config;
use marketplace_server::routes::create_routes;
use marketplace_server::state::AppState;
use marketplace_server::storage::PgOfferingStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Successfully connected to database");

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("Migrations run successfully");

    let state = AppState::new(Arc::new(PgOfferingStore::new(pool)), config.platform_fee_bps);
    let app = create_routes(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        platform_fee_bps = config.platform_fee_bps,
        "Server running at http://{}",
        addr
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
