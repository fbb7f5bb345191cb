use food_api_mock::config::Config;
use food_api_mock::{AppState, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_api_mock=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let seed = config.load_seed()?;
    info!(
        foods = seed.foods.len(),
        favorites = seed.favorites.len(),
        "Seed loaded"
    );

    let app = router(Arc::new(AppState::new(seed)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("food-api-mock listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
