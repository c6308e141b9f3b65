use std::sync::Arc;

use anyhow::Context;
use moviehub::{AppState, config::Config, db, store::SqlMovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviehub=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url)
        .await
        .context("connecting to database")?;
    let store = SqlMovieStore::new(db);

    if config.seed_sample_data {
        db::seed_sample_movies(&store).await.context("seeding sample movies")?;
    }

    let state = Arc::new(AppState::new(store));
    let app = moviehub::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
