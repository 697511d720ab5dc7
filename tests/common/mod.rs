use std::time::Duration;

use axum_cart_api::{config::AppConfig, db::run_migrations, state::AppState};
use sea_orm::{ConnectOptions, Database};

// `sqlite::memory:` is per connection, so the pool holds exactly one.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState { orm })
}

#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origin: "http://localhost:5173".to_string(),
        shutdown_timeout: Duration::from_secs(1),
    }
}
