//! Leaderboard application composition root
//!
//! Wires configuration, the entity store and auth into the teams router.

use axum::Router;
use leaderboard_common::Config;
use leaderboard_teams::{AuthBackend, AuthConfig, TeamsRepositories, TeamsService, TeamsState};
use sqlx::PgPool;
use tracing::info;

/// Create the main application router from configuration.
///
/// Connects to Postgres and runs migrations when `DATABASE_URL` is set,
/// otherwise serves from the in-memory store.
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let repos = match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
            TeamsRepositories::migrate(&pool).await?;
            info!("Database connection established");
            TeamsRepositories::new(pool)
        }
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            TeamsRepositories::in_memory()
        }
    };

    let auth_config = AuthConfig {
        expiry_hours: config.jwt_expiry_hours,
        ..AuthConfig::new(config.jwt_secret.clone())
    };

    Ok(build_router(repos, auth_config))
}

/// Compose the teams routes with the infrastructure routes
pub fn build_router(repos: TeamsRepositories, auth_config: AuthConfig) -> Router {
    let service = TeamsService::new(repos, AuthBackend::new(auth_config));
    let teams_state = TeamsState::new(service);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(leaderboard_teams::routes().with_state(teams_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
