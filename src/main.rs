use std::sync::Arc;

use authgate::{
    app,
    auth::{jwt::JwtKeys, repo::PgUserStore, service::CredentialService},
    config::AppConfig,
    db,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "authgate=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Salt and secret must exist before anything is hashed or sealed.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;

    let pool = db::connect(&config.database_url).await?;
    db::migrate(&pool).await?;

    let store = Arc::new(PgUserStore::new(pool.clone()));
    let service = CredentialService::new(
        store,
        config.password_salt.clone(),
        JwtKeys::from_config(&config.jwt),
    );
    let app = app::build_app(AppState::new(Arc::new(service)));

    let served = app::serve(app, &config).await;
    db::disconnect(pool).await;
    served
}
