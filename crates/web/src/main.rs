use anyhow::Context;
use scrimhub_storage::Database;
use scrimhub_web::{
    app,
    config::{Config, StorageBackend},
    middleware::auth::JwtKeys,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting ScrimHub API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = match (&config.storage_backend, &config.database_url) {
        (StorageBackend::Postgres, Some(database_url)) => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url, config.database_max_connections)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations");
            db.run_migrations()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations completed successfully");

            db
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL must be set when STORAGE_BACKEND=postgres")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using the in-memory store, nothing will be persisted");
            Database::in_memory()
        }
    };

    let jwt = JwtKeys::new(config.jwt_secret.as_bytes());

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(db, jwt))
        .await
        .context("Server error")?;

    Ok(())
}
