use std::process::ExitCode;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codecv::adapters::auth::JwtSessionValidator;
use codecv::adapters::github::GitHubClient;
use codecv::adapters::http::{api_router, with_http_layers, AppState};
use codecv::adapters::memory::InMemoryStore;
use codecv::adapters::postgres::{PostgresProfileRepository, PostgresSkillRepository};
use codecv::config::{AppConfig, DatabaseConfig};
use codecv::ports::{ProfileRepository, SkillRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("codecv: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server stopped");
            ExitCode::FAILURE
        }
    }
}

/// JSON lines in production, human-readable output elsewhere.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().pretty())
            .with(filter)
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), BoxError> {
    config.validate()?;

    let (profiles, skills) = match &config.database {
        Some(database) => connect_postgres(database).await?,
        None => {
            tracing::warn!("No database configured, using the in-memory store");
            let store = InMemoryStore::new();
            let profiles: Arc<dyn ProfileRepository> = Arc::new(store.profiles());
            let skills: Arc<dyn SkillRepository> = Arc::new(store.skills());
            (profiles, skills)
        }
    };

    let github = GitHubClient::new(config.github.client_config())?;
    if config.github.token.is_none() {
        tracing::warn!("No GitHub token configured, requests use the anonymous quota");
    }

    let state = AppState::new(profiles, skills, Arc::new(github), config.github.sync_policy());
    let validator = Arc::new(JwtSessionValidator::new(config.auth.jwt_config()));
    let app = with_http_layers(api_router(state, validator), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "CodeCV listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn connect_postgres(
    database: &DatabaseConfig,
) -> Result<(Arc<dyn ProfileRepository>, Arc<dyn SkillRepository>), BoxError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresProfileRepository::new(pool.clone())),
        Arc::new(PostgresSkillRepository::new(pool)),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
