use attendance_buddy::{
    api::{self, AppState},
    bot::{self, BotData},
    config::{
        app::AppConfig,
        database::{create_connection, create_tables},
        seed::{load_seed_config, seed_user_data},
    },
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let config = AppConfig::from_env()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;

    // 4. Initialize database
    let db = create_connection(&config.database_url).await?;
    create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Seed subjects and schedule (only when a seed file exists)
    if config.seed_path.exists() {
        let seed = load_seed_config(&config.seed_path)?;
        let created = seed_user_data(&db, &seed)
            .await
            .inspect_err(|e| error!("Failed to apply seed file: {e}"))?;
        info!(created, "Seed file processed");
    } else {
        info!("No seed file at {}, skipping seed", config.seed_path.display());
    }

    // 6. Start the Discord bot alongside the API when a token is configured
    if let Some(token) = config.discord_token.clone() {
        let data = BotData::new(db.clone(), config.default_min_percentage);
        tokio::spawn(async move {
            if let Err(e) = bot::run_bot(&token, data).await {
                error!("Discord bot stopped: {e}");
            }
        });
    }

    // 7. Serve the HTTP API until Ctrl+C
    let app = api::router(AppState::new(db, config.default_min_percentage));
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        // Keep serving rather than shutting down immediately
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
