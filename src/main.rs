use doublemoney::{config, errors::Result, scheduler::MaturationScheduler};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::settings::load_default_config()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database (DATABASE_URL from environment, sqlite default)
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create database tables: {e}"))?;

    // 5. Seed deposit wallets from configuration (if any are missing)
    config::wallets::seed_wallets(&db, &app_config.wallets)
        .await
        .inspect_err(|e| error!("Failed to seed deposit wallets: {e}"))?;

    // 6. Run the maturation scheduler until shutdown
    let handle = MaturationScheduler::new(db, app_config.settings).start();
    info!("DoubleMoney maturation service started; press Ctrl-C to stop.");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping scheduler.");
    handle.stop().await;

    Ok(())
}
