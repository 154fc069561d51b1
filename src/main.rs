use dotenvy::dotenv;
use plantas_api::{
    api,
    config::{ServerConfig, database, seed::load_seed_config},
    core::seed,
    errors::Result,
};
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

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    // 3. Load the server configuration
    let config = ServerConfig::from_env()
        .inspect_err(|e| error!("Invalid server configuration: {}", e))?;
    info!("Configuration loaded: {:?}", config);

    // 4. Open the database and apply the schema; both are fatal on failure
    let db = database::open(&config.database_path)
        .await
        .inspect_err(|e| error!("Failed to open database: {}", e))?;
    database::init_schema(&db)
        .await
        .inspect_err(|e| error!("Failed to initialize database schema: {}", e))?;

    // 5. Seed default data; the tables exist, so the API can start regardless
    match load_seed_config(&config.seed_config_path) {
        Ok(catalog) => {
            if let Err(e) =
                seed::seed_database(&db, &catalog, &config.assets_dir, &config.public_dir).await
            {
                warn!("Seeding failed, continuing without default data: {}", e);
            }
        }
        Err(e) => warn!("Skipping seeding: {}", e),
    }

    // 6. Serve until shutdown, then release the connection
    let served = api::serve(&config, db.clone())
        .await
        .inspect_err(|e| error!("Server error: {}", e));
    match db.close().await {
        Ok(()) => info!("Database connection closed"),
        Err(e) => error!("Failed to close database connection: {}", e),
    }

    served
}
