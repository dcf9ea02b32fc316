use registro::{
    api::start_api_server,
    config::AppConfig,
    observability::init_logging,
    storage::{create_pool, SubmissionRepository},
    Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing).
    // This must happen before any config is read from environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = AppConfig::from_env()?;
    init_logging(&config.observability)?;

    info!(
        app_name = APP_NAME,
        version = VERSION,
        bind_address = %config.server.bind_address(),
        table = %config.database.table,
        "Starting registro submission intake service"
    );

    let pool = create_pool(&config.database).await?;
    let repository = SubmissionRepository::new(pool, &config.database.table)?;

    start_api_server(&config.server, repository).await
}
