use compass_backend::app::app::{App, AppError};
use compass_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};

async fn run() -> Result<(), AppError> {
    let app = App::new().await?;
    app.start().await
}

#[tokio::main]
async fn main() {
    // Load environment variables before the logger reads its levels
    let dotenv_result = dotenv();

    let logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            std::process::exit(1);
        }
    };

    info!("Starting Compass Backend");
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {} (using system env vars)", e),
    }

    let result = run().await;
    if let Err(e) = &result {
        error!("Application stopped: {e}");
    }
    drop(logger);
    if result.is_err() {
        std::process::exit(1);
    }
}
