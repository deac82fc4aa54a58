use tracing::info;

use siren::{Config, Database, TokenIssuer, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = siren::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        siren::logging::init_console_only(&config.logging.level);
    }

    info!("SIREN - incident reporting service");

    // A missing signing secret is fatal before anything else starts
    let issuer = match TokenIssuer::new(
        &config.auth.jwt_secret,
        config.auth.access_token_expiry_secs,
        config.auth.refresh_token_expiry_days,
    ) {
        Ok(issuer) => issuer,
        Err(e) => {
            eprintln!("Cannot start: {e}");
            eprintln!("Set auth.jwt_secret in config.toml or the SIREN_JWT_SECRET environment variable.");
            std::process::exit(1);
        }
    };

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let server = match WebServer::new(&config.server, db, issuer) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to configure server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
