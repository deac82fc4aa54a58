//! Web server for SIREN.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::auth::TokenIssuer;
use crate::config::ServerConfig;
use crate::db::{Database, RevocationRepository};
use crate::{Result, SirenError};

use super::handlers::AppState;
use super::middleware::AuthState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Access control gate state.
    auth_state: Arc<AuthState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// The issuer is built by the caller so a missing signing secret fails
    /// before any socket is bound.
    pub fn new(config: &ServerConfig, db: Database, issuer: TokenIssuer) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|_| {
                SirenError::Config(format!(
                    "invalid server address {}:{}",
                    config.host, config.port
                ))
            })?;

        let auth_state = Arc::new(AuthState::new(issuer.clone(), db.pool().clone()));
        let app_state = Arc::new(AppState::new(db, issuer));

        Ok(Self {
            addr,
            app_state,
            auth_state,
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the revocation ledger pruning background task.
    ///
    /// Runs every hour and drops entries older than the refresh window;
    /// a jti on the ledger longer than that can no longer match a live
    /// token.
    fn start_revocation_cleanup_task(db: Database, retention_days: u64) {
        tokio::spawn(async move {
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let repo = RevocationRepository::new(db.pool());
                match repo.cleanup_older_than(retention_days).await {
                    Ok(count) => {
                        if count > 0 {
                            tracing::info!(
                                deleted_count = count,
                                "Pruned expired revocation entries"
                            );
                        } else {
                            tracing::debug!("No expired revocation entries to prune");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to prune revocation ledger");
                    }
                }
            }
        });
    }

    fn build_router(&self) -> axum::Router {
        create_router(
            self.app_state.clone(),
            self.auth_state.clone(),
            &self.cors_origins,
        )
        .merge(create_health_router())
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let router = self.build_router();
        let db = self.app_state.db.clone();
        let retention_days = self.app_state.issuer.refresh_expiry_secs() / 86_400;

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_revocation_cleanup_task(db, retention_days);
        tracing::info!("Revocation cleanup task started (runs every hour)");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server and return the actual bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.build_router();
        let db = self.app_state.db.clone();
        let retention_days = self.app_state.issuer.refresh_expiry_secs() / 86_400;

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_revocation_cleanup_task(db, retention_days);
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // random port
            cors_origins: vec![],
        }
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let db = Database::open_in_memory().await.unwrap();
        let issuer = TokenIssuer::new("test-secret", 7200, 7).unwrap();

        let server = WebServer::new(&test_config(), db, issuer).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_rejects_bad_address() {
        let db = Database::open_in_memory().await.unwrap();
        let issuer = TokenIssuer::new("test-secret", 7200, 7).unwrap();

        let config = ServerConfig {
            host: "not an address".to_string(),
            port: 8080,
            cors_origins: vec![],
        };
        assert!(WebServer::new(&config, db, issuer).is_err());
    }
}
