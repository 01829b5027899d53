use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::SharedStore;
use crate::router::build_router;

/// Timesheet API server.
///
/// Owns the store handle for its run duration; handlers reach it through the
/// router state.
pub struct TimesheetServer {
    config: ServerConfig,
    store: SharedStore,
}

impl TimesheetServer {
    pub fn new(config: ServerConfig, store: SharedStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        build_router(self.store.clone(), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.store.clone(), &self.config)?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("timesheet server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
