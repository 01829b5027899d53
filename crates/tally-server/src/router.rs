use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{self, SharedStore};

/// Build the axum router with all timesheet endpoints.
pub fn build_router(store: SharedStore, config: &ServerConfig) -> ServerResult<Router> {
    let router = Router::new()
        .route(
            "/timesheet",
            get(handler::all_entries)
                .post(handler::add_entry)
                .put(handler::update_entry)
                .delete(handler::delete_entry),
        )
        .route("/timesheet/entries/:user_id", get(handler::entries_for_user))
        .route("/timesheet/projects/:user_id", get(handler::hours_per_project))
        .route("/health", get(handler::health))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http())
        .with_state(store);
    Ok(router)
}

fn cors_layer(config: &ServerConfig) -> ServerResult<CorsLayer> {
    let layer = match &config.allowed_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::Config(format!("invalid CORS origin: {origin}")))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };
    Ok(layer)
}
