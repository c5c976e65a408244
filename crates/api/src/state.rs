use std::sync::Arc;

use scrapyard_db::store::BrokenCarStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: scrapyard_db::DbPool,
    /// Server configuration (JWT secret is read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Persistence collaborator for broken-car records.
    pub broken_cars: Arc<dyn BrokenCarStore>,
}
