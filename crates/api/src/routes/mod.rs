pub mod broken_car;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /broken-cars/list                                list (bit 1)
/// /broken-cars/create                              create (bit 2)
/// /broken-cars/edit/{id}                           partial update (bit 4)
/// /broken-cars/delete/{id}                         delete (bit 8)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/broken-cars", broken_car::router())
}
