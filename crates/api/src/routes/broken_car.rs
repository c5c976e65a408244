//! Route definitions for the broken-car admin resource.
//!
//! Mounted at `/broken-cars` by `api_routes()`.

use axum::routing::{delete, get, post, put};
use axum::Router;
use scrapyard_core::permissions::Permission;

use crate::handlers::broken_car;
use crate::state::AppState;

/// One entry of the method/path/permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePermission {
    pub method: &'static str,
    pub path: &'static str,
    pub permission: Permission,
}

/// Required permission per route, relative to `/api/v1/broken-cars`.
///
/// The handlers enforce these through their `Require*` extractors; the
/// table documents the mapping and drives the permission tests.
pub const ROUTE_PERMISSIONS: [RoutePermission; 4] = [
    RoutePermission {
        method: "GET",
        path: "/list",
        permission: Permission::List,
    },
    RoutePermission {
        method: "POST",
        path: "/create",
        permission: Permission::Create,
    },
    RoutePermission {
        method: "PUT",
        path: "/edit/{id}",
        permission: Permission::Update,
    },
    RoutePermission {
        method: "DELETE",
        path: "/delete/{id}",
        permission: Permission::Delete,
    },
];

/// Broken-car routes.
///
/// ```text
/// GET    /list              -> list
/// POST   /create            -> create
/// PUT    /edit/{id}         -> update
/// DELETE /delete/{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(broken_car::list))
        .route("/create", post(broken_car::create))
        .route("/edit/{id}", put(broken_car::update))
        .route("/delete/{id}", delete(broken_car::delete))
}
