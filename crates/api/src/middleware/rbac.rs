//! Permission-bit extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects callers whose role mask lacks
//! the operation's bit. Place them first in a handler's argument list so the
//! check runs before path, query and body extraction and before any data
//! access.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use scrapyard_core::permissions::{check_permission, Permission};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate the caller and require `permission`. Rejects with 403 otherwise.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    permission: Permission,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if let Err(err) = check_permission(user.roles, permission) {
        tracing::warn!(
            user_id = user.user_id,
            roles = user.roles,
            permission = permission.name(),
            "Permission denied"
        );
        return Err(err.into());
    }
    Ok(user)
}

/// Requires the list bit (`1`).
///
/// ```ignore
/// async fn list(RequireList(user): RequireList) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireList(pub AuthUser);

impl FromRequestParts<AppState> for RequireList {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Permission::List).await.map(RequireList)
    }
}

/// Requires the create bit (`2`).
pub struct RequireCreate(pub AuthUser);

impl FromRequestParts<AppState> for RequireCreate {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Permission::Create)
            .await
            .map(RequireCreate)
    }
}

/// Requires the update bit (`4`).
pub struct RequireUpdate(pub AuthUser);

impl FromRequestParts<AppState> for RequireUpdate {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Permission::Update)
            .await
            .map(RequireUpdate)
    }
}

/// Requires the delete bit (`8`).
pub struct RequireDelete(pub AuthUser);

impl FromRequestParts<AppState> for RequireDelete {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Permission::Delete)
            .await
            .map(RequireDelete)
    }
}
