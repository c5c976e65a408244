//! Handlers for the `/broken-cars` resource.
//!
//! Every handler takes its permission extractor first, so authorization is
//! settled before path, query or body parsing and before the store is
//! touched. Request shaping happens in `scrapyard_core::broken_car`; the
//! store performs exactly one operation per request.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scrapyard_core::broken_car::{
    build_create_payload, build_delete_key, build_list_query, build_update_payload,
    parse_identifier, BrokenCarFilter, CreateBrokenCarRequest, UpdateBrokenCarRequest, ENTITY,
};
use scrapyard_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireCreate, RequireDelete, RequireList, RequireUpdate};
use crate::query::ListParams;
use crate::response::{CreatedResponse, DataResponse, SuccessResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/broken-cars/list?color=&year=&...&limit=20&offset=0&sort=year|asc
///
/// List broken cars with optional filters, sort and pagination.
pub async fn list(
    RequireList(user): RequireList,
    State(state): State<AppState>,
    filter: Result<Query<BrokenCarFilter>, QueryRejection>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filter) = filter?;
    let Query(params) = params?;

    let query = build_list_query(
        &filter,
        params.limit,
        params.offset,
        params.sort.as_deref(),
    )?;
    let cars = state.broken_cars.list(&query).await?;

    tracing::debug!(
        user_id = user.user_id,
        predicates = query.predicates.len(),
        count = cars.len(),
        "Listed broken cars"
    );
    Ok(Json(DataResponse::new(cars)))
}

/// POST /api/v1/broken-cars/create
///
/// Create a broken car. Responds with the new id.
pub async fn create(
    RequireCreate(user): RequireCreate,
    State(state): State<AppState>,
    body: Result<Json<CreateBrokenCarRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let new = build_create_payload(input)?;

    let id = state.broken_cars.create(&new).await?;

    tracing::info!(user_id = user.user_id, broken_car_id = id, "Broken car created");
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// PUT /api/v1/broken-cars/edit/{id}
///
/// Partially update a broken car. Only supplied fields change; the id and
/// creation date never do.
pub async fn update(
    RequireUpdate(user): RequireUpdate,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateBrokenCarRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(raw_id) = path?;
    let id = parse_identifier(&raw_id)?;
    let Json(input) = body?;
    let changes = build_update_payload(id, input)?;

    let car = state
        .broken_cars
        .update(&changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(
        user_id = user.user_id,
        broken_car_id = id,
        fields = changes.changes.len(),
        "Broken car updated"
    );
    Ok(Json(DataResponse::new(car)))
}

/// DELETE /api/v1/broken-cars/delete/{id}
///
/// Delete a broken car.
pub async fn delete(
    RequireDelete(user): RequireDelete,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(raw_id) = path?;
    let id = build_delete_key(&raw_id)?;

    let deleted = state.broken_cars.delete(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(user_id = user.user_id, broken_car_id = id, "Broken car deleted");
    Ok(Json(SuccessResponse::ok()))
}
