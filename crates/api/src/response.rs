//! Shared response envelope types for API handlers.
//!
//! Every successful response carries `"success": true`; errors carry
//! `"success": false` (see [`crate::error::AppError`]). Use these structs
//! instead of ad-hoc `serde_json::json!` bodies.

use scrapyard_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T, "success": true }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub success: bool,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            success: true,
        }
    }
}

/// `{ "newBrokenCarId": id, "success": true }` returned by create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub new_broken_car_id: DbId,
    pub success: bool,
}

impl CreatedResponse {
    pub fn new(new_broken_car_id: DbId) -> Self {
        Self {
            new_broken_car_id,
            success: true,
        }
    }
}

/// Bare `{ "success": true }` for operations with no payload.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
