//! Broken-car row model.

use rust_decimal::Decimal;
use scrapyard_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `broken_cars` row joined with its body and model names.
///
/// The `blob` column is storage-only and never selected here.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenCar {
    pub id: DbId,
    pub color: String,
    pub description: String,
    pub year: i32,
    pub price: Option<Decimal>,
    pub first_broken_date: Option<Date>,
    pub created_date: Timestamp,
    pub body_id: DbId,
    pub model_id: DbId,
    pub body_name: String,
    pub model_name: String,
    pub image: Option<String>,
    pub is_active: bool,
}
