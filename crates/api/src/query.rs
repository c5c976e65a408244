//! Shared query parameter types for API handlers.
//!
//! List filters are read by a separate `Query<BrokenCarFilter>` extractor over
//! the same query string; the structs here only carry the paging and sort
//! keys.

use serde::Deserialize;

/// Pagination and sort parameters (`?limit=&offset=&sort=`).
///
/// Defaults and validation are applied by
/// `scrapyard_core::broken_car::build_list_query`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Comma-separated `column|direction` pairs, e.g. `year|asc,price|desc`.
    pub sort: Option<String>,
}
