//! Repository for the `broken_cars` table.
//!
//! List and update statements are assembled at runtime from core query
//! descriptions. Identifiers only ever come from the exhaustive matches in
//! this file; every value is a bind parameter.

use scrapyard_core::broken_car::{
    BrokenCarChanges, BrokenCarColumn, BrokenCarField, BrokenCarQuery, NewBrokenCar,
};
use scrapyard_core::query::FieldValue;
use scrapyard_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Postgres};

use crate::models::broken_car::BrokenCar;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for SELECT queries. Expects `broken_cars` aliased as `bc`.
const COLUMNS: &str = "\
    bc.id, bc.color, bc.description, bc.year, bc.price, bc.first_broken_date, \
    bc.created_date, bc.body_id, bc.model_id, b.name AS body_name, \
    m.name AS model_name, bc.image, bc.is_active";

/// Joins that resolve body and model names.
const JOINS: &str = "\
    JOIN bodies b ON b.id = bc.body_id \
    JOIN models m ON m.id = bc.model_id";

/// Column list for INSERT (excludes generated `id`, `created_date`, `is_active`, `blob`).
const INSERT_COLUMNS: &str = "\
    color, description, year, price, first_broken_date, body_id, model_id, image";

// ---------------------------------------------------------------------------
// BrokenCarRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for broken cars.
pub struct BrokenCarRepo;

impl BrokenCarRepo {
    /// Insert a new record, returning its id.
    pub async fn create(pool: &PgPool, input: &NewBrokenCar) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO broken_cars ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id"
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(&input.color)
            .bind(&input.description)
            .bind(input.year)
            .bind(input.price)
            .bind(input.first_broken_date)
            .bind(input.body_id)
            .bind(input.model_id)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BrokenCar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM broken_cars bc {JOINS} WHERE bc.id = $1");
        sqlx::query_as::<_, BrokenCar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records matching a validated query description.
    pub async fn list(
        pool: &PgPool,
        query: &BrokenCarQuery,
    ) -> Result<Vec<BrokenCar>, sqlx::Error> {
        let (sql, values) = render_list_query(query);
        tracing::debug!(sql = %sql, binds = values.len(), "Listing broken cars");
        bind_values(sqlx::query_as::<_, BrokenCar>(&sql), &values)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only fields present in the change set are written.
    ///
    /// An empty change set returns the current row. Returns `None` if no row
    /// with the given id exists.
    pub async fn update(
        pool: &PgPool,
        changes: &BrokenCarChanges,
    ) -> Result<Option<BrokenCar>, sqlx::Error> {
        let Some((sql, values)) = render_update(changes) else {
            return Self::find_by_id(pool, changes.id).await;
        };

        let q = sqlx::query_as::<_, BrokenCar>(&sql).bind(changes.id);
        bind_values(q, &values).fetch_optional(pool).await
    }

    /// Hard-delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM broken_cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// SQL expression used when filtering on a column.
///
/// `createdDate` filters compare calendar days, not instants.
fn filter_expr(column: BrokenCarColumn) -> &'static str {
    match column {
        BrokenCarColumn::CreatedDate => "bc.created_date::date",
        other => sort_expr(other),
    }
}

/// SQL expression used when ordering by a column.
fn sort_expr(column: BrokenCarColumn) -> &'static str {
    match column {
        BrokenCarColumn::Id => "bc.id",
        BrokenCarColumn::Color => "bc.color",
        BrokenCarColumn::Description => "bc.description",
        BrokenCarColumn::Year => "bc.year",
        BrokenCarColumn::Price => "bc.price",
        BrokenCarColumn::FirstBrokenDate => "bc.first_broken_date",
        BrokenCarColumn::CreatedDate => "bc.created_date",
        BrokenCarColumn::BodyId => "bc.body_id",
        BrokenCarColumn::ModelId => "bc.model_id",
        BrokenCarColumn::BodyName => "b.name",
        BrokenCarColumn::ModelName => "m.name",
        BrokenCarColumn::IsActive => "bc.is_active",
    }
}

/// Storage column written by an update.
fn update_column(field: BrokenCarField) -> &'static str {
    match field {
        BrokenCarField::Color => "color",
        BrokenCarField::Description => "description",
        BrokenCarField::Year => "year",
        BrokenCarField::Price => "price",
        BrokenCarField::FirstBrokenDate => "first_broken_date",
        BrokenCarField::BodyId => "body_id",
        BrokenCarField::ModelId => "model_id",
        BrokenCarField::Image => "image",
        BrokenCarField::IsActive => "is_active",
    }
}

/// Render a list query into SQL plus its bind values, in `$n` order.
///
/// Requested sort keys come first; `bc.id ASC` is appended as the final
/// tiebreaker unless `id` is already a key, so pages never overlap.
fn render_list_query(query: &BrokenCarQuery) -> (String, Vec<FieldValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<FieldValue> = Vec::new();
    let mut bind_idx = 1u32;

    for predicate in &query.predicates {
        conditions.push(format!(
            "{} {} ${bind_idx}",
            filter_expr(predicate.column),
            predicate.comparison.as_sql()
        ));
        bind_idx += 1;
        bind_values.push(predicate.value.clone());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let mut order: Vec<String> = query
        .sort
        .iter()
        .map(|key| format!("{} {}", sort_expr(key.column), key.direction.as_sql()))
        .collect();
    if !query.sort.iter().any(|key| key.column == BrokenCarColumn::Id) {
        order.push("bc.id ASC".to_string());
    }

    let sql = format!(
        "SELECT {COLUMNS} FROM broken_cars bc {JOINS}{where_clause} \
         ORDER BY {} LIMIT ${bind_idx} OFFSET ${}",
        order.join(", "),
        bind_idx + 1
    );
    bind_values.push(FieldValue::BigInt(query.limit));
    bind_values.push(FieldValue::BigInt(query.offset));

    (sql, bind_values)
}

/// Render an UPDATE for the supplied fields. `$1` is the record id.
///
/// Returns `None` for an empty change set.
fn render_update(changes: &BrokenCarChanges) -> Option<(String, Vec<FieldValue>)> {
    if changes.is_empty() {
        return None;
    }

    let mut sets: Vec<String> = Vec::new();
    let mut bind_values: Vec<FieldValue> = Vec::new();
    let mut bind_idx = 2u32; // $1 is id

    for change in &changes.changes {
        sets.push(format!("{} = ${bind_idx}", update_column(change.field)));
        bind_idx += 1;
        bind_values.push(change.value.clone());
    }

    let sql = format!(
        "WITH updated AS (\
            UPDATE broken_cars SET {} WHERE id = $1 RETURNING *\
         ) \
         SELECT {COLUMNS} FROM updated bc {JOINS}",
        sets.join(", ")
    );
    Some((sql, bind_values))
}

/// Bind a slice of `FieldValue` to a sqlx `QueryAs`.
fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [FieldValue],
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        q = match val {
            FieldValue::Text(v) => q.bind(v.as_str()),
            FieldValue::Int(v) => q.bind(*v),
            FieldValue::BigInt(v) => q.bind(*v),
            FieldValue::Decimal(v) => q.bind(*v),
            FieldValue::Date(v) => q.bind(*v),
            FieldValue::Bool(v) => q.bind(*v),
        };
    }
    q
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
