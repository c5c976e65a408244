//! Broken-car listing rules and request shaping.
//!
//! - [`build_list_query`] turns optional filters, pagination and a sort spec
//!   into a [`BrokenCarQuery`].
//! - [`build_create_payload`], [`build_update_payload`] and
//!   [`build_delete_key`] / [`parse_identifier`] validate and normalize request bodies and path
//!   identifiers before anything is handed to the persistence layer.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::query::{
    parse_sort_spec, FieldValue, Pagination, PredicateSet, QueryColumn, QueryDescription,
};
use crate::types::{Date, DbId};

/// Entity name used in `NotFound` errors and log fields.
pub const ENTITY: &str = "BrokenCar";

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Columns a broken-car listing may filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrokenCarColumn {
    Id,
    Color,
    Description,
    Year,
    Price,
    FirstBrokenDate,
    CreatedDate,
    BodyId,
    ModelId,
    BodyName,
    ModelName,
    IsActive,
}

impl BrokenCarColumn {
    pub const ALL: [BrokenCarColumn; 12] = [
        BrokenCarColumn::Id,
        BrokenCarColumn::Color,
        BrokenCarColumn::Description,
        BrokenCarColumn::Year,
        BrokenCarColumn::Price,
        BrokenCarColumn::FirstBrokenDate,
        BrokenCarColumn::CreatedDate,
        BrokenCarColumn::BodyId,
        BrokenCarColumn::ModelId,
        BrokenCarColumn::BodyName,
        BrokenCarColumn::ModelName,
        BrokenCarColumn::IsActive,
    ];
}

impl QueryColumn for BrokenCarColumn {
    fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.api_name() == name)
    }

    fn api_name(self) -> &'static str {
        match self {
            BrokenCarColumn::Id => "id",
            BrokenCarColumn::Color => "color",
            BrokenCarColumn::Description => "description",
            BrokenCarColumn::Year => "year",
            BrokenCarColumn::Price => "price",
            BrokenCarColumn::FirstBrokenDate => "firstBrokenDate",
            BrokenCarColumn::CreatedDate => "createdDate",
            BrokenCarColumn::BodyId => "bodyId",
            BrokenCarColumn::ModelId => "modelId",
            BrokenCarColumn::BodyName => "bodyName",
            BrokenCarColumn::ModelName => "modelName",
            BrokenCarColumn::IsActive => "isActive",
        }
    }
}

pub type BrokenCarQuery = QueryDescription<BrokenCarColumn>;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Optional list filters. Every `Some` becomes one ANDed predicate.
///
/// `created_date` matches the calendar day of the creation timestamp. The
/// `*_from` / `*_to` fields are inclusive date bounds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenCarFilter {
    pub color: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub first_broken_date: Option<Date>,
    pub created_date: Option<Date>,
    pub body_id: Option<DbId>,
    pub model_id: Option<DbId>,
    pub body_name: Option<String>,
    pub model_name: Option<String>,
    pub is_active: Option<bool>,
    pub first_broken_date_from: Option<Date>,
    pub first_broken_date_to: Option<Date>,
    pub created_date_from: Option<Date>,
    pub created_date_to: Option<Date>,
}

impl BrokenCarFilter {
    fn predicates(&self) -> PredicateSet<BrokenCarColumn> {
        use BrokenCarColumn as C;

        let mut set = PredicateSet::new();
        set.eq_text(C::Color, self.color.as_deref())
            .eq_text(C::Description, self.description.as_deref())
            .eq(C::Year, self.year)
            .eq(C::Price, self.price)
            .eq(C::FirstBrokenDate, self.first_broken_date)
            .eq(C::CreatedDate, self.created_date)
            .eq(C::BodyId, self.body_id)
            .eq(C::ModelId, self.model_id)
            .eq_text(C::BodyName, self.body_name.as_deref())
            .eq_text(C::ModelName, self.model_name.as_deref())
            .eq(C::IsActive, self.is_active)
            .gte(C::FirstBrokenDate, self.first_broken_date_from)
            .lte(C::FirstBrokenDate, self.first_broken_date_to)
            .gte(C::CreatedDate, self.created_date_from)
            .lte(C::CreatedDate, self.created_date_to);
        set
    }
}

/// Build the validated list plan for broken cars.
///
/// With no filters, no sort and no pagination this yields the first 20 rows
/// in natural order.
pub fn build_list_query(
    filter: &BrokenCarFilter,
    limit: Option<i64>,
    offset: Option<i64>,
    sort: Option<&str>,
) -> Result<BrokenCarQuery, CoreError> {
    let page = Pagination::new(limit, offset)?;
    let sort = parse_sort_spec(sort)?;
    Ok(QueryDescription::new(filter.predicates().into_vec(), sort, page))
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Parse a path identifier. Only positive integers are accepted.
pub fn parse_identifier(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::InvalidIdentifier(raw.to_string()))
}

/// Validate the identifier of a record to delete.
pub fn build_delete_key(raw: &str) -> Result<DbId, CoreError> {
    parse_identifier(raw)
}

fn validate_identifier(id: DbId) -> Result<DbId, CoreError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(CoreError::InvalidIdentifier(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Raw create body. Every field is optional here so that absence can be
/// reported as [`CoreError::MissingRequiredField`] with the field's name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrokenCarRequest {
    pub color: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub first_broken_date: Option<Date>,
    pub body_id: Option<DbId>,
    pub model_id: Option<DbId>,
    pub image: Option<String>,
}

/// A create payload with every required field present and in range.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewBrokenCar {
    #[validate(length(min = 1, max = 64))]
    pub color: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,
    pub price: Option<Decimal>,
    pub first_broken_date: Option<Date>,
    #[validate(range(min = 1))]
    pub body_id: DbId,
    #[validate(range(min = 1))]
    pub model_id: DbId,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

/// Validate a create body.
///
/// Required fields are checked in order: `color`, `description`, `year`,
/// `bodyId`, `modelId`. Blank strings count as missing.
pub fn build_create_payload(input: CreateBrokenCarRequest) -> Result<NewBrokenCar, CoreError> {
    let new = NewBrokenCar {
        color: required_text(input.color, "color")?,
        description: required_text(input.description, "description")?,
        year: input.year.ok_or(CoreError::MissingRequiredField("year"))?,
        body_id: input.body_id.ok_or(CoreError::MissingRequiredField("bodyId"))?,
        model_id: input.model_id.ok_or(CoreError::MissingRequiredField("modelId"))?,
        price: input.price,
        first_broken_date: input.first_broken_date,
        image: input.image.map(trimmed).filter(|v| !v.is_empty()),
    };

    new.validate().map_err(validation_error)?;
    validate_price(new.price)?;
    Ok(new)
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, CoreError> {
    value
        .map(trimmed)
        .filter(|v| !v.is_empty())
        .ok_or(CoreError::MissingRequiredField(field))
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial update body. Absent (or `null`) fields are left untouched.
///
/// The identifier and creation timestamp are not representable here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrokenCarRequest {
    #[validate(length(min = 1, max = 64))]
    pub color: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub first_broken_date: Option<Date>,
    #[validate(range(min = 1))]
    pub body_id: Option<DbId>,
    #[validate(range(min = 1))]
    pub model_id: Option<DbId>,
    #[validate(length(min = 1, max = 2048))]
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// Fields an update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrokenCarField {
    Color,
    Description,
    Year,
    Price,
    FirstBrokenDate,
    BodyId,
    ModelId,
    Image,
    IsActive,
}

impl BrokenCarField {
    pub const fn api_name(self) -> &'static str {
        match self {
            BrokenCarField::Color => "color",
            BrokenCarField::Description => "description",
            BrokenCarField::Year => "year",
            BrokenCarField::Price => "price",
            BrokenCarField::FirstBrokenDate => "firstBrokenDate",
            BrokenCarField::BodyId => "bodyId",
            BrokenCarField::ModelId => "modelId",
            BrokenCarField::Image => "image",
            BrokenCarField::IsActive => "isActive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: BrokenCarField,
    pub value: FieldValue,
}

/// The change set for one record, in a fixed field order.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenCarChanges {
    pub id: DbId,
    pub changes: Vec<FieldChange>,
}

impl BrokenCarChanges {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn get(&self, field: BrokenCarField) -> Option<&FieldValue> {
        self.changes
            .iter()
            .find(|c| c.field == field)
            .map(|c| &c.value)
    }

    fn set<V: Into<FieldValue>>(&mut self, field: BrokenCarField, value: Option<V>) {
        if let Some(value) = value {
            self.changes.push(FieldChange {
                field,
                value: value.into(),
            });
        }
    }
}

/// Validate a partial update and collect only the supplied fields.
///
/// Text fields are trimmed first, so a whitespace-only value is rejected
/// the same way an empty one is.
pub fn build_update_payload(
    id: DbId,
    mut input: UpdateBrokenCarRequest,
) -> Result<BrokenCarChanges, CoreError> {
    let id = validate_identifier(id)?;
    input.color = input.color.map(trimmed);
    input.description = input.description.map(trimmed);
    input.image = input.image.map(trimmed);
    input.validate().map_err(validation_error)?;
    validate_price(input.price)?;

    let mut changes = BrokenCarChanges {
        id,
        changes: Vec::new(),
    };
    changes.set(BrokenCarField::Color, input.color);
    changes.set(BrokenCarField::Description, input.description);
    changes.set(BrokenCarField::Year, input.year);
    changes.set(BrokenCarField::Price, input.price);
    changes.set(BrokenCarField::FirstBrokenDate, input.first_broken_date);
    changes.set(BrokenCarField::BodyId, input.body_id);
    changes.set(BrokenCarField::ModelId, input.model_id);
    changes.set(BrokenCarField::Image, input.image);
    changes.set(BrokenCarField::IsActive, input.is_active);
    Ok(changes)
}

// ---------------------------------------------------------------------------
// Shared value checks
// ---------------------------------------------------------------------------

/// Decimal places the `price` column stores (`NUMERIC(12, 2)`).
const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound for `price`: ten integer digits.
const PRICE_CEILING: i64 = 10_000_000_000;

fn validate_price(price: Option<Decimal>) -> Result<(), CoreError> {
    let Some(p) = price else {
        return Ok(());
    };
    if p < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "price must not be negative (got {p})"
        )));
    }
    if p >= Decimal::from(PRICE_CEILING) {
        return Err(CoreError::Validation(format!(
            "price must be below {PRICE_CEILING} (got {p})"
        )));
    }
    if p.normalize().scale() > PRICE_SCALE {
        return Err(CoreError::Validation(format!(
            "price must have at most {PRICE_SCALE} decimal places (got {p})"
        )));
    }
    Ok(())
}

/// Flatten `validator` errors into a single, field-ordered message.
fn validation_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
            format!("{field} ({})", codes.join(", "))
        })
        .collect();
    fields.sort();
    CoreError::Validation(format!("Invalid value for: {}", fields.join("; ")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
