//! Persistence-agnostic list query descriptions.
//!
//! A [`QueryDescription`] is the validated plan for a filtered, sorted,
//! paginated listing: a list of ANDed [`Predicate`]s, an ordered list of
//! [`SortKey`]s, a limit and an offset. Columns are a closed enum supplied by
//! the caller (see [`QueryColumn`]), so nothing user-typed ever reaches SQL
//! as an identifier. Values are carried as [`FieldValue`]s and bound as
//! parameters by the repository layer.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Number of rows returned when `limit` is omitted.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Rows skipped when `offset` is omitted.
pub const DEFAULT_LIST_OFFSET: i64 = 0;

/// Separator between `column|direction` pairs in a sort spec.
pub const SORT_PAIR_SEPARATOR: char = ',';

/// Separator between the column and the direction inside one pair.
pub const SORT_DIRECTION_SEPARATOR: char = '|';

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// A closed set of columns a listing may filter or sort on.
///
/// `from_api_name` is the allow-list: any name it does not recognise is
/// rejected before a query is built.
pub trait QueryColumn: Copy + Eq + fmt::Debug {
    /// Resolve a public (API-facing) column name.
    fn from_api_name(name: &str) -> Option<Self>;

    /// The public name of this column.
    fn api_name(self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc` / `desc`, ignoring ASCII case.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// Parse a `col1|asc,col2|desc` sort spec into ordered sort keys.
///
/// - `None`, an empty string and blank segments yield no keys.
/// - A missing direction (`year` or `year|`) defaults to ascending.
/// - Unknown columns fail with [`CoreError::InvalidSortColumn`].
/// - Unknown directions fail with [`CoreError::Validation`].
///
/// The first pair is the primary sort key.
pub fn parse_sort_spec<C: QueryColumn>(spec: Option<&str>) -> Result<Vec<SortKey<C>>, CoreError> {
    let Some(spec) = spec else {
        return Ok(Vec::new());
    };

    spec.split(SORT_PAIR_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_sort_pair)
        .collect()
}

fn parse_sort_pair<C: QueryColumn>(segment: &str) -> Result<SortKey<C>, CoreError> {
    let (name, direction) = match segment.split_once(SORT_DIRECTION_SEPARATOR) {
        Some((name, direction)) => (name.trim(), direction.trim()),
        None => (segment, ""),
    };

    let column =
        C::from_api_name(name).ok_or_else(|| CoreError::InvalidSortColumn(name.to_string()))?;

    let direction = if direction.is_empty() {
        SortDirection::default()
    } else {
        SortDirection::parse(direction).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid sort direction '{direction}' for column '{name}'. Must be 'asc' or 'desc'"
            ))
        })?
    };

    Ok(SortKey { column, direction })
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
}

impl Comparison {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gte => ">=",
            Comparison::Lte => "<=",
        }
    }
}

/// A typed value headed for a bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i32),
    BigInt(i64),
    Decimal(Decimal),
    Date(Date),
    Bool(bool),
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::BigInt(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Decimal(v)
    }
}

impl From<Date> for FieldValue {
    fn from(v: Date) -> Self {
        FieldValue::Date(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate<C> {
    pub column: C,
    pub comparison: Comparison,
    pub value: FieldValue,
}

/// Accumulates predicates from optional filter values.
///
/// `None` never produces a predicate: an absent filter means "no filter",
/// not "match the default value".
#[derive(Debug)]
pub struct PredicateSet<C> {
    predicates: Vec<Predicate<C>>,
}

impl<C: QueryColumn> Default for PredicateSet<C> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<C: QueryColumn> PredicateSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push<V: Into<FieldValue>>(&mut self, column: C, comparison: Comparison, value: Option<V>) {
        if let Some(value) = value {
            self.predicates.push(Predicate {
                column,
                comparison,
                value: value.into(),
            });
        }
    }

    pub fn eq<V: Into<FieldValue>>(&mut self, column: C, value: Option<V>) -> &mut Self {
        self.push(column, Comparison::Eq, value);
        self
    }

    /// Equality on text; empty or whitespace-only strings count as absent.
    pub fn eq_text(&mut self, column: C, value: Option<&str>) -> &mut Self {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        self.push(column, Comparison::Eq, value);
        self
    }

    pub fn gte<V: Into<FieldValue>>(&mut self, column: C, value: Option<V>) -> &mut Self {
        self.push(column, Comparison::Gte, value);
        self
    }

    pub fn lte<V: Into<FieldValue>>(&mut self, column: C, value: Option<V>) -> &mut Self {
        self.push(column, Comparison::Lte, value);
        self
    }

    pub fn into_vec(self) -> Vec<Predicate<C>> {
        self.predicates
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: DEFAULT_LIST_OFFSET,
        }
    }
}

impl Pagination {
    /// Apply defaults and reject negative values.
    ///
    /// No upper bound is enforced here.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, CoreError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let offset = offset.unwrap_or(DEFAULT_LIST_OFFSET);

        if limit < 0 {
            return Err(CoreError::Validation(format!(
                "limit must be a non-negative integer (got {limit})"
            )));
        }
        if offset < 0 {
            return Err(CoreError::Validation(format!(
                "offset must be a non-negative integer (got {offset})"
            )));
        }

        Ok(Self { limit, offset })
    }
}

// ---------------------------------------------------------------------------
// Query description
// ---------------------------------------------------------------------------

/// A validated, passive plan for a listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescription<C> {
    pub predicates: Vec<Predicate<C>>,
    pub sort: Vec<SortKey<C>>,
    pub limit: i64,
    pub offset: i64,
}

impl<C: QueryColumn> QueryDescription<C> {
    pub fn new(predicates: Vec<Predicate<C>>, sort: Vec<SortKey<C>>, page: Pagination) -> Self {
        Self {
            predicates,
            sort,
            limit: page.limit,
            offset: page.offset,
        }
    }

    /// `true` when no sort keys were requested.
    pub fn is_natural_order(&self) -> bool {
        self.sort.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
