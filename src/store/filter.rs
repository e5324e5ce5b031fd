//! # Date Range Filtering
//!
//! Narrows decoded rows to those whose date (or timestamp) column falls
//! inside an inclusive range. Either bound may be left open.

use chrono::NaiveDate;

use crate::schema::{Row, Schema};

use super::errors::FilterError;

/// Inclusive date range with optional bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Range with no bounds; keeps every row
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Builds a range from `YYYY-MM-DD` text, as sent in a query string.
    /// Empty text leaves the bound open.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, FilterError> {
        Ok(Self {
            from: parse_bound("fromDate", from)?,
            to: parse_bound("toDate", to)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn parse_bound(bound: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, FilterError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FilterError::InvalidDate {
                bound,
                value: text.to_string(),
            }),
    }
}

/// Keeps the rows whose `column` value lies in `range`.
///
/// Rows with a null date are dropped unless the range is unbounded.
pub fn filter_rows(
    schema: &Schema,
    rows: Vec<Row>,
    column: &str,
    range: &DateRange,
) -> Result<Vec<Row>, FilterError> {
    let (index, definition) = schema
        .find(column)
        .ok_or_else(|| FilterError::UnknownColumn(column.to_string()))?;

    if !definition.field.field_type.is_temporal() {
        return Err(FilterError::NotTemporal(column.to_string()));
    }

    if range.is_unbounded() {
        return Ok(rows);
    }

    Ok(rows
        .into_iter()
        .filter(|row| {
            row.get(index)
                .and_then(|value| value.as_date())
                .is_some_and(|date| range.contains(date))
        })
        .collect())
}
