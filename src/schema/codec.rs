//! Per-type encode/decode rules
//!
//! `encode` turns a typed value into its on-disk text, `decode` turns raw
//! text back into a typed value. Optional columns decode unusable text to
//! `Value::Null`; required columns turn it into an error. The string
//! length limit applies whether or not the column is required.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldDef, FieldType};
use super::value::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-time layouts accepted on decode, tried in order after RFC 3339.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

impl FieldDef {
    /// Encodes a typed value into its textual form.
    ///
    /// # Errors
    ///
    /// - REQUIRED_VALUE_MISSING if the value is null (or an empty string for
    ///   string columns) and the column is required or holds dates
    /// - TYPE_CONVERSION if the value has the wrong type for the column
    ///
    /// Optional INT/FLOAT/STRING columns encode a missing value as `""`, and
    /// optional numeric columns do the same for anything that is not a number.
    pub fn encode(&self, value: &Value) -> SchemaResult<String> {
        let type_name = self.field_type.type_name();

        if self.is_absent(value) {
            return if self.required || self.field_type.is_temporal() {
                Err(SchemaError::required_missing(format!(
                    "{} value required and not set.",
                    type_name
                )))
            } else {
                Ok(String::new())
            };
        }

        match (&self.field_type, value) {
            (FieldType::Int, Value::Int(i)) => Ok(i.to_string()),
            (FieldType::Int | FieldType::Float, Value::Float(x)) if x.is_finite() => {
                Ok(x.to_string())
            }
            (FieldType::Float, Value::Int(i)) => Ok(i.to_string()),
            (FieldType::String { .. }, Value::String(s)) => Ok(s.clone()),
            (FieldType::Date, Value::Date(d)) => Ok(d.format(DATE_FORMAT).to_string()),
            (FieldType::Date, Value::Timestamp(ts)) => {
                Ok(ts.date().format(DATE_FORMAT).to_string())
            }
            (FieldType::Timestamp, Value::Timestamp(ts)) => {
                Ok(ts.format(TIMESTAMP_FORMAT).to_string())
            }
            (FieldType::Timestamp, Value::Date(d)) => {
                Ok(d.and_time(NaiveTime::MIN).format(TIMESTAMP_FORMAT).to_string())
            }
            (FieldType::Int | FieldType::Float, _) if !self.required => Ok(String::new()),
            (_, other) => Err(SchemaError::type_conversion(format!(
                "Cannot convert {} value \"{}\" to {}.",
                other.kind(),
                other,
                type_name
            ))),
        }
    }

    /// Decodes raw text into a typed value.
    ///
    /// # Errors
    ///
    /// - REQUIRED_VALUE_MISSING if the column is required and the text is
    ///   blank; the message is the same as for unparsable text
    /// - TYPE_CONVERSION if the column is required and the text does not parse
    /// - CONSTRAINT_VIOLATION if a string exceeds the column's max length
    pub fn decode(&self, raw: &str) -> SchemaResult<Value> {
        let parsed = match &self.field_type {
            FieldType::String { max_length } => return self.decode_string(raw, *max_length),
            FieldType::Int => parse_int_prefix(raw).map(Value::Int),
            FieldType::Float => parse_float_prefix(raw).map(Value::Float),
            FieldType::Date => parse_datetime(raw).map(|dt| Value::Date(dt.date())),
            FieldType::Timestamp => parse_datetime(raw)
                .map(|dt| Value::Timestamp(dt.with_nanosecond(0).unwrap_or(dt))),
        };

        match parsed {
            Some(value) => Ok(value),
            None if !self.required => Ok(Value::Null),
            None if raw.trim().is_empty() => {
                Err(SchemaError::required_missing(self.unparsable_message(raw)))
            }
            None => Err(SchemaError::type_conversion(self.unparsable_message(raw))),
        }
    }

    fn decode_string(&self, raw: &str, max_length: Option<usize>) -> SchemaResult<Value> {
        if self.required && raw.is_empty() {
            return Err(SchemaError::required_missing(
                "String value required but nothing was given",
            ));
        }

        if let Some(max) = max_length {
            if raw.chars().count() > max {
                return Err(SchemaError::constraint_violation(format!(
                    "String value exceeds maximum length of {}: {}",
                    max, raw
                )));
            }
        }

        Ok(Value::String(raw.to_string()))
    }

    fn unparsable_message(&self, raw: &str) -> String {
        match self.field_type {
            FieldType::Int | FieldType::Float => format!(
                "Cannot convert \"{}\" to {}.",
                raw,
                self.field_type.type_name()
            ),
            _ => format!(
                "{} value of \"{}\" is not valid for this field",
                self.field_type.type_name(),
                raw
            ),
        }
    }

    /// Null, or an empty string in a string column
    fn is_absent(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.is_empty() && matches!(self.field_type, FieldType::String { .. }),
            _ => false,
        }
    }
}

/// Leading base-10 integer: skips leading whitespace, takes an optional sign
/// and the digits that follow, ignores the rest.
///
/// A prefix outside the `i64` range yields `None`, so it decodes like any
/// other unparsable text: `Null` when optional, an error when required.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Leading decimal float, same prefix rules as `parse_int_prefix` with an
/// optional fraction and exponent.
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = count_digits(pos);
    pos += int_digits;
    let mut end = if int_digits > 0 { pos } else { 0 };

    if bytes.get(pos) == Some(&b'.') {
        let frac_digits = count_digits(pos + 1);
        if frac_digits > 0 {
            pos += 1 + frac_digits;
            end = pos;
        } else if int_digits > 0 {
            pos += 1;
        }
    }

    if end == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Parses a date or date-time; offsets are normalized to UTC and bare
/// dates land on midnight.
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%z") {
        return Some(dt.naive_utc());
    }

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
