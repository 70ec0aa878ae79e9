//! Parse pest pairs and fixed columns into record fields
//!
//! Every helper here works on a single token or line and reports a
//! [`FieldError`]; adapters turn those into skipped-line diagnostics.

use std::ops::Range;

use pest::Parser;
use thiserror::Error;

use crate::types::{Hectopascals, Knots, Timestamp};
use crate::{Rule, TrackParser};

/// Why a single record could not be turned into a fix or header.
#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum FieldError {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("invalid number `{0}`")]
    Number(String),

    #[error("invalid coordinate `{0}`")]
    Coordinate(String),

    #[error("invalid date `{0}`")]
    Date(String),

    #[error("latitude {0} outside -90..=90")]
    LatitudeRange(f64),

    #[error("non-finite longitude {0}")]
    Longitude(f64),

    #[error("line has {found} columns, expected at least {expected}")]
    ShortLine { expected: usize, found: usize },

    #[error("data line before any storm header")]
    Orphan,

    #[error("report table ends before the fix is complete")]
    Truncated,
}

/// Split a comma-delimited record into trimmed fields.
pub(crate) fn split_record(line: &str) -> Vec<&str> {
    match TrackParser::parse(Rule::record, line) {
        Ok(mut pairs) => pairs
            .next()
            .map(|record| {
                record
                    .into_inner()
                    .filter(|pair| pair.as_rule() == Rule::field)
                    .map(|pair| pair.as_str().trim())
                    .collect()
            })
            .unwrap_or_default(),
        // `record` accepts any text; keep the plain split as a fallback
        Err(_) => line.split(',').map(str::trim).collect(),
    }
}

/// Require at least `expected` fields.
pub(crate) fn require_fields(fields: &[&str], expected: usize) -> Result<(), FieldError> {
    if fields.len() < expected {
        Err(FieldError::TooFewFields {
            expected,
            found: fields.len(),
        })
    } else {
        Ok(())
    }
}

/// Fixed-width column slice. Columns past the end of the line read as blank.
pub(crate) fn fixed(line: &str, columns: Range<usize>) -> &str {
    let end = columns.end.min(line.len());
    if columns.start >= end {
        return "";
    }
    line.get(columns.start..end).unwrap_or("")
}

/// Byte at a fixed column, if the line is long enough.
pub(crate) fn column(line: &str, index: usize) -> Option<u8> {
    line.as_bytes().get(index).copied()
}

/// Signed integer field; blank reads as zero.
pub(crate) fn int_field(text: &str) -> Result<i64, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>()
        .map_err(|_| FieldError::Number(text.to_string()))
}

/// Decimal field; blank reads as zero.
pub(crate) fn float_field(text: &str) -> Result<f64, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::Number(text.to_string())),
    }
}

pub(crate) fn knots_field(text: &str) -> Result<Knots, FieldError> {
    int_field(text).map(Knots::from_signed)
}

pub(crate) fn pressure_field(text: &str) -> Result<Hectopascals, FieldError> {
    int_field(text).map(Hectopascals::from_signed)
}

/// Coordinate with an optional hemisphere suffix, divided by `divisor`.
///
/// `S` and `W` negate the value. Blank, or a hemisphere letter with no
/// magnitude, reads as 0.0.
pub(crate) fn coordinate_field(text: &str, divisor: f64) -> Result<f64, FieldError> {
    let text = text.trim();
    if text.is_empty() || TrackParser::parse(Rule::hemisphere_only, text).is_ok() {
        return Ok(0.0);
    }
    let invalid = || FieldError::Coordinate(text.to_string());
    let coordinate = TrackParser::parse(Rule::coordinate, text)
        .map_err(|_| invalid())?
        .next()
        .ok_or_else(invalid)?;

    let mut negative = false;
    let mut value = 0.0;
    for pair in coordinate.into_inner() {
        match pair.as_rule() {
            Rule::sign => negative = pair.as_str() == "-",
            Rule::magnitude => value = pair.as_str().parse::<f64>().map_err(|_| invalid())?,
            Rule::hemisphere => {
                if pair.as_str().eq_ignore_ascii_case("S") || pair.as_str().eq_ignore_ascii_case("W")
                {
                    negative = !negative;
                }
            }
            _ => {}
        }
    }
    value /= divisor;
    Ok(if negative { -value } else { value })
}

/// `YYYYMMDD` or `YYYYMMDDHH`. A missing hour reads as zero.
pub(crate) fn compact_date(text: &str) -> Result<Timestamp, FieldError> {
    let text = text.trim();
    let invalid = || FieldError::Date(text.to_string());
    let date = TrackParser::parse(Rule::compact_date, text)
        .map_err(|_| invalid())?
        .next()
        .ok_or_else(invalid)?;

    let mut parts = date
        .into_inner()
        .filter(|pair| matches!(pair.as_rule(), Rule::year4 | Rule::digit2))
        .map(|pair| pair.as_str().parse::<i32>().map_err(|_| invalid()));
    let year = parts.next().ok_or_else(invalid)??;
    let month = parts.next().ok_or_else(invalid)??;
    let day = parts.next().ok_or_else(invalid)??;
    let hour = parts.next().transpose()?.unwrap_or(0);
    checked_timestamp(year, month, day, hour).ok_or_else(invalid)
}

/// `M/D/YYYY`, returned as (year, month, day).
pub(crate) fn slash_date(text: &str) -> Result<(i32, u8, u8), FieldError> {
    let text = text.trim();
    let invalid = || FieldError::Date(text.to_string());
    let date = TrackParser::parse(Rule::slash_date, text)
        .map_err(|_| invalid())?
        .next()
        .ok_or_else(invalid)?;

    let numbers: Vec<i32> = date
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::number)
        .map(|pair| pair.as_str().parse::<i32>().map_err(|_| invalid()))
        .collect::<Result<_, _>>()?;
    match numbers.as_slice() {
        [month, day, year] => checked_timestamp(*year, *month, *day, 0)
            .map(|t| (t.year, t.month, t.day))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Build a timestamp, rejecting impossible month/day/hour values.
pub(crate) fn checked_timestamp(year: i32, month: i32, day: i32, hour: i32) -> Option<Timestamp> {
    let valid = (1..=12).contains(&month) && (1..=31).contains(&day) && (0..=23).contains(&hour);
    valid.then(|| Timestamp::new(year, month as u8, day as u8, hour as u8))
}
