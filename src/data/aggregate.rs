use std::fmt;
use std::str::FromStr;

use log::debug;

use super::model::{parse_number, Row};
use super::sort::split_assignment;
use crate::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Avg,
    Min,
    Max,
    Sum,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Avg => "avg",
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Sum => "sum",
        }
    }

    /// Reduce a non-empty slice of values.
    fn reduce(self, values: &[f64]) -> f64 {
        match self {
            Operation::Sum => values.iter().sum(),
            Operation::Avg => values.iter().sum::<f64>() / values.len() as f64,
            Operation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Operation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl FromStr for Operation {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avg" => Ok(Operation::Avg),
            "min" => Ok(Operation::Min),
            "max" => Ok(Operation::Max),
            "sum" => Ok(Operation::Sum),
            other => Err(QueryError::UnknownAggregation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// AggregateValue / AggregationResult
// ---------------------------------------------------------------------------

/// The reduced number. An empty input has no reduction and yields the
/// integer zero, which prints as `0` rather than `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateValue {
    Empty,
    Number(f64),
}

impl AggregateValue {
    pub fn as_f64(self) -> f64 {
        match self {
            AggregateValue::Empty => 0.0,
            AggregateValue::Number(v) => v,
        }
    }
}

impl fmt::Display for AggregateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AggregateValue::Empty => f.write_str("0"),
            AggregateValue::Number(v) => f.write_str(&float_literal(v)),
        }
    }
}

/// Shortest round-trip text of `v`, written the way a float literal reads:
/// whole numbers keep a trailing `.0`, and exponents below -4 or from 16
/// up switch to `1e-07` / `1e+16` notation.
fn float_literal(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// A single `operation -> value` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationResult {
    pub operation: Operation,
    pub value: AggregateValue,
}

impl AggregationResult {
    pub fn key(&self) -> &'static str {
        self.operation.name()
    }
}

/// Round to two decimals, ties to even. Whole numbers, including those too
/// large to scale by 100, come back unchanged.
fn round2(v: f64) -> f64 {
    let scaled = v * 100.0;
    if v.fract() == 0.0 || !scaled.is_finite() {
        return v;
    }
    scaled.round_ties_even() / 100.0
}

// ---------------------------------------------------------------------------
// AggregationSpec
// ---------------------------------------------------------------------------

/// Parsed `<column>=<avg|min|max|sum>`. Only built once the column has
/// been coerced, see [`aggregate_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct AggregationSpec {
    column: String,
    operation: Operation,
}

impl AggregationSpec {
    fn reduce(&self, values: &[f64]) -> AggregationResult {
        let value = if values.is_empty() {
            AggregateValue::Empty
        } else {
            AggregateValue::Number(round2(self.operation.reduce(values)))
        };
        debug!(
            "aggregate {}={} over {} values: {value}",
            self.column,
            self.operation,
            values.len()
        );
        AggregationResult {
            operation: self.operation,
            value,
        }
    }
}

/// Every value of `column` as a number; the first unparsable cell fails the
/// whole column.
fn numeric_column(column: &str, rows: &[Row]) -> Result<Vec<f64>> {
    rows.iter()
        .map(|row| {
            parse_number(row.require(column)?)
                .ok_or_else(|| QueryError::NonNumericColumn(column.to_string()))
        })
        .collect()
}

/// Parse `expression` and reduce `rows` with it.
///
/// The column is coerced before the operation name is checked, so a
/// non-numeric column is reported ahead of an unknown operation.
pub fn aggregate_rows(expression: &str, rows: &[Row]) -> Result<AggregationResult> {
    let (column, operation) = split_assignment(expression)?;
    let values = numeric_column(column, rows)?;
    let spec = AggregationSpec {
        column: column.to_string(),
        operation: operation.parse()?,
    };
    Ok(spec.reduce(&values))
}
