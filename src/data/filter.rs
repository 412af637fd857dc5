use std::fmt;

use log::debug;

use super::model::{parse_number, Row};
use crate::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Operator {
    /// Order in which tokens are searched for. Two-character tokens come
    /// before their one-character prefixes so `>=` never parses as `>`.
    pub const SCAN_ORDER: [Operator; 5] = [
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ---------------------------------------------------------------------------
// Condition – a parsed filter predicate
// ---------------------------------------------------------------------------

/// `<column><op><literal>`, with column and literal trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub literal: String,
}

impl Condition {
    /// Parse a filter expression such as `rating>4.5` or ` brand = apple `.
    ///
    /// This is a plain substring search: a literal that itself contains an
    /// operator character is split at the first matching token.
    pub fn parse(expression: &str) -> Result<Self> {
        for operator in Operator::SCAN_ORDER {
            if let Some((column, literal)) = expression.split_once(operator.token()) {
                return Ok(Condition {
                    column: column.trim().to_string(),
                    operator,
                    literal: literal.trim().to_string(),
                });
            }
        }
        Err(QueryError::InvalidExpression(expression.to_string()))
    }

    /// Whether `row` satisfies the condition.
    ///
    /// `=` compares raw strings exactly. Ordering operators compare both
    /// sides as numbers and fail when either side is not numeric.
    pub fn matches(&self, row: &Row) -> Result<bool> {
        let cell = row.require(&self.column)?;

        let compare: fn(f64, f64) -> bool = match self.operator {
            Operator::Eq => return Ok(cell == self.literal),
            Operator::Gt => |a, b| a > b,
            Operator::Lt => |a, b| a < b,
            Operator::Ge => |a, b| a >= b,
            Operator::Le => |a, b| a <= b,
        };
        Ok(compare(self.numeric(cell)?, self.numeric(&self.literal)?))
    }

    fn numeric(&self, value: &str) -> Result<f64> {
        parse_number(value).ok_or_else(|| QueryError::NonNumericComparison {
            column: self.column.clone(),
            value: value.to_string(),
        })
    }

    /// Rows satisfying the condition, in input order.
    pub fn apply(&self, rows: &[Row]) -> Result<Vec<Row>> {
        let mut kept = Vec::new();
        for row in rows {
            if self.matches(row)? {
                kept.push(row.clone());
            }
        }
        debug!("filter {self}: kept {} of {} rows", kept.len(), rows.len());
        Ok(kept)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.operator, self.literal)
    }
}

/// Parse `expression` and filter `rows` with it.
pub fn filter_rows(expression: &str, rows: &[Row]) -> Result<Vec<Row>> {
    Condition::parse(expression)?.apply(rows)
}
