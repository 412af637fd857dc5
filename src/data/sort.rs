use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::model::{parse_number, Row};
use crate::error::{QueryError, Result};

/// Split `<column>=<token>` at the first `=`, trimming both halves.
pub(crate) fn split_assignment(expression: &str) -> Result<(&str, &str)> {
    expression
        .split_once('=')
        .map(|(column, token)| (column.trim(), token.trim()))
        .ok_or_else(|| QueryError::InvalidExpression(expression.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = QueryError;

    /// Case-insensitive `asc` / `desc`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(QueryError::InvalidSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        })
    }
}

/// Parsed `<column>=<asc|desc>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: Direction,
}

/// Ordering key chosen once for the whole column.
enum SortKeys<'a> {
    Numeric(Vec<f64>),
    Text(Vec<&'a str>),
}

impl SortSpec {
    pub fn parse(expression: &str) -> Result<Self> {
        let (column, direction) = split_assignment(expression)?;
        Ok(SortSpec {
            column: column.to_string(),
            direction: direction.parse()?,
        })
    }

    /// A sorted copy of `rows`; equal keys keep their input order.
    ///
    /// The whole sort is numeric when every value of the column parses as a
    /// number, and lexicographic otherwise.
    pub fn sort(&self, rows: &[Row]) -> Result<Vec<Row>> {
        let cells = rows
            .iter()
            .map(|row| row.require(&self.column))
            .collect::<Result<Vec<&str>>>()?;

        let numbers: Option<Vec<f64>> = cells.iter().map(|c| parse_number(c)).collect();
        let keys = match numbers {
            Some(numbers) => SortKeys::Numeric(numbers),
            None => SortKeys::Text(cells),
        };

        let mut order: Vec<usize> = (0..rows.len()).collect();
        let compare = |a: &usize, b: &usize| -> Ordering {
            let ord = match &keys {
                SortKeys::Numeric(k) => k[*a].total_cmp(&k[*b]),
                SortKeys::Text(k) => k[*a].cmp(k[*b]),
            };
            match self.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        };
        order.sort_by(compare);

        debug!(
            "sort {}={}: {} rows, {} keys",
            self.column,
            self.direction,
            rows.len(),
            match keys {
                SortKeys::Numeric(_) => "numeric",
                SortKeys::Text(_) => "text",
            }
        );

        Ok(order.into_iter().map(|i| rows[i].clone()).collect())
    }
}

/// Parse `expression` and sort `rows` with it.
pub fn sort_rows(expression: &str, rows: &[Row]) -> Result<Vec<Row>> {
    SortSpec::parse(expression)?.sort(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[(&str, &str)]) -> Vec<Row> {
        values
            .iter()
            .map(|(name, price)| [("name", *name), ("price", *price)].into_iter().collect())
            .collect()
    }

    fn column<'a>(rows: &'a [Row], name: &str) -> Vec<&'a str> {
        rows.iter().map(|r| r.get(name).unwrap()).collect()
    }

    fn phones() -> Vec<Row> {
        rows(&[
            ("iphone", "999"),
            ("galaxy", "1199"),
            ("redmi", "199"),
            ("poco", "299"),
        ])
    }

    #[test]
    fn parse_normalises_direction() {
        let spec = SortSpec::parse(" price = DESC ").unwrap();
        assert_eq!(spec.column, "price");
        assert_eq!(spec.direction, Direction::Desc);
    }

    #[test]
    fn parse_rejects_unknown_direction_and_missing_separator() {
        assert!(matches!(
            SortSpec::parse("price=up"),
            Err(QueryError::InvalidSortDirection(d)) if d == "up"
        ));
        assert!(matches!(
            SortSpec::parse("price"),
            Err(QueryError::InvalidExpression(_))
        ));
    }

    #[test]
    fn numeric_column_sorts_numerically() {
        let data = phones();
        let sorted = sort_rows("price=asc", &data).unwrap();
        assert_eq!(column(&sorted, "price"), ["199", "299", "999", "1199"]);
        let sorted = sort_rows("price=desc", &data).unwrap();
        assert_eq!(column(&sorted, "price"), ["1199", "999", "299", "199"]);
    }

    #[test]
    fn mixed_column_falls_back_to_text() {
        let data = rows(&[("a", "10"), ("b", "9"), ("c", "n/a")]);
        let sorted = sort_rows("price=asc", &data).unwrap();
        assert_eq!(column(&sorted, "price"), ["10", "9", "n/a"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let data = rows(&[("a", "1"), ("b", "2"), ("c", "1")]);
        let asc = sort_rows("price=asc", &data).unwrap();
        assert_eq!(column(&asc, "name"), ["a", "c", "b"]);
        let desc = sort_rows("price=desc", &data).unwrap();
        assert_eq!(column(&desc, "name"), ["b", "a", "c"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sort_rows("name=asc", &phones()).unwrap();
        let twice = sort_rows("name=asc", &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn reversed_ascending_equals_descending() {
        let data = phones();
        let mut asc = sort_rows("price=asc", &data).unwrap();
        asc.reverse();
        assert_eq!(asc, sort_rows("price=desc", &data).unwrap());
    }

    #[test]
    fn input_is_left_untouched() {
        let data = phones();
        let before = data.clone();
        sort_rows("price=asc", &data).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn empty_input_and_missing_column() {
        assert!(sort_rows("price=asc", &[]).unwrap().is_empty());
        assert!(matches!(
            sort_rows("weight=asc", &phones()),
            Err(QueryError::MissingColumn(col)) if col == "weight"
        ));
    }
}
