use crate::data::aggregate::AggregationResult;
use crate::data::model::Row;

/// Printed instead of a table when no rows are left.
pub const NO_DATA_NOTICE: &str = "No data matches the filter criteria";

// ---------------------------------------------------------------------------
// QueryOutput – what a query run produces
// ---------------------------------------------------------------------------

/// Either the surviving rows or a single aggregated value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    RowSequence(Vec<Row>),
    SingleValue(AggregationResult),
}

/// Render an output as boxed text, ending with a newline.
pub fn render(output: &QueryOutput) -> String {
    match output {
        QueryOutput::RowSequence(rows) => render_rows(rows),
        QueryOutput::SingleValue(result) => render_single(result.key(), &result.value.to_string()),
    }
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn boxed_line(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    format!("| {} |", padded.join(" | "))
}

// ---------------------------------------------------------------------------
// Row table
// ---------------------------------------------------------------------------

/// Bordered table of `rows`, columns taken from the first row.
///
/// ```text
/// +----------------+
/// | name   | price |
/// +--------+-------+
/// | iphone | 999   |
/// +----------------+
/// ```
pub fn render_rows(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return format!("{NO_DATA_NOTICE}\n");
    };

    let headers: Vec<&str> = first.columns().collect();
    let widths: Vec<usize> = headers
        .iter()
        .map(|h| {
            rows.iter()
                .map(|row| text_width(row.get(h).unwrap_or("")))
                .fold(text_width(h), usize::max)
        })
        .collect();

    let total = widths.iter().sum::<usize>() + 3 * headers.len().saturating_sub(1) + 4;
    let border = format!("+{}+", "-".repeat(total - 2));
    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border.clone());
    lines.push(boxed_line(&headers, &widths));
    lines.push(separator);
    for row in rows {
        let cells: Vec<&str> = headers.iter().map(|h| row.get(h).unwrap_or("")).collect();
        lines.push(boxed_line(&cells, &widths));
    }
    lines.push(border);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// Single value
// ---------------------------------------------------------------------------

/// Two stacked one-row boxes, key above value, each sized to its own text.
pub fn render_single(key: &str, value: &str) -> String {
    let mut out = String::new();
    for text in [key, value] {
        let w = text_width(text);
        let border = format!("+{}+", "-".repeat(w + 2));
        out.push_str(&border);
        out.push('\n');
        out.push_str(&boxed_line(&[text], &[w]));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{AggregateValue, Operation};

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn table_layout() {
        let rows = vec![
            row(&[("name", "short"), ("value", "1")]),
            row(&[("name", "very long name"), ("value", "1000000")]),
        ];
        let expected = "\
+--------------------------+
| name           | value   |
+----------------+---------+
| short          | 1       |
| very long name | 1000000 |
+--------------------------+
";
        assert_eq!(render_rows(&rows), expected);
    }

    #[test]
    fn single_column_table() {
        let out = render_rows(&[row(&[("name", "test")])]);
        assert!(out.contains("| name |"));
        assert!(out.contains("| test |"));
    }

    #[test]
    fn widths_count_characters() {
        let out = render_rows(&[row(&[("city", "Zürich")])]);
        assert!(out.contains("| Zürich |"));
        assert!(out.contains("| city   |"));
    }

    #[test]
    fn long_values_are_not_truncated() {
        let name = "a".repeat(50);
        let value = "1".repeat(50);
        let out = render_rows(&[row(&[("name", name.as_str()), ("value", value.as_str())])]);
        assert!(out.contains(&name));
        assert!(out.contains(&value));
    }

    #[test]
    fn empty_rows_print_notice() {
        let out = render(&QueryOutput::RowSequence(Vec::new()));
        assert_eq!(out, "No data matches the filter criteria\n");
        assert!(!out.contains('+'));
    }

    #[test]
    fn single_value_boxes() {
        let out = render(&QueryOutput::SingleValue(AggregationResult {
            operation: Operation::Avg,
            value: AggregateValue::Number(123.45),
        }));
        let expected = "\
+-----+
| avg |
+-----+
+--------+
| 123.45 |
+--------+
";
        assert_eq!(out, expected);
    }
}
