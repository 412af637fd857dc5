use std::fs::File;
use std::path::Path;

use arrow::util::display::{ArrayFormatter, FormatOptions};
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Row, Table};
use crate::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` / no extension – header line followed by records
/// * `.json`    – `[{ "name": "iphone", "price": 999, ... }, ...]`
/// * `.parquet` – any flat schema; every cell is formatted to text
///
/// Every cell of the resulting table is a string, whatever the source type.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "" | "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(QueryError::UnsupportedFormat(other.to_string())),
    }?;

    info!(
        "loaded {} rows ({} columns) from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

fn unavailable(path: &Path, source: std::io::Error) -> QueryError {
    QueryError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, optionally quoted fields.
///
/// Ragged records are tolerated: a short record only carries the cells it
/// has (so queries on the absent columns fail with `MissingColumn`), extra
/// cells beyond the header are dropped.
fn load_csv(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| unavailable(path, e))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| QueryError::malformed(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| QueryError::malformed(path, e))?;

        if record.len() != headers.len() {
            warn!(
                "{}: record {row_no} has {} fields, header has {}",
                path.display(),
                record.len(),
                headers.len()
            );
        }

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "name": "iphone", "brand": "apple", "price": 999, "rating": 4.9 },
///   ...
/// ]
/// ```
///
/// Key order is preserved. Columns first seen in later records are appended
/// to the header.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| QueryError::malformed(path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| QueryError::malformed(path, "expected top-level JSON array"))?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| QueryError::malformed(path, format!("row {i} is not a JSON object")))?;

        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }

        let row: Row = obj
            .iter()
            .map(|(key, val)| (key.as_str(), json_to_cell(val)))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file, formatting every value with Arrow's display rules.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Nulls become empty cells.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| unavailable(path, e))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| QueryError::malformed(path, e))?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let reader = builder.build().map_err(|e| QueryError::malformed(path, e))?;
    let options = FormatOptions::default();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| QueryError::malformed(path, e))?;

        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| QueryError::malformed(path, e))?;

        for row in 0..batch.num_rows() {
            let record: Row = columns
                .iter()
                .zip(&formatters)
                .map(|(name, fmt)| (name.as_str(), fmt.value(row).to_string()))
                .collect();
            rows.push(record);
        }
    }

    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_honours_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "quoted.csv",
            "\"name\",\"brand\",\"price\"\n\"ipho,ne\",\"apple\",\"999\"\n",
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, ["name", "brand", "price"]);
        assert_eq!(table.rows[0].get("name"), Some("ipho,ne"));
    }

    #[test]
    fn csv_keeps_whitespace_in_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "ws.csv", "name,brand\n iphone , apple \n");
        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].get("name"), Some(" iphone "));
    }

    #[test]
    fn csv_short_record_lacks_trailing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "ragged.csv", "name,price\niphone,999\nbroken\n");
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("price"), None);
    }

    #[test]
    fn header_only_and_empty_files_give_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let header_only = write_file(&dir, "empty.csv", "name,brand\n");
        let table = load_file(&header_only).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, ["name", "brand"]);

        let zero_bytes = write_file(&dir, "zero.csv", "");
        assert!(load_file(&zero_bytes).unwrap().is_empty());
    }

    #[test]
    fn json_records_are_stringified_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "rows.json",
            r#"[{"name": "iphone", "price": 999, "rating": 4.9, "used": false, "note": null}]"#,
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, ["name", "price", "rating", "used", "note"]);
        let row = &table.rows[0];
        assert_eq!(row.get("price"), Some("999"));
        assert_eq!(row.get("rating"), Some("4.9"));
        assert_eq!(row.get("used"), Some("false"));
        assert_eq!(row.get("note"), Some(""));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.json", r#"{"name": "iphone"}"#);
        assert!(matches!(
            load_file(&path),
            Err(QueryError::MalformedSource { .. })
        ));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.csv");
        assert!(matches!(
            load_file(&path),
            Err(QueryError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedFormat(ext) if ext == "xlsx"));
    }
}
