use std::io::Write;

use anyhow::{Context, Result};
use log::debug;

use crate::config::QueryConfig;
use crate::data::aggregate::aggregate_rows;
use crate::data::filter::filter_rows;
use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::data::sort::sort_rows;
use crate::render::{render, QueryOutput};

// ---------------------------------------------------------------------------
// Query pipeline: filter → sort → aggregate
// ---------------------------------------------------------------------------

/// Run the configured stages over an already loaded table.
///
/// Stages run in a fixed order and the first failure aborts the rest. The
/// table itself is never modified.
pub fn run_query(table: &Table, config: &QueryConfig) -> crate::error::Result<QueryOutput> {
    let mut rows = None;

    if let Some(expr) = &config.filter {
        rows = Some(filter_rows(expr, table.rows())?);
    }

    if let Some(expr) = &config.order_by {
        let input = rows.as_deref().unwrap_or(table.rows());
        rows = Some(sort_rows(expr, input)?);
    }

    let input = rows.as_deref().unwrap_or(table.rows());
    match &config.aggregate {
        Some(expr) => Ok(QueryOutput::SingleValue(aggregate_rows(expr, input)?)),
        None => Ok(QueryOutput::RowSequence(
            rows.unwrap_or_else(|| table.rows().to_vec()),
        )),
    }
}

/// Load the configured file, run the query and write the rendered result.
///
/// Rendering completes before anything is written, so a failed run leaves
/// `out` untouched.
pub fn execute<W: Write>(config: &QueryConfig, out: &mut W) -> Result<()> {
    let table = load_file(&config.file)?;
    let output = run_query(&table, config)?;
    let text = render(&output);
    debug!("rendered {} bytes", text.len());
    out.write_all(text.as_bytes()).context("writing output")?;
    out.flush().context("writing output")?;
    Ok(())
}
