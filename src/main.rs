use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rusty_query::{execute, QueryConfig};

/// Filter, sort and aggregate a CSV, JSON or Parquet table.
#[derive(Debug, Parser)]
#[command(name = "rusty-query", version, about)]
struct Cli {
    /// Path to the input file
    #[arg(long)]
    file: PathBuf,

    /// Filter condition (e.g. "rating>4.5")
    #[arg(long = "where", value_name = "CONDITION")]
    filter: Option<String>,

    /// Sort by column (e.g. "rating=desc")
    #[arg(long, value_name = "COLUMN=asc|desc")]
    order_by: Option<String>,

    /// Aggregation (e.g. "price=avg")
    #[arg(long, value_name = "COLUMN=avg|min|max|sum")]
    aggregate: Option<String>,
}

impl From<Cli> for QueryConfig {
    fn from(cli: Cli) -> Self {
        QueryConfig {
            file: cli.file,
            filter: cli.filter,
            order_by: cli.order_by,
            aggregate: cli.aggregate,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = QueryConfig::from(Cli::parse());
    let mut stdout = std::io::stdout().lock();

    match execute(&config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
