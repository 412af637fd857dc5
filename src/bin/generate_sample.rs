use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use log::info;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a small product catalogue as CSV, JSON and Parquet.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Directory the sample files are written to
    #[arg(long, default_value = "sample_data")]
    out_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct Product {
    name: &'static str,
    brand: &'static str,
    price: i64,
    rating: f64,
}

const fn product(name: &'static str, brand: &'static str, price: i64, rating: f64) -> Product {
    Product {
        name,
        brand,
        price,
        rating,
    }
}

const CATALOGUE: [Product; 10] = [
    product("iphone 15 pro", "apple", 999, 4.9),
    product("galaxy s23 ultra", "samsung", 1199, 4.8),
    product("redmi note 12", "xiaomi", 199, 4.6),
    product("poco x5 pro", "xiaomi", 299, 4.4),
    product("iphone se", "apple", 429, 4.1),
    product("galaxy a54", "samsung", 349, 4.2),
    product("pixel 8", "google", 699, 4.7),
    product("pixel 7a", "google", 499, 4.5),
    product("nord 3", "oneplus", 449, 4.3),
    product("xperia 1 v", "sony", 1399, 4.0),
];

fn write_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for p in &CATALOGUE {
        writer.serialize(p).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, &CATALOGUE).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("brand", DataType::Utf8, false),
        Field::new("price", DataType::Int64, false),
        Field::new("rating", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(CATALOGUE.iter().map(|p| p.name))),
        Arc::new(StringArray::from_iter_values(CATALOGUE.iter().map(|p| p.brand))),
        Arc::new(Int64Array::from_iter_values(CATALOGUE.iter().map(|p| p.price))),
        Arc::new(Float64Array::from_iter_values(CATALOGUE.iter().map(|p| p.rating))),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("opening parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let csv_path = args.out_dir.join("products.csv");
    let json_path = args.out_dir.join("products.json");
    let parquet_path = args.out_dir.join("products.parquet");

    write_csv(&csv_path)?;
    write_json(&json_path)?;
    write_parquet(&parquet_path)?;

    info!("wrote {} products", CATALOGUE.len());
    println!(
        "Wrote {}, {} and {}",
        csv_path.display(),
        json_path.display(),
        parquet_path.display()
    );
    Ok(())
}
