/// Data layer: core types, loading, and the query stages.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Row>, header order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  `price>=1000` → kept rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sort     │  `price=desc` → reordered rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  `price=avg` → single value
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
