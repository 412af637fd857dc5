//! Query engine over tabular files: load a table, then filter, sort and
//! aggregate it, rendering the result as boxed text.
//!
//! ```no_run
//! use rusty_query::{execute, QueryConfig};
//!
//! let config = QueryConfig::new("products.csv")
//!     .with_filter("rating>4.5")
//!     .with_order_by("price=desc");
//! execute(&config, &mut std::io::stdout()).unwrap();
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::QueryConfig;
pub use data::model::{Row, Table};
pub use error::QueryError;
pub use pipeline::{execute, run_query};
pub use render::QueryOutput;
