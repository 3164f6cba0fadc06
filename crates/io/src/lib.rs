//! # psm-io
//!
//! Parquet persistence for the proxy system model: simulated climate
//! series, age-depth chronology ensembles and forward proxy output.
//!
//! | Table          | Layout | Columns                                   | Schema metadata                       |
//! |----------------|--------|-------------------------------------------|---------------------------------------|
//! | simulation     | long   | `member`, `year`, `month`, `day`, `value` | `name`, `units`                       |
//! | chronology     | wide   | `depth`, one age column (ka) per member   | `depth_unit`                          |
//! | forward proxy  | long   | `depth`, `member`, `value`                | `name`, `site`, `lon`, `lat`, `depth_unit`, `units` |
//!
//! Missing values are stored as nulls and read back as NaN.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::path::Path;
//! use psm_io::{WriterConfig, read_chronology, read_simulation, write_forward_proxy};
//!
//! let sim = read_simulation(Path::new("tas.parquet"))?;
//! let chron = read_chronology(Path::new("core_chron.parquet"))?;
//! // ... run time2chron ...
//! write_forward_proxy(Path::new("out.parquet"), proxy.series(), &WriterConfig::default())?;
//! ```

mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{read_chronology, read_forward_proxy, read_simulation};
pub use writer::{
    Compression, WriterConfig, write_chronology, write_forward_proxy, write_simulation,
};
