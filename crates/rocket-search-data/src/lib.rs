//! Storage layer for the Rocket Rental proximity search engine.
//!
//! The search engine never talks to a database directly. It sends a
//! [`RowQuery`] to something implementing [`RowSource`] and gets plain
//! [`Row`] snapshots back. Two sources ship with this crate:
//!
//! - [`FrameStore`]: tables held as polars frames, loaded from Parquet or CSV
//!   files, filtered with lazy expressions.
//! - [`MemoryStore`]: tables held as vectors of rows, handy for tests and
//!   for callers that already have their rows in memory.
use once_cell::sync::Lazy;
use std::path::PathBuf;

mod error;
pub mod frame;
pub mod query;
pub mod raw;
pub mod row;
pub mod store;
pub mod test_data;

pub use error::{DataError, Result};
pub use frame::FrameStore;
pub use query::{RowQuery, TextFilter};
pub use row::{Row, TextField};
pub use store::{MemoryStore, RowSource};
pub use test_data::TestDataConfig;

pub const CITIES_TABLE: &str = "cities";
pub const STARPORTS_TABLE: &str = "starports";

pub const DATA_DIR_DEFAULT: &str = "./rocket_data";

/// Directory holding the table files, `ROCKET_DATA_DIR` or `./rocket_data`.
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let dir = std::env::var("ROCKET_DATA_DIR").unwrap_or_else(|_| DATA_DIR_DEFAULT.to_string());
    PathBuf::from(dir)
});
