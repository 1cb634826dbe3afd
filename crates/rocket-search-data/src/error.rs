use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;
pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: &'static str },
    #[error("No parquet or csv file for table `{table}` in {dir}")]
    RequiredFilesNotFound { table: String, dir: PathBuf },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
