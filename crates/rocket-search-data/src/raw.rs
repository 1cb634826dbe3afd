//! Reading and writing table files.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use super::{DataError, Result};

const PARQUET_EXTENSION: &str = "parquet";
const CSV_EXTENSION: &str = "csv";

/// Scans a CSV table with every column read as text.
///
/// Nothing is type-inferred, so ids such as `007` keep their leading zeros.
/// Coordinates are cast to `f64` when the table is normalized.
pub fn read_table_csv(path: impl AsRef<Path>) -> Result<LazyFrame> {
    Ok(LazyCsvReader::new(path)
        .with_separator(b',')
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?)
}

pub fn read_table_parquet(path: impl AsRef<Path>) -> Result<LazyFrame> {
    Ok(LazyFrame::scan_parquet(path, Default::default())?)
}

/// Finds `{table}.parquet` or, failing that, `{table}.csv` in `dir`.
pub fn locate_table_file(dir: &Path, table: &str) -> Result<PathBuf> {
    [PARQUET_EXTENSION, CSV_EXTENSION]
        .iter()
        .map(|extension| dir.join(table).with_extension(extension))
        .find(|path| path.exists())
        .ok_or_else(|| DataError::RequiredFilesNotFound {
            table: table.to_owned(),
            dir: dir.to_path_buf(),
        })
}

/// Scans a table file, choosing the reader from its extension.
pub fn read_table(path: &Path) -> Result<LazyFrame> {
    info!(path = ?path.file_name(), "Reading table");
    match path.extension().and_then(|e| e.to_str()) {
        Some(PARQUET_EXTENSION) => read_table_parquet(path),
        _ => read_table_csv(path),
    }
}

/// Writes a table as CSV with a header row, quoting fields as needed.
pub fn write_table_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    info!(path = ?path.file_stem(), rows = df.height(), "Saved to csv file");
    Ok(())
}

pub fn write_table_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let sink_time = std::time::Instant::now();
    let mut file = std::fs::File::create(path)?;
    ParquetWriter::new(&mut file).finish(df)?;
    info!(
        path = ?path.file_stem(),
        rows = df.height(),
        sink_time = ?sink_time.elapsed(),
        "Saved to parquet file"
    );
    Ok(())
}
