use std::path::Path;

use ahash::AHashMap as HashMap;
use itertools::izip;
use polars::prelude::*;
use tracing::{debug, info, info_span, instrument};

use crate::{
    error::{DataError, Result},
    query::{ID_COLUMN, RowQuery},
    raw,
    row::Row,
};

const NAME_COLUMN: &str = "name";
const COUNTRY_COLUMN: &str = "country";
const LATITUDE_COLUMN: &str = "latitude";
const LONGITUDE_COLUMN: &str = "longitude";

const REQUIRED_COLUMNS: [&str; 4] = [ID_COLUMN, NAME_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN];

/// Tables held as polars frames, one normalized `DataFrame` per table.
///
/// Normalized frames always carry `id`, `name`, `country`, `latitude` and
/// `longitude`, in that order, with string ids and `f64` coordinates. Queries
/// run as lazy filters over a cheap clone of the frame, so the row order seen
/// by callers is the order the table was loaded in.
#[derive(Clone, Default)]
pub struct FrameStore {
    tables: HashMap<String, DataFrame>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the named tables from `dir`, one `{table}.parquet` or
    /// `{table}.csv` file each.
    #[instrument(name = "Load FrameStore", level = "info", skip_all)]
    pub fn from_dir(dir: impl AsRef<Path>, tables: &[&str]) -> Result<Self> {
        let dir = dir.as_ref();
        info!(dir = ?dir, ?tables, "Loading tables");
        let t_load = std::time::Instant::now();
        let mut store = Self::new();
        for table in tables {
            let path = raw::locate_table_file(dir, table)?;
            store.insert_table(*table, raw::read_table(&path)?)?;
        }
        info!(
            tables = tables.len(),
            elapsed = ?t_load.elapsed(),
            "FrameStore loaded"
        );
        Ok(store)
    }

    /// Adds or replaces a table.
    pub fn with_table(mut self, name: impl Into<String>, lf: LazyFrame) -> Result<Self> {
        self.insert_table(name, lf)?;
        Ok(self)
    }

    pub fn insert_table(&mut self, name: impl Into<String>, lf: LazyFrame) -> Result<()> {
        let name = name.into();
        let df = {
            let _span = info_span!("Normalize table", table = %name).entered();
            normalize_table(&name, lf)?
        };
        info!(table = %name, rows = df.height(), "Table ready");
        self.tables.insert(name, df);
        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&DataFrame> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Writes every table to `{dir}/{table}.parquet`.
    pub fn persist(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        for (name, df) in &self.tables {
            let mut df = df.clone();
            raw::write_table_parquet(&mut df, &dir.join(name).with_extension("parquet"))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.tables.iter().map(|(name, df)| (name, df.height())))
            .finish()
    }
}

impl crate::RowSource for FrameStore {
    #[instrument(name = "FrameStore query", level = "debug", skip_all, fields(table = query.table))]
    fn query_rows(&self, query: &RowQuery<'_>) -> Result<Vec<Row>> {
        let df = self
            .tables
            .get(query.table)
            .ok_or_else(|| DataError::UnknownTable(query.table.to_owned()))?;

        let lf = df.clone().lazy();
        let lf = match query.predicate() {
            Some(predicate) => lf.filter(predicate),
            None => lf,
        };
        let matched = lf.collect()?;
        debug!(scanned = df.height(), matched = matched.height(), "Filtered rows");
        rows_from_frame(&matched)
    }
}

fn normalize_table(name: &str, lf: LazyFrame) -> Result<DataFrame> {
    let df = lf.collect()?;
    let has_column = |column: &str| {
        df.get_column_names()
            .iter()
            .any(|existing| existing.as_str() == column)
    };

    if let Some(missing) = REQUIRED_COLUMNS.into_iter().find(|c| !has_column(c)) {
        return Err(DataError::MissingColumn {
            table: name.to_owned(),
            column: missing,
        });
    }

    let country = if has_column(COUNTRY_COLUMN) {
        col(COUNTRY_COLUMN).cast(DataType::String)
    } else {
        lit(NULL).cast(DataType::String).alias(COUNTRY_COLUMN)
    };

    Ok(df
        .lazy()
        .select([
            col(ID_COLUMN).cast(DataType::String),
            col(NAME_COLUMN).cast(DataType::String),
            country,
            col(LATITUDE_COLUMN).cast(DataType::Float64),
            col(LONGITUDE_COLUMN).cast(DataType::Float64),
        ])
        .filter(
            col(ID_COLUMN)
                .is_not_null()
                .and(col(NAME_COLUMN).is_not_null())
                .and(col(LATITUDE_COLUMN).is_not_null())
                .and(col(LONGITUDE_COLUMN).is_not_null()),
        )
        .collect()?)
}

fn rows_from_frame(df: &DataFrame) -> Result<Vec<Row>> {
    let ids = df.column(ID_COLUMN)?.str()?;
    let names = df.column(NAME_COLUMN)?.str()?;
    let countries = df.column(COUNTRY_COLUMN)?.str()?;
    let latitudes = df.column(LATITUDE_COLUMN)?.f64()?;
    let longitudes = df.column(LONGITUDE_COLUMN)?.f64()?;

    Ok(izip!(ids, names, countries, latitudes, longitudes)
        .filter_map(|(id, name, country, latitude, longitude)| {
            Some(Row {
                id: id?.to_owned(),
                name: name?.to_owned(),
                country: country.map(str::to_owned),
                latitude: latitude?,
                longitude: longitude?,
            })
        })
        .collect())
}
