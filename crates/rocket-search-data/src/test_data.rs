use polars::prelude::*;
use tempfile::TempDir;
use tracing::info;

use super::{
    CITIES_TABLE, STARPORTS_TABLE,
    error::Result,
    frame::FrameStore,
    raw,
    row::Row,
    store::MemoryStore,
};

/// Configuration for fixture data generation
#[derive(Debug, Clone)]
pub struct TestDataConfig {
    /// Number of city rows to include
    pub city_rows: usize,
    /// Number of starport rows to include
    pub starport_rows: usize,
    /// Write starports without a country column, as the live table has none
    pub starports_without_country: bool,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self::sample()
    }
}

impl TestDataConfig {
    /// The two-city fixture: Salt Lake City and London
    pub fn minimal() -> Self {
        Self {
            city_rows: 2,
            starport_rows: 2,
            starports_without_country: true,
        }
    }

    /// Every fixture row
    pub fn sample() -> Self {
        Self {
            city_rows: CITIES.len(),
            starport_rows: STARPORTS.len(),
            starports_without_country: true,
        }
    }
}

// (id, name, country, latitude, longitude)
const CITIES: [(&str, &str, &str, f64, f64); 8] = [
    ("slc", "Salt Lake City", "United States", 40.7765868, -111.9905245),
    ("london", "London", "United Kingdom", 51.5282914, -0.3886621),
    ("provo", "Provo", "United States", 40.2338, -111.6585),
    ("lisbon", "Lisbon", "Portugal", 38.7223, -9.1393),
    ("luxembourg", "Luxembourg", "Luxembourg", 49.6116, 6.1319),
    ("houston", "Houston", "United States", 29.7604, -95.3698),
    ("almaty", "Almaty", "Kazakhstan", 43.2220, 76.8512),
    ("cayenne", "Cayenne", "French Guiana", 4.9224, -52.3135),
];

// (id, name, latitude, longitude)
const STARPORTS: [(&str, &str, f64, f64); 6] = [
    ("bonneville", "Bonneville Launch Complex", 40.76, -113.89),
    ("thames", "Thames Orbital", 51.50, 0.05),
    ("kourou", "Kourou Spaceport", 5.236, -52.768),
    ("baikonur", "Baikonur Cosmodrome", 45.965, 63.305),
    ("canaveral", "Cape Canaveral Station", 28.392, -80.605),
    ("wasatch", "Wasatch Skyport", 40.7765868, -111.9905245),
];

pub fn city_rows(config: &TestDataConfig) -> Vec<Row> {
    CITIES
        .iter()
        .take(config.city_rows)
        .map(|&(id, name, country, lat, lon)| Row::new(id, name, lat, lon).with_country(country))
        .collect()
}

pub fn starport_rows(config: &TestDataConfig) -> Vec<Row> {
    STARPORTS
        .iter()
        .take(config.starport_rows)
        .map(|&(id, name, lat, lon)| Row::new(id, name, lat, lon))
        .collect()
}

fn rows_to_frame(rows: &[Row], with_country: bool) -> Result<DataFrame> {
    let mut columns = vec![
        Column::new("id".into(), rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()),
        Column::new("name".into(), rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()),
    ];
    if with_country {
        columns.push(Column::new(
            "country".into(),
            rows.iter().map(|r| r.country.as_deref()).collect::<Vec<_>>(),
        ));
    }
    columns.push(Column::new(
        "latitude".into(),
        rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
    ));
    columns.push(Column::new(
        "longitude".into(),
        rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
    ));
    Ok(DataFrame::new(columns)?)
}

pub fn cities_frame(config: &TestDataConfig) -> Result<DataFrame> {
    rows_to_frame(&city_rows(config), true)
}

pub fn starports_frame(config: &TestDataConfig) -> Result<DataFrame> {
    rows_to_frame(&starport_rows(config), !config.starports_without_country)
}

/// Fixture tables behind the polars-backed store
pub fn sample_frame_store(config: &TestDataConfig) -> Result<FrameStore> {
    FrameStore::new()
        .with_table(CITIES_TABLE, cities_frame(config)?.lazy())?
        .with_table(STARPORTS_TABLE, starports_frame(config)?.lazy())
}

/// Fixture tables behind the in-memory store
pub fn sample_memory_store(config: &TestDataConfig) -> MemoryStore {
    MemoryStore::new()
        .with_table(CITIES_TABLE, city_rows(config))
        .with_table(STARPORTS_TABLE, starport_rows(config))
}

/// Writes `cities.csv` and `starports.csv` into a fresh temporary directory.
pub fn create_test_data_dir(config: &TestDataConfig) -> Result<TempDir> {
    info!("Creating test data with config: {:?}", config);
    let dir = TempDir::new()?;

    let mut cities = cities_frame(config)?;
    raw::write_table_csv(&mut cities, &dir.path().join(CITIES_TABLE).with_extension("csv"))?;

    let mut starports = starports_frame(config)?;
    raw::write_table_csv(
        &mut starports,
        &dir.path().join(STARPORTS_TABLE).with_extension("csv"),
    )?;

    Ok(dir)
}
