//! Rocket Search - proximity search for Rocket Rental
//!
//! Finds the cities and starports closest to a point. A search takes a
//! reference coordinate, a free-text query, a set of ids to leave out and a
//! result limit, and returns hits ordered by great-circle distance.
//!
//! # Quick Start
//!
//! ```rust
//! use rocket_search::{GeoPoint, ProximitySearcher, SearchRequest, TestDataConfig};
//!
//! // Searcher over the bundled fixture tables
//! let searcher = ProximitySearcher::new_sample(&TestDataConfig::minimal())?;
//!
//! // Cities matching "L", closest to a point just south-east of Salt Lake City
//! let request = SearchRequest::new("L", 10).near(GeoPoint::new(39.7765868, -110.9905245)?);
//! let cities = searcher.find_closest_cities(&request)?;
//! assert_eq!(cities[0].display_name, "Salt Lake City, United States");
//! assert_eq!(cities[1].display_name, "London, United Kingdom");
//!
//! // Leave London out
//! let cities = searcher.find_closest_cities(&request.exclude("london"))?;
//! assert_eq!(cities.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! - **Candidate filter**: rows whose name (or country, for cities) contains
//!   the query, case-insensitively, minus the excluded ids.
//! - **Distance**: spherical law of cosines, in statute miles.
//! - **Ranking**: stable sort by distance, then truncation to the limit.
//!
//! Storage is pluggable through [`RowSource`]: the polars-backed
//! [`FrameStore`] loads tables from Parquet or CSV files, and
//! [`MemoryStore`] holds rows in plain vectors.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
pub mod geo;
mod search;

pub use crate::core::{ProximitySearcher, SearchResults, SearchResultsBatch};

pub use config::{SearchConfig, SearchConfigBuilder};
pub use geo::{GeoPoint, great_circle_miles};
pub use polars;
pub use rocket_search_data as data;
pub use rocket_search_data::{
    DataError, FrameStore, MemoryStore, Row, RowQuery, RowSource, TestDataConfig, TextField,
    TextFilter,
};
pub use search::{
    CITY, Candidate, DisplayTemplate, EntityAdapter, STARPORT, SearchError, SearchRequest,
    SearchResult, rank_candidates, select_candidates,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the search engine.
///
/// Sets up a `tracing` fmt subscriber filtered by `RUST_LOG` when present,
/// otherwise by `level`. Only the first call installs anything.
///
/// # Examples
///
/// ```rust
/// use rocket_search::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), rocket_search::error::RocketSearchError>(())
/// ```
pub fn init_logging(
    level: impl Into<LevelFilter>,
) -> Result<&'static (), error::RocketSearchError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("polars=warn".parse()?)
            .add_directive("rayon=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
