//! The [`ProximitySearcher`] facade.
//!
//! A searcher owns a storage collaborator and a [`SearchConfig`] and runs the
//! filter, rank and render stages for each request. It keeps no state between
//! calls, so one searcher can serve any number of threads.
//!
//! ```rust
//! use rocket_search::{GeoPoint, ProximitySearcher, TestDataConfig};
//!
//! let searcher = ProximitySearcher::new_sample(&TestDataConfig::sample())?;
//! let request = searcher
//!     .request("port")
//!     .near(GeoPoint::new(40.7765868, -111.9905245)?);
//! let starports = searcher.find_closest_starports(&request)?;
//! assert_eq!(starports[0].display_name, "Wasatch Skyport");
//! assert_eq!(starports[0].distance, Some(0.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{num::NonZeroUsize, path::Path};

use rayon::prelude::*;
use rocket_search_data::{
    CITIES_TABLE, DATA_DIR, FrameStore, RowSource, STARPORTS_TABLE, TestDataConfig, test_data,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::SearchConfig,
    error::Result,
    search::{
        CITY, Candidate, EntityAdapter, STARPORT, SearchError, SearchRequest, SearchResult,
        rank_candidates, select_candidates,
    },
};

pub type SearchResults = Vec<SearchResult>;
pub type SearchResultsBatch = Vec<Vec<SearchResult>>;

/// Runs proximity searches against a storage collaborator.
#[derive(Debug, Clone)]
pub struct ProximitySearcher<S = FrameStore> {
    store: S,
    config: SearchConfig,
}

impl ProximitySearcher<FrameStore> {
    /// Load the city and starport tables from `dir`.
    #[instrument(name = "Load ProximitySearcher", level = "info", skip_all)]
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let t_init = std::time::Instant::now();
        let store = FrameStore::from_dir(dir, &[CITIES_TABLE, STARPORTS_TABLE])?;
        info!(
            elapsed_seconds = ?t_init.elapsed(),
            "ProximitySearcher initialization complete"
        );
        Ok(Self::new(store))
    }

    /// Load tables from `ROCKET_DATA_DIR`, or `./rocket_data` when unset.
    pub fn from_default_data_dir() -> Result<Self> {
        Self::from_data_dir(DATA_DIR.as_path())
    }

    /// Searcher over the built-in fixture cities and starports.
    pub fn new_sample(config: &TestDataConfig) -> Result<Self> {
        Ok(Self::new(test_data::sample_frame_store(config)?))
    }
}

impl<S: RowSource> ProximitySearcher<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// A request for `query_text` using the configured default limit.
    pub fn request(&self, query_text: impl Into<String>) -> SearchRequest {
        SearchRequest::new(query_text, self.config.default_limit)
    }

    /// Closest cities, matching the query against name or country.
    pub fn find_closest_cities(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.search(&CITY, request)
    }

    /// Closest starports, matching the query against name.
    pub fn find_closest_starports(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.search(&STARPORT, request)
    }

    /// Run a request against any entity table.
    pub fn search(&self, adapter: &EntityAdapter, request: &SearchRequest) -> Result<SearchResults> {
        Ok(self
            .search_candidates(adapter, request)?
            .into_iter()
            .map(|candidate| candidate.into_result(adapter))
            .collect())
    }

    /// Like [`search`](Self::search) but returns the ranked rows themselves,
    /// for callers that need fields beyond the display name.
    #[instrument(
        name = "Proximity search",
        level = "debug",
        skip_all,
        fields(table = adapter.table, query = %request.query_text, limit = request.limit)
    )]
    pub fn search_candidates(
        &self,
        adapter: &EntityAdapter,
        request: &SearchRequest,
    ) -> Result<Vec<Candidate>> {
        let limit = self.validate(request)?;
        let candidates =
            select_candidates(&self.store, adapter, request, self.config.case_sensitive)?;
        let ranked = rank_candidates(candidates, limit);
        debug!(results = ranked.len(), "Search complete");
        Ok(ranked)
    }

    /// Run many requests in parallel, returning results in request order.
    ///
    /// The first failing request fails the whole batch.
    #[instrument(name = "Bulk proximity search", level = "info", skip_all, fields(table = adapter.table, requests = requests.len()))]
    pub fn search_bulk(
        &self,
        adapter: &EntityAdapter,
        requests: &[SearchRequest],
    ) -> Result<SearchResultsBatch> {
        let t_bulk = std::time::Instant::now();
        let results = requests
            .par_iter()
            .map(|request| self.search(adapter, request))
            .collect::<Result<SearchResultsBatch>>()?;
        info!(elapsed = ?t_bulk.elapsed(), "Bulk search complete");
        Ok(results)
    }

    fn validate(&self, request: &SearchRequest) -> Result<NonZeroUsize> {
        let limit = NonZeroUsize::new(request.limit).ok_or(SearchError::InvalidLimit)?;
        if request.limit > self.config.max_limit {
            warn!(limit = request.limit, max = self.config.max_limit, "Rejecting oversized limit");
            return Err(SearchError::LimitTooLarge {
                limit: request.limit,
                max: self.config.max_limit,
            }
            .into());
        }
        if let Some(point) = &request.reference_point {
            point.validate().map_err(SearchError::from)?;
        }
        Ok(limit)
    }
}
