//! The proximity search pipeline.
//!
//! A search runs in three stages that share no state between calls:
//! the candidate filter reads matching rows from storage and annotates them
//! with their distance from the reference point, the ranker orders and
//! truncates them, and the entity adapter renders the uniform results.

pub use error::SearchError;
mod adapter;
mod filter;
mod rank;
mod request;

pub use adapter::{CITY, DisplayTemplate, EntityAdapter, STARPORT};
pub(crate) use error::Result;
pub use filter::{Candidate, select_candidates};
pub use rank::rank_candidates;
pub use request::{SearchRequest, SearchResult};

mod error {
    use thiserror::Error;

    use crate::geo::CoordinateError;

    #[derive(Error, Debug)]
    pub enum SearchError {
        #[error("Search limit must be at least 1")]
        InvalidLimit,
        #[error("Search limit {limit} exceeds the maximum of {max}")]
        LimitTooLarge { limit: usize, max: usize },
        #[error("Invalid reference point: {0}")]
        Coordinate(#[from] CoordinateError),
        #[error("Storage error: {0}")]
        Storage(#[from] rocket_search_data::DataError),
    }
    pub type Result<T> = std::result::Result<T, SearchError>;
}
