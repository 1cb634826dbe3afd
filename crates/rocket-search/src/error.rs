use thiserror::Error;

#[derive(Error, Debug)]
pub enum RocketSearchError {
    #[error("Search error: {0}")]
    SearchError(#[from] crate::search::SearchError),
    #[error("Data processing error: {0}")]
    DataProcessing(#[from] rocket_search_data::DataError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),
}

impl RocketSearchError {
    /// True when the search could not run because storage failed, as opposed
    /// to running and finding nothing.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::DataProcessing(_) | Self::SearchError(crate::search::SearchError::Storage(_))
        )
    }

    /// True when the request itself was rejected.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::SearchError(
                crate::search::SearchError::InvalidLimit
                    | crate::search::SearchError::LimitTooLarge { .. }
                    | crate::search::SearchError::Coordinate(_)
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, RocketSearchError>;
