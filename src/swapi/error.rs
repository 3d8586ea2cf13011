use crate::envelope::{Rejection, capitalize};

/// Failure of a single-resource lookup.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The API has no resource with this id.
    #[error("{} with ID {id} does not exist", capitalize(.endpoint))]
    NotFound {
        /// The collection that was queried.
        endpoint: &'static str,
        /// The id that was requested.
        id: u64,
    },

    /// The API answered with an error status other than 404.
    #[error("{message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// Description of the status and URL.
        message: String,
    },

    /// The request could not be completed.
    #[error("Failed to fetch data from SWAPI: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("{0}")]
    Unexpected(#[source] serde_json::Error),
}

impl Rejection for FetchError {
    fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Not found",
            Self::Http { .. } => "HTTP error",
            Self::Request(_) => "Request failed",
            Self::Unexpected(_) => "Unexpected error",
        }
    }

    fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a free-text search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request failed or the API answered with an error status.
    #[error("Failed to search SWAPI: {0}")]
    Failed(#[source] reqwest::Error),

    /// The response body was not valid JSON.
    ///
    /// Reported with the same kind as [`SearchError::Failed`]; unlike a
    /// lookup, a search has no separate "Unexpected error" outcome.
    #[error("Failed to search SWAPI: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl Rejection for SearchError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Failed(_) | Self::Malformed(_) => "Search failed",
        }
    }
}
