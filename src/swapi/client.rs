use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    domain::{ApiConfig, ItemType},
    swapi::{FetchError, SearchError},
};

/// Client for the reference-data API.
///
/// Each call issues a single GET with the configured timeout. There are no
/// retries and no caching.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

/// Error returned when the underlying HTTP client cannot be constructed.
#[derive(Debug, thiserror::Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

impl SwapiClient {
    /// Creates a client from the given API settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised, for
    /// example if the TLS backend fails to load.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a character.
    ///
    /// # Errors
    ///
    /// See [`SwapiClient::fetch`].
    pub async fn person(&self, id: u64) -> Result<Value, FetchError> {
        self.fetch(ItemType::Person, id).await
    }

    /// Fetches a planet.
    ///
    /// # Errors
    ///
    /// See [`SwapiClient::fetch`].
    pub async fn planet(&self, id: u64) -> Result<Value, FetchError> {
        self.fetch(ItemType::Planet, id).await
    }

    /// Fetches a starship.
    ///
    /// # Errors
    ///
    /// See [`SwapiClient::fetch`].
    pub async fn starship(&self, id: u64) -> Result<Value, FetchError> {
        self.fetch(ItemType::Starship, id).await
    }

    /// Fetches a film.
    ///
    /// # Errors
    ///
    /// See [`SwapiClient::fetch`].
    pub async fn film(&self, id: u64) -> Result<Value, FetchError> {
        self.fetch(ItemType::Film, id).await
    }

    /// Fetches a single resource by kind and id.
    ///
    /// # Errors
    ///
    /// - [`FetchError::NotFound`] if the API answers 404
    /// - [`FetchError::Http`] for any other error status
    /// - [`FetchError::Request`] if the request could not be completed,
    ///   including timeouts
    /// - [`FetchError::Unexpected`] if the body is not JSON
    pub async fn fetch(&self, kind: ItemType, id: u64) -> Result<Value, FetchError> {
        let endpoint = kind.endpoint();
        let url = format!("{}/{endpoint}/{id}/", self.base_url);

        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { endpoint, id });
        }
        if let Err(e) = response.error_for_status_ref() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;
        serde_json::from_slice(&body).map_err(FetchError::Unexpected)
    }

    /// Runs a free-text search against a collection endpoint, such as
    /// `people` or `planets`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Failed`] if the request fails or the API answers
    ///   with an error status
    /// - [`SearchError::Malformed`] if the body is not JSON
    pub async fn search(&self, endpoint: &str, query: &str) -> Result<Value, SearchError> {
        let url = format!("{}/{endpoint}/", self.base_url);

        tracing::debug!("GET {url} search={query}");

        let response = self
            .client
            .get(&url)
            .query(&[("search", query)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(SearchError::Failed)?;

        let body = response.bytes().await.map_err(SearchError::Failed)?;
        serde_json::from_slice(&body).map_err(SearchError::Malformed)
    }
}
