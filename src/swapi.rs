//! Client for the Star Wars reference-data API.
//!
//! Lookups are thin pass-throughs: a successful response is returned as the
//! raw JSON document, anything else becomes a [`FetchError`] or
//! [`SearchError`] that renders as the uniform error envelope.

mod client;
pub use client::{ClientBuildError, SwapiClient};

mod error;
pub use error::{FetchError, SearchError};
