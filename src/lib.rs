//! Star Wars reference data and a local favorites list.
//!
//! Two independent pieces, meant to be driven by a model-context-protocol
//! server or any other front end:
//!
//! - [`FavoritesStore`] keeps favorites in a single JSON document on disk.
//! - [`SwapiClient`] fetches raw documents from the reference-data API.
//!
//! Both report outcomes through the same [`Envelope`] shape: a success is
//! its payload, a failure is `{"error": ..., "message": ...}`.
//!
//! ```no_run
//! use favorites::{Envelope, FavoritesStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FavoritesStore::open("data/local_db.json")?;
//! let added = store.add("person", 1, "Luke")?;
//! println!("{}", Envelope::from(added).to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub use domain::{ApiConfig, Config, Favorite, InvalidItemType, ItemType};

pub mod envelope;
pub use envelope::{
    Added, Confirmation, Envelope, ErrorBody, FavoriteError, Listing, Rejection, Response,
    SearchResults,
};

pub mod storage;
pub use storage::{FavoritesStore, StorageError};

pub mod swapi;
pub use swapi::{ClientBuildError, FetchError, SearchError, SwapiClient};
