//! Filesystem storage for favorites.
//!
//! The whole collection lives in a single JSON document of the form
//! `{"favorites": [...]}`.

mod document;
pub use document::StorageError;

pub mod store;
pub use store::FavoritesStore;
