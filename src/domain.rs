//! Domain models for the favorites store.
//!
//! This module contains the closed set of resource kinds, the favorite
//! record itself, and the configuration shared by the store and the
//! reference-data client.

/// The closed set of resource kinds that can be favorited or fetched.
pub mod item_type;
pub use item_type::{InvalidItemType, ItemType};

/// The favorite record persisted by the store.
pub mod favorite;
pub use favorite::Favorite;

mod config;
pub use config::{ApiConfig, Config};
