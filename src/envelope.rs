//! The success/error shape every operation reports through.
//!
//! Operations return a typed [`Response`]; wrapping it in an [`Envelope`]
//! gives the uniform JSON form callers branch on. A success serializes as
//! its payload, a failure as `{"error": <kind>, "message": <text>}` with an
//! optional `status_code`.

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::Favorite;

/// The result of a favorites operation.
///
/// The error side carries only recoverable conditions. Fatal storage
/// failures are reported separately by the store.
pub type Response<T> = Result<T, FavoriteError>;

/// An error that can be reported through an [`Envelope`].
pub trait Rejection: std::error::Error {
    /// Short machine-matchable description, used as the `error` field.
    fn kind(&self) -> &'static str;

    /// HTTP status associated with the error, if any.
    fn status_code(&self) -> Option<u16> {
        None
    }
}

/// Recoverable errors raised by favorites operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoriteError {
    /// The requested type is not one of the known resource kinds.
    #[error("Item type must be one of: person, planet, starship, film")]
    InvalidType(String),

    /// A favorite with the same type and id already exists.
    #[error("{} with ID {item_id} is already in favorites", capitalize(.item_type))]
    DuplicateEntry {
        /// The type of the existing favorite.
        item_type: String,
        /// The id of the existing favorite.
        item_id: u64,
    },

    /// No favorite matches the given type and id.
    #[error("{} with ID {item_id} not found in favorites", capitalize(.item_type))]
    NotFound {
        /// The type that was looked up.
        item_type: String,
        /// The id that was looked up.
        item_id: u64,
    },
}

impl FavoriteError {
    pub(crate) fn duplicate(item_type: impl Into<String>, item_id: u64) -> Self {
        Self::DuplicateEntry {
            item_type: item_type.into(),
            item_id,
        }
    }

    pub(crate) fn not_found(item_type: impl Into<String>, item_id: u64) -> Self {
        Self::NotFound {
            item_type: item_type.into(),
            item_id,
        }
    }
}

impl Rejection for FavoriteError {
    fn kind(&self) -> &'static str {
        match self {
            Self::InvalidType(_) => "Invalid item type",
            Self::DuplicateEntry { .. } => "Already exists",
            Self::NotFound { .. } => "Not found",
        }
    }
}

/// A tagged success-or-error value with the uniform wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T, E = FavoriteError> {
    /// The operation succeeded with this payload.
    Success(T),
    /// The operation was rejected.
    Failure(E),
}

impl<T, E> Envelope<T, E> {
    /// Whether this envelope carries an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Converts back into a [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the rejection if this is a [`Envelope::Failure`].
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T, E> Envelope<T, E>
where
    T: Serialize,
    E: Rejection,
{
    /// Renders the envelope as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<T, E> From<Result<T, E>> for Envelope<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> Serialize for Envelope<T, E>
where
    T: Serialize,
    E: Rejection,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(value) => value.serialize(serializer),
            Self::Failure(error) => ErrorBody::from(error).serialize(serializer),
        }
    }
}

/// The serialized form of a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The error kind.
    pub error: String,
    /// Human-readable description.
    pub message: String,
    /// HTTP status, for errors that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<E: Rejection> From<&E> for ErrorBody {
    fn from(error: &E) -> Self {
        Self {
            error: error.kind().to_string(),
            message: error.to_string(),
            status_code: error.status_code(),
        }
    }
}

/// Payload of a successful add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Added {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The record that was stored.
    pub favorite: Favorite,
}

impl Added {
    pub(crate) fn new(favorite: Favorite) -> Self {
        Self {
            success: true,
            message: format!(
                "Added {} ID {} to favorites",
                favorite.item_type(),
                favorite.item_id()
            ),
            favorite,
        }
    }
}

/// Payload of a successful mutation that has nothing else to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl Confirmation {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Payload of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Number of favorites returned.
    pub count: usize,
    /// The favorites, in insertion order.
    pub favorites: Vec<Favorite>,
}

impl From<Vec<Favorite>> for Listing {
    fn from(favorites: Vec<Favorite>) -> Self {
        Self {
            count: favorites.len(),
            favorites,
        }
    }
}

/// Payload of a notes search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The query as given.
    pub query: String,
    /// Number of matches.
    pub count: usize,
    /// Matching favorites, in insertion order.
    pub matches: Vec<Favorite>,
}

/// Upper-cases the first character, leaving the rest untouched.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
