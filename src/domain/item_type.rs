use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A kind of Star Wars resource.
///
/// This is both the `type` of a favorite and the selector for the remote
/// API endpoint it lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A character, served from `people/`.
    Person,
    /// A planet, served from `planets/`.
    Planet,
    /// A starship, served from `starships/`.
    Starship,
    /// A film, served from `films/`.
    Film,
}

impl ItemType {
    /// Every resource kind, in canonical order.
    pub const ALL: [Self; 4] = [Self::Person, Self::Planet, Self::Starship, Self::Film];

    /// The lowercase name used in favorites and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Planet => "planet",
            Self::Starship => "starship",
            Self::Film => "film",
        }
    }

    /// The path segment of the remote API collection for this kind.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Person => "people",
            Self::Planet => "planets",
            Self::Starship => "starships",
            Self::Film => "films",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = InvalidItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidItemType(s.to_string()))
    }
}

impl TryFrom<&str> for ItemType {
    type Error = InvalidItemType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Error returned when a string is not one of the known resource kinds.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid item type '{0}': must be one of person, planet, starship, film")]
pub struct InvalidItemType(pub String);
