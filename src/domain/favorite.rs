use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ItemType;

/// A user-saved reference to a remote resource, with optional notes.
///
/// The pair of [`ItemType`] and id identifies a favorite. The store
/// guarantees that no two favorites share the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(rename = "type")]
    item_type: ItemType,

    #[serde(rename = "id")]
    item_id: u64,

    #[serde(default)]
    notes: String,

    #[serde(deserialize_with = "deserialize_timestamp")]
    added_at: DateTime<Utc>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    updated_at: Option<DateTime<Utc>>,
}

impl Favorite {
    /// Creates a new favorite stamped with the current time.
    #[must_use]
    pub fn new(item_type: ItemType, item_id: u64, notes: impl Into<String>) -> Self {
        Self {
            item_type,
            item_id,
            notes: notes.into(),
            added_at: Utc::now(),
            updated_at: None,
        }
    }

    /// The kind of resource this favorite points at.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// The remote id of the resource.
    #[must_use]
    pub const fn item_id(&self) -> u64 {
        self.item_id
    }

    /// Free-form notes attached to the favorite.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// When the favorite was created.
    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// When the notes were last replaced, if ever.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Replaces the notes and stamps `updated_at`.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.updated_at = Some(Utc::now());
    }

    /// Whether this favorite is identified by the given raw type and id.
    ///
    /// The type is compared as a string so that callers holding an
    /// unvalidated type simply find no match.
    #[must_use]
    pub fn is(&self, item_type: &str, item_id: u64) -> bool {
        self.item_type.as_str() == item_type && self.item_id == item_id
    }

    /// Case-insensitive substring match against the notes.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn notes_contain(&self, needle: &str) -> bool {
        self.notes.to_lowercase().contains(needle)
    }
}

/// Parses RFC 3339, falling back to naive ISO 8601 interpreted as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
        })
        .ok()
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_timestamp(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
        })
        .transpose()
}
