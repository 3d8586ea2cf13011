use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Favorite;

/// The on-disk shape of the favorites collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Document {
    #[serde(default, rename = "favorites")]
    records: Vec<Record>,
}

/// One entry of the collection.
///
/// Entries that don't decode as a [`Favorite`] are carried through
/// untouched so that rewriting the document never drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum Record {
    Favorite(Favorite),
    Unrecognised(Value),
}

impl Record {
    fn is(&self, item_type: &str, item_id: u64) -> bool {
        match self {
            Self::Favorite(favorite) => favorite.is(item_type, item_id),
            Self::Unrecognised(value) => {
                value.get("type").and_then(Value::as_str) == Some(item_type)
                    && value.get("id").and_then(Value::as_u64) == Some(item_id)
            }
        }
    }
}

impl Document {
    /// Reads the document at `path`.
    ///
    /// Empty, missing, or unparseable content yields an empty collection.
    /// Individual entries that aren't valid favorites are kept as-is and
    /// hidden from the favorites view. Only an IO failure other than the
    /// file being absent is an error.
    pub(crate) fn read(path: &Path) -> Result<Self, StorageError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No favorites document at {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Self>(&bytes) {
            Ok(document) => {
                let unrecognised = document
                    .records
                    .iter()
                    .filter(|r| matches!(r, Record::Unrecognised(_)))
                    .count();
                if unrecognised > 0 {
                    tracing::warn!(
                        "Ignoring {unrecognised} unrecognised entries in {}",
                        path.display()
                    );
                }
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable favorites document at {}: {e}",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// The valid favorites, in insertion order.
    pub(crate) fn favorites(&self) -> impl Iterator<Item = &Favorite> {
        self.records.iter().filter_map(|record| match record {
            Record::Favorite(favorite) => Some(favorite),
            Record::Unrecognised(_) => None,
        })
    }

    /// Consumes the document, yielding the valid favorites.
    pub(crate) fn into_favorites(self) -> Vec<Favorite> {
        self.records
            .into_iter()
            .filter_map(|record| match record {
                Record::Favorite(favorite) => Some(favorite),
                Record::Unrecognised(_) => None,
            })
            .collect()
    }

    /// Finds a valid favorite by type and id.
    pub(crate) fn find_mut(&mut self, item_type: &str, item_id: u64) -> Option<&mut Favorite> {
        self.records.iter_mut().find_map(|record| match record {
            Record::Favorite(favorite) if favorite.is(item_type, item_id) => Some(favorite),
            _ => None,
        })
    }

    /// Whether any entry, recognised or not, has this type and id.
    pub(crate) fn contains(&self, item_type: &str, item_id: u64) -> bool {
        self.records.iter().any(|r| r.is(item_type, item_id))
    }

    pub(crate) fn push(&mut self, favorite: Favorite) {
        self.records.push(Record::Favorite(favorite));
    }

    /// Removes every entry with this type and id, returning how many went.
    pub(crate) fn remove(&mut self, item_type: &str, item_id: u64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.is(item_type, item_id));
        before - self.records.len()
    }

    /// Overwrites the document at `path` in one write.
    ///
    /// Parent directories are created if they don't exist.
    pub(crate) fn write(&self, path: &Path) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(self)?;

        let write = |path: &Path| -> io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)
        };

        write(path).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A storage failure the store cannot recover from.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    #[error("Failed to read database at {}: {source}", path.display())]
    Read {
        /// The backing file.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// The backing file could not be written.
    #[error("Failed to write to database at {}: {source}", path.display())]
    Write {
        /// The backing file.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// The collection could not be encoded.
    #[error("Failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}
