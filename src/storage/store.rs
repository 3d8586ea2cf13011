//! A file-backed store of favorites.
//!
//! Every operation reads the whole collection from disk, applies one change
//! and writes the whole collection back. Nothing is cached between calls,
//! so edits made to the file by hand are picked up on the next call.
//!
//! The store assumes a single writer. Two processes mutating the same file
//! race, and the last write wins.

use std::path::{Path, PathBuf};

use crate::{
    domain::{Config, Favorite, ItemType},
    envelope::{Added, Confirmation, FavoriteError, Listing, Response, SearchResults},
    storage::document::{Document, StorageError},
};

/// A filesystem backed store of favorites.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    /// Opens the store backed by the file at `path`.
    ///
    /// If the file doesn't exist it is created, along with any missing
    /// parent directories, holding an empty collection. An existing file is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent and cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("Initialising favorites document at {}", path.display());
            Document::default().write(&path)?;
        }
        Ok(Self { path })
    }

    /// Opens the store at the default location under a project root,
    /// `data/local_db.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent and cannot be created.
    pub fn open_in(root: &Path) -> Result<Self, StorageError> {
        Self::from_config(&Config::default(), root)
    }

    /// Opens the store at the location named by `config`.
    ///
    /// A relative database path is resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent and cannot be created.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self, StorageError> {
        Self::open(config.database_path(root))
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds a favorite.
    ///
    /// The inner result is rejected with [`FavoriteError::InvalidType`] if
    /// `item_type` is not a known resource kind, or with
    /// [`FavoriteError::DuplicateEntry`] if the type and id are already
    /// present. Nothing is written on rejection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or written.
    pub fn add(
        &self,
        item_type: &str,
        item_id: u64,
        notes: &str,
    ) -> Result<Response<Added>, StorageError> {
        let Ok(kind) = item_type.parse::<ItemType>() else {
            return Ok(Err(FavoriteError::InvalidType(item_type.to_string())));
        };

        let mut document = self.load()?;

        if document.contains(item_type, item_id) {
            return Ok(Err(FavoriteError::duplicate(item_type, item_id)));
        }

        let favorite = Favorite::new(kind, item_id, notes);
        document.push(favorite.clone());
        self.save(&document)?;

        tracing::info!("Added favorite {kind} {item_id}");

        Ok(Ok(Added::new(favorite)))
    }

    /// Lists favorites in insertion order, optionally only those of one
    /// type.
    ///
    /// An empty filter is the same as no filter. A filter that names no
    /// known type matches nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    pub fn list(&self, item_type: Option<&str>) -> Result<Listing, StorageError> {
        let mut favorites = self.load()?.into_favorites();

        if let Some(item_type) = item_type.filter(|t| !t.is_empty()) {
            favorites.retain(|f| f.item_type().as_str() == item_type);
        }

        Ok(Listing::from(favorites))
    }

    /// Whether an entry with this type and id exists.
    ///
    /// Entries kept on disk but unreadable as favorites still count, so this
    /// agrees with the duplicate check in [`FavoritesStore::add`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    pub fn contains(&self, item_type: &str, item_id: u64) -> Result<bool, StorageError> {
        Ok(self.load()?.contains(item_type, item_id))
    }

    /// Removes a favorite.
    ///
    /// The inner result is rejected with [`FavoriteError::NotFound`] if no
    /// favorite has this type and id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or written.
    pub fn remove(
        &self,
        item_type: &str,
        item_id: u64,
    ) -> Result<Response<Confirmation>, StorageError> {
        let mut document = self.load()?;

        if document.remove(item_type, item_id) == 0 {
            return Ok(Err(FavoriteError::not_found(item_type, item_id)));
        }

        self.save(&document)?;

        tracing::info!("Removed favorite {item_type} {item_id}");

        Ok(Ok(Confirmation::new(format!(
            "Removed {item_type} ID {item_id} from favorites"
        ))))
    }

    /// Replaces the notes of a favorite and stamps its `updated_at`.
    ///
    /// The inner result is rejected with [`FavoriteError::NotFound`] if no
    /// favorite has this type and id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or written.
    pub fn update_notes(
        &self,
        item_type: &str,
        item_id: u64,
        notes: &str,
    ) -> Result<Response<Confirmation>, StorageError> {
        let mut document = self.load()?;

        let Some(favorite) = document.find_mut(item_type, item_id) else {
            return Ok(Err(FavoriteError::not_found(item_type, item_id)));
        };

        favorite.set_notes(notes);
        self.save(&document)?;

        tracing::info!("Updated notes for favorite {item_type} {item_id}");

        Ok(Ok(Confirmation::new(format!(
            "Updated notes for {item_type} ID {item_id}"
        ))))
    }

    /// Finds favorites whose notes contain `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    pub fn search(&self, query: &str) -> Result<SearchResults, StorageError> {
        let needle = query.to_lowercase();

        let document = self.load()?;
        let matches: Vec<_> = document
            .favorites()
            .filter(|f| f.notes_contain(&needle))
            .cloned()
            .collect();

        tracing::debug!("Search for '{query}' matched {} favorites", matches.len());

        Ok(SearchResults {
            query: query.to_string(),
            count: matches.len(),
            matches,
        })
    }

    /// Removes every favorite. This cannot be undone.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn clear_all(&self) -> Result<Confirmation, StorageError> {
        self.save(&Document::default())?;

        tracing::info!("Cleared all favorites");

        Ok(Confirmation::new("All favorites have been cleared"))
    }

    fn load(&self) -> Result<Document, StorageError> {
        Document::read(&self.path)
    }

    fn save(&self, document: &Document) -> Result<(), StorageError> {
        document.write(&self.path)
    }
}
