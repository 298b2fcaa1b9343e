//! Persisted favorite cities.
//!
//! The store is a narrow read/write-whole-list seam so the persistence
//! backend stays an injected dependency. The JSON file implementation
//! mirrors the browser-localStorage behavior of reading the full list on
//! startup and rewriting it on every change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use skycast_core::StorageError;

const FAVORITES_FILE: &str = "favorites.json";

/// A saved city. Uniqueness is on (name, region); `query_key` is the
/// string handed back to the provider to re-trigger a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub name: String,
    pub region: String,
    pub query_key: String,
}

/// Whole-list persistence seam for favorites.
pub trait FavoritesStore {
    fn read_all(&self) -> Result<Vec<FavoriteCity>, StorageError>;
    fn write_all(&self, favorites: &[FavoriteCity]) -> Result<(), StorageError>;
}

/// JSON-file-backed favorites store.
#[derive(Debug)]
pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(FAVORITES_FILE),
        }
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn read_all(&self) -> Result<Vec<FavoriteCity>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        match serde_json::from_str(&contents) {
            Ok(list) => Ok(list),
            Err(e) => {
                // A corrupt file is recoverable: start over with an empty list.
                tracing::warn!("Failed to parse favorites file, starting empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, favorites: &[FavoriteCity]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        let contents = serde_json::to_string_pretty(favorites)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

/// In-memory favorites list backed by a [`FavoritesStore`]. Every mutation
/// persists the whole list before returning.
#[derive(Debug)]
pub struct Favorites<S: FavoritesStore> {
    store: S,
    list: Vec<FavoriteCity>,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Load the persisted list.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let list = store.read_all()?;
        Ok(Self { store, list })
    }

    pub fn list(&self) -> &[FavoriteCity] {
        &self.list
    }

    pub fn contains(&self, name: &str, region: &str) -> bool {
        self.list
            .iter()
            .any(|fav| fav.name == name && fav.region == region)
    }

    /// Add the city if absent, remove it if present. Returns `true` when
    /// the city was added.
    pub fn toggle(&mut self, city: FavoriteCity) -> Result<bool, StorageError> {
        let added = if self.contains(&city.name, &city.region) {
            self.list
                .retain(|fav| !(fav.name == city.name && fav.region == city.region));
            false
        } else {
            self.list.push(city);
            true
        };
        self.store.write_all(&self.list)?;
        Ok(added)
    }

    /// Remove a city by (name, region). Returns `true` when it was present.
    pub fn remove(&mut self, name: &str, region: &str) -> Result<bool, StorageError> {
        let before = self.list.len();
        self.list
            .retain(|fav| !(fav.name == name && fav.region == region));
        let removed = self.list.len() != before;
        if removed {
            self.store.write_all(&self.list)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, region: &str) -> FavoriteCity {
        FavoriteCity {
            name: name.to_string(),
            region: region.to_string(),
            query_key: format!("{name},{region}"),
        }
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(dir.path());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("favorites.json"), "{not json").unwrap();
        let store = JsonFavoritesStore::new(dir.path());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(dir.path());
        let list = vec![city("Lisbon", "Lisboa"), city("Porto", "Porto")];
        store.write_all(&list).unwrap();
        assert_eq!(store.read_all().unwrap(), list);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(dir.path());
        let mut favorites = Favorites::load(store).unwrap();

        assert!(favorites.toggle(city("Lisbon", "Lisboa")).unwrap());
        assert!(favorites.contains("Lisbon", "Lisboa"));

        assert!(!favorites.toggle(city("Lisbon", "Lisboa")).unwrap());
        assert!(!favorites.contains("Lisbon", "Lisboa"));
    }

    #[test]
    fn test_uniqueness_on_name_and_region() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(dir.path());
        let mut favorites = Favorites::load(store).unwrap();

        favorites.toggle(city("Springfield", "IL")).unwrap();
        favorites.toggle(city("Springfield", "MA")).unwrap();
        assert_eq!(favorites.list().len(), 2);

        // Toggling an existing (name, region) removes it, never duplicates.
        favorites.toggle(city("Springfield", "IL")).unwrap();
        assert_eq!(favorites.list().len(), 1);
        assert!(favorites.contains("Springfield", "MA"));
    }

    #[test]
    fn test_mutations_persist_whole_list() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFavoritesStore::new(dir.path());
            let mut favorites = Favorites::load(store).unwrap();
            favorites.toggle(city("Lisbon", "Lisboa")).unwrap();
            favorites.toggle(city("Porto", "Porto")).unwrap();
            favorites.remove("Lisbon", "Lisboa").unwrap();
        }

        let store = JsonFavoritesStore::new(dir.path());
        let favorites = Favorites::load(store).unwrap();
        assert_eq!(favorites.list().len(), 1);
        assert!(favorites.contains("Porto", "Porto"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(dir.path());
        let mut favorites = Favorites::load(store).unwrap();
        assert!(!favorites.remove("Nowhere", "NA").unwrap());
    }
}
