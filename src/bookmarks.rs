use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::Recipe;

/// Persisted mapping from recipe id to a full recipe snapshot.
///
/// The snapshot is frozen at bookmark time; the store never refreshes it from
/// the provider. Every mutation writes the whole mapping back to disk before
/// returning, so bookmark counts and membership always match what a restart
/// would load.
pub struct BookmarkStore {
    path: PathBuf,
    entries: BTreeMap<String, Recipe>,
}

impl BookmarkStore {
    /// Load the store from `path`. A missing file yields an empty store. An
    /// unreadable or unparseable file is discarded: the store starts empty
    /// and the file is rewritten so the corrupt value is gone. Loading never
    /// fails.
    pub fn load<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        Self { path, entries }
    }

    /// Remove the recipe if bookmarked, insert a full snapshot otherwise,
    /// then persist. Returns whether the recipe is bookmarked afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> Result<bool, Error> {
        if self.entries.remove(&recipe.id).is_none() {
            self.entries.insert(recipe.id.clone(), recipe.clone());
        }
        self.persist()?;
        Ok(self.contains(&recipe.id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Saved recipes in stable (id) order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.entries.values()
    }

    fn persist(&self) -> Result<(), Error> {
        let serialized = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> BTreeMap<String, Recipe> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                ::log::warn!("Could not read bookmarks file {}: {}", path.display(), err);
            }
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            ::log::warn!(
                "Discarding corrupt bookmarks file {}: {}",
                path.display(),
                err
            );
            // Reset storage so the bad value does not come back next start
            if let Err(err) = fs::write(path, "{}") {
                ::log::warn!("Could not reset bookmarks file {}: {}", path.display(), err);
            }
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientSlot;

    fn recipe(id: &str, name: &str, area: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category: "Beef".to_string(),
            area: area.to_string(),
            instructions: "Brown the beef.\nSimmer.".to_string(),
            thumbnail: None,
            tags: None,
            source: None,
            youtube: None,
            slots: vec![IngredientSlot {
                ingredient: Some("beef".to_string()),
                measure: Some("1 lb".to_string()),
            }],
        }
    }

    fn store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("bookmarks.json")
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::load(store_path(&dir));
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BookmarkStore::load(store_path(&dir));
        let beef = recipe("52874", "Beef and Mustard Pie", "British");

        assert!(store.toggle(&beef).unwrap());
        assert!(store.contains("52874"));
        assert_eq!(store.get("52874"), Some(&beef));

        assert!(!store.toggle(&beef).unwrap());
        assert!(!store.contains("52874"));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn mapping_round_trips_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        let first = recipe("52874", "Beef and Mustard Pie", "British");
        let second = recipe("52772", "Teriyaki Chicken Casserole", "Japanese");

        let mut store = BookmarkStore::load(&path);
        store.toggle(&first).unwrap();
        store.toggle(&second).unwrap();

        let reloaded = BookmarkStore::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("52874"), Some(&first));
        assert_eq!(reloaded.get("52772"), Some(&second));
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(&path, "{not valid json").unwrap();

        let store = BookmarkStore::load(&path);
        assert!(store.is_empty());

        // The bad value was cleared from storage as well
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn snapshot_survives_toggle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BookmarkStore::load(store_path(&dir));
        let beef = recipe("52874", "Beef and Mustard Pie", "British");
        let chicken = recipe("52772", "Teriyaki Chicken Casserole", "Japanese");

        store.toggle(&beef).unwrap();
        store.toggle(&chicken).unwrap();
        store.toggle(&chicken).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("52874"), Some(&beef));
    }
}
