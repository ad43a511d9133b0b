//! Per-user state: selected ingredients, current recipe, favorites and history.
//!
//! State lives in memory and is mirrored to a `StateStore` as three JSON
//! blobs. Blobs are read once when the session starts and rewritten on every
//! mutation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

use crate::types::GeneratedRecipe;

/// Most recent results kept in history.
pub const HISTORY_LIMIT: usize = 10;

pub const FAVORITES_KEY: &str = "favorites";
pub const HISTORY_KEY: &str = "history";
pub const SELECTED_KEY: &str = "selected";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("State store lock poisoned")]
    Poisoned,
}

/// Durable keyed blob storage.
pub trait StateStore {
    /// The stored blob, or `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError>;
}

/// Stores each blob as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for JsonDirStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.blobs.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.blobs
            .lock()
            .map_err(|_| SessionError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn load_blob<T: DeserializeOwned + Default>(store: &dyn StateStore, key: &str) -> T {
    let Some(raw) = store.load(key) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt session data");
            T::default()
        }
    }
}

/// A single user's state. One writer per process.
#[derive(Debug)]
pub struct Session<S: StateStore> {
    store: S,
    selected: Vec<String>,
    current: Option<GeneratedRecipe>,
    favorites: Vec<GeneratedRecipe>,
    history: Vec<GeneratedRecipe>,
}

impl<S: StateStore> Session<S> {
    /// Restore state from `store`. Missing or corrupt blobs start empty.
    pub fn load(store: S) -> Self {
        let selected = load_blob(&store, SELECTED_KEY);
        let favorites = load_blob(&store, FAVORITES_KEY);
        let mut history: Vec<GeneratedRecipe> = load_blob(&store, HISTORY_KEY);
        history.truncate(HISTORY_LIMIT);

        Self {
            store,
            selected,
            current: history.first().cloned(),
            favorites,
            history,
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// The most recently recorded result.
    pub fn current(&self) -> Option<&GeneratedRecipe> {
        self.current.as_ref()
    }

    pub fn favorites(&self) -> &[GeneratedRecipe] {
        &self.favorites
    }

    /// Most recent first.
    pub fn history(&self) -> &[GeneratedRecipe] {
        &self.history
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), SessionError> {
        let json = serde_json::to_string(value)?;
        self.store.save(key, &json)
    }

    /// Add the ingredient, or remove it if already selected. Returns whether it is now selected.
    pub fn toggle_ingredient(&mut self, ingredient: &str) -> Result<bool, SessionError> {
        let trimmed = ingredient.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let now_selected = match self
            .selected
            .iter()
            .position(|s| s.eq_ignore_ascii_case(trimmed))
        {
            Some(index) => {
                self.selected.remove(index);
                false
            }
            None => {
                self.selected.push(trimmed.to_string());
                true
            }
        };

        self.persist(SELECTED_KEY, &self.selected)?;
        Ok(now_selected)
    }

    pub fn clear_ingredients(&mut self) -> Result<(), SessionError> {
        self.selected.clear();
        self.persist(SELECTED_KEY, &self.selected)
    }

    /// Make `recipe` current and push it to the front of history.
    pub fn record_result(&mut self, recipe: GeneratedRecipe) -> Result<(), SessionError> {
        self.history.retain(|r| r.id() != recipe.id());
        self.history.insert(0, recipe.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.current = Some(recipe);

        self.persist(HISTORY_KEY, &self.history)
    }

    /// Add or remove a favorite. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, recipe: &GeneratedRecipe) -> Result<bool, SessionError> {
        let now_favorite = match self.favorites.iter().position(|r| r.id() == recipe.id()) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(recipe.clone());
                true
            }
        };

        self.persist(FAVORITES_KEY, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|r| r.id() == id)
    }

    /// A recipe this session has seen, by id.
    pub fn find(&self, id: &str) -> Option<&GeneratedRecipe> {
        self.current
            .iter()
            .chain(self.history.iter())
            .chain(self.favorites.iter())
            .find(|r| r.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::LocalTemplates;
    use crate::dish_type::DishType;
    use crate::fallback::local_recipe;
    use tempfile::TempDir;

    fn recipe(id: &str) -> GeneratedRecipe {
        let mut r = local_recipe(&["egg".to_string()], DishType::StirFry, &LocalTemplates::seeded(0));
        r.recipe.id = id.to_string();
        r
    }

    #[test]
    fn test_history_bounded_and_most_recent_first() {
        let mut session = Session::load(MemoryStore::new());
        for i in 0..11 {
            session.record_result(recipe(&format!("r{}", i))).unwrap();
        }

        let ids: Vec<&str> = session.history().iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), HISTORY_LIMIT);
        assert_eq!(ids[0], "r10");
        assert_eq!(ids[9], "r1");
        assert_eq!(session.current().map(|r| r.id()), Some("r10"));
    }

    #[test]
    fn test_history_dedups_by_id() {
        let mut session = Session::load(MemoryStore::new());
        session.record_result(recipe("a")).unwrap();
        session.record_result(recipe("b")).unwrap();
        session.record_result(recipe("a")).unwrap();

        let ids: Vec<&str> = session.history().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut session = Session::load(MemoryStore::new());
        let r = recipe("fav");

        assert!(session.toggle_favorite(&r).unwrap());
        assert!(session.is_favorite("fav"));
        assert!(!session.toggle_favorite(&r).unwrap());
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_toggle_ingredient() {
        let mut session = Session::load(MemoryStore::new());
        assert!(session.toggle_ingredient(" Tomato ").unwrap());
        assert!(session.toggle_ingredient("egg").unwrap());
        assert!(!session.toggle_ingredient("tomato").unwrap());
        assert!(!session.toggle_ingredient("   ").unwrap());
        assert_eq!(session.selected(), &["egg".to_string()]);

        session.clear_ingredients().unwrap();
        assert!(session.selected().is_empty());
    }

    #[test]
    fn test_state_survives_reload() {
        let dir = TempDir::new().unwrap();

        {
            let mut session = Session::load(JsonDirStore::new(dir.path()));
            session.toggle_ingredient("egg").unwrap();
            session.record_result(recipe("kept")).unwrap();
            session.toggle_favorite(&recipe("loved")).unwrap();
        }

        assert!(dir.path().join("history.json").exists());

        let session = Session::load(JsonDirStore::new(dir.path()));
        assert_eq!(session.selected(), &["egg".to_string()]);
        assert_eq!(session.history()[0].id(), "kept");
        assert_eq!(session.current().map(|r| r.id()), Some("kept"));
        assert!(session.is_favorite("loved"));
        assert!(session.find("loved").is_some());
    }

    #[test]
    fn test_corrupt_blobs_are_discarded() {
        let store = MemoryStore::new();
        store.save(HISTORY_KEY, "{not json").unwrap();
        store.save(FAVORITES_KEY, r#"{"wrong": "shape"}"#).unwrap();
        store.save(SELECTED_KEY, r#"["egg"]"#).unwrap();

        let session = Session::load(store);
        assert!(session.history().is_empty());
        assert!(session.favorites().is_empty());
        assert_eq!(session.selected(), &["egg".to_string()]);
    }
}
