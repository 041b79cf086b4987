//! Persistence of the recipe collection.
//!
//! The collection is stored as one JSON array under a single key of a
//! key-value [`Storage`]. Loading never fails: missing or unreadable data
//! yields an empty [`RecipeBook`].

use crate::Recipe;
use thiserror::Error;
use tracing::{debug, warn};

mod backend;
mod model;

pub use backend::{FileStorage, MemoryStorage};
pub use model::RecipeBook;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "recipes_v2";

/// Errors that can occur when persisting recipes.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access storage: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize recipes: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A local persistent key-value storage holding string values.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Loads and saves a [`RecipeBook`] under one storage key.
#[derive(Debug, Clone)]
pub struct RecipeStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> RecipeStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        RecipeStore {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted collection.
    ///
    /// Missing data is an empty book. Data that is not a JSON array is
    /// logged and treated as empty too. Inside an array, records that do not
    /// deserialize (for example without an `id`) are skipped, as are
    /// repeated ids after their first occurrence.
    pub fn load(&self) -> RecipeBook {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored recipes");
                return RecipeBook::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read stored recipes");
                return RecipeBook::new();
            }
        };

        let values = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored recipes are corrupt, starting empty");
                return RecipeBook::new();
            }
        };

        let total = values.len();
        let recipes = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Recipe>(value) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "skipping unreadable recipe");
                    None
                }
            });

        let (book, duplicates) = RecipeBook::from_recipes(recipes);
        if duplicates > 0 {
            warn!(key = %self.key, duplicates, "dropped recipes with repeated ids");
        }
        debug!(key = %self.key, total, loaded = book.len(), "loaded recipes");
        book
    }

    /// Persists the full collection, overwriting whatever was stored before.
    pub fn save(&mut self, book: &RecipeBook) -> Result<(), StoreError> {
        let json = serde_json::to_string(book)?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, count = book.len(), "saved recipes");
        Ok(())
    }
}
