//! The shelf controller: owns the state, applies user actions and persists
//! the collection after every change to it.
//!
//! State transitions themselves are pure ([`ShelfState::apply`]); this module
//! only adds storage and the clock around them, so UIs never touch either.

mod clock;
mod state;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use state::{Action, FilterChange, Outcome, ShelfState};
pub use view::{IngredientChip, RecipeCard, ShelfView};

use crate::search::Query;
use crate::settings::Settings;
use crate::store::{RecipeStore, Storage, StoreError};
use crate::{RecipeDraft, RecipeId};
use tracing::{info, warn};

pub struct Shelf<S, C = SystemClock> {
    store: RecipeStore<S>,
    state: ShelfState,
    settings: Settings,
    clock: C,
}

impl<S: Storage> Shelf<S, SystemClock> {
    /// Loads the collection from `storage` and opens a shelf on it.
    pub fn open(storage: S, settings: Settings) -> Self {
        Self::with_clock(storage, settings, SystemClock)
    }
}

impl<S: Storage, C: Clock> Shelf<S, C> {
    pub fn with_clock(storage: S, settings: Settings, clock: C) -> Self {
        let store = RecipeStore::with_key(storage, settings.storage_key.clone());
        let book = store.load();
        info!(key = store.key(), recipes = book.len(), "opened recipe shelf");

        let query = Query::new().sort(settings.default_sort);
        Shelf {
            store,
            state: ShelfState::new(book, query),
            settings,
            clock,
        }
    }

    /// Applies a user action, saving the collection if it changed.
    ///
    /// If saving fails the shelf keeps its previous state, so memory never
    /// runs ahead of storage.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, StoreError> {
        let previous = action.mutates_collection().then(|| self.state.clone());

        let state = std::mem::take(&mut self.state);
        let (state, outcome) = state.apply(action, &self.clock);
        self.state = state;

        if outcome == Outcome::CollectionChanged {
            if let Err(e) = self.store.save(self.state.book()) {
                warn!(error = %e, "failed to save recipes, reverting");
                if let Some(previous) = previous {
                    self.state = previous;
                }
                return Err(e);
            }
        }
        Ok(outcome)
    }

    /// The current view of the shelf.
    pub fn view(&self) -> ShelfView {
        self.state.view(&self.settings)
    }

    pub fn state(&self) -> &ShelfState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Form values for editing the recipe with `id`.
    pub fn draft_for(&self, id: &RecipeId) -> Option<RecipeDraft> {
        self.state.draft_for(id)
    }
}
