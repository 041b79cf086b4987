use super::clock::Clock;
use super::view::{RecipeCard, ShelfView};
use crate::index::build_facets_with_limit;
use crate::search::{query, Query, SortKey};
use crate::settings::Settings;
use crate::store::RecipeBook;
use crate::{RecipeDraft, RecipeId};
use tracing::{debug, warn};

/// A change to one of the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Text(String),
    Category(String),
    Ingredient(String),
    /// Picking a category quick filter
    PickCategory(String),
    /// Picking an ingredient quick filter or card chip; matched lower-cased
    PickIngredient(String),
    /// Reset text, category and ingredient filters
    Clear,
}

/// Everything a user can do to the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a recipe from a submitted form
    Add(RecipeDraft),
    /// Replace an existing recipe with a submitted form
    Edit { id: RecipeId, draft: RecipeDraft },
    /// Ask to delete a recipe; nothing is removed until confirmed
    Delete(RecipeId),
    ConfirmDelete,
    CancelDelete,
    FilterChanged(FilterChange),
    SortChanged(SortKey),
}

impl Action {
    /// Returns true if applying the action can change the collection.
    pub fn mutates_collection(&self) -> bool {
        matches!(
            self,
            Action::Add(_) | Action::Edit { .. } | Action::ConfirmDelete
        )
    }
}

/// What applying an action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    Unchanged,
    /// Only the query or a pending confirmation changed
    ViewChanged,
    /// The collection changed and must be saved
    CollectionChanged,
}

/// The complete state of a shelf: the collection plus the current query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelfState {
    book: RecipeBook,
    query: Query,
    pending_delete: Option<RecipeId>,
}

impl ShelfState {
    pub fn new(book: RecipeBook, query: Query) -> Self {
        ShelfState {
            book,
            query,
            pending_delete: None,
        }
    }

    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn pending_delete(&self) -> Option<&RecipeId> {
        self.pending_delete.as_ref()
    }

    /// Form values for editing the recipe with `id`.
    pub fn draft_for(&self, id: &RecipeId) -> Option<RecipeDraft> {
        self.book.get(id).map(RecipeDraft::from_recipe)
    }

    /// Apply `action`, returning the next state and what changed.
    ///
    /// `clock` is only consulted when a recipe is added.
    pub fn apply(self, action: Action, clock: &impl Clock) -> (Self, Outcome) {
        let ShelfState {
            book,
            mut query,
            pending_delete,
        } = self;

        match action {
            Action::Add(draft) => {
                let id = next_id(&book, clock.now_millis());
                debug!(%id, "adding recipe");
                let state = ShelfState {
                    book: book.upsert(draft.into_recipe(id)),
                    query,
                    pending_delete,
                };
                (state, Outcome::CollectionChanged)
            }
            Action::Edit { id, draft } => {
                if !book.contains(&id) {
                    warn!(%id, "ignoring edit of unknown recipe");
                    let state = ShelfState {
                        book,
                        query,
                        pending_delete,
                    };
                    return (state, Outcome::Unchanged);
                }
                debug!(%id, "updating recipe");
                let state = ShelfState {
                    book: book.upsert(draft.into_recipe(id)),
                    query,
                    pending_delete,
                };
                (state, Outcome::CollectionChanged)
            }
            Action::Delete(id) => {
                let outcome = if book.contains(&id) {
                    Outcome::ViewChanged
                } else {
                    Outcome::Unchanged
                };
                let pending_delete = book.contains(&id).then_some(id).or(pending_delete);
                let state = ShelfState {
                    book,
                    query,
                    pending_delete,
                };
                (state, outcome)
            }
            Action::ConfirmDelete => match pending_delete {
                Some(id) => {
                    debug!(%id, "deleting recipe");
                    let book = book.remove(&id);
                    (ShelfState::new(book, query), Outcome::CollectionChanged)
                }
                None => (ShelfState::new(book, query), Outcome::Unchanged),
            },
            Action::CancelDelete => {
                let outcome = if pending_delete.is_some() {
                    Outcome::ViewChanged
                } else {
                    Outcome::Unchanged
                };
                (ShelfState::new(book, query), outcome)
            }
            Action::FilterChanged(change) => {
                let before = query.clone();
                match change {
                    FilterChange::Text(text) => query.text = text,
                    FilterChange::Category(category) | FilterChange::PickCategory(category) => {
                        query.category = category
                    }
                    FilterChange::Ingredient(ingredient) => query.ingredient = ingredient,
                    FilterChange::PickIngredient(ingredient) => {
                        query.ingredient = ingredient.to_lowercase()
                    }
                    FilterChange::Clear => {
                        query = Query {
                            sort: query.sort,
                            ..Query::default()
                        }
                    }
                }
                let outcome = changed(&before, &query);
                let state = ShelfState {
                    book,
                    query,
                    pending_delete,
                };
                (state, outcome)
            }
            Action::SortChanged(sort) => {
                let before = query.clone();
                query.sort = sort;
                let outcome = changed(&before, &query);
                let state = ShelfState {
                    book,
                    query,
                    pending_delete,
                };
                (state, outcome)
            }
        }
    }

    /// Builds the view for the current collection and query.
    pub fn view(&self, settings: &Settings) -> ShelfView {
        let visible = query(&self.book, &self.query);
        let cards: Vec<RecipeCard> = visible
            .into_iter()
            .map(|recipe| RecipeCard::new(recipe, settings.preview_ingredient_limit))
            .collect();

        ShelfView {
            total: self.book.len(),
            visible_count: cards.len(),
            cards,
            facets: build_facets_with_limit(&self.book, settings.top_ingredient_limit),
            query: self.query.clone(),
            pending_delete: self.pending_delete.clone(),
        }
    }
}

fn changed(before: &Query, after: &Query) -> Outcome {
    if before == after {
        Outcome::Unchanged
    } else {
        Outcome::ViewChanged
    }
}

/// Id for a recipe created at `now`, moved forward past any id in use.
fn next_id(book: &RecipeBook, now: u64) -> RecipeId {
    let mut millis = now;
    loop {
        let id = RecipeId::from_millis(millis);
        if !book.contains(&id) {
            return id;
        }
        millis += 1;
    }
}
