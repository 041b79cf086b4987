//! UniFFI bindings for native recipe apps (iOS, Android, desktop).
//!
//! This module provides FFI-safe types and a [`RecipeShelf`] object wrapping
//! the shelf controller. Complex types are converted to simpler
//! representations suitable for FFI.

use crate::index::{Facets, IngredientFacet};
use crate::model::{encode_image_file, ImageError};
use crate::search::SortKey;
use crate::settings::{Settings, SettingsError};
use crate::shelf::{
    Action, Clock, FilterChange, IngredientChip, RecipeCard, Shelf, ShelfView,
};
use crate::store::{FileStorage, Storage, StoreError};
use crate::{Recipe, RecipeDraft, RecipeId};
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum ShelfError {
    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Settings error: {message}")]
    SettingsError { message: String },

    #[error("Image error: {message}")]
    ImageError { message: String },

    #[error("Recipe not found: {message}")]
    NotFound { message: String },
}

impl From<StoreError> for ShelfError {
    fn from(e: StoreError) -> Self {
        ShelfError::StorageError {
            message: e.to_string(),
        }
    }
}

impl From<SettingsError> for ShelfError {
    fn from(e: SettingsError) -> Self {
        ShelfError::SettingsError {
            message: e.to_string(),
        }
    }
}

impl From<ImageError> for ShelfError {
    fn from(e: ImageError) -> Self {
        ShelfError::ImageError {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a stored recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub category: String,
    pub prep_time: String,
    pub servings: String,
    pub ingredients: String,
    pub steps: String,
    /// Embedded image as a `data:` URL
    pub image: Option<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id.to_string(),
            title: r.title.clone(),
            category: r.category.clone(),
            prep_time: r.prep_time.clone(),
            servings: r.servings.clone(),
            ingredients: r.ingredients.clone(),
            steps: r.steps.clone(),
            image: r.image.clone(),
        }
    }
}

/// Form values for adding or editing a recipe.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiRecipeDraft {
    pub title: String,
    pub category: String,
    pub prep_time: String,
    pub servings: String,
    pub ingredients: String,
    pub steps: String,
    pub image: Option<String>,
}

impl From<FfiRecipeDraft> for RecipeDraft {
    fn from(d: FfiRecipeDraft) -> Self {
        RecipeDraft {
            title: d.title,
            category: d.category,
            prep_time: d.prep_time,
            servings: d.servings,
            ingredients: d.ingredients,
            steps: d.steps,
            image: d.image,
        }
    }
}

impl From<RecipeDraft> for FfiRecipeDraft {
    fn from(d: RecipeDraft) -> Self {
        FfiRecipeDraft {
            title: d.title,
            category: d.category,
            prep_time: d.prep_time,
            servings: d.servings,
            ingredients: d.ingredients,
            steps: d.steps,
            image: d.image,
        }
    }
}

/// An ingredient chip on a recipe card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredientChip {
    pub label: String,
    /// Value to pass to `pick_ingredient` when the chip is tapped
    pub filter: String,
}

impl From<&IngredientChip> for FfiIngredientChip {
    fn from(c: &IngredientChip) -> Self {
        FfiIngredientChip {
            label: c.label.clone(),
            filter: c.filter.clone(),
        }
    }
}

/// Display data for one visible recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeCard {
    pub id: String,
    pub title: String,
    /// Category, servings and prep time on one line
    pub meta_line: String,
    pub ingredients: Vec<FfiIngredientChip>,
    pub image: Option<String>,
}

impl From<&RecipeCard> for FfiRecipeCard {
    fn from(c: &RecipeCard) -> Self {
        FfiRecipeCard {
            id: c.id.to_string(),
            title: c.title.clone(),
            meta_line: c.meta_line(),
            ingredients: c.ingredients.iter().map(FfiIngredientChip::from).collect(),
            image: c.image.clone(),
        }
    }
}

/// An ingredient quick filter with its number of occurrences.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredientFacet {
    pub name: String,
    pub count: u32,
}

impl From<&IngredientFacet> for FfiIngredientFacet {
    fn from(f: &IngredientFacet) -> Self {
        FfiIngredientFacet {
            name: f.name.clone(),
            count: saturating_u32(f.count),
        }
    }
}

/// FFI-safe representation of the quick filters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFacets {
    pub categories: Vec<String>,
    pub top_ingredients: Vec<FfiIngredientFacet>,
}

impl From<&Facets> for FfiFacets {
    fn from(f: &Facets) -> Self {
        FfiFacets {
            categories: f.categories.clone(),
            top_ingredients: f
                .top_ingredients
                .iter()
                .map(FfiIngredientFacet::from)
                .collect(),
        }
    }
}

/// Everything needed to redraw the shelf after an action.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiShelfView {
    pub total: u32,
    pub visible_count: u32,
    pub cards: Vec<FfiRecipeCard>,
    pub facets: FfiFacets,
    pub text: String,
    pub category: String,
    pub ingredient: String,
    /// Sort key name, empty for the stored order
    pub sort: String,
    pub pending_delete: Option<String>,
}

impl From<ShelfView> for FfiShelfView {
    fn from(v: ShelfView) -> Self {
        FfiShelfView {
            total: saturating_u32(v.total),
            visible_count: saturating_u32(v.visible_count),
            cards: v.cards.iter().map(FfiRecipeCard::from).collect(),
            facets: FfiFacets::from(&v.facets),
            text: v.query.text,
            category: v.query.category,
            ingredient: v.query.ingredient,
            sort: v.query.sort.to_string(),
            pending_delete: v.pending_delete.map(|id| id.to_string()),
        }
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// A recipe collection persisted in a data directory.
///
/// Every method returns the refreshed view so the host UI can redraw
/// straight away.
#[derive(uniffi::Object)]
pub struct RecipeShelf {
    inner: Mutex<Shelf<FileStorage>>,
}

#[uniffi::export]
impl RecipeShelf {
    /// Opens the shelf stored in `data_dir`, creating the directory if needed.
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding the collection file
    /// * `settings_yaml` - Optional YAML settings; defaults apply when absent
    #[uniffi::constructor]
    pub fn open(data_dir: String, settings_yaml: Option<String>) -> Result<Arc<Self>, ShelfError> {
        let settings = match settings_yaml {
            Some(yaml) => Settings::from_yaml_str(&yaml)?,
            None => Settings::default(),
        };
        let storage = FileStorage::open(data_dir)?;
        Ok(Arc::new(RecipeShelf {
            inner: Mutex::new(Shelf::open(storage, settings)),
        }))
    }

    /// Returns the current view without changing anything.
    pub fn view(&self) -> FfiShelfView {
        self.lock().view().into()
    }

    /// Returns every stored recipe, most recently added first.
    pub fn recipes(&self) -> Vec<FfiRecipe> {
        self.lock()
            .state()
            .book()
            .iter()
            .map(FfiRecipe::from)
            .collect()
    }

    /// Returns a stored recipe by id.
    pub fn recipe(&self, id: String) -> Option<FfiRecipe> {
        self.lock()
            .state()
            .book()
            .get(&RecipeId::from(id))
            .map(FfiRecipe::from)
    }

    /// Returns pre-filled form values for editing a recipe.
    pub fn draft_for(&self, id: String) -> Option<FfiRecipeDraft> {
        self.lock()
            .draft_for(&RecipeId::from(id))
            .map(FfiRecipeDraft::from)
    }

    pub fn add(&self, draft: FfiRecipeDraft) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::Add(draft.into()))
    }

    pub fn edit(&self, id: String, draft: FfiRecipeDraft) -> Result<FfiShelfView, ShelfError> {
        edit_recipe(&mut self.lock(), RecipeId::from(id), draft.into())
    }

    /// Marks a recipe for deletion; call `confirm_delete` to remove it.
    pub fn request_delete(&self, id: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::Delete(RecipeId::from(id)))
    }

    pub fn confirm_delete(&self) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::ConfirmDelete)
    }

    pub fn cancel_delete(&self) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::CancelDelete)
    }

    pub fn set_text(&self, text: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::FilterChanged(FilterChange::Text(text)))
    }

    pub fn set_category(&self, category: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::FilterChanged(FilterChange::Category(category)))
    }

    pub fn set_ingredient(&self, ingredient: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::FilterChanged(FilterChange::Ingredient(ingredient)))
    }

    pub fn pick_category(&self, category: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::FilterChanged(FilterChange::PickCategory(category)))
    }

    pub fn pick_ingredient(&self, ingredient: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::FilterChanged(FilterChange::PickIngredient(
            ingredient,
        )))
    }

    pub fn clear_filters(&self) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::FilterChanged(FilterChange::Clear))
    }

    /// Sets the sort order by name (e.g. "newest", "title_asc").
    /// Unknown names keep the stored order.
    pub fn set_sort(&self, sort: String) -> Result<FfiShelfView, ShelfError> {
        self.dispatch(Action::SortChanged(SortKey::parse(&sort)))
    }
}

impl RecipeShelf {
    fn lock(&self) -> MutexGuard<'_, Shelf<FileStorage>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, action: Action) -> Result<FfiShelfView, ShelfError> {
        let mut shelf = self.lock();
        shelf.dispatch(action)?;
        Ok(shelf.view().into())
    }
}

/// Edits a recipe that must exist, checking and applying under one lock.
fn edit_recipe<S: Storage, C: Clock>(
    shelf: &mut Shelf<S, C>,
    id: RecipeId,
    draft: RecipeDraft,
) -> Result<FfiShelfView, ShelfError> {
    if !shelf.state().book().contains(&id) {
        return Err(ShelfError::NotFound {
            message: id.to_string(),
        });
    }
    shelf.dispatch(Action::Edit { id, draft })?;
    Ok(shelf.view().into())
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Reads an image file and returns it as a `data:` URL for a recipe draft.
///
/// # Arguments
/// * `path` - Path to a jpg, jpeg, png, webp or gif file
#[uniffi::export]
pub fn encode_image(path: String) -> Result<String, ShelfError> {
    Ok(encode_image_file(Utf8Path::new(&path))?)
}

/// Enables log output on stderr, filtered by `RUST_LOG` or `default_filter`.
///
/// Returns false if logging was already initialized.
#[uniffi::export]
pub fn init_logging(default_filter: String) -> bool {
    crate::logging::init_logging(&default_filter)
}

/// Returns the sort key names understood by `set_sort`.
#[uniffi::export]
pub fn sort_keys() -> Vec<String> {
    [
        SortKey::Newest,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::Category,
        SortKey::IngredientsCountAsc,
        SortKey::IngredientsCountDesc,
    ]
    .iter()
    .map(SortKey::to_string)
    .collect()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn open_shelf(dir: &TempDir) -> Arc<RecipeShelf> {
        let path = dir.path().to_str().unwrap().to_string();
        RecipeShelf::open(path, None).unwrap()
    }

    fn draft(title: &str, category: &str, ingredients: &str) -> FfiRecipeDraft {
        FfiRecipeDraft {
            title: title.to_string(),
            category: category.to_string(),
            ingredients: ingredients.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_filter_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let shelf = open_shelf(&temp_dir);

        shelf.add(draft("Soup", "Dinner", "salt, water")).unwrap();
        let view = shelf.add(draft("Cake", "Dessert", "sugar\nflour")).unwrap();
        assert_eq!(view.total, 2);
        // Newest first, so the cake's category is seen first
        assert_eq!(view.facets.categories, vec!["Dessert", "Dinner"]);

        let view = shelf.set_sort("title_asc".to_string()).unwrap();
        assert_eq!(view.sort, "title_asc");
        assert_eq!(view.cards[0].title, "Cake");

        let view = shelf.pick_ingredient("SALT".to_string()).unwrap();
        assert_eq!(view.ingredient, "salt");
        assert_eq!(view.visible_count, 1);
        assert_eq!(view.cards[0].meta_line, "Dinner");

        let reopened = open_shelf(&temp_dir);
        assert_eq!(reopened.recipes().len(), 2);
        assert_eq!(reopened.view().ingredient, "");
    }

    #[test]
    fn test_delete_flow() {
        let temp_dir = TempDir::new().unwrap();
        let shelf = open_shelf(&temp_dir);
        shelf.add(draft("Soup", "Dinner", "salt")).unwrap();
        let id = shelf.recipes()[0].id.clone();

        let view = shelf.request_delete(id.clone()).unwrap();
        assert_eq!(view.pending_delete, Some(id.clone()));
        assert_eq!(view.total, 1);

        let view = shelf.cancel_delete().unwrap();
        assert!(view.pending_delete.is_none());
        assert_eq!(view.total, 1);

        shelf.request_delete(id.clone()).unwrap();
        let view = shelf.confirm_delete().unwrap();
        assert_eq!(view.total, 0);
        assert!(shelf.recipe(id).is_none());
    }

    #[test]
    fn test_edit() {
        let temp_dir = TempDir::new().unwrap();
        let shelf = open_shelf(&temp_dir);
        shelf.add(draft("Soup", "Dinner", "salt")).unwrap();
        let id = shelf.recipes()[0].id.clone();

        let mut form = shelf.draft_for(id.clone()).unwrap();
        form.servings = "2".to_string();
        shelf.edit(id.clone(), form).unwrap();
        assert_eq!(shelf.recipe(id).unwrap().servings, "2");

        let result = shelf.edit("missing".to_string(), draft("x", "", ""));
        assert!(matches!(result, Err(ShelfError::NotFound { .. })));
    }

    #[test]
    fn test_edit_checks_under_the_same_guard() {
        use crate::shelf::FixedClock;
        use crate::store::MemoryStorage;

        let mut shelf = Shelf::with_clock(MemoryStorage::new(), Settings::default(), FixedClock(7));
        shelf
            .dispatch(Action::Add(draft("Soup", "", "salt").into()))
            .unwrap();
        shelf.dispatch(Action::Delete(RecipeId::from("7"))).unwrap();
        shelf.dispatch(Action::ConfirmDelete).unwrap();

        let result = edit_recipe(&mut shelf, RecipeId::from("7"), draft("Stew", "", "").into());
        assert!(matches!(result, Err(ShelfError::NotFound { message }) if message == "7"));
        assert_eq!(shelf.view().total, 0);
    }

    #[test]
    fn test_counts_saturate() {
        assert_eq!(saturating_u32(12), 12);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(saturating_u32(u32::MAX as usize + 1), u32::MAX);
    }

    #[test]
    fn test_open_with_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_str().unwrap().to_string();

        let shelf = RecipeShelf::open(path.clone(), Some("storage_key: mine".to_string())).unwrap();
        shelf.add(draft("Soup", "", "")).unwrap();
        assert!(temp_dir.path().join("mine.json").exists());

        let result = RecipeShelf::open(path, Some("top_ingredient_limit: 0".to_string()));
        assert!(matches!(result, Err(ShelfError::SettingsError { .. })));
    }

    #[test]
    fn test_encode_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cake.jpg");
        fs::write(&path, b"hi").unwrap();

        let url = encode_image(path.to_str().unwrap().to_string()).unwrap();
        assert_eq!(url, "data:image/jpeg;base64,aGk=");

        let result = encode_image("cake.bmp".to_string());
        assert!(matches!(result, Err(ShelfError::ImageError { .. })));
    }

    #[test]
    fn test_sort_keys() {
        let keys = sort_keys();
        assert_eq!(keys.len(), 6);
        assert!(keys.iter().all(|k| SortKey::parse(k) != SortKey::Unsorted));
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
