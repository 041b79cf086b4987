use crate::index::Facets;
use crate::model::non_empty;
use crate::search::Query;
use crate::{Recipe, RecipeId};
use serde::Serialize;

/// Everything a UI needs to draw the shelf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfView {
    /// Number of recipes in the collection
    pub total: usize,
    /// Number of recipes matching the current query
    pub visible_count: usize,
    /// Visible recipes, in display order
    pub cards: Vec<RecipeCard>,
    pub facets: Facets,
    /// The query the cards were produced with
    pub query: Query,
    /// Recipe waiting for delete confirmation, if any
    pub pending_delete: Option<RecipeId>,
}

/// An ingredient shown on a card; picking it filters by `filter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientChip {
    pub label: String,
    pub filter: String,
}

/// Display data for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub title: String,
    pub category: Option<String>,
    pub servings: Option<String>,
    pub prep_time: Option<String>,
    /// The first few ingredients, in written order
    pub ingredients: Vec<IngredientChip>,
    pub image: Option<String>,
}

impl RecipeCard {
    pub fn new(recipe: &Recipe, preview_limit: usize) -> Self {
        let ingredients = recipe
            .ingredient_tokens()
            .take(preview_limit)
            .map(|token| IngredientChip {
                label: token.to_string(),
                filter: token.to_lowercase(),
            })
            .collect();

        RecipeCard {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            category: recipe.category().map(str::to_string),
            servings: non_empty(&recipe.servings).map(str::to_string),
            prep_time: non_empty(&recipe.prep_time).map(str::to_string),
            ingredients,
            image: recipe.image.clone(),
        }
    }

    /// One-line summary: category (or a dash), servings and prep time.
    pub fn meta_line(&self) -> String {
        let mut parts = vec![self.category.as_deref().unwrap_or("—").to_string()];
        if let Some(servings) = &self.servings {
            parts.push(format!("{servings} servings"));
        }
        if let Some(prep_time) = &self.prep_time {
            parts.push(prep_time.clone());
        }
        parts.join(" • ")
    }
}
