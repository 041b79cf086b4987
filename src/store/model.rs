use crate::{Recipe, RecipeId};
use serde::Serialize;
use std::collections::HashSet;

/// The whole recipe collection, most recently added first.
///
/// Ids are unique within a book. Mutations consume the book and hand back
/// the updated one, so the collection is always passed around explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from records in stored order.
    ///
    /// When an id appears more than once only the first record is kept;
    /// the number of dropped duplicates is returned alongside.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> (Self, usize) {
        let mut seen = HashSet::new();
        let mut dropped = 0;
        let mut kept = Vec::new();

        for recipe in recipes {
            if seen.insert(recipe.id.clone()) {
                kept.push(recipe);
            } else {
                dropped += 1;
            }
        }

        (RecipeBook { recipes: kept }, dropped)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the record with the same id in place, or prepends the recipe
    /// when no record matches.
    pub fn upsert(mut self, recipe: Recipe) -> Self {
        match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe,
            None => self.recipes.insert(0, recipe),
        }
        self
    }

    /// Deletes the record with the given id. Missing ids are a no-op.
    pub fn remove(mut self, id: &RecipeId) -> Self {
        self.recipes.retain(|r| &r.id != id);
        self
    }
}

impl<'a> IntoIterator for &'a RecipeBook {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
