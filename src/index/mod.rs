use crate::Recipe;
use std::collections::HashMap;

mod model;

pub use model::{Facets, IngredientFacet};

/// Number of top ingredients offered as quick filters by default.
pub const DEFAULT_TOP_INGREDIENTS: usize = 12;

/// Derive the category and ingredient quick filters for a collection
pub fn build_facets<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Facets {
    build_facets_with_limit(recipes, DEFAULT_TOP_INGREDIENTS)
}

/// Like [`build_facets`], keeping at most `limit` top ingredients.
pub fn build_facets_with_limit<'a>(
    recipes: impl IntoIterator<Item = &'a Recipe>,
    limit: usize,
) -> Facets {
    let mut categories: Vec<String> = Vec::new();
    let mut counts = IngredientCounter::default();

    for recipe in recipes {
        if let Some(category) = recipe.category() {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        for token in recipe.ingredient_tokens() {
            counts.add(token.to_lowercase());
        }
    }

    Facets {
        categories,
        top_ingredients: counts.top(limit),
    }
}

/// Counts ingredient keys while remembering the order they were first seen.
#[derive(Default)]
struct IngredientCounter {
    order: Vec<IngredientFacet>,
    positions: HashMap<String, usize>,
}

impl IngredientCounter {
    fn add(&mut self, key: String) {
        match self.positions.get(&key) {
            Some(&pos) => self.order[pos].count += 1,
            None => {
                self.positions.insert(key.clone(), self.order.len());
                self.order.push(IngredientFacet {
                    name: key,
                    count: 1,
                });
            }
        }
    }

    fn top(mut self, limit: usize) -> Vec<IngredientFacet> {
        // Stable: equal counts keep first-seen order
        self.order.sort_by(|a, b| b.count.cmp(&a.count));
        self.order.truncate(limit);
        self.order
    }
}
