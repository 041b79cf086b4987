use serde::{Deserialize, Serialize};

/// An ingredient shortcut together with how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientFacet {
    /// Lower-cased ingredient token, usable directly as an ingredient filter
    pub name: String,
    /// Number of occurrences across the whole collection
    pub count: usize,
}

/// Quick-filter values derived from a recipe collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// Distinct non-empty categories in first-seen order
    pub categories: Vec<String>,
    /// Most frequent ingredient tokens, most frequent first
    pub top_ingredients: Vec<IngredientFacet>,
}

impl Facets {
    /// Returns just the names of the top ingredients, in rank order.
    pub fn top_ingredient_names(&self) -> Vec<&str> {
        self.top_ingredients
            .iter()
            .map(|facet| facet.name.as_str())
            .collect()
    }
}
