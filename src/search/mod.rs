use crate::Recipe;
use std::cmp::Ordering;
use tracing::warn;

mod collate;
mod model;

pub use collate::{locale_cmp, LocaleCollator};
pub use model::{Query, SortKey};

/// Select and order the recipes visible for `query`
///
/// All filters must match; an empty filter matches everything. Sorting is
/// stable, so recipes that compare equal keep their relative order, and an
/// unrecognised sort key leaves the input order untouched.
pub fn query<'a>(recipes: impl IntoIterator<Item = &'a Recipe>, query: &Query) -> Vec<&'a Recipe> {
    let filter = Filter::new(query);
    let mut visible: Vec<&Recipe> = recipes.into_iter().filter(|r| filter.matches(r)).collect();
    sort_recipes(&mut visible, query.sort);
    visible
}

/// Sort recipes in place by `key`.
pub fn sort_recipes(recipes: &mut [&Recipe], key: SortKey) {
    let mut collator = LocaleCollator::new();
    match key {
        SortKey::Unsorted => {}
        SortKey::Newest => {
            let unnumbered = unnumbered_ids(recipes);
            if unnumbered > 0 {
                warn!(unnumbered, "recipes without numeric ids are placed after the newest");
            }
            recipes.sort_by(|a, b| newest_first(a, b))
        }
        SortKey::TitleAsc => recipes.sort_by(|a, b| collator.compare(&a.title, &b.title)),
        SortKey::TitleDesc => recipes.sort_by(|a, b| collator.compare(&b.title, &a.title)),
        SortKey::Category => recipes.sort_by(|a, b| collator.compare(&a.category, &b.category)),
        SortKey::IngredientsCountAsc => recipes.sort_by_cached_key(|r| r.ingredient_count()),
        SortKey::IngredientsCountDesc => {
            recipes.sort_by_cached_key(|r| std::cmp::Reverse(r.ingredient_count()))
        }
    }
}

/// Number of recipes the "newest" ordering cannot date.
pub fn unnumbered_ids(recipes: &[&Recipe]) -> usize {
    recipes.iter().filter(|r| r.id.as_number().is_none()).count()
}

/// Larger numeric ids are newer. Ids that are not numbers have no age, so
/// they go after every numeric id and keep their relative order.
fn newest_first(a: &Recipe, b: &Recipe) -> Ordering {
    match (a.id.as_number(), b.id.as_number()) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A query with its text filters lower-cased once up front.
struct Filter<'q> {
    text: String,
    category: &'q str,
    ingredient: String,
}

impl<'q> Filter<'q> {
    fn new(query: &'q Query) -> Self {
        Filter {
            text: query.text.to_lowercase(),
            category: &query.category,
            ingredient: query.ingredient.to_lowercase(),
        }
    }

    fn matches(&self, recipe: &Recipe) -> bool {
        let needs_ingredients = !self.text.is_empty() || !self.ingredient.is_empty();
        let ingredients = if needs_ingredients {
            recipe.ingredients.to_lowercase()
        } else {
            String::new()
        };

        let by_text = self.text.is_empty()
            || recipe.title.to_lowercase().contains(&self.text)
            || ingredients.contains(&self.text)
            || recipe.category.to_lowercase().contains(&self.text);
        let by_category = self.category.is_empty() || recipe.category == self.category;
        let by_ingredient = self.ingredient.is_empty() || ingredients.contains(&self.ingredient);

        by_text && by_category && by_ingredient
    }
}
