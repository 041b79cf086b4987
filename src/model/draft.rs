use super::recipe::{Recipe, RecipeId};
use serde::{Deserialize, Serialize};

/// Raw values from the add/edit form before they become a [`Recipe`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDraft {
    pub title: String,
    pub category: String,
    pub prep_time: String,
    pub servings: String,
    pub ingredients: String,
    pub steps: String,
    pub image: Option<String>,
}

impl RecipeDraft {
    /// Pre-fills a draft with an existing recipe, image included.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        RecipeDraft {
            title: recipe.title.clone(),
            category: recipe.category.clone(),
            prep_time: recipe.prep_time.clone(),
            servings: recipe.servings.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            image: recipe.image.clone(),
        }
    }

    /// Turns the draft into a recipe with the given id.
    ///
    /// Text fields are trimmed; an empty image payload counts as no image.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            title: trimmed(self.title),
            category: trimmed(self.category),
            prep_time: trimmed(self.prep_time),
            servings: trimmed(self.servings),
            ingredients: trimmed(self.ingredients),
            steps: trimmed(self.steps),
            image: self.image.filter(|payload| !payload.trim().is_empty()),
        }
    }
}

fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_recipe_trims_fields() {
        let draft = RecipeDraft {
            title: "  Pancakes ".to_string(),
            category: "Breakfast\n".to_string(),
            ingredients: "\n eggs, milk \n".to_string(),
            image: Some("   ".to_string()),
            ..Default::default()
        };

        let recipe = draft.into_recipe(RecipeId::from("7"));
        assert_eq!(recipe.id.as_str(), "7");
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.category, "Breakfast");
        assert_eq!(recipe.ingredients, "eggs, milk");
        assert!(recipe.image.is_none());
    }

    #[test]
    fn test_from_recipe_keeps_image() {
        let recipe = Recipe {
            id: RecipeId::from("1"),
            title: "Cake".to_string(),
            image: Some("data:image/png;base64,AAAA".to_string()),
            ..Default::default()
        };

        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.title, "Cake");
        assert_eq!(draft.clone().into_recipe(recipe.id.clone()), recipe);
    }
}
