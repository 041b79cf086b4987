use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Stable identifier of a recipe.
///
/// Ids created by this library are millisecond timestamps rendered as
/// decimal strings, but any string read from storage is accepted as-is.
/// Numeric ids in stored data are read as their decimal spelling and
/// written back as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(RecipeId(id)),
            Value::Number(n) => Ok(RecipeId(n.to_string())),
            other => Err(D::Error::custom(format!(
                "expected a string or number id, found {other}"
            ))),
        }
    }
}

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        RecipeId(id.into())
    }

    /// Builds the id used for a recipe created at the given instant.
    pub fn from_millis(millis: u64) -> Self {
        RecipeId(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the id as a number, the way the "newest" ordering needs it.
    ///
    /// Returns `None` for ids that are not numeric (including the empty id),
    /// so callers can decide where such records go instead of coercing them.
    pub fn as_number(&self) -> Option<f64> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId(id.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        RecipeId(id)
    }
}

/// A single user-entered recipe.
///
/// Field names are persisted in camelCase so collections written by earlier
/// versions of the app load unchanged. Text fields that are missing or `null`
/// in stored data come back as empty strings; numbers and booleans come back
/// as their JSON spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prep_time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub servings: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ingredients: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub steps: String,
    /// Embedded image payload, usually a `data:` URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl Recipe {
    /// Returns the ingredient tokens in the order they were written.
    pub fn ingredient_tokens(&self) -> impl Iterator<Item = &str> {
        tokenize_ingredients(&self.ingredients)
    }

    /// Number of ingredient tokens, used by the ingredient-count orderings.
    pub fn ingredient_count(&self) -> usize {
        self.ingredient_tokens().count()
    }

    /// Returns the category, or `None` when it is empty.
    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

/// Splits a free-text ingredients block into tokens.
///
/// Tokens are separated by newlines (`\n` or `\r\n`) or commas, trimmed, and
/// empty tokens are dropped. This is the only place the block is parsed;
/// faceting, counting and card previews all go through it.
pub fn tokenize_ingredients(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_tokenize_newlines_and_commas() {
        let tokens: Vec<&str> = tokenize_ingredients("salt, water\r\n flour \n\n,sugar").collect();
        assert_eq!(tokens, vec!["salt", "water", "flour", "sugar"]);
    }

    #[test]
    fn test_tokenize_empty_block() {
        assert_eq!(tokenize_ingredients("").count(), 0);
        assert_eq!(tokenize_ingredients(" ,\n, ").count(), 0);
    }

    #[test]
    fn test_ingredient_count() {
        let recipe = Recipe {
            ingredients: "eggs\nmilk, flour".to_string(),
            ..Default::default()
        };
        assert_eq!(recipe.ingredient_count(), 3);
    }

    #[test]
    fn test_id_as_number() {
        assert_eq!(RecipeId::from("1700000000000").as_number(), Some(1.7e12));
        assert_eq!(RecipeId::from_millis(42).as_str(), "42");
        assert_eq!(RecipeId::from("imported-7").as_number(), None);
        assert_eq!(RecipeId::from("").as_number(), None);
        assert_eq!(RecipeId::from("NaN").as_number(), None);
    }

    #[test]
    fn test_deserialize_stored_shape() {
        let json = indoc! {r#"
            {
              "id": "1700000000000",
              "title": "Soup",
              "category": "Dinner",
              "prepTime": "30 min",
              "servings": "4",
              "ingredients": "salt, water",
              "steps": "Boil.",
              "image": null
            }"#};

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id.as_str(), "1700000000000");
        assert_eq!(recipe.prep_time, "30 min");
        assert_eq!(recipe.category(), Some("Dinner"));
        assert!(recipe.image.is_none());
    }

    #[test]
    fn test_deserialize_missing_and_null_fields() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id":"1","title":"Toast","category":null}"#).unwrap();
        assert_eq!(recipe.title, "Toast");
        assert_eq!(recipe.category, "");
        assert_eq!(recipe.category(), None);
        assert_eq!(recipe.ingredients, "");
    }

    #[test]
    fn test_deserialize_numbers_as_text() {
        let json = r#"{"id":1700000000000,"title":"Soup","servings":4,"prepTime":1.5,"steps":true}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id.as_str(), "1700000000000");
        assert_eq!(recipe.id.as_number(), Some(1.7e12));
        assert_eq!(recipe.servings, "4");
        assert_eq!(recipe.prep_time, "1.5");
        assert_eq!(recipe.steps, "true");

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["servings"], "4");
    }

    #[test]
    fn test_deserialize_rejects_structured_fields() {
        assert!(serde_json::from_str::<Recipe>(r#"{"id":"1","title":["a"]}"#).is_err());
        assert!(serde_json::from_str::<Recipe>(r#"{"id":null,"title":"a"}"#).is_err());
        assert!(serde_json::from_str::<Recipe>(r#"{"id":{"n":1}}"#).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let recipe = Recipe {
            id: RecipeId::from("1"),
            prep_time: "5 min".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["prepTime"], "5 min");
        assert!(value["image"].is_null());
    }
}
