use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the visible recipes.
///
/// Parses from the names used by the sort control (`"newest"`,
/// `"title_asc"`, ...). Any other name means "keep the stored order".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Unsorted,
    Newest,
    TitleAsc,
    TitleDesc,
    Category,
    IngredientsCountAsc,
    IngredientsCountDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Unsorted => "",
            SortKey::Newest => "newest",
            SortKey::TitleAsc => "title_asc",
            SortKey::TitleDesc => "title_desc",
            SortKey::Category => "category",
            SortKey::IngredientsCountAsc => "ingredients_count_asc",
            SortKey::IngredientsCountDesc => "ingredients_count_desc",
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "newest" => SortKey::Newest,
            "title_asc" => SortKey::TitleAsc,
            "title_desc" => SortKey::TitleDesc,
            "category" => SortKey::Category,
            "ingredients_count_asc" => SortKey::IngredientsCountAsc,
            "ingredients_count_desc" => SortKey::IngredientsCountDesc,
            _ => SortKey::Unsorted,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

impl From<String> for SortKey {
    fn from(name: String) -> Self {
        SortKey::parse(&name)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and sort settings for the visible recipe list.
///
/// Empty filter strings match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    /// Case-insensitive text matched against title, ingredients and category
    pub text: String,
    /// Exact, case-sensitive category
    pub category: String,
    /// Case-insensitive text matched against the ingredients block
    pub ingredient: String,
    pub sort: SortKey,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = ingredient.into();
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true when no filter is set.
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty() && self.category.is_empty() && self.ingredient.is_empty()
    }
}
