//! Locale-aware string comparison for title and category ordering.
//!
//! Uses the Unicode Collation Algorithm with the CLDR root collation, so
//! accented and extended Latin letters sort with their base letters and
//! lowercase comes before uppercase when nothing else differs.

use feruca::Collator;
use std::cmp::Ordering;

/// A reusable collator; sorting keeps one for the whole pass.
pub struct LocaleCollator {
    collator: Collator,
}

impl LocaleCollator {
    pub fn new() -> Self {
        LocaleCollator {
            collator: Collator::default(),
        }
    }

    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.collator.collate(a, b)
    }
}

impl Default for LocaleCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares two strings once. Prefer [`LocaleCollator`] when comparing many.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    LocaleCollator::new().compare(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zucchini", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Cake", "cake"), Ordering::Greater);
        assert_eq!(locale_cmp("cake", "cake"), Ordering::Equal);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(locale_cmp("éclair", "fudge"), Ordering::Less);
        assert_eq!(locale_cmp("čokoláda", "dort"), Ordering::Less);
        assert_eq!(locale_cmp("cote", "côte"), Ordering::Less);
    }

    #[test]
    fn test_extended_latin_letters() {
        assert_eq!(locale_cmp("Ștrudel", "Zucchini"), Ordering::Less);
        assert_eq!(locale_cmp("Œufs", "Pancakes"), Ordering::Less);
        assert_eq!(locale_cmp("æbleskiver", "banana"), Ordering::Less);
        assert_eq!(locale_cmp("Łosoś", "Makaron"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(locale_cmp("", "a"), Ordering::Less);
        assert_eq!(locale_cmp("soup", "soups"), Ordering::Less);
    }

    #[test]
    fn test_collator_is_reusable() {
        let mut collator = LocaleCollator::new();
        let mut words = vec!["Zucchini", "Ștrudel", "apple", "Œufs"];
        words.sort_by(|a, b| collator.compare(a, b));
        assert_eq!(words, vec!["apple", "Œufs", "Ștrudel", "Zucchini"]);
    }
}
