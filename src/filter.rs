//! The search/filter engine.
//!
//! Narrows a catalogue (or flat library) to the items matching a free-text
//! query while preserving the surrounding hierarchy. Substring containment
//! is the entire matching algorithm: an item survives when its lowercased
//! name contains the lowercased query, or its value contains the raw query.
//! Values are compared without case folding since kaomoji and symbol
//! characters are rarely alphabetic.
//!
//! Both filters are pure. An empty (or all-whitespace) query borrows the
//! input untouched; anything else allocates a new tree of shallow-copied
//! containers, so the original is never mutated.

use crate::types::{Catalogue, Item, Library, LibrarySection, SubCategory, TopCategory};
use std::borrow::Cow;

/// Does `item` match the prepared query?
///
/// `query_lower` must already be lowercased; `query_raw` is the trimmed
/// original used for value comparison.
fn matches(item: &Item, query_lower: &str, query_raw: &str) -> bool {
    item.name.to_lowercase().contains(query_lower) || item.value.contains(query_raw)
}

/// Narrow the nested catalogue to items matching `query`.
///
/// Subcategories left with zero items are dropped, then categories left
/// with zero subcategories. Relative order of everything that survives is
/// preserved.
pub fn filter_catalogue<'c>(catalogue: &'c Catalogue, query: &str) -> Cow<'c, Catalogue> {
    let query_raw = query.trim();
    if query_raw.is_empty() {
        return Cow::Borrowed(catalogue);
    }
    let query_lower = query_raw.to_lowercase();

    let categories: Vec<TopCategory> = catalogue
        .categories
        .iter()
        .filter_map(|top| {
            let sub_categories: Vec<SubCategory> = top
                .sub_categories
                .iter()
                .filter_map(|sub| {
                    let items: Vec<Item> = sub
                        .items
                        .iter()
                        .filter(|item| matches(item, &query_lower, query_raw))
                        .cloned()
                        .collect();
                    (!items.is_empty()).then(|| SubCategory {
                        label: sub.label.clone(),
                        description: sub.description.clone(),
                        items,
                    })
                })
                .collect();
            (!sub_categories.is_empty()).then(|| TopCategory {
                label: top.label.clone(),
                sub_categories,
            })
        })
        .collect();

    Cow::Owned(Catalogue { categories })
}

/// Narrow a flat library to items matching `query`; same algorithm as
/// [`filter_catalogue`] minus one nesting level.
pub fn filter_library<'l>(library: &'l Library, query: &str) -> Cow<'l, Library> {
    let query_raw = query.trim();
    if query_raw.is_empty() {
        return Cow::Borrowed(library);
    }
    let query_lower = query_raw.to_lowercase();

    let sections: Vec<LibrarySection> = library
        .sections
        .iter()
        .filter_map(|section| {
            let items: Vec<Item> = section
                .items
                .iter()
                .filter(|item| matches(item, &query_lower, query_raw))
                .cloned()
                .collect();
            (!items.is_empty()).then(|| LibrarySection {
                label: section.label.clone(),
                items,
            })
        })
        .collect();

    Cow::Owned(Library { sections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_catalogue, sample_library};
    use std::borrow::Cow;

    #[test]
    fn empty_query_borrows_input_unchanged() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(*result, catalogue);
    }

    #[test]
    fn whitespace_query_borrows_input_unchanged() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "   \t");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(*result, catalogue);
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "CAT");
        let names: Vec<&str> = result.walk().map(|(_, _, i)| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cat"]);
    }

    #[test]
    fn query_cat_narrows_to_animals_pets() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "cat");
        assert_eq!(result.categories.len(), 1);
        let top = &result.categories[0];
        assert_eq!(top.label, "Animals");
        assert_eq!(top.sub_categories.len(), 1);
        assert_eq!(top.sub_categories[0].label, "Pets");
        assert_eq!(top.sub_categories[0].items.len(), 1);
        assert_eq!(top.sub_categories[0].items[0].value, "(=^･ω･^=)");
    }

    #[test]
    fn value_match_uses_raw_query() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "ω");
        // "(^ω^)", "(´;ω;`)"-like values and the cat all contain ω.
        assert!(result.walk().all(|(_, _, i)| i.value.contains('ω')));
        assert!(result.item_count() >= 2);
    }

    #[test]
    fn every_survivor_matches_the_contract() {
        let catalogue = sample_catalogue();
        for query in ["a", "ing", "(", "zz", "Happy"] {
            let result = filter_catalogue(&catalogue, query);
            let lower = query.to_lowercase();
            for (_, _, item) in result.walk() {
                assert!(
                    item.name.to_lowercase().contains(&lower) || item.value.contains(query),
                    "{:?} leaked through query {query:?}",
                    item.name
                );
            }
        }
    }

    #[test]
    fn no_empty_containers_leak_through() {
        let catalogue = sample_catalogue();
        for query in ["cat", "ing", "no-match-at-all", "("] {
            let result = filter_catalogue(&catalogue, query);
            for top in &result.categories {
                assert!(!top.sub_categories.is_empty(), "empty category for {query:?}");
                for sub in &top.sub_categories {
                    assert!(!sub.items.is_empty(), "empty subcategory for {query:?}");
                }
            }
        }
    }

    #[test]
    fn no_match_yields_empty_catalogue() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "zzzzzz");
        assert!(result.categories.is_empty());
    }

    #[test]
    fn relative_order_is_preserved() {
        let catalogue = sample_catalogue();
        let result = filter_catalogue(&catalogue, "ing");
        let names: Vec<&str> = result.walk().map(|(_, _, i)| i.name.as_str()).collect();
        // Grinning, Crying, Sobbing keep declaration order.
        assert_eq!(names, vec!["Grinning", "Crying", "Sobbing"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let catalogue = sample_catalogue();
        let before = catalogue.clone();
        let _ = filter_catalogue(&catalogue, "cat");
        assert_eq!(catalogue, before);
    }

    #[test]
    fn library_filter_mirrors_catalogue_filter() {
        let library = sample_library();
        let result = filter_library(&library, "star");
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].label, "Stars");
        assert!(result.sections[0]
            .items
            .iter()
            .all(|i| i.name.to_lowercase().contains("star")));
    }

    #[test]
    fn library_empty_query_borrows() {
        let library = sample_library();
        let result = filter_library(&library, "  ");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn library_value_match() {
        let library = sample_library();
        let result = filter_library(&library, "★");
        assert_eq!(result.item_count(), 1);
        assert_eq!(result.sections[0].items[0].value, "★");
    }
}
