//! Shared catalogue types used across all pipeline stages.
//!
//! The catalogue is loaded once at startup ([`crate::catalogue`]), indexed
//! ([`crate::index`]), and read-only from then on. Filtering produces new
//! structures and never mutates these.

use serde::{Deserialize, Serialize};

/// A single catalogue entry: a kaomoji, emoji, or symbol.
///
/// `value` is the literal character sequence the user copies. It need not be
/// unique across the catalogue; the `(name, value)` pair is what slugs are
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    /// Display label shown above the value (e.g. "Table Flip").
    pub name: String,
    /// The character sequence itself (e.g. `(╯°□°）╯︵ ┻━┻`).
    pub value: String,
    /// Layout hint: wide entries get a full-width card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_long: Option<bool>,
}

/// A named group of items inside a top-level category.
///
/// Order of `items` is display order and is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubCategory {
    /// Group label (e.g. "Smiles").
    pub label: String,
    /// One-to-two sentence description shown under the group heading.
    pub description: String,
    pub items: Vec<Item>,
}

/// A top-level catalogue category (e.g. "Happy & Joyful").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopCategory {
    /// Category label, also the source of the category slug.
    pub label: String,
    pub sub_categories: Vec<SubCategory>,
}

/// The full nested kaomoji dataset, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalogue {
    pub categories: Vec<TopCategory>,
}

impl Catalogue {
    /// Total number of items reachable from the catalogue.
    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.sub_categories)
            .map(|s| s.items.len())
            .sum()
    }

    /// Iterate every item with its enclosing category and subcategory.
    pub fn walk(&self) -> impl Iterator<Item = (&TopCategory, &SubCategory, &Item)> {
        self.categories.iter().flat_map(|top| {
            top.sub_categories
                .iter()
                .flat_map(move |sub| sub.items.iter().map(move |item| (top, sub, item)))
        })
    }
}

/// A flat single-level library section, used for the emoji and symbol
/// libraries. Same items, one less nesting level than [`Catalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibrarySection {
    /// Section label (e.g. "Smileys & People").
    pub label: String,
    pub items: Vec<Item>,
}

/// A flat library: ordered sections of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Library {
    pub sections: Vec<LibrarySection>,
}

impl Library {
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
