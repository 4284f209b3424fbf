//! Shared test fixtures for the kaodex test suite.
//!
//! The sample catalogue is small enough to reason about by eye but covers
//! the shapes the pipeline cares about: multiple categories, multiple
//! subcategories per category, duplicate-free and name-overlapping items.

use crate::types::{Catalogue, Item, Library, LibrarySection, SubCategory, TopCategory};

pub fn item(name: &str, value: &str) -> Item {
    Item {
        name: name.to_string(),
        value: value.to_string(),
        is_long: None,
    }
}

fn sub(label: &str, description: &str, items: Vec<Item>) -> SubCategory {
    SubCategory {
        label: label.to_string(),
        description: description.to_string(),
        items,
    }
}

/// Three categories, four subcategories, seven items.
///
/// Walk order: Happy, Grinning, Joyful, Crying, Sobbing, Cat, Dog.
pub fn sample_catalogue() -> Catalogue {
    Catalogue {
        categories: vec![
            TopCategory {
                label: "Happy & Joyful".to_string(),
                sub_categories: vec![
                    sub(
                        "Smiles",
                        "Soft, friendly faces for everyday good moods.",
                        vec![item("Happy", "(^ω^)"), item("Grinning", "(´∀｀)")],
                    ),
                    sub(
                        "Celebration",
                        "Arms-up faces for great news.",
                        vec![item("Joyful", "＼(￣▽￣)／")],
                    ),
                ],
            },
            TopCategory {
                label: "Sad & Crying".to_string(),
                sub_categories: vec![sub(
                    "Tears",
                    "For when words fall short.",
                    vec![item("Crying", "(;´Д｀)"), item("Sobbing", "(T_T)")],
                )],
            },
            TopCategory {
                label: "Animals".to_string(),
                sub_categories: vec![sub(
                    "Pets",
                    "The companions.",
                    vec![item("Cat", "(=^･ω･^=)"), item("Dog", "(´・(oo)・｀)")],
                )],
            },
        ],
    }
}

/// Two flat sections, four items.
pub fn sample_library() -> Library {
    Library {
        sections: vec![
            LibrarySection {
                label: "Stars".to_string(),
                items: vec![item("Black Star", "★"), item("White Star", "☆")],
            },
            LibrarySection {
                label: "Arrows".to_string(),
                items: vec![item("Rightwards Arrow", "→"), item("Leftwards Arrow", "←")],
            },
        ],
    }
}
