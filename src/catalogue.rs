//! Catalogue loading and validation.
//!
//! Stage 1 of the kaodex build pipeline. The datasets are static
//! configuration shipped with the binary: three TOML files embedded at
//! compile time, overridable by a `--data` directory for people who curate
//! their own collections.
//!
//! ## Data Files
//!
//! ```text
//! data/
//! ├── kaomoji.toml     # Nested: category → subcategory → items
//! ├── emoji.toml       # Flat: section → items
//! └── symbols.toml     # Flat: section → items
//! ```
//!
//! ## Validation
//!
//! The loader enforces the structural rules the rest of the pipeline
//! assumes:
//! - every subcategory has at least one item
//! - every category has at least one subcategory
//! - every library section has at least one item
//!
//! Everything downstream (index, filter, generate) treats the loaded data
//! as immutable.

use crate::types::{Catalogue, Library};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {0}: {1}")]
    Toml(String, toml::de::Error),
    #[error("Category {0:?} has no subcategories")]
    EmptyCategory(String),
    #[error("Subcategory {0:?} in category {1:?} has no items")]
    EmptySubCategory(String, String),
    #[error("Library section {0:?} has no items")]
    EmptySection(String),
}

const KAOMOJI_TOML: &str = include_str!("../data/kaomoji.toml");
const EMOJI_TOML: &str = include_str!("../data/emoji.toml");
const SYMBOLS_TOML: &str = include_str!("../data/symbols.toml");

/// All datasets the site is built from, loaded and validated together.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalogue: Catalogue,
    pub emoji: Library,
    pub symbols: Library,
}

/// Load the embedded datasets, or the same three files from `data_dir` when
/// one is given. A missing override file falls back to the embedded copy,
/// so curators can replace just the catalogue and keep the stock libraries.
pub fn load(data_dir: Option<&Path>) -> Result<Dataset, CatalogueError> {
    let catalogue: Catalogue = read_toml(data_dir, "kaomoji.toml", KAOMOJI_TOML)?;
    let emoji: Library = read_toml(data_dir, "emoji.toml", EMOJI_TOML)?;
    let symbols: Library = read_toml(data_dir, "symbols.toml", SYMBOLS_TOML)?;

    validate_catalogue(&catalogue)?;
    validate_library(&emoji)?;
    validate_library(&symbols)?;

    Ok(Dataset {
        catalogue,
        emoji,
        symbols,
    })
}

fn read_toml<T: serde::de::DeserializeOwned>(
    data_dir: Option<&Path>,
    file_name: &str,
    embedded: &str,
) -> Result<T, CatalogueError> {
    let (content, origin) = match data_dir.map(|d| d.join(file_name)) {
        Some(path) if path.exists() => (fs::read_to_string(&path)?, path),
        _ => (embedded.to_string(), PathBuf::from(file_name)),
    };
    toml::from_str(&content)
        .map_err(|e| CatalogueError::Toml(origin.display().to_string(), e))
}

fn validate_catalogue(catalogue: &Catalogue) -> Result<(), CatalogueError> {
    for category in &catalogue.categories {
        if category.sub_categories.is_empty() {
            return Err(CatalogueError::EmptyCategory(category.label.clone()));
        }
        for sub in &category.sub_categories {
            if sub.items.is_empty() {
                return Err(CatalogueError::EmptySubCategory(
                    sub.label.clone(),
                    category.label.clone(),
                ));
            }
        }
    }
    Ok(())
}

fn validate_library(library: &Library) -> Result<(), CatalogueError> {
    for section in &library.sections {
        if section.items.is_empty() {
            return Err(CatalogueError::EmptySection(section.label.clone()));
        }
    }
    Ok(())
}
