//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every entity is
//! its semantic identity (label, name, value), with counts as secondary
//! context. Each command has a `format_*` function returning `Vec<String>`
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Happy & Joyful (8 kaomoji)
//!     Smiles — Soft, friendly faces for everyday good moods...
//!         Happy  (^ω^)
//!         Grinning  (´∀｀)
//! ```

use crate::catalogue::Dataset;
use crate::generate::SiteReport;
use crate::types::Catalogue;
use std::path::Path;

/// Indentation: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of the loaded datasets: every category with its subcategories
/// and item counts, plus the flat library totals.
pub fn format_check_output(dataset: &Dataset) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Catalogue".to_string());
    for category in &dataset.catalogue.categories {
        let count: usize = category.sub_categories.iter().map(|s| s.items.len()).sum();
        lines.push(format!("{} ({count} kaomoji)", category.label));
        for sub in &category.sub_categories {
            lines.push(format!(
                "{}{} ({} kaomoji) — {}",
                indent(1),
                sub.label,
                sub.items.len(),
                truncate(&sub.description, 48),
            ));
        }
    }

    lines.push(String::new());
    lines.push("Libraries".to_string());
    lines.push(format!(
        "{}emoji: {} in {} sections",
        indent(1),
        dataset.emoji.item_count(),
        dataset.emoji.sections.len(),
    ));
    lines.push(format!(
        "{}symbols: {} in {} sections",
        indent(1),
        dataset.symbols.item_count(),
        dataset.symbols.sections.len(),
    ));

    lines
}

pub fn print_check_output(dataset: &Dataset) {
    for line in format_check_output(dataset) {
        println!("{line}");
    }
}

// ============================================================================
// Search
// ============================================================================

/// A filtered catalogue as an indented tree. Empty results get a one-line
/// notice instead of silence.
pub fn format_search_results(results: &Catalogue, query: &str) -> Vec<String> {
    if results.categories.is_empty() {
        return vec![format!("No kaomoji match {query:?}")];
    }

    let mut lines = Vec::new();
    for category in &results.categories {
        lines.push(category.label.clone());
        for sub in &category.sub_categories {
            lines.push(format!("{}{}", indent(1), sub.label));
            for item in &sub.items {
                lines.push(format!("{}{}  {}", indent(2), item.name, item.value));
            }
        }
    }
    let total: usize = results
        .categories
        .iter()
        .flat_map(|c| &c.sub_categories)
        .map(|s| s.items.len())
        .sum();
    lines.push(String::new());
    lines.push(format!("{total} kaomoji match {query:?}"));
    lines
}

pub fn print_search_results(results: &Catalogue, query: &str) {
    for line in format_search_results(results, query) {
        println!("{line}");
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &SiteReport, output_dir: &Path) -> Vec<String> {
    vec![
        format!(
            "Generated {} category pages, {} detail pages, {} library pages, {} static pages",
            report.category_pages, report.detail_pages, report.library_pages, report.static_pages,
        ),
        format!("Sitemap: {} URLs", report.sitemap_urls),
        format!("Site generated at {}", output_dir.display()),
    ]
}

pub fn print_build_output(report: &SiteReport, output_dir: &Path) {
    for line in format_build_output(report, output_dir) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Dataset;
    use crate::filter::filter_catalogue;
    use crate::test_helpers::{sample_catalogue, sample_library};

    fn dataset() -> Dataset {
        Dataset {
            catalogue: sample_catalogue(),
            emoji: sample_library(),
            symbols: sample_library(),
        }
    }

    #[test]
    fn check_output_lists_categories_and_counts() {
        let lines = format_check_output(&dataset());
        assert_eq!(lines[0], "Catalogue");
        assert!(lines.iter().any(|l| l.contains("Happy & Joyful (3 kaomoji)")));
        assert!(lines.iter().any(|l| l.contains("emoji: 4 in 2 sections")));
    }

    #[test]
    fn search_output_is_an_indented_tree() {
        let catalogue = sample_catalogue();
        let results = filter_catalogue(&catalogue, "cat");
        let lines = format_search_results(&results, "cat");
        assert_eq!(lines[0], "Animals");
        assert_eq!(lines[1], "    Pets");
        assert!(lines[2].starts_with("        Cat"));
        assert!(lines.last().unwrap().contains("1 kaomoji match"));
    }

    #[test]
    fn empty_search_gets_a_notice() {
        let catalogue = sample_catalogue();
        let results = filter_catalogue(&catalogue, "zzz");
        let lines = format_search_results(&results, "zzz");
        assert_eq!(lines, vec!["No kaomoji match \"zzz\"".to_string()]);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("★★★★★", 3), "★★★...");
        assert_eq!(truncate("short", 10), "short");
    }
}
