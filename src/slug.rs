//! Slug generation for items and categories.
//!
//! Every deep link on the site is addressed by a slug derived here. Slugs
//! must be stable across builds: published URLs and the sitemap depend on
//! the same `(name, value)` pair always producing the same slug.
//!
//! Item slugs are `slugify(name)` plus a short hash fragment of the value,
//! so several items sharing a display name (many catalogues have half a
//! dozen "Happy" faces) still resolve to distinct addresses.

use crate::types::Item;

/// Fallback base when an item name slugifies to nothing.
const ITEM_FALLBACK: &str = "kaomoji";
/// Fallback when a category label slugifies to nothing.
const CATEGORY_FALLBACK: &str = "category";
/// Hash fragment length appended to item slugs.
const FRAGMENT_LEN: usize = 6;

/// Convert arbitrary text into a URL-safe slug.
///
/// Lowercases, collapses every run of non-`[a-z0-9]` characters into a
/// single `-`, and trims leading/trailing dashes. Input with no alphanumeric
/// ASCII at all (most kaomoji values) yields the empty string — callers
/// substitute a fallback.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Deterministic short hash of `input`, rendered in base-36.
///
/// Rolls `h = h * 31 + code` over the UTF-16 code units of the input with
/// 32-bit signed wrap-around, then strips the sign. UTF-16 units (not chars)
/// keep fragments stable for astral-plane values such as emoji. Distinct
/// inputs may collide; the index resolves collisions, not the hash.
pub fn hash_fragment(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    to_base36(hash.unsigned_abs())
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base-36 digits are ASCII")
}

/// Stable slug for an item: `slugify(name)` (or `kaomoji` when the name has
/// no sluggable characters) + `-` + the first six base-36 digits of the
/// value hash.
pub fn create_kaomoji_slug(item: &Item) -> String {
    let base = slugify(&item.name);
    let base = if base.is_empty() { ITEM_FALLBACK } else { &base };
    let fragment: String = hash_fragment(&item.value)
        .chars()
        .take(FRAGMENT_LEN)
        .collect();
    format!("{base}-{fragment}")
}

/// Stable slug for a top-level category label.
pub fn create_category_slug(label: &str) -> String {
    let base = slugify(label);
    if base.is_empty() {
        CATEGORY_FALLBACK.to_string()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, value: &str) -> Item {
        Item {
            name: name.to_string(),
            value: value.to_string(),
            is_long: None,
        }
    }

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("Happy & Joyful"), "happy-joyful");
    }

    #[test]
    fn slugify_collapses_symbol_runs() {
        assert_eq!(slugify("a---b!!!c"), "a-b-c");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  Table Flip  "), "table-flip");
        assert_eq!(slugify("!wow!"), "wow");
    }

    #[test]
    fn slugify_all_symbols_is_empty() {
        assert_eq!(slugify("(^ω^)"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Faces"), "top-10-faces");
    }

    #[test]
    fn hash_fragment_is_deterministic() {
        assert_eq!(hash_fragment("(^ω^)"), hash_fragment("(^ω^)"));
    }

    #[test]
    fn hash_fragment_differs_for_different_values() {
        assert_ne!(hash_fragment("(^ω^)"), hash_fragment("(´∀｀)"));
    }

    #[test]
    fn hash_fragment_is_base36_without_sign() {
        let frag = hash_fragment("(╯°□°）╯︵ ┻━┻");
        assert!(!frag.is_empty());
        assert!(frag.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn hash_fragment_of_empty_input() {
        assert_eq!(hash_fragment(""), "0");
    }

    #[test]
    fn kaomoji_slug_shape() {
        let slug = create_kaomoji_slug(&item("Happy", "(^ω^)"));
        assert!(slug.starts_with("happy-"));
        let fragment = slug.strip_prefix("happy-").unwrap();
        assert!(!fragment.is_empty() && fragment.len() <= 6);
    }

    #[test]
    fn kaomoji_slug_is_stable() {
        let a = create_kaomoji_slug(&item("Happy", "(^ω^)"));
        let b = create_kaomoji_slug(&item("Happy", "(^ω^)"));
        assert_eq!(a, b);
    }

    #[test]
    fn same_name_different_value_distinct_slugs() {
        let a = create_kaomoji_slug(&item("Happy", "(^ω^)"));
        let b = create_kaomoji_slug(&item("Happy", "(´∀｀)"));
        assert_ne!(a, b);
    }

    #[test]
    fn symbolic_name_falls_back() {
        let slug = create_kaomoji_slug(&item("(^_^)", "(^_^)"));
        assert!(slug.starts_with("kaomoji-"));
    }

    #[test]
    fn category_slug_basic() {
        assert_eq!(create_category_slug("Happy & Joyful"), "happy-joyful");
    }

    #[test]
    fn category_slug_falls_back() {
        assert_eq!(create_category_slug("★★★"), "category");
    }
}
