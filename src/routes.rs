//! The site's routing surface.
//!
//! Every page the generator emits has a stable path defined here; the
//! navigation menu and the sitemap are derived from the same tables so the
//! three can never disagree. Deep links are slug-addressed:
//! `/category/{slug}/` and `/kaomoji/{slug}/`.

use crate::index::{CatalogueIndex, CategoryIndex};

/// A top-level menu route: key, path, display label.
pub struct MenuRoute {
    pub key: &'static str,
    pub path: &'static str,
    pub label: &'static str,
}

/// Menu routes in display order. The home route is the index page.
pub const MENU_ROUTES: &[MenuRoute] = &[
    MenuRoute {
        key: "home",
        path: "/",
        label: "Home",
    },
    MenuRoute {
        key: "how-to-use",
        path: "/how-to-use/",
        label: "How to Use",
    },
    MenuRoute {
        key: "emoji",
        path: "/emoji/",
        label: "Emoji",
    },
    MenuRoute {
        key: "symbol",
        path: "/symbol/",
        label: "Symbol",
    },
];

pub fn category(slug: &str) -> String {
    format!("/category/{slug}/")
}

pub fn kaomoji_detail(slug: &str) -> String {
    format!("/kaomoji/{slug}/")
}

// ============================================================================
// Sitemap
// ============================================================================

/// How often a sitemap URL is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` element of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Build the full sitemap entry list: menu routes, then one entry per
/// category, then one per indexed item. Priorities follow the original
/// site's scheme (home 1.0, menu 0.8, category 0.7, item 0.5).
pub fn sitemap_entries(
    base_url: &str,
    categories: &CategoryIndex,
    index: &CatalogueIndex,
) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let absolute = |path: &str| format!("{base}{path}");

    let mut entries = Vec::with_capacity(MENU_ROUTES.len() + categories.len() + index.len());

    for route in MENU_ROUTES {
        let is_home = route.key == "home";
        entries.push(SitemapEntry {
            loc: absolute(route.path),
            changefreq: if is_home {
                ChangeFrequency::Daily
            } else {
                ChangeFrequency::Weekly
            },
            priority: if is_home { 1.0 } else { 0.8 },
        });
    }

    for (slug, _) in categories.entries() {
        entries.push(SitemapEntry {
            loc: absolute(&category(slug)),
            changefreq: ChangeFrequency::Weekly,
            priority: 0.7,
        });
    }

    for entry in index.list_all_entries() {
        entries.push(SitemapEntry {
            loc: absolute(&kaomoji_detail(&entry.slug)),
            changefreq: ChangeFrequency::Monthly,
            priority: 0.5,
        });
    }

    entries
}

/// Render sitemap entries as a `sitemap.xml` document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.loc),
            entry.changefreq.as_str(),
            entry.priority,
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
