//! Static HTML site generation.
//!
//! Final stage of the kaodex pipeline: takes the [`SiteContext`] and
//! renders the whole site into the output directory.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): search box plus the full nested catalogue
//! - **Category pages** (`/category/{slug}/index.html`): one per top
//!   category
//! - **Detail pages** (`/kaomoji/{slug}/index.html`): one per indexed item,
//!   with related faces from the same subcategory
//! - **Libraries** (`/emoji/index.html`, `/symbol/index.html`): the flat
//!   emoji and symbol collections
//! - **How to Use** (`/how-to-use/index.html`): markdown content
//! - **Not found** (`/404.html`): catch-all for unknown slugs
//! - **Sitemap** (`/sitemap.xml`): every route above, absolute against the
//!   configured base URL
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! type-safe templates, automatic XSS escaping, no runtime template files.
//! CSS and the copy/search script are embedded at compile time; colors come
//! from `config.toml` as CSS custom properties.
//!
//! Detail pages dominate the page count, so they render on the rayon pool.

use crate::config::{self, SiteConfig};
use crate::controller::SiteContext;
use crate::index::IndexEntry;
use crate::routes::{self, MENU_ROUTES};
use crate::types::{Item, Library, SubCategory, TopCategory};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");
const HOW_TO_USE_MD: &str = include_str!("../content/how-to-use.md");

/// How many related faces a detail page shows.
const RELATED_COUNT: usize = 5;

/// Counts of what was written, for CLI output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SiteReport {
    pub category_pages: usize,
    pub detail_pages: usize,
    pub library_pages: usize,
    pub static_pages: usize,
    pub sitemap_urls: usize,
}

pub fn generate(
    ctx: &SiteContext,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<SiteReport, GenerateError> {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let mut report = SiteReport::default();

    fs::create_dir_all(output_dir)?;

    let home = render_home(ctx, config, &css);
    fs::write(output_dir.join("index.html"), home.into_string())?;
    report.static_pages += 1;

    let how_to = render_markdown_page(config, &css, HOW_TO_USE_MD, "/how-to-use/");
    write_page(output_dir, "how-to-use", how_to)?;
    report.static_pages += 1;

    let emoji = render_library_page(
        config,
        &css,
        "Emoji Library",
        "Search, discover, and copy your favorite emoji.",
        &ctx.emoji,
        "/emoji/",
    );
    write_page(output_dir, "emoji", emoji)?;
    let symbols = render_library_page(
        config,
        &css,
        "Symbol Library",
        "Stars, arrows, music, and marks — one click to copy.",
        &ctx.symbols,
        "/symbol/",
    );
    write_page(output_dir, "symbol", symbols)?;
    report.library_pages = 2;

    for (slug, pos) in ctx.categories.entries() {
        let category = &ctx.catalogue.categories[pos];
        let page = render_category_page(ctx, config, &css, category, slug);
        write_page(output_dir, &format!("category/{slug}"), page)?;
        report.category_pages += 1;
    }

    // Detail pages: by far the most files, rendered in parallel.
    let entries = ctx.index.list_all_entries();
    entries
        .par_iter()
        .try_for_each(|entry| -> Result<(), GenerateError> {
            let page = render_detail_page(ctx, config, &css, entry);
            write_page(output_dir, &format!("kaomoji/{}", entry.slug), page)
        })?;
    report.detail_pages = entries.len();

    let not_found = render_not_found(config, &css);
    fs::write(output_dir.join("404.html"), not_found.into_string())?;
    report.static_pages += 1;

    let sitemap = routes::sitemap_entries(&config.site.base_url, &ctx.categories, &ctx.index);
    report.sitemap_urls = sitemap.len();
    fs::write(output_dir.join("sitemap.xml"), routes::render_sitemap(&sitemap))?;

    Ok(report)
}

/// Write a page at `{dir}/index.html` so its URL is the clean `/{dir}/`.
fn write_page(output_dir: &Path, dir: &str, page: Markup) -> Result<(), GenerateError> {
    let page_dir = output_dir.join(dir);
    fs::create_dir_all(&page_dir)?;
    fs::write(page_dir.join("index.html"), page.into_string())?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// The base HTML document: head with title/description/canonical, embedded
/// styles, body content, and the copy/search script.
fn base_document(
    config: &SiteConfig,
    css: &str,
    title: &str,
    description: &str,
    path: &str,
    content: Markup,
) -> Markup {
    let canonical = format!("{}{path}", config.site.base_url.trim_end_matches('/'));
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical);
                style { (PreEscaped(css.to_string())) }
            }
            body {
                (site_header(config, path))
                main {
                    (content)
                }
                script { (PreEscaped(JS.to_string())) }
            }
        }
    }
}

fn site_header(config: &SiteConfig, current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (config.site.title) }
            nav.site-nav {
                ul {
                    @for route in MENU_ROUTES {
                        @let is_current = route.path == current_path;
                        li class=[is_current.then_some("current")] {
                            a href=(route.path) { (route.label) }
                        }
                    }
                }
            }
        }
    }
}

/// A clickable card. The whole card carries `data-copy`/`data-name`, which
/// the embedded script uses for clipboard writes and live search.
fn kaomoji_card(item: &Item, link: Option<&str>) -> Markup {
    let long = item.is_long.unwrap_or(false);
    let class = if long { "kaomoji-card long" } else { "kaomoji-card" };
    html! {
        div class=(class) data-copy=(item.value) data-name=(item.name) title="Click to copy" {
            span.value { (item.value) }
            span.name {
                @if let Some(href) = link {
                    a href=(href) { (item.name) }
                } @else {
                    (item.name)
                }
            }
        }
    }
}

fn subcategory_block(ctx: &SiteContext, sub: &SubCategory) -> Markup {
    html! {
        section.subcategory-block {
            h3 { (sub.label) }
            p.subcategory-description { (sub.description) }
            div.card-grid {
                @for item in &sub.items {
                    (kaomoji_card(item, Some(&ctx.resolve_item(item).route)))
                }
            }
        }
    }
}

fn category_block(ctx: &SiteContext, category: &TopCategory, slug: &str) -> Markup {
    html! {
        section.category-block {
            h2 {
                a href=(routes::category(slug)) { (category.label) }
            }
            @for sub in &category.sub_categories {
                (subcategory_block(ctx, sub))
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(ctx: &SiteContext, config: &SiteConfig, css: &str) -> Markup {
    let content = html! {
        h1 { "Discover Kaomoji" }
        p { "Search our collection or browse by category." }
        input.search-box data-search type="search" placeholder="Search by emotion, animal, or action...";
        @for (slug, pos) in ctx.categories.entries() {
            (category_block(ctx, &ctx.catalogue.categories[pos], slug))
        }
    };
    base_document(
        config,
        css,
        &config.site.title,
        &config.site.description,
        "/",
        content,
    )
}

fn render_category_page(
    ctx: &SiteContext,
    config: &SiteConfig,
    css: &str,
    category: &TopCategory,
    slug: &str,
) -> Markup {
    let total: usize = category.sub_categories.iter().map(|s| s.items.len()).sum();
    let description = format!(
        "Dive into {} kaomoji across {} moods and scenarios, and copy expressive text faces in one click.",
        category.label.to_lowercase(),
        category.sub_categories.len(),
    );
    let content = html! {
        p.breadcrumb {
            a href="/" { "All categories" }
            " › "
            (category.label)
        }
        h1 { (category.label) " Kaomoji" }
        p { "Featuring " (total) "+ curated kaomoji across " (category.sub_categories.len()) " moods and scenarios." }
        @for sub in &category.sub_categories {
            (subcategory_block(ctx, sub))
        }
    };
    let title = format!("{} Kaomoji | {}", category.label, config.site.title);
    base_document(config, css, &title, &description, &routes::category(slug), content)
}

fn render_detail_page(
    ctx: &SiteContext,
    config: &SiteConfig,
    css: &str,
    entry: &IndexEntry,
) -> Markup {
    // Related faces: same subcategory, the item itself excluded. First
    // five in declaration order so builds are reproducible.
    let related: Vec<&Item> = ctx
        .catalogue
        .walk()
        .filter(|(top, sub, item)| {
            top.label == entry.top_category
                && sub.label == entry.sub_category
                && item.value != entry.item.value
        })
        .map(|(_, _, item)| item)
        .take(RELATED_COUNT)
        .collect();

    let path = routes::kaomoji_detail(&entry.slug);
    let content = html! {
        p.breadcrumb {
            a href="/" { "All categories" }
            " › "
            a href=(routes::category(&crate::slug::create_category_slug(&entry.top_category))) {
                (entry.top_category)
            }
            " › "
            (entry.item.name)
        }
        h1 { (entry.item.name) }
        div.detail-value {
            (kaomoji_card(&entry.item, None))
        }
        p { (entry.sub_category_description) }
        @if !related.is_empty() {
            section {
                h2 { "Related Kaomoji" }
                div.card-grid {
                    @for item in &related {
                        (kaomoji_card(item, Some(&ctx.resolve_item(item).route)))
                    }
                }
            }
        }
    };
    let title = format!("{} {} | {}", entry.item.name, entry.item.value, config.site.title);
    let description = format!(
        "{} kaomoji {} from the {} collection. Click to copy.",
        entry.item.name, entry.item.value, entry.sub_category,
    );
    base_document(config, css, &title, &description, &path, content)
}

fn render_library_page(
    config: &SiteConfig,
    css: &str,
    title: &str,
    intro: &str,
    library: &Library,
    path: &str,
) -> Markup {
    let content = html! {
        h1 { (title) }
        p { (intro) }
        input.search-box data-search type="search" placeholder="Search...";
        @for section in &library.sections {
            section.category-block {
                h2 { (section.label) }
                div.card-grid {
                    @for item in &section.items {
                        (kaomoji_card(item, None))
                    }
                }
            }
        }
    };
    let full_title = format!("{title} | {}", config.site.title);
    base_document(config, css, &full_title, intro, path, content)
}

fn render_markdown_page(config: &SiteConfig, css: &str, markdown: &str, path: &str) -> Markup {
    let mut body = String::new();
    md_html::push_html(&mut body, Parser::new(markdown));
    let title = markdown
        .lines()
        .find_map(|l| l.strip_prefix("# "))
        .unwrap_or(config.site.title.as_str())
        .trim();
    let full_title = format!("{title} | {}", config.site.title);
    let content = html! {
        (PreEscaped(body))
    };
    base_document(config, css, &full_title, &config.site.description, path, content)
}

fn render_not_found(config: &SiteConfig, css: &str) -> Markup {
    let content = html! {
        div.not-found {
            h1 { "(´･ω･`)?" }
            p { "That page wandered off. It may have been renamed or never existed." }
            p {
                a href="/" { "Back to the catalogue" }
            }
        }
    };
    base_document(
        config,
        css,
        &format!("Not Found | {}", config.site.title),
        "Page not found.",
        "/404.html",
        content,
    )
}
