//! # Kaodex
//!
//! A static site generator and toolbox for a kaomoji, emoji, and symbol
//! catalogue. The datasets are static configuration shipped with the
//! binary: categories of text faces, flat emoji and symbol libraries, all
//! addressed by stable SEO-friendly slugs.
//!
//! # Architecture: Load → Index → Render
//!
//! ```text
//! 1. Load      data/*.toml  →  Dataset       (embedded TOML → validated model)
//! 2. Index     Dataset      →  SiteContext   (slug → entry lookup tables)
//! 3. Render    SiteContext  →  dist/         (final HTML site + sitemap)
//! ```
//!
//! The split keeps each stage a pure function over immutable data: the
//! catalogue never mutates after load, the indices never mutate after
//! build, and rendering only reads. Search ([`filter`]) and generation
//! ([`ai`], [`controller`]) sit beside the pipeline as library modules the
//! CLI exposes directly.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalogue`] | Stage 1 — loads and validates the TOML datasets |
//! | [`index`] | Stage 2 — slug → entry and category-slug → category tables |
//! | [`generate`] | Stage 3 — renders the HTML site with Maud |
//! | [`types`] | The catalogue data model shared by every stage |
//! | [`slug`] | Slug and hash-fragment generation for deep links |
//! | [`filter`] | The pure substring search engine |
//! | [`routes`] | Site paths, menu table, and sitemap construction |
//! | [`controller`] | `SiteContext` plus the generation state machine |
//! | [`ai`] | The external generation service (trait + HTTP client) |
//! | [`config`] | `config.toml` loading, validation, and color CSS |
//! | [`output`] | CLI output formatting — pure formatters, print wrappers |
//!
//! # Design Decisions
//!
//! ## Slugs Never Change
//!
//! Published URLs are the product. Item slugs combine the slugified name
//! with a six-character hash of the value, so renames of surrounding
//! structure never move a page. Slug collisions resolve first-wins at
//! index build; the colliding later item simply isn't addressable, which
//! beats silently renumbering every URL after it.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked templates, type-safe interpolation, XSS-safe by default, and no
//! template directory to ship.
//!
//! ## The Generation Service Is a Seam
//!
//! Everything creative is delegated to an OpenAI-compatible endpoint
//! behind the [`ai::GenerationService`] trait. The CLI wires in the
//! blocking HTTP client; tests wire in a scripted double. Failures are
//! values, surfaced once, never panics.

pub mod ai;
pub mod catalogue;
pub mod config;
pub mod controller;
pub mod filter;
pub mod generate;
pub mod index;
pub mod output;
pub mod routes;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
